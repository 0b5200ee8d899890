mod response;

pub use response::{print_json_result, split_cmd_result};
