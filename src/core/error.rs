use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Root directory not found: {0}")]
    RootNotFound(String),

    #[error("Invalid rule set: {0}")]
    RuleSet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::Config(_) => "CONFIG_ERROR",
            Error::RootNotFound(_) => "ROOT_NOT_FOUND",
            Error::RuleSet(_) => "RULE_SET_ERROR",
            Error::Io(_) => "IO_ERROR",
        }
    }

    /// Process exit status for this error class.
    ///
    /// Configuration errors stop the run before any scanning and exit 2;
    /// operational errors exit 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::RootNotFound(_) | Error::RuleSet(_) => 2,
            Error::Io(_) => 1,
        }
    }
}
