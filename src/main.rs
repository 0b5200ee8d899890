use clap::{Parser, Subcommand};
use serde::Serialize;

mod commands;
mod output;

use commands::{audit, migrate};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "gfxmigrate")]
#[command(version = VERSION)]
#[command(about = "Audit and migrate legacy visual-effect styling to GFX design tokens")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report hardcoded inline effect declarations (boxShadow, blur, gradients)
    AuditInline(audit::AuditArgs),
    /// Report Tailwind effect utilities not yet replaced by gfx-* classes
    AuditUnprotected(audit::AuditArgs),
    /// Rewrite legacy Tailwind effect classes to canonical gfx-* classes
    Migrate(migrate::MigrateArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::AuditInline(args) => {
            let json = args.scan.json;
            finish(output::split_cmd_result(audit::run_inline(args)), json)
        }
        Commands::AuditUnprotected(args) => {
            let json = args.scan.json;
            finish(output::split_cmd_result(audit::run_unprotected(args)), json)
        }
        Commands::Migrate(args) => {
            let json = args.scan.json;
            finish(output::split_cmd_result(migrate::run(args)), json)
        }
    };

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

/// Text mode already streamed its output; only errors and the JSON
/// envelope are printed here.
fn finish<T: Serialize>((result, exit_code): (gfxmigrate::Result<T>, i32), json: bool) -> i32 {
    if json {
        output::print_json_result(result);
    } else if let Err(err) = result {
        eprintln!("Error: {}", err);
    }
    exit_code
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
