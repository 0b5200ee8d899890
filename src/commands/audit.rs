use clap::Args;
use regex::Regex;
use serde::Serialize;

use gfxmigrate::log_status;
use gfxmigrate::report::{self, AuditSummary};
use gfxmigrate::rules::{self, AuditRule, ScanProfile};
use gfxmigrate::scanner::{self, Finding};
use gfxmigrate::utils::io;
use gfxmigrate::walker;

use super::{CmdResult, ScanArgs};

#[derive(Args, Debug)]
pub struct AuditArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Exit non-zero when critical findings exist (for CI gating)
    #[arg(long)]
    pub fail_on_findings: bool,
}

#[derive(Serialize)]
pub struct AuditOutput {
    pub mode: &'static str,
    pub summary: AuditSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<Finding>,
}

/// Audit hardcoded inline effect declarations.
pub fn run_inline(args: AuditArgs) -> CmdResult<AuditOutput> {
    run(
        args,
        "audit.inline",
        rules::inline_effect_rules(),
        Vec::new(),
        rules::inline_profile(),
    )
}

/// Audit Tailwind effect utilities not yet replaced by gfx-* classes.
pub fn run_unprotected(args: AuditArgs) -> CmdResult<AuditOutput> {
    run(
        args,
        "audit.unprotected",
        rules::unprotected_rules(),
        rules::unprotected_suppressions(),
        rules::unprotected_profile(),
    )
}

fn run(
    args: AuditArgs,
    mode: &'static str,
    rules: Vec<AuditRule>,
    suppressions: Vec<Regex>,
    profile: ScanProfile,
) -> CmdResult<AuditOutput> {
    let roots = super::resolve_roots(&args.scan)?;

    let mut summary = AuditSummary::default();
    let mut findings = Vec::new();

    for root in &roots {
        for file in walker::walk(root, &profile) {
            let content = match io::read_file(&file) {
                Ok(content) => content,
                Err(err) => {
                    log_status!("audit", "Skipping {}: {}", file.display(), err);
                    continue;
                }
            };
            summary.files_scanned += 1;

            let path = file.to_string_lossy();
            for finding in scanner::audit_content(&path, &content, &rules, &suppressions) {
                summary.record(&finding);
                if !args.scan.json {
                    report::print_finding(&finding);
                }
                findings.push(finding);
            }
        }
    }

    if !args.scan.json {
        report::print_audit_summary(&summary);
    }

    // Findings alone are informational; they gate a pipeline only on request.
    let exit_code = if args.fail_on_findings && summary.critical > 0 {
        1
    } else {
        0
    };

    Ok((
        AuditOutput {
            mode,
            summary,
            findings,
        },
        exit_code,
    ))
}
