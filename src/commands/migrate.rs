use clap::Args;
use serde::Serialize;

use gfxmigrate::log_status;
use gfxmigrate::report::{self, FileReport, MigrationSummary, WriteFailure};
use gfxmigrate::rules;
use gfxmigrate::scanner;
use gfxmigrate::utils::io;
use gfxmigrate::walker;

use super::{CmdResult, ScanArgs};

#[derive(Args, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Report what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Serialize)]
pub struct MigrateOutput {
    pub summary: MigrationSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileReport>,
}

pub fn run(args: MigrateArgs) -> CmdResult<MigrateOutput> {
    let rules_set = rules::rewrite_rules();
    rules::validate_rewrite_order(&rules_set)?;

    let roots = super::resolve_roots(&args.scan)?;
    let profile = rules::migrate_profile();

    let mut summary = MigrationSummary {
        dry_run: args.dry_run,
        ..Default::default()
    };
    let mut files = Vec::new();

    for root in &roots {
        for file in walker::walk(root, &profile) {
            let content = match io::read_file(&file) {
                Ok(content) => content,
                Err(err) => {
                    log_status!("migrate", "Skipping {}: {}", file.display(), err);
                    continue;
                }
            };
            summary.files_scanned += 1;

            let outcome = scanner::rewrite_content(&content, &rules_set, &[]);
            if outcome.total == 0 {
                continue;
            }

            let path = file.to_string_lossy().to_string();
            let file_report = FileReport {
                path: path.clone(),
                replacements: outcome.total,
                per_rule: outcome.per_rule,
            };

            if !args.scan.json {
                report::print_file_report(&file_report);
            }

            if args.dry_run {
                summary.files_changed += 1;
            } else {
                match io::write_file_atomic(&file, &outcome.content) {
                    Ok(()) => summary.files_changed += 1,
                    Err(err) => {
                        // Surfaced distinctly: a silent write failure would
                        // leave the user believing the migration succeeded.
                        log_status!("migrate", "FAILED to write {}: {}", path, err);
                        summary.failed_writes.push(WriteFailure {
                            path: path.clone(),
                            reason: err.to_string(),
                        });
                    }
                }
            }

            summary.total_replacements += outcome.total;
            files.push(file_report);
        }
    }

    if !args.scan.json {
        report::print_migration_summary(&summary);
    }

    let exit_code = if summary.failed_writes.is_empty() { 0 } else { 1 };

    Ok((MigrateOutput { summary, files }, exit_code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args(dir: &str, dry_run: bool) -> MigrateArgs {
        MigrateArgs {
            scan: ScanArgs {
                roots: vec![],
                dir: Some(dir.to_string()),
                json: true,
            },
            dry_run,
        }
    }

    const PAGE: &str = "className=\"shadow-lg\"\n";

    /// A directory squatting on the temp-file path makes the atomic write
    /// fail while the candidate file itself stays readable.
    fn seed_with_blocked_write(tmp: &tempfile::TempDir) {
        fs::write(tmp.path().join("page.tsx"), PAGE).unwrap();
        fs::create_dir(tmp.path().join("page.tsx.tmp")).unwrap();
    }

    #[test]
    fn failed_write_is_listed_and_fails_the_run() {
        let tmp = tempfile::tempdir().unwrap();
        seed_with_blocked_write(&tmp);
        let dir = tmp.path().to_string_lossy().to_string();

        let (output, exit_code) = run(args(&dir, false)).unwrap();

        assert_eq!(exit_code, 1);
        assert_eq!(output.summary.failed_writes.len(), 1);
        assert!(output.summary.failed_writes[0].path.ends_with("page.tsx"));
        assert_eq!(output.summary.files_changed, 0);

        // The original content must survive a failed write.
        let content = fs::read_to_string(tmp.path().join("page.tsx")).unwrap();
        assert_eq!(content, PAGE);
    }

    #[test]
    fn dry_run_never_attempts_a_write() {
        let tmp = tempfile::tempdir().unwrap();
        seed_with_blocked_write(&tmp);
        let dir = tmp.path().to_string_lossy().to_string();

        let (output, exit_code) = run(args(&dir, true)).unwrap();

        assert_eq!(exit_code, 0);
        assert!(output.summary.failed_writes.is_empty());
        assert_eq!(output.summary.files_changed, 1);
        assert_eq!(output.summary.total_replacements, 1);
    }
}
