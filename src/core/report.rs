//! Aggregation and human-readable output for audit and migration runs.
//!
//! Findings stream to stdout as they are discovered; the summaries here
//! only accumulate running totals. The structs are Serialize so the same
//! values feed the `--json` envelope unchanged.

use serde::Serialize;

use crate::rules::Severity;
use crate::scanner::{Finding, RuleHit};

/// Helper for `skip_serializing_if` on zero-value usize fields.
fn is_zero(v: &usize) -> bool {
    *v == 0
}

/// Running totals for an audit run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditSummary {
    pub files_scanned: usize,
    pub total_occurrences: usize,
    #[serde(skip_serializing_if = "is_zero")]
    pub critical: usize,
    #[serde(skip_serializing_if = "is_zero")]
    pub warnings: usize,
}

impl AuditSummary {
    pub fn record(&mut self, finding: &Finding) {
        self.total_occurrences += finding.count as usize;
        match finding.severity {
            Severity::Critical => self.critical += finding.count as usize,
            Severity::Warning => self.warnings += finding.count as usize,
        }
    }
}

/// Per-file migration detail: replacement total and per-rule breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub replacements: usize,
    pub per_rule: Vec<RuleHit>,
}

/// A file the writer committed to but could not persist.
#[derive(Debug, Clone, Serialize)]
pub struct WriteFailure {
    pub path: String,
    pub reason: String,
}

/// Running totals for a migration run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationSummary {
    pub files_scanned: usize,
    pub files_changed: usize,
    pub total_replacements: usize,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_writes: Vec<WriteFailure>,
}

const SEPARATOR_WIDTH: usize = 50;

pub fn print_finding(finding: &Finding) {
    println!(
        "[{}] {}:{} -> {}",
        finding.severity, finding.path, finding.line, finding.rule
    );
    println!("   {}", finding.excerpt);
}

pub fn print_audit_summary(summary: &AuditSummary) {
    println!("{}", "=".repeat(SEPARATOR_WIDTH));
    println!(
        "{} occurrence(s) across {} file(s)",
        summary.total_occurrences, summary.files_scanned
    );
    if summary.total_occurrences == 0 {
        println!("No findings.");
        return;
    }
    println!("   critical: {} (must be fixed)", summary.critical);
    println!("   warning:  {} (review manually)", summary.warnings);
    if summary.critical > 0 {
        println!("Critical findings must move to var(--gfx-*) tokens or gfx-* classes.");
    }
}

pub fn print_file_report(report: &FileReport) {
    println!("{}: {} replacement(s)", report.path, report.replacements);
    for hit in &report.per_rule {
        println!("   {} ({}x)", hit.rule, hit.count);
    }
}

pub fn print_migration_summary(summary: &MigrationSummary) {
    println!("{}", "=".repeat(SEPARATOR_WIDTH));
    println!(
        "{} file(s) changed, {} replacement(s){}",
        summary.files_changed,
        summary.total_replacements,
        if summary.dry_run {
            " (dry run, nothing written)"
        } else {
            ""
        }
    );
    if summary.total_replacements == 0 {
        println!("No legacy classes left to replace.");
    }
    for failure in &summary.failed_writes {
        println!("FAILED to write {}: {}", failure.path, failure.reason);
    }
}

// ============================================================================
// Tests
// ============================================================================
