// Public modules
pub mod error;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod walker;

// Re-export common types for convenience
pub use error::{Error, Result};
pub use report::{AuditSummary, FileReport, MigrationSummary, WriteFailure};
pub use rules::{AuditRule, RewriteRule, ScanProfile, Severity};
pub use scanner::{Finding, RewriteOutcome, RuleHit};
