//! Rule tables for the three scan modes, plus the ordering self-check.
//!
//! Rule order is load-bearing for migration: every rewrite on a line is
//! visible to the rules after it, so a more general rule running first can
//! corrupt the text a more specific rule needs. The original tooling
//! encoded that invariant as bare array order; here the order is validated
//! at startup by [`validate_rewrite_order`].

use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};

/// Severity of an audit finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must be fixed before the migration is considered complete.
    Critical,
    /// Candidate requiring human judgement.
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single audit pattern over one line of text.
#[derive(Debug, Clone)]
pub struct AuditRule {
    /// Label used in report lines.
    pub description: &'static str,
    pub matcher: Regex,
    /// Same-line guard: a match here suppresses an otherwise-positive line.
    pub exclude: Option<Regex>,
    pub severity: Severity,
}

/// A legacy utility-class token and its canonical replacement.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pub legacy: &'static str,
    pub canonical: &'static str,
    matcher: Regex,
}

impl RewriteRule {
    fn new(legacy: &'static str, canonical: &'static str) -> Self {
        Self {
            legacy,
            canonical,
            matcher: rx(&format!(r"\b{}\b", regex::escape(legacy))),
        }
    }

    pub fn description(&self) -> String {
        format!("{} -> {}", self.legacy, self.canonical)
    }

    /// Non-overlapping matches of the legacy token in `line`, restricted to
    /// whole utility-class tokens.
    pub fn find_matches(&self, line: &str) -> Vec<(usize, usize)> {
        self.matcher
            .find_iter(line)
            .filter(|m| hyphen_guarded(line, m.start(), m.end()))
            .map(|m| (m.start(), m.end()))
            .collect()
    }

    pub fn is_token_match(&self, text: &str) -> bool {
        !self.find_matches(text).is_empty()
    }
}

/// `\b` in the matcher already rejects adjacent word characters; the one
/// boundary it cannot express is `-`, which joins larger utility names
/// (`shadow-lg-custom`) and the canonical `gfx-` prefix.
fn hyphen_guarded(line: &str, start: usize, end: usize) -> bool {
    line[..start].chars().next_back() != Some('-') && line[end..].chars().next() != Some('-')
}

fn rx(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static rule pattern must compile")
}

/// Per-mode file selection: eligible suffixes and path-substring exclusions.
#[derive(Debug, Clone, Copy)]
pub struct ScanProfile {
    pub extensions: &'static [&'static str],
    pub exclusions: &'static [&'static str],
}

/// Roots scanned when none are given on the command line.
pub const DEFAULT_ROOTS: &[&str] = &["app", "components"];

const SOURCE_EXTENSIONS: &[&str] = &[".tsx", ".ts", ".jsx", ".js"];
const STYLE_EXTENSIONS: &[&str] = &[".tsx", ".ts", ".jsx", ".js", ".css"];

pub fn inline_profile() -> ScanProfile {
    ScanProfile {
        extensions: SOURCE_EXTENSIONS,
        exclusions: &[
            "node_modules",
            ".next",
            ".git",
            "dist",
            "build",
            "gfx-migrate",
            "gfx-audit",
        ],
    }
}

pub fn unprotected_profile() -> ScanProfile {
    ScanProfile {
        extensions: STYLE_EXTENSIONS,
        exclusions: &[
            "node_modules",
            ".next",
            ".git",
            "dist",
            "build",
            "gfx-migrate",
            "gfx-audit",
            "globals-graphics",
            "gfx-utilities",
        ],
    }
}

pub fn migrate_profile() -> ScanProfile {
    ScanProfile {
        extensions: SOURCE_EXTENSIONS,
        // The gfx token sources themselves must never be rewritten.
        exclusions: &[
            "node_modules",
            ".next",
            ".git",
            "dist",
            "build",
            "globals.css",
            "_variables.css",
            "_base-utilities.css",
            "_component-glows.css",
            "gfx-migrate",
            "gfx-audit",
            "graphics-core",
            "gfx-utilities",
        ],
    }
}

/// Inline hardcoded effect declarations in `style={{ }}` attributes.
pub fn inline_effect_rules() -> Vec<AuditRule> {
    vec![
        AuditRule {
            description: "hardcoded boxShadow",
            matcher: rx(r#"boxShadow\s*:\s*["'`]"#),
            exclude: Some(rx(r"var\(--gfx")),
            severity: Severity::Critical,
        },
        AuditRule {
            description: "hardcoded backdropFilter blur",
            matcher: rx(r#"backdropFilter\s*:\s*["'`][^"'`]*blur"#),
            exclude: Some(rx(r"var\(--gfx")),
            severity: Severity::Critical,
        },
        AuditRule {
            description: "hardcoded drop-shadow filter",
            matcher: rx(r#"filter\s*:\s*["'`][^"'`]*drop-shadow"#),
            exclude: Some(rx(r"var\(--gfx")),
            severity: Severity::Critical,
        },
        AuditRule {
            description: "hardcoded textShadow",
            matcher: rx(r#"textShadow\s*:\s*["'`]"#),
            exclude: Some(rx(r"var\(--gfx")),
            severity: Severity::Warning,
        },
        AuditRule {
            description: "decorative radial-gradient",
            matcher: rx(r"radial-gradient\("),
            exclude: Some(rx(r"mask")),
            severity: Severity::Warning,
        },
        AuditRule {
            description: "inline mix-blend-mode",
            matcher: rx(r"mixBlendMode\s*:"),
            exclude: None,
            severity: Severity::Warning,
        },
    ]
}

/// Tailwind effect utilities that should have been replaced by gfx-* classes.
pub fn unprotected_rules() -> Vec<AuditRule> {
    vec![
        AuditRule {
            description: "shadow-* should be gfx-shadow-*",
            matcher: rx(r"\bshadow-(sm|md|lg|xl|2xl)\b"),
            exclude: None,
            severity: Severity::Critical,
        },
        AuditRule {
            description: "backdrop-blur-* should be gfx-backdrop-blur-*",
            matcher: rx(r"\bbackdrop-blur-(sm|md|lg|xl|2xl|3xl)\b"),
            exclude: None,
            severity: Severity::Critical,
        },
        AuditRule {
            description: "hardcoded blur-[Npx]",
            matcher: rx(r"\bblur-\[\d+px\]"),
            exclude: None,
            severity: Severity::Warning,
        },
        // Heuristic and prone to false positives; kept warning-severity so a
        // human reviews every hit.
        AuditRule {
            description: "light-blob candidate (rounded-full + translucent bg)",
            matcher: rx(r"rounded-full.*bg-.*/\d+|bg-.*/\d+.*rounded-full"),
            exclude: None,
            severity: Severity::Warning,
        },
        AuditRule {
            description: "drop-shadow-* should be gfx-drop-shadow-*",
            matcher: rx(r"\bdrop-shadow-(sm|md|lg|xl|2xl)\b"),
            exclude: None,
            severity: Severity::Critical,
        },
    ]
}

/// Lines that are known-safe contexts for the unprotected audit: already
/// migrated, effect-free variants, CSS masks, or commented out.
pub fn unprotected_suppressions() -> Vec<Regex> {
    vec![
        rx("gfx-"),
        rx("shadow-none"),
        rx("shadow-inner"),
        rx("mask-image"),
        rx("//"),
        rx(r"/\*"),
    ]
}

/// Legacy utility classes and their canonical replacements, in application
/// order: larger tiers before smaller ones within each family.
pub fn rewrite_rules() -> Vec<RewriteRule> {
    vec![
        RewriteRule::new("backdrop-blur-3xl", "gfx-backdrop-blur-xl"),
        RewriteRule::new("backdrop-blur-2xl", "gfx-backdrop-blur-xl"),
        RewriteRule::new("backdrop-blur-xl", "gfx-backdrop-blur-xl"),
        RewriteRule::new("backdrop-blur-lg", "gfx-backdrop-blur-lg"),
        RewriteRule::new("backdrop-blur-md", "gfx-backdrop-blur-md"),
        RewriteRule::new("backdrop-blur-sm", "gfx-backdrop-blur-sm"),
        RewriteRule::new("shadow-2xl", "gfx-shadow-elevated-lg"),
        RewriteRule::new("shadow-xl", "gfx-shadow-elevated-xl"),
        RewriteRule::new("shadow-lg", "gfx-shadow-elevated-lg"),
        RewriteRule::new("shadow-md", "gfx-shadow-elevated-md"),
        RewriteRule::new("shadow-sm", "gfx-shadow-elevated-sm"),
    ]
}

/// Reject rewrite rule sets whose ordering could corrupt matches or whose
/// output the rules themselves would re-match on a second pass.
pub fn validate_rewrite_order(rules: &[RewriteRule]) -> Result<()> {
    for (i, earlier) in rules.iter().enumerate() {
        for later in &rules[i + 1..] {
            if earlier.is_token_match(later.legacy) {
                return Err(Error::RuleSet(format!(
                    "rule '{}' precedes more specific rule '{}' and would corrupt its match",
                    earlier.legacy, later.legacy
                )));
            }
        }
    }

    for rule in rules {
        for other in rules {
            if rule.is_token_match(other.canonical) {
                return Err(Error::RuleSet(format!(
                    "rule '{}' matches canonical replacement '{}'; migration would not be idempotent",
                    rule.legacy, other.canonical
                )));
            }
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
