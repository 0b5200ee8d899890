//! Line-scoped scanning: audit findings and migration rewriting.
//!
//! Both entry points are pure functions over one file's content. The
//! caller decides whether a rewrite is persisted, which is what makes
//! dry-run reporting identical to a real run. Matching is textual and
//! line-scoped by design: patterns spanning lines are never detected, and
//! a token inside a string literal that merely resembles a legacy class
//! will be rewritten. The tool trades that precision for speed over a
//! large tree.

use regex::Regex;
use serde::Serialize;

use crate::rules::{AuditRule, RewriteRule, Severity};

const EXCERPT_MAX_CHARS: usize = 120;

/// One detected occurrence of a disallowed pattern on a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub path: String,
    /// 1-based line number.
    pub line: u32,
    /// Description of the rule that fired.
    pub rule: String,
    pub severity: Severity,
    /// Non-overlapping matches on the line.
    pub count: u32,
    /// Trimmed, truncated copy of the line for display.
    pub excerpt: String,
}

/// Replacement count for a single rewrite rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleHit {
    pub rule: String,
    pub count: usize,
}

/// Result of rewriting one file's content. Never touches the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub content: String,
    pub total: usize,
    pub per_rule: Vec<RuleHit>,
}

/// Scan `content` and report every (line, rule) pair that fires.
///
/// A line matching any global suppression predicate is skipped entirely;
/// a rule's own `exclude` suppresses only that rule on that line.
pub fn audit_content(
    path: &str,
    content: &str,
    rules: &[AuditRule],
    suppressions: &[Regex],
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        if suppressions.iter().any(|s| s.is_match(line)) {
            continue;
        }

        for rule in rules {
            let count = rule.matcher.find_iter(line).count();
            if count == 0 {
                continue;
            }
            if let Some(exclude) = &rule.exclude {
                if exclude.is_match(line) {
                    continue;
                }
            }

            findings.push(Finding {
                path: path.to_string(),
                line: (idx + 1) as u32,
                rule: rule.description.to_string(),
                severity: rule.severity,
                count: count as u32,
                excerpt: excerpt(line),
            });
        }
    }

    findings
}

/// Rewrite every legacy token in `content`, applying rules in rule-set
/// order. Each rule's output is visible to the rules after it on the same
/// line; the startup self-check guarantees that never corrupts a match.
///
/// Line terminators are preserved byte-for-byte, including a missing final
/// newline.
pub fn rewrite_content(
    content: &str,
    rules: &[RewriteRule],
    suppressions: &[Regex],
) -> RewriteOutcome {
    let mut counts = vec![0usize; rules.len()];
    let mut out = String::with_capacity(content.len());

    for segment in content.split_inclusive('\n') {
        let (line, terminator) = split_terminator(segment);

        if suppressions.iter().any(|s| s.is_match(line)) {
            out.push_str(segment);
            continue;
        }

        let rewritten = rewrite_line(line, rules, &mut counts);
        match rewritten {
            Some(new_line) => {
                out.push_str(&new_line);
                out.push_str(terminator);
            }
            None => out.push_str(segment),
        }
    }

    let total = counts.iter().sum();
    let per_rule = rules
        .iter()
        .zip(&counts)
        .filter(|(_, &c)| c > 0)
        .map(|(rule, &count)| RuleHit {
            rule: rule.description(),
            count,
        })
        .collect();

    RewriteOutcome {
        content: out,
        total,
        per_rule,
    }
}

/// Apply all rules to one line. Returns `None` when nothing matched so the
/// caller can reuse the original segment unchanged.
fn rewrite_line(line: &str, rules: &[RewriteRule], counts: &mut [usize]) -> Option<String> {
    let mut current: Option<String> = None;

    for (i, rule) in rules.iter().enumerate() {
        let haystack = current.as_deref().unwrap_or(line);
        let matches = rule.find_matches(haystack);
        if matches.is_empty() {
            continue;
        }
        counts[i] += matches.len();
        current = Some(splice(haystack, &matches, rule.canonical));
    }

    current
}

/// Replace each matched span with `replacement`. Spans come from
/// `find_iter` and are therefore ordered and non-overlapping.
fn splice(s: &str, matches: &[(usize, usize)], replacement: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last = 0;
    for &(start, end) in matches {
        out.push_str(&s[last..start]);
        out.push_str(replacement);
        last = end;
    }
    out.push_str(&s[last..]);
    out
}

fn split_terminator(segment: &str) -> (&str, &str) {
    if let Some(line) = segment.strip_suffix("\r\n") {
        (line, "\r\n")
    } else if let Some(line) = segment.strip_suffix('\n') {
        (line, "\n")
    } else {
        (segment, "")
    }
}

/// Truncate on char boundaries; byte slicing can panic mid-codepoint.
fn excerpt(line: &str) -> String {
    let trimmed = line.trim();
    let mut out = String::new();
    for (i, ch) in trimmed.chars().enumerate() {
        if i >= EXCERPT_MAX_CHARS {
            out.push_str("...");
            break;
        }
        out.push(ch);
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{
        inline_effect_rules, rewrite_rules, unprotected_rules, unprotected_suppressions,
    };

    fn rx(p: &str) -> Regex {
        Regex::new(p).unwrap()
    }

    #[test]
    fn hardcoded_box_shadow_is_one_critical_finding() {
        let content = r#"<div style={{ boxShadow: "0 2px 4px rgba(0,0,0,0.5)" }} />"#;
        let findings = audit_content("app/page.tsx", content, &inline_effect_rules(), &[]);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert_eq!(findings[0].rule, "hardcoded boxShadow");
        assert_eq!(findings[0].line, 1);
        assert_eq!(findings[0].count, 1);
    }

    #[test]
    fn token_protected_box_shadow_is_clean() {
        let content = "<div style={{ boxShadow: var(--gfx-shadow) }} />";
        let findings = audit_content("app/page.tsx", content, &inline_effect_rules(), &[]);
        assert!(findings.is_empty());
    }

    #[test]
    fn exclude_guard_suppresses_template_literal_with_token() {
        let content = r#"boxShadow: `0 0 ${glow} var(--gfx-shadow-soft)`"#;
        let findings = audit_content("x.tsx", content, &inline_effect_rules(), &[]);
        assert!(findings.is_empty());
    }

    #[test]
    fn suppressed_line_produces_no_finding_for_any_rule() {
        let rules = unprotected_rules();
        let sup = unprotected_suppressions();

        // gfx- on the line marks it already migrated.
        let migrated = r#"className="gfx-shadow-elevated-lg shadow-lg""#;
        assert!(audit_content("x.tsx", migrated, &rules, &sup).is_empty());

        // Commented-out code is exempt.
        let commented = r#"// className="shadow-lg""#;
        assert!(audit_content("x.tsx", commented, &rules, &sup).is_empty());
    }

    #[test]
    fn all_matches_on_a_line_are_counted() {
        let rules = unprotected_rules();
        let content = r#"className="shadow-lg hover:shadow-sm""#;
        let findings = audit_content("x.tsx", content, &rules, &[]);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].count, 2);
    }

    #[test]
    fn findings_carry_one_based_line_numbers() {
        let content = "const a = 1;\nconst b = 'shadow-md';\n";
        let findings = audit_content("x.ts", content, &unprotected_rules(), &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 2);
    }

    #[test]
    fn long_lines_are_truncated_on_char_boundaries() {
        let content = format!("shadow-lg {}", "ü".repeat(300));
        let findings = audit_content("x.tsx", &content, &unprotected_rules(), &[]);
        assert!(findings[0].excerpt.ends_with("..."));
        assert!(findings[0].excerpt.chars().count() <= EXCERPT_MAX_CHARS + 3);
    }

    #[test]
    fn migrates_shadow_class_and_keeps_the_rest() {
        let outcome = rewrite_content(
            "className=\"shadow-lg rounded-full\"\n",
            &rewrite_rules(),
            &[],
        );

        assert_eq!(
            outcome.content,
            "className=\"gfx-shadow-elevated-lg rounded-full\"\n"
        );
        assert_eq!(outcome.total, 1);
        assert_eq!(outcome.per_rule.len(), 1);
        assert_eq!(outcome.per_rule[0].rule, "shadow-lg -> gfx-shadow-elevated-lg");
        assert_eq!(outcome.per_rule[0].count, 1);
    }

    #[test]
    fn migration_is_idempotent() {
        let input = "a shadow-2xl b\nbackdrop-blur-3xl backdrop-blur-sm\nshadow-md\n";
        let rules = rewrite_rules();

        let first = rewrite_content(input, &rules, &[]);
        assert!(first.total > 0);

        let second = rewrite_content(&first.content, &rules, &[]);
        assert_eq!(second.total, 0);
        assert_eq!(second.content, first.content);
    }

    #[test]
    fn backdrop_blur_output_is_not_rewritten_again_in_the_same_pass() {
        // backdrop-blur-3xl rewrites to gfx-backdrop-blur-xl before the
        // backdrop-blur-xl rule runs; that rule must not fire on the output.
        let outcome = rewrite_content("backdrop-blur-3xl\n", &rewrite_rules(), &[]);
        assert_eq!(outcome.content, "gfx-backdrop-blur-xl\n");
        assert_eq!(outcome.total, 1);
    }

    #[test]
    fn adjacent_tokens_are_both_replaced() {
        let outcome = rewrite_content("shadow-lg shadow-md\n", &rewrite_rules(), &[]);
        assert_eq!(
            outcome.content,
            "gfx-shadow-elevated-lg gfx-shadow-elevated-md\n"
        );
        assert_eq!(outcome.total, 2);
    }

    #[test]
    fn custom_and_special_variants_are_untouched() {
        let input = "shadow-lg-custom shadow-none shadow-inner shadow-[0_2px]\n";
        let outcome = rewrite_content(input, &rewrite_rules(), &[]);
        assert_eq!(outcome.content, input);
        assert_eq!(outcome.total, 0);
    }

    #[test]
    fn suppressed_line_is_never_rewritten() {
        let sup = vec![rx("^\\s*//")];
        let input = "// shadow-lg stays\nshadow-lg goes\n";
        let outcome = rewrite_content(input, &rewrite_rules(), &sup);
        assert_eq!(
            outcome.content,
            "// shadow-lg stays\ngfx-shadow-elevated-lg goes\n"
        );
        assert_eq!(outcome.total, 1);
    }

    #[test]
    fn line_terminators_are_preserved() {
        let input = "shadow-sm\r\nplain\r\nshadow-md";
        let outcome = rewrite_content(input, &rewrite_rules(), &[]);
        assert_eq!(
            outcome.content,
            "gfx-shadow-elevated-sm\r\nplain\r\ngfx-shadow-elevated-md"
        );
    }

    #[test]
    fn untouched_content_is_returned_verbatim() {
        let input = "nothing to see\nhere at all";
        let outcome = rewrite_content(input, &rewrite_rules(), &[]);
        assert_eq!(outcome.content, input);
        assert_eq!(outcome.total, 0);
        assert!(outcome.per_rule.is_empty());
    }
}
