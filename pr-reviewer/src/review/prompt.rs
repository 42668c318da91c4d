//! Prompt builder for the single review request.
//!
//! The diff is embedded verbatim; oversized diffs are not trimmed.

use git_context_engine::ReviewConfig;

/// Issue categories used when the repository config names none.
pub const DEFAULT_FOCUS_AREAS: [&str; 7] = [
    "Bugs and logic errors",
    "Security vulnerabilities",
    "Performance problems",
    "Code style and readability issues",
    "Leftover TODO/FIXME comments",
    "Dead or unreachable code",
    "Missing error handling",
];

/// Exact reply the model is asked to give for a clean diff.
pub const NO_ISSUES_SENTINEL: &str = "No issues found.";

const PERSONA: &str = "You are a senior software engineer doing a code review of a GitHub pull request. \
Review the diff below and report only real, actionable problems.";

/// Builds the review prompt from the diff and the repository config.
pub fn build_review_prompt(diff: &str, cfg: &ReviewConfig) -> String {
    let mut s = String::with_capacity(diff.len() + 1024);

    if let Some(prefix) = cfg.prompt_prefix.as_deref().map(str::trim) {
        if !prefix.is_empty() {
            s.push_str(prefix);
            s.push_str("\n\n");
        }
    }

    s.push_str(PERSONA);
    s.push_str("\n\n# Diff\n```diff\n");
    s.push_str(diff);
    if !diff.ends_with('\n') {
        s.push('\n');
    }
    s.push_str("```\n");

    s.push_str("\n# Look for\n");
    let custom: Vec<&str> = cfg
        .focus_areas
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .collect();
    let areas: &[&str] = if custom.is_empty() {
        &DEFAULT_FOCUS_AREAS
    } else {
        &custom
    };
    for area in areas {
        s.push_str("- ");
        s.push_str(area);
        s.push('\n');
    }

    s.push_str("\n# Format\n");
    s.push_str("- Use bullet points.\n");
    s.push_str("- Group findings by file, with the file path as a heading.\n");
    s.push_str("- Be specific and suggest a concrete fix for each finding.\n");
    s.push_str(&format!(
        "- If there is nothing to report, reply exactly: {NO_ISSUES_SENTINEL}\n"
    ));
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIFF: &str = "diff --git a/src/lib.rs b/src/lib.rs\n+fn main() {}\n";

    #[test]
    fn default_prompt_lists_builtin_focus_areas() {
        let p = build_review_prompt(DIFF, &ReviewConfig::default());

        assert!(p.starts_with(PERSONA));
        assert!(p.contains(DIFF));
        for area in DEFAULT_FOCUS_AREAS {
            assert!(p.contains(&format!("- {area}\n")), "missing {area}");
        }
        assert!(p.contains(NO_ISSUES_SENTINEL));
        assert!(p.contains("Group findings by file"));
    }

    #[test]
    fn config_prefix_and_focus_areas_take_over() {
        let cfg = ReviewConfig {
            prompt_prefix: Some("This repo is a payments service.".into()),
            focus_areas: vec!["SQL injection".into(), "  ".into(), "Rounding".into()],
        };
        let p = build_review_prompt(DIFF, &cfg);

        assert!(p.starts_with("This repo is a payments service.\n\n"));
        assert!(p.contains("- SQL injection\n- Rounding\n"));
        assert!(!p.contains(DEFAULT_FOCUS_AREAS[0]));
    }

    #[test]
    fn blank_prefix_is_skipped() {
        let cfg = ReviewConfig {
            prompt_prefix: Some("   ".into()),
            focus_areas: vec![],
        };
        assert!(build_review_prompt(DIFF, &cfg).starts_with(PERSONA));
    }

    #[test]
    fn diff_is_fenced_even_without_trailing_newline() {
        let p = build_review_prompt("+x", &ReviewConfig::default());
        assert!(p.contains("```diff\n+x\n```\n"));
    }
}
