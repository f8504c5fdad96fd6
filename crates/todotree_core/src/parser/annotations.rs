//! Inline annotation extraction.
//!
//! # Responsibility
//! - Scan task text for `@name(value)`, `>type(params)` and `#type(params)`
//!   occurrences with configurable sigils.
//! - Render and strip tag annotations for text-rewriting mutation paths.
//!
//! # Invariants
//! - Scanning never mutates the input and never fails; malformed fragments
//!   (unterminated parens) simply yield no match.
//! - Matches are collected non-overlapping, left to right.
//! - Nested parentheses inside an argument are not supported: the argument
//!   ends at the first close paren.

use crate::config::Sigils;
use crate::model::task::{ActionRef, OracleRef, Tag};
use once_cell::sync::Lazy;
use regex::Regex;

static DEFAULT_SCANNER: Lazy<AnnotationScanner> =
    Lazy::new(|| AnnotationScanner::new(&Sigils::default()));

/// Compiled extraction patterns for one sigil configuration.
///
/// Built once per configuration; sigils are regex-escaped, so compilation
/// cannot fail for any sigil value.
#[derive(Debug)]
pub struct AnnotationScanner {
    tag_sigil: String,
    tag_re: Regex,
    action_re: Regex,
    oracle_re: Regex,
}

impl AnnotationScanner {
    pub fn new(sigils: &Sigils) -> Self {
        Self {
            tag_sigil: sigils.tags.clone(),
            tag_re: sigil_pattern(&sigils.tags),
            action_re: sigil_pattern(&sigils.actions),
            oracle_re: sigil_pattern(&sigils.oracles),
        }
    }

    /// Shared scanner for the default `@` / `>` / `#` sigils.
    pub fn with_defaults() -> &'static AnnotationScanner {
        &DEFAULT_SCANNER
    }

    pub fn scan_tags(&self, text: &str) -> Vec<Tag> {
        self.tag_re
            .captures_iter(text)
            .map(|caps| Tag {
                name: caps[1].to_string(),
                value: caps[2].to_string(),
            })
            .collect()
    }

    pub fn scan_actions(&self, text: &str) -> Vec<ActionRef> {
        self.action_re
            .captures_iter(text)
            .map(|caps| ActionRef {
                kind: caps[1].to_string(),
                params: caps[2].to_string(),
            })
            .collect()
    }

    pub fn scan_oracles(&self, text: &str) -> Vec<OracleRef> {
        self.oracle_re
            .captures_iter(text)
            .map(|caps| OracleRef {
                kind: caps[1].to_string(),
                params: caps[2].to_string(),
            })
            .collect()
    }

    /// Runs all three passes over one text.
    pub fn scan_all(&self, text: &str) -> (Vec<Tag>, Vec<ActionRef>, Vec<OracleRef>) {
        (
            self.scan_tags(text),
            self.scan_actions(text),
            self.scan_oracles(text),
        )
    }

    /// The exact inline rendering of a tag under this configuration.
    pub fn render_tag(&self, name: &str, value: &str) -> String {
        format!("{}{name}({value})", self.tag_sigil)
    }

    /// Removes every `{sigil}name(...)` occurrence, including any whitespace
    /// directly before it.
    pub fn strip_tag(&self, text: &str, name: &str) -> String {
        let pattern = format!(
            r"\s*{}{}\([^)]*\)",
            regex::escape(&self.tag_sigil),
            regex::escape(name)
        );
        let re = Regex::new(&pattern).expect("escaped tag pattern is valid");
        re.replace_all(text, "").into_owned()
    }
}

fn sigil_pattern(sigil: &str) -> Regex {
    let pattern = format!(r"{}(\w+)\((.*?)\)", regex::escape(sigil));
    Regex::new(&pattern).expect("escaped sigil pattern is valid")
}

#[cfg(test)]
mod tests {
    use super::AnnotationScanner;
    use crate::config::Sigils;

    #[test]
    fn scan_collects_matches_in_text_order() {
        let scanner = AnnotationScanner::with_defaults();
        let tags = scanner.scan_tags("pay rent @due(2024-05-01) then @repeat(monthly)");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "due");
        assert_eq!(tags[0].value, "2024-05-01");
        assert_eq!(tags[1].name, "repeat");
        assert_eq!(tags[1].value, "monthly");
    }

    #[test]
    fn passes_are_independent_per_sigil() {
        let scanner = AnnotationScanner::with_defaults();
        let text = "sync @env(prod) >deploy(eu-west) #health(api)";
        assert_eq!(scanner.scan_tags(text).len(), 1);
        let actions = scanner.scan_actions(text);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].kind, "deploy");
        assert_eq!(actions[0].params, "eu-west");
        let oracles = scanner.scan_oracles(text);
        assert_eq!(oracles.len(), 1);
        assert_eq!(oracles[0].kind, "health");
        assert_eq!(oracles[0].params, "api");
    }

    #[test]
    fn malformed_fragments_yield_no_match() {
        let scanner = AnnotationScanner::with_defaults();
        assert!(scanner.scan_tags("broken @due(2024-05-01").is_empty());
        assert!(scanner.scan_tags("no parens @due").is_empty());
        assert!(scanner.scan_tags("sigil only @").is_empty());
    }

    #[test]
    fn argument_stops_at_first_close_paren() {
        let scanner = AnnotationScanner::with_defaults();
        let tags = scanner.scan_tags("@note(outer (inner))");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].value, "outer (inner");
    }

    #[test]
    fn custom_sigils_are_escaped() {
        let sigils = Sigils {
            tags: "$".to_string(),
            actions: "!".to_string(),
            oracles: "?".to_string(),
        };
        let scanner = AnnotationScanner::new(&sigils);
        let tags = scanner.scan_tags("bill $amount(42)");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "amount");
        assert_eq!(tags[0].value, "42");
        assert!(scanner.scan_tags("plain @amount(42)").is_empty());
    }

    #[test]
    fn render_and_strip_are_symmetric() {
        let scanner = AnnotationScanner::with_defaults();
        assert_eq!(scanner.render_tag("due", "friday"), "@due(friday)");
        assert_eq!(
            scanner.strip_tag("buy milk @due(friday) @due(monday)", "due"),
            "buy milk"
        );
        assert_eq!(
            scanner.strip_tag("buy milk @other(x)", "due"),
            "buy milk @other(x)"
        );
    }
}
