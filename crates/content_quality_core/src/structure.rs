//! crates/content_quality_core/src/structure.rs
//!
//! Structural completeness of the body markup. Besides genuine structure this
//! catches template defects where escaped markup leaks into rendered output.

use crate::domain::{StructureFlags, StructureResult};
use crate::markup;

// Weights in tenths so every reachable score is an exact decimal.
const HEADINGS_TENTHS: u8 = 3;
const PARAGRAPHS_TENTHS: u8 = 2;
const LISTS_TENTHS: u8 = 2;
const EMPHASIS_TENTHS: u8 = 2;
const CLEAN_MARKUP_TENTHS: u8 = 1;

pub const MISSING_HEADINGS: &str = "missing headings";
pub const MISSING_PARAGRAPHS: &str = "missing paragraphs";
pub const MISSING_LISTS: &str = "missing lists";
pub const MISSING_EMPHASIS: &str = "missing emphasis";
pub const ESCAPED_MARKUP: &str = "contains literal markup that should render as text";
pub const EMPTY_BODY: &str = "empty body";

pub fn analyze_structure(body: &str) -> StructureResult {
    let flags = StructureFlags {
        has_headings: markup::has_heading(body),
        has_paragraphs: markup::has_paragraph(body),
        has_lists: markup::has_list(body),
        has_emphasis: markup::has_emphasis(body),
        has_escaped_markup: markup::has_escaped_markup(body),
    };

    let mut tenths = 0u8;
    let mut issues = Vec::new();
    let mut award = |present: bool, weight: u8, issue: &str| {
        if present {
            tenths += weight;
        } else {
            issues.push(issue.to_string());
        }
    };

    award(flags.has_headings, HEADINGS_TENTHS, MISSING_HEADINGS);
    award(flags.has_paragraphs, PARAGRAPHS_TENTHS, MISSING_PARAGRAPHS);
    award(flags.has_lists, LISTS_TENTHS, MISSING_LISTS);
    award(flags.has_emphasis, EMPHASIS_TENTHS, MISSING_EMPHASIS);
    if body.trim().is_empty() {
        // Clean markup is only credited when there is markup to be clean.
        award(false, CLEAN_MARKUP_TENTHS, EMPTY_BODY);
    } else {
        award(!flags.has_escaped_markup, CLEAN_MARKUP_TENTHS, ESCAPED_MARKUP);
    }

    StructureResult {
        score: f64::from(tenths) / 10.0,
        flags,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_markup_scores_exactly_one() {
        let body = "<h2>T</h2><p>text <strong>bold</strong></p><ul><li>a</li></ul>";
        let result = analyze_structure(body);
        assert_eq!(result.score, 1.0);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn each_missing_element_is_named() {
        let result = analyze_structure("plain text");
        assert_eq!(result.score, 0.1);
        assert_eq!(
            result.issues,
            vec![MISSING_HEADINGS, MISSING_PARAGRAPHS, MISSING_LISTS, MISSING_EMPHASIS]
        );
    }

    #[test]
    fn escaped_markup_leak_costs_a_tenth() {
        let body = "<h2>T</h2><p>&lt;p&gt;leaked&lt;/p&gt; <em>x</em></p><ol><li>a</li></ol>";
        let result = analyze_structure(body);
        assert_eq!(result.score, 0.9);
        assert!(result.flags.has_escaped_markup);
        assert_eq!(result.issues, vec![ESCAPED_MARKUP]);
    }

    #[test]
    fn template_that_emitted_only_escaped_markup_scores_low() {
        let body = "&lt;h2&gt;Title&lt;/h2&gt;&lt;p&gt;Body&lt;/p&gt;";
        let result = analyze_structure(body);
        assert_eq!(result.score, 0.0);
        assert!(result.issues.contains(&ESCAPED_MARKUP.to_string()));
        assert!(result.issues.contains(&MISSING_HEADINGS.to_string()));
    }

    #[test]
    fn blank_body_scores_zero() {
        let result = analyze_structure("  ");
        assert_eq!(result.score, 0.0);
        assert!(result.issues.contains(&EMPTY_BODY.to_string()));
    }

    #[test]
    fn h1_without_h2_still_counts_as_headings() {
        let result = analyze_structure(r#"<h1 id="top">T</h1>"#);
        assert!(result.flags.has_headings);
        assert_eq!(result.score, 0.4);
    }
}
