//! crates/content_quality_core/src/seo.rs
//!
//! The fixed battery of on-page SEO checks. Each check is independent and worth
//! the same number of points, so the total is always a multiple of
//! [`POINTS_PER_CHECK`].

use crate::domain::{SeoCheck, SeoCheckKind, SeoCheckResult};
use crate::markup;

pub const POINTS_PER_CHECK: u32 = 20;

const TITLE_MIN_CHARS: usize = 30;
const TITLE_MAX_CHARS: usize = 60;
const MIN_HEADINGS: usize = 2;
const MIN_LINKS: usize = 3;
const MIN_ALT_COVERAGE: f64 = 0.8;
const MIN_WORDS: usize = 800;

impl SeoCheckKind {
    /// Fixed description recorded for the check, depending on its outcome.
    pub fn description(self, passed: bool) -> &'static str {
        match (self, passed) {
            (SeoCheckKind::TitleLength, true) => "title length is optimal",
            (SeoCheckKind::TitleLength, false) => "title length should be 30-60 characters",
            (SeoCheckKind::HeadingStructure, true) => "heading structure is good",
            (SeoCheckKind::HeadingStructure, false) => "heading structure needs at least 2 headings",
            (SeoCheckKind::Hyperlinks, true) => "enough hyperlinks",
            (SeoCheckKind::Hyperlinks, false) => "more hyperlinks needed",
            (SeoCheckKind::ImageAltText, true) => "images carry alt text",
            (SeoCheckKind::ImageAltText, false) => "images are missing alt text",
            (SeoCheckKind::ContentLength, true) => "content length is sufficient",
            (SeoCheckKind::ContentLength, false) => "content length is too short",
        }
    }
}

/// Runs every SEO check against `title` and `body`.
///
/// `word_count` is the Text Metrics Extractor's count for `body`.
pub fn check_seo(title: &str, body: &str, word_count: usize) -> SeoCheckResult {
    let title_chars = title.trim().chars().count();
    let body_present = !body.trim().is_empty();
    let (images, with_alt) = markup::image_alt_coverage(body);

    let outcomes = [
        (
            SeoCheckKind::TitleLength,
            (TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&title_chars),
        ),
        (
            SeoCheckKind::HeadingStructure,
            markup::heading_count(body) >= MIN_HEADINGS,
        ),
        (SeoCheckKind::Hyperlinks, markup::link_count(body) >= MIN_LINKS),
        // No images at all is a pass; a blank body has nothing to evaluate.
        (
            SeoCheckKind::ImageAltText,
            body_present && (with_alt as f64) >= (images as f64) * MIN_ALT_COVERAGE,
        ),
        (SeoCheckKind::ContentLength, word_count >= MIN_WORDS),
    ];

    let checks: Vec<SeoCheck> = outcomes
        .into_iter()
        .map(|(kind, passed)| SeoCheck {
            kind,
            passed,
            points: if passed { POINTS_PER_CHECK } else { 0 },
            description: kind.description(passed).to_string(),
        })
        .collect();
    let score = checks.iter().map(|c| c.points).sum();

    SeoCheckResult { score, checks }
}
