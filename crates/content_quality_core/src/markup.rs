//! crates/content_quality_core/src/markup.rs
//!
//! Pattern matching over article markup. Every scorer that looks at tags goes
//! through these helpers so the tag grammar is defined in exactly one place.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<h[1-6](\s[^>]*)?>").unwrap());
static PARAGRAPH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<p(\s[^>]*)?>").unwrap());
static LIST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<(ul|ol)(\s[^>]*)?>").unwrap());
static EMPHASIS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(strong|em)(\s[^>]*)?>").unwrap());
static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<a\s[^>]*href[^>]*>").unwrap());
static HREF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)href\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#).unwrap());
static IMAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<img(\s[^>]*)?>").unwrap());
static ALT_ATTR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\salt\s*=").unwrap());

/// Replaces every tag with a space and collapses runs of whitespace.
pub fn strip_markup(markup: &str) -> String {
    let without_tags = TAG_RE.replace_all(markup, " ");
    WHITESPACE_RE
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Number of opening heading tags of any level.
pub fn heading_count(markup: &str) -> usize {
    HEADING_RE.find_iter(markup).count()
}

pub fn has_heading(markup: &str) -> bool {
    HEADING_RE.is_match(markup)
}

pub fn has_paragraph(markup: &str) -> bool {
    PARAGRAPH_RE.is_match(markup)
}

pub fn has_list(markup: &str) -> bool {
    LIST_RE.is_match(markup)
}

pub fn has_emphasis(markup: &str) -> bool {
    EMPHASIS_RE.is_match(markup)
}

/// True when the markup carries HTML-escaped angle brackets, which render as
/// literal tags on the page.
pub fn has_escaped_markup(markup: &str) -> bool {
    markup.contains("&lt;") || markup.contains("&gt;")
}

/// Number of anchor tags carrying an `href` attribute.
pub fn link_count(markup: &str) -> usize {
    LINK_RE.find_iter(markup).count()
}

/// The `href` targets of every anchor tag, in document order.
pub fn link_targets(markup: &str) -> Vec<String> {
    LINK_RE
        .find_iter(markup)
        .filter_map(|tag| {
            HREF_RE.captures(tag.as_str()).and_then(|caps| {
                caps.get(1)
                    .or_else(|| caps.get(2))
                    .or_else(|| caps.get(3))
                    .map(|m| m.as_str().trim().to_string())
            })
        })
        .collect()
}

/// Returns `(images, images_with_alt)`.
pub fn image_alt_coverage(markup: &str) -> (usize, usize) {
    let mut images = 0;
    let mut with_alt = 0;
    for tag in IMAGE_RE.find_iter(markup) {
        images += 1;
        if ALT_ATTR_RE.is_match(tag.as_str()) {
            with_alt += 1;
        }
    }
    (images, with_alt)
}
