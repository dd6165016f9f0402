//! crates/content_quality_core/src/metrics.rs
//!
//! Text metrics extracted from raw article markup: words, sentences, vowel-based
//! syllables and internal links.

use crate::markup;

/// Vowel letters used for the syllable approximation, including the Swedish
/// vowels the site's copy is written with.
const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y', 'å', 'ä', 'ö'];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextMetrics {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
}

/// Extracts word, sentence and syllable counts from markup text.
pub fn extract(markup_text: &str) -> TextMetrics {
    let text = markup::strip_markup(markup_text);
    TextMetrics {
        words: words_in_plain_text(&text),
        sentences: sentences_in_plain_text(&text),
        syllables: syllables_in_plain_text(&text),
    }
}

/// Counts whitespace-separated tokens after removing all tags.
pub fn count_words(markup_text: &str) -> usize {
    words_in_plain_text(&markup::strip_markup(markup_text))
}

fn words_in_plain_text(text: &str) -> usize {
    // `split_whitespace` yields nothing for blank input, so an empty body is 0
    // words rather than one empty token.
    text.split_whitespace().count()
}

fn sentences_in_plain_text(text: &str) -> usize {
    text.split(|c: char| c == '.' || c == '!' || c == '?')
        .filter(|segment| !segment.trim().is_empty())
        .count()
}

fn syllables_in_plain_text(text: &str) -> usize {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| VOWELS.contains(c))
        .count()
}

/// Decides which hyperlinks point back into the site.
///
/// A link is internal when its target is a site-relative path, or when its host
/// is one of `site_domains`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InternalLinkRules {
    pub site_domains: Vec<String>,
}

impl InternalLinkRules {
    pub fn new(site_domains: Vec<String>) -> Self {
        let site_domains = site_domains
            .into_iter()
            .map(|d| d.trim().trim_start_matches("www.").to_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        Self { site_domains }
    }

    pub fn is_internal(&self, target: &str) -> bool {
        if target.starts_with('/') && !target.starts_with("//") {
            return true;
        }
        match host_of(target) {
            Some(host) => {
                let host = host.trim_start_matches("www.");
                self.site_domains
                    .iter()
                    .any(|domain| host == domain || host.ends_with(&format!(".{domain}")))
            }
            None => false,
        }
    }

    pub fn count_internal_links(&self, markup_text: &str) -> usize {
        markup::link_targets(markup_text)
            .iter()
            .filter(|target| self.is_internal(target))
            .count()
    }
}

fn host_of(target: &str) -> Option<String> {
    let rest = target
        .strip_prefix("https://")
        .or_else(|| target.strip_prefix("http://"))
        .or_else(|| target.strip_prefix("//"))?;
    let host = rest.split(['/', '?', '#', ':']).next()?;
    if host.is_empty() {
        None
    } else {
        Some(host.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_bodies_have_no_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n  "), 0);
        assert_eq!(count_words("<p> </p>"), 0);
    }

    #[test]
    fn tags_separate_words() {
        assert_eq!(count_words("<p>one</p><p>two</p> three"), 3);
    }

    #[test]
    fn sentence_terminator_runs_count_once() {
        let m = extract("Really?! Yes... Fine.");
        assert_eq!(m.sentences, 3);
    }

    #[test]
    fn text_without_terminators_is_one_sentence() {
        assert_eq!(extract("no terminator here").sentences, 1);
        assert_eq!(extract("").sentences, 0);
        assert_eq!(extract("...").sentences, 0);
    }

    #[test]
    fn syllables_count_vowels_including_swedish_letters() {
        // e, o + å, ö + Ä
        assert_eq!(extract("Hello").syllables, 2);
        assert_eq!(extract("Åtö Ä").syllables, 3);
    }

    #[test]
    fn syllables_ignore_letters_inside_tags() {
        assert_eq!(extract("<strong>x</strong>").syllables, 0);
    }

    #[test]
    fn relative_paths_are_internal() {
        let rules = InternalLinkRules::default();
        assert!(rules.is_internal("/produkt/rfid-lasare/"));
        assert!(!rules.is_internal("//cdn.example.com/x"));
        assert!(!rules.is_internal("https://other.example/"));
        assert!(!rules.is_internal("#section"));
    }

    #[test]
    fn configured_domains_are_internal() {
        let rules = InternalLinkRules::new(vec!["www.ConceptSolutions.se".to_string()]);
        assert!(rules.is_internal("https://conceptsolutions.se/tjanster/"));
        assert!(rules.is_internal("https://www.conceptsolutions.se"));
        assert!(rules.is_internal("http://shop.conceptsolutions.se/x"));
        assert!(!rules.is_internal("https://notconceptsolutions.se/"));
    }

    #[test]
    fn counts_only_internal_anchors() {
        let rules = InternalLinkRules::default();
        let body = r#"<a href="/a">a</a><a href="https://x.io">x</a><a href='/b'>b</a>"#;
        assert_eq!(rules.count_internal_links(body), 2);
    }
}
