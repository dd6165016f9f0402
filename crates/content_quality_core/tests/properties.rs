use content_quality_core::readability::readability_index;
use content_quality_core::seo::{check_seo, POINTS_PER_CHECK};
use content_quality_core::structure::analyze_structure;
use content_quality_core::{
    ArticleDraft, MetricsSnapshot, QualityScorer, QualityThresholds, SeoCheckResult,
    StructureResult,
};
use proptest::prelude::*;

const STRUCTURE_VALUES: [f64; 11] = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

fn scorer() -> QualityScorer {
    QualityScorer::new(QualityThresholds::publish_gate()).unwrap()
}

/// Bodies assembled from the fragments the analyzers look for.
fn body_strategy() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        Just("<h2>Heading</h2>".to_string()),
        Just("<p>A plain sentence here.</p>".to_string()),
        Just("<ul><li>item</li></ul>".to_string()),
        Just("<strong>bold</strong>".to_string()),
        Just("<a href=\"/produkt/x/\">link</a>".to_string()),
        Just("<img src=\"a.png\" alt=\"a\">".to_string()),
        Just("<img src=\"b.png\">".to_string()),
        Just("&lt;p&gt;".to_string()),
        "[a-zåäö .!?]{0,40}",
    ];
    prop::collection::vec(fragment, 0..12).prop_map(|parts| parts.concat())
}

fn empty_seo(score: u32) -> SeoCheckResult {
    SeoCheckResult {
        score,
        checks: Vec::new(),
    }
}

fn structure(score: f64) -> StructureResult {
    StructureResult {
        score,
        flags: Default::default(),
        issues: Vec::new(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ratios_stay_in_the_unit_interval(
        words in 0usize..100_000,
        readability in 0.0f64..=100.0,
        links in 0usize..1_000,
        seo in 0u32..=5,
        tenths in 0u8..=10,
    ) {
        let metrics = MetricsSnapshot {
            word_count: words,
            readability,
            internal_links: links,
            ..MetricsSnapshot::default()
        };
        let r = scorer().ratios(&metrics, &empty_seo(seo * 20), &structure(f64::from(tenths) / 10.0));
        for value in [r.word_count, r.readability, r.seo, r.structure, r.internal_links] {
            prop_assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn word_ratio_never_decreases_with_more_words(a in 0usize..5_000, b in 0usize..5_000) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let s = scorer();
        let ratio = |words| {
            let metrics = MetricsSnapshot { word_count: words, ..MetricsSnapshot::default() };
            s.ratios(&metrics, &empty_seo(0), &structure(0.0)).word_count
        };
        prop_assert!(ratio(low) <= ratio(high));
    }

    #[test]
    fn seo_score_is_a_multiple_of_the_check_value(
        title in ".{0,80}",
        body in body_strategy(),
        words in 0usize..2_000,
    ) {
        let result = check_seo(&title, &body, words);
        prop_assert_eq!(result.score % POINTS_PER_CHECK, 0);
        prop_assert!(result.score <= 100);
    }

    #[test]
    fn structure_score_is_one_of_the_tenths(body in body_strategy()) {
        let score = analyze_structure(&body).score;
        prop_assert!(STRUCTURE_VALUES.contains(&score), "unexpected score {}", score);
    }

    #[test]
    fn overall_score_is_bounded_and_matches_the_verdict(
        title in ".{0,80}",
        body in body_strategy(),
    ) {
        let report = scorer().score(&ArticleDraft::new(title, body, "t"));
        prop_assert!((0.0..=1.0).contains(&report.overall_score));
        prop_assert_eq!(report.passed, report.overall_score >= report.acceptance_threshold);
    }

    #[test]
    fn scoring_is_idempotent_apart_from_the_draft_id(
        title in ".{0,80}",
        body in body_strategy(),
    ) {
        let s = scorer();
        let draft = ArticleDraft::new(title, body, "t");
        let mut copy = draft.clone();
        copy.id = uuid::Uuid::new_v4();
        let mut first = s.score(&draft);
        let second = s.score(&copy);
        first.draft_id = second.draft_id;
        prop_assert_eq!(first, second);
    }

    #[test]
    fn readability_is_deterministic_and_bounded(
        words in 0usize..10_000,
        sentences in 0usize..1_000,
        syllables in 0usize..30_000,
    ) {
        let a = readability_index(words, sentences, syllables);
        let b = readability_index(words, sentences, syllables);
        prop_assert_eq!(a, b);
        prop_assert!((0.0..=100.0).contains(&a));
    }
}
