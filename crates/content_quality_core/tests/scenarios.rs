use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use content_quality_core::{
    candidate_topics, ArticleDraft, ArticleGenerator, GapSnapshot, GateOutcome, GenerationRequest,
    PortResult, QualityGate, QualityScorer, QualityThresholds, RankingWeights, TopicCatalog,
    TopicProfile, TopicRanker, UserIntent,
};

const TITLE_45: &str = "RFID technology for modern Swedish companies.";

fn publish_scorer() -> QualityScorer {
    QualityScorer::new(QualityThresholds::publish_gate()).unwrap()
}

fn long_body() -> String {
    let copy = "We sell good tools to small firms. ".repeat(172);
    format!(
        "<h2>Why RFID matters</h2>\
         <p>{copy}Read about <a href=\"/produkt/rfid-lasare/\">readers</a>, \
         <a href=\"/produkt/rfid-taggar/\">tags</a>, \
         <a href=\"/tjanster/installation/\">installation</a> and \
         <a href=\"/kontakt/\">contact</a>.</p>\
         <h2>Next steps</h2>\
         <ul><li><strong>Plan</strong> the rollout.</li></ul>"
    )
}

#[test]
fn empty_draft_scores_zero_and_names_its_shortfalls() {
    let report = publish_scorer().score(&ArticleDraft::new("", "", "rfid_technology"));

    assert_eq!(report.overall_score, 0.0);
    assert!(!report.passed);
    assert!(report.issues.iter().any(|i| i.starts_with("content too short")));
    assert!(report.issues.iter().any(|i| i.starts_with("low readability")));
}

#[test]
fn well_formed_long_article_passes_the_gate_thresholds() {
    assert_eq!(TITLE_45.chars().count(), 45);
    let report = publish_scorer().score(&ArticleDraft::new(TITLE_45, long_body(), "rfid_technology"));

    assert_eq!(report.seo.score, 100);
    assert_eq!(report.structure.score, 1.0);
    assert!(report.metrics.word_count >= 1200);
    assert_eq!(report.metrics.internal_links, 4);
    assert!(report.overall_score >= 0.9, "overall {}", report.overall_score);
    assert!(report.passed);
}

#[test]
fn gap_topic_outranks_an_otherwise_identical_covered_topic() {
    let profile = TopicProfile {
        seo_potential: 50.0,
        business_value: 50.0,
        competition: 50.0,
        keywords: Vec::new(),
    };
    let catalog = TopicCatalog::new(
        vec![
            ("covered".to_string(), profile.clone()),
            ("uncovered".to_string(), profile.clone()),
        ],
        profile,
    );
    let ranker = TopicRanker::new(catalog, RankingWeights::default()).unwrap();
    let intent = UserIntent::default();
    let candidates = candidate_topics(ranker.catalog(), &intent);
    let gaps = GapSnapshot::new(["uncovered"]);

    let ranked = ranker.rank(&candidates, &gaps, &intent);

    assert_eq!(ranked[0].topic, "uncovered");
    assert!(ranked[0].composite > ranked[1].composite);
}

struct AlwaysThin {
    calls: AtomicU32,
}

#[async_trait]
impl ArticleGenerator for AlwaysThin {
    async fn generate(&self, request: &GenerationRequest) -> PortResult<ArticleDraft> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ArticleDraft::new(
            "Short",
            "<p>Too thin to pass.</p>",
            request.topic.clone(),
        ))
    }
}

#[tokio::test]
async fn persistent_failure_is_abandoned_after_the_retry_budget() {
    let generator = Arc::new(AlwaysThin {
        calls: AtomicU32::new(0),
    });
    let gate = QualityGate::new(Arc::new(publish_scorer()), generator.clone(), 3);

    let outcome = gate.run("rfid_technology").await;

    match outcome {
        GateOutcome::Abandoned {
            last_draft,
            last_report,
            history,
        } => {
            assert_eq!(history.reports.len(), 4);
            assert!(history.reports.iter().all(|r| !r.passed));
            assert_eq!(last_draft.map(|d| d.title), Some("Short".to_string()));
            assert_eq!(last_report.map(|r| r.draft_id), history.reports.last().map(|r| r.draft_id));
        }
        other => panic!("expected abandonment, got {other:?}"),
    }
    assert_eq!(generator.calls.load(Ordering::SeqCst), 4);
}
