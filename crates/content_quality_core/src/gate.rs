//! crates/content_quality_core/src/gate.rs
//!
//! The quality gate: generate a draft, score it, and either accept it or ask for
//! a new one, within a fixed retry budget.
//!
//! ```text
//! Drafting -> Scored -> Accepted
//!               |
//!               +-> Regenerating -> Drafting      (retries left)
//!               +-> Abandoned                     (budget spent)
//! ```
//!
//! A generator failure counts as a spent attempt. The gate never publishes
//! anything itself; a failing draft is only ever returned inside `Abandoned`.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{ArticleDraft, QualityReport};
use crate::ports::{ArticleGenerator, GenerationRequest};
use crate::scoring::QualityScorer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    Drafting,
    Scored,
    Regenerating,
    Accepted,
    Abandoned,
}

/// Everything that happened during one gate run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GateHistory {
    /// Every draft that was scored, in attempt order.
    pub drafts: Vec<ArticleDraft>,
    /// One report per scored draft, parallel to `drafts`.
    pub reports: Vec<QualityReport>,
    /// Generator failures, in attempt order.
    pub failures: Vec<String>,
    pub generation_calls: u32,
}

impl GateHistory {
    /// The highest-scoring report, first one wins on ties.
    pub fn best_report(&self) -> Option<&QualityReport> {
        self.reports.iter().fold(None, |best, report| match best {
            Some(b) if b.overall_score >= report.overall_score => Some(b),
            _ => Some(report),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GateOutcome {
    Accepted {
        draft: ArticleDraft,
        report: QualityReport,
        history: GateHistory,
    },
    /// The retry budget ran out. The caller decides whether to publish as-is,
    /// discard, or escalate.
    Abandoned {
        last_draft: Option<ArticleDraft>,
        last_report: Option<QualityReport>,
        history: GateHistory,
    },
}

impl GateOutcome {
    pub fn history(&self) -> &GateHistory {
        match self {
            GateOutcome::Accepted { history, .. } | GateOutcome::Abandoned { history, .. } => {
                history
            }
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, GateOutcome::Accepted { .. })
    }
}

pub struct QualityGate {
    scorer: Arc<QualityScorer>,
    generator: Arc<dyn ArticleGenerator>,
    max_retries: u32,
}

impl QualityGate {
    pub fn new(
        scorer: Arc<QualityScorer>,
        generator: Arc<dyn ArticleGenerator>,
        max_retries: u32,
    ) -> Self {
        Self {
            scorer,
            generator,
            max_retries,
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Runs the gate for `topic`. Makes at most `max_retries + 1` generator calls.
    pub async fn run(&self, topic: &str) -> GateOutcome {
        let mut history = GateHistory::default();
        let mut last: Option<(ArticleDraft, QualityReport)> = None;
        let mut step = Step::Drafting;

        loop {
            debug!(topic, state = ?step.state(), "Quality gate step.");
            step = match step {
                Step::Drafting => {
                    let request = GenerationRequest {
                        topic: topic.to_string(),
                        attempt: history.generation_calls,
                        weak_dimensions: last
                            .as_ref()
                            .map(|(_, report)| report.weak_dimensions.clone())
                            .unwrap_or_default(),
                    };
                    history.generation_calls += 1;

                    match self.generator.generate(&request).await {
                        Ok(draft) => {
                            let report = self.scorer.score(&draft);
                            info!(
                                topic,
                                attempt = request.attempt,
                                score = report.overall_score,
                                passed = report.passed,
                                "Draft scored."
                            );
                            history.drafts.push(draft.clone());
                            history.reports.push(report.clone());
                            Step::Scored(draft, report)
                        }
                        Err(e) => {
                            warn!(topic, attempt = request.attempt, error = %e, "Draft generation failed.");
                            history.failures.push(e.to_string());
                            self.after_failed_attempt(&history)
                        }
                    }
                }
                Step::Scored(draft, report) => {
                    if report.passed {
                        Step::Accepted(draft, report)
                    } else {
                        last = Some((draft, report));
                        self.after_failed_attempt(&history)
                    }
                }
                Step::Regenerating => Step::Drafting,
                Step::Accepted(draft, report) => {
                    info!(topic, score = report.overall_score, "Draft accepted.");
                    return GateOutcome::Accepted {
                        draft,
                        report,
                        history,
                    };
                }
                Step::Abandoned => {
                    warn!(
                        topic,
                        attempts = history.generation_calls,
                        "Retry budget exhausted, abandoning topic."
                    );
                    let (last_draft, last_report) = match last {
                        Some((draft, report)) => (Some(draft), Some(report)),
                        None => (None, None),
                    };
                    return GateOutcome::Abandoned {
                        last_draft,
                        last_report,
                        history,
                    };
                }
            };
        }
    }

    fn after_failed_attempt(&self, history: &GateHistory) -> Step {
        if history.generation_calls > self.max_retries {
            Step::Abandoned
        } else {
            Step::Regenerating
        }
    }
}

/// A gate state together with the data it carries.
enum Step {
    Drafting,
    Scored(ArticleDraft, QualityReport),
    Regenerating,
    Accepted(ArticleDraft, QualityReport),
    Abandoned,
}

impl Step {
    fn state(&self) -> GateState {
        match self {
            Step::Drafting => GateState::Drafting,
            Step::Scored(..) => GateState::Scored,
            Step::Regenerating => GateState::Regenerating,
            Step::Accepted(..) => GateState::Accepted,
            Step::Abandoned => GateState::Abandoned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dimension;
    use crate::ports::{PortError, PortResult};
    use crate::thresholds::QualityThresholds;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Scripted {
        drafts: Mutex<Vec<PortResult<ArticleDraft>>>,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl Scripted {
        fn new(mut drafts: Vec<PortResult<ArticleDraft>>) -> Arc<Self> {
            drafts.reverse();
            Arc::new(Self {
                drafts: Mutex::new(drafts),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ArticleGenerator for Scripted {
        async fn generate(&self, request: &GenerationRequest) -> PortResult<ArticleDraft> {
            self.requests.lock().unwrap().push(request.clone());
            self.drafts
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(PortError::Unexpected("script exhausted".into())))
        }
    }

    fn gate(generator: Arc<Scripted>, threshold: f64, max_retries: u32) -> QualityGate {
        let thresholds = QualityThresholds::publish_gate().with_acceptance_threshold(threshold);
        let scorer = Arc::new(QualityScorer::new(thresholds).unwrap());
        QualityGate::new(scorer, generator, max_retries)
    }

    fn draft(body: &str) -> PortResult<ArticleDraft> {
        Ok(ArticleDraft::new("A title that is long enough to pass", body, "t"))
    }

    #[tokio::test]
    async fn passing_first_draft_is_accepted_immediately() {
        let generator = Scripted::new(vec![draft("<p>anything</p>")]);
        let outcome = gate(generator.clone(), 0.0, 3).run("t").await;
        assert!(outcome.is_accepted());
        assert_eq!(outcome.history().generation_calls, 1);
        assert_eq!(generator.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn regenerates_until_a_draft_passes() {
        let good = "<h2>A</h2><p>Text with <strong>weight</strong>.</p><ul><li>x</li></ul>";
        let generator = Scripted::new(vec![draft(""), draft(""), draft(good)]);
        let outcome = gate(generator.clone(), 0.1, 3).run("t").await;
        match &outcome {
            GateOutcome::Accepted { draft, history, .. } => {
                assert_eq!(draft.body, good);
                assert_eq!(history.reports.len(), 3);
                assert_eq!(history.drafts.len(), 3);
                assert_eq!(history.drafts[2].id, history.reports[2].draft_id);
            }
            other => panic!("expected acceptance, got {other:?}"),
        }
        let requests = generator.requests.lock().unwrap();
        let attempts: Vec<_> = requests.iter().map(|r| r.attempt).collect();
        assert_eq!(attempts, vec![0, 1, 2]);
        assert!(requests[0].weak_dimensions.is_empty());
        assert!(requests[1].weak_dimensions.contains(&Dimension::WordCount));
    }

    #[tokio::test]
    async fn generator_failures_spend_the_budget() {
        let generator = Scripted::new(vec![
            Err(PortError::Unavailable("down".into())),
            Err(PortError::Unavailable("down".into())),
        ]);
        let outcome = gate(generator, 0.0, 1).run("t").await;
        match outcome {
            GateOutcome::Abandoned {
                last_report,
                history,
                ..
            } => {
                assert!(last_report.is_none());
                assert_eq!(history.failures.len(), 2);
                assert_eq!(history.generation_calls, 2);
            }
            other => panic!("expected abandonment, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failure_after_a_scored_draft_keeps_the_last_report() {
        let generator = Scripted::new(vec![draft(""), Err(PortError::Unexpected("boom".into()))]);
        let outcome = gate(generator, 0.9, 1).run("t").await;
        match outcome {
            GateOutcome::Abandoned {
                last_report,
                history,
                ..
            } => {
                assert!(last_report.is_some());
                assert_eq!(history.reports.len(), 1);
                assert_eq!(history.failures, vec!["An unexpected error occurred: boom"]);
            }
            other => panic!("expected abandonment, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn zero_retries_means_a_single_attempt() {
        let generator = Scripted::new(vec![draft(""), draft("")]);
        let outcome = gate(generator.clone(), 0.9, 0).run("t").await;
        assert!(!outcome.is_accepted());
        assert_eq!(generator.requests.lock().unwrap().len(), 1);
    }

    #[test]
    fn best_report_prefers_the_first_of_equal_scores() {
        let scorer = QualityScorer::new(QualityThresholds::publish_gate()).unwrap();
        let a = scorer.score(&ArticleDraft::new("t", "<p>x</p>", "t"));
        let b = scorer.score(&ArticleDraft::new("t", "<p>x</p>", "t"));
        let history = GateHistory {
            reports: vec![a.clone(), b],
            ..GateHistory::default()
        };
        assert_eq!(history.best_report().unwrap().draft_id, a.draft_id);
    }

    #[tokio::test]
    async fn outcomes_serialize_with_an_outcome_tag() {
        let generator = Scripted::new(vec![draft("")]);
        let outcome = gate(generator, 0.9, 0).run("t").await;
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["outcome"], "abandoned");
        assert_eq!(value["history"]["generation_calls"], 1);
        assert_eq!(value["history"]["drafts"].as_array().map(Vec::len), Some(1));
    }
}
