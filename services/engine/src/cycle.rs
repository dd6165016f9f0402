//! services/engine/src/cycle.rs
//!
//! The repeating improvement cycle: audit the live inventory, find the best
//! topic to write about, run it through the quality gate and, when allowed,
//! publish the accepted draft.
//!
//! The loop is stopped with a `CancellationToken`. A running cycle is never
//! interrupted; only the wait between cycles is.

use crate::web::state::AppState;
use content_quality_core::audit::audit_content;
use content_quality_core::domain::{ReportOrigin, StoredReport};
use content_quality_core::gate::GateOutcome;
use content_quality_core::ports::PortResult;
use content_quality_core::topics::{candidate_topics, GapSnapshot, UserIntent};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// What one cycle did.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub items_audited: usize,
    pub average_score: f64,
    pub gaps: usize,
    pub topic: Option<String>,
    pub article: Option<ArticleRun>,
}

/// The result of running one topic through the gate.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleRun {
    pub outcome: GateOutcome,
    /// Backend id of the published post, when one was created.
    pub published_id: Option<String>,
}

/// Runs improvement cycles until `token` is cancelled.
pub async fn run_improvement_cycles(state: Arc<AppState>, token: CancellationToken) {
    info!("Improvement cycle started.");

    loop {
        if token.is_cancelled() {
            break;
        }

        let delay = match run_cycle(&state).await {
            Ok(report) => {
                info!(
                    items = report.items_audited,
                    average_score = report.average_score,
                    gaps = report.gaps,
                    topic = ?report.topic,
                    accepted = report.article.as_ref().map(|a| a.outcome.is_accepted()),
                    "Improvement cycle complete."
                );
                state.config.cycle_interval
            }
            Err(e) => {
                error!(error = %e, "Improvement cycle failed.");
                state.config.cycle_error_delay
            }
        };

        tokio::select! {
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(delay) => {}
        }
    }

    info!("Improvement cycle stopped.");
}

/// One full cycle. Any port failure aborts the rest of the cycle.
pub async fn run_cycle(state: &AppState) -> PortResult<CycleReport> {
    let items = state.content.fetch_content().await?;

    let audit = audit_content(&state.audit_scorer, &items, state.audit_bands);
    for entry in &audit.entries {
        let stored = StoredReport::new(
            ReportOrigin::Audit,
            None,
            entry.title.clone(),
            entry.report.clone(),
        );
        state.reports.save_report(&stored).await?;
    }
    if !audit.common_issues.is_empty() {
        info!(issues = ?audit.common_issues, patterns = ?audit.patterns, "Content audit summary.");
    }

    let catalog = state.ranker.catalog();
    let gaps = GapSnapshot::from_inventory(catalog, &items);
    let intent = UserIntent::default();
    let candidates = candidate_topics(catalog, &intent);

    let mut report = CycleReport {
        items_audited: audit.total_items,
        average_score: audit.average_score,
        gaps: gaps.len(),
        topic: None,
        article: None,
    };

    let Some(winner) = state.ranker.select(&candidates, &gaps, &intent) else {
        warn!("No candidate topics to write about.");
        return Ok(report);
    };
    info!(topic = %winner.topic, composite = winner.composite, "Topic selected.");

    let article = produce_article(state, &winner.topic, state.config.auto_publish).await?;
    report.topic = Some(winner.topic);
    report.article = Some(article);
    Ok(report)
}

/// Runs `topic` through the quality gate, stores every report it produced, and
/// publishes the draft when it was accepted and `publish` is set.
pub async fn produce_article(state: &AppState, topic: &str, publish: bool) -> PortResult<ArticleRun> {
    let outcome = state.gate.run(topic).await;

    let history = outcome.history();
    for (draft, report) in history.drafts.iter().zip(&history.reports) {
        let stored = StoredReport::new(
            ReportOrigin::Gate,
            Some(topic.to_string()),
            draft.title.clone(),
            report.clone(),
        );
        state.reports.save_report(&stored).await?;
    }

    let published_id = match &outcome {
        GateOutcome::Accepted { draft, report, .. } if publish => {
            Some(state.publisher.publish(draft, report).await?)
        }
        GateOutcome::Accepted { .. } => None,
        GateOutcome::Abandoned { history, .. } => {
            let best = history.best_report().map(|r| r.overall_score);
            warn!(topic, best_score = ?best, "No draft reached the acceptance threshold.");
            None
        }
    };

    Ok(ArticleRun {
        outcome,
        published_id,
    })
}
