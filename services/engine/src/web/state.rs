//! services/engine/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use content_quality_core::audit::AuditBands;
use content_quality_core::ports::{
    ArticleGenerator, ContentRepository, PublicationSink, ReportStore,
};
use content_quality_core::{
    ConfigError, InternalLinkRules, QualityGate, QualityScorer, QualityThresholds,
    RankingWeights, TopicCatalog, TopicRanker,
};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Handlers and the Improvement Cycle)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub content: Arc<dyn ContentRepository>,
    pub publisher: Arc<dyn PublicationSink>,
    pub reports: Arc<dyn ReportStore>,
    /// Scores generated drafts against the publish-gate configuration.
    pub gate_scorer: Arc<QualityScorer>,
    /// Scores live content against the looser audit configuration.
    pub audit_scorer: Arc<QualityScorer>,
    pub audit_bands: AuditBands,
    pub ranker: Arc<TopicRanker>,
    pub gate: Arc<QualityGate>,
}

impl AppState {
    /// Wires the scoring components from the configuration. Fails when the
    /// resulting scoring or ranking configuration is invalid.
    pub fn new(
        config: Arc<Config>,
        content: Arc<dyn ContentRepository>,
        publisher: Arc<dyn PublicationSink>,
        reports: Arc<dyn ReportStore>,
        generator: Arc<dyn ArticleGenerator>,
    ) -> Result<Self, ConfigError> {
        let link_rules = InternalLinkRules::new(config.site_domain.iter().cloned().collect());

        let gate_thresholds =
            QualityThresholds::publish_gate().with_acceptance_threshold(config.acceptance_threshold);
        let gate_scorer =
            Arc::new(QualityScorer::new(gate_thresholds)?.with_link_rules(link_rules.clone()));
        let audit_scorer =
            Arc::new(QualityScorer::new(QualityThresholds::audit())?.with_link_rules(link_rules));

        let ranker = Arc::new(TopicRanker::new(TopicCatalog::default(), RankingWeights::default())?);
        let gate = Arc::new(QualityGate::new(
            gate_scorer.clone(),
            generator,
            config.gate_max_retries,
        ));

        Ok(Self {
            config,
            content,
            publisher,
            reports,
            gate_scorer,
            audit_scorer,
            audit_bands: AuditBands::default(),
            ranker,
            gate,
        })
    }
}
