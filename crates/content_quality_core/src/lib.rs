pub mod audit;
pub mod domain;
pub mod gate;
pub mod markup;
pub mod metrics;
pub mod ports;
pub mod readability;
pub mod scoring;
pub mod seo;
pub mod structure;
pub mod thresholds;
pub mod topics;

pub use audit::{audit_content, AuditBand, AuditBands, AuditEntry, AuditSummary, IssuePatterns};
pub use domain::{
    ArticleDraft, ContentItem, ContentKind, Dimension, DimensionRatios, MetricsSnapshot,
    QualityReport, ReportOrigin, SeoCheck, SeoCheckKind, SeoCheckResult, StoredReport,
    StructureFlags, StructureResult, TopicCandidate,
};
pub use gate::{GateHistory, GateOutcome, GateState, QualityGate};
pub use metrics::InternalLinkRules;
pub use ports::{
    ArticleGenerator, ContentRepository, GenerationRequest, PortError, PortResult,
    PublicationSink, ReportStore,
};
pub use scoring::QualityScorer;
pub use thresholds::{Bounds, ConfigError, QualityThresholds, ScoreWeights};
pub use topics::{
    candidate_topics, GapSnapshot, RankingWeights, SignalScores, TopicCatalog, TopicProfile,
    TopicRanker, UserIntent,
};
