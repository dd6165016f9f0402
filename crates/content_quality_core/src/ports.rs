//! crates/content_quality_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the engine's collaborators.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the content-management backend, the article generator and
//! the report store.

use async_trait::async_trait;

use crate::domain::{ArticleDraft, ContentItem, Dimension, QualityReport, StoredReport};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., HTTP, database).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Read-only access to the pages, posts and products already on the site.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn fetch_content(&self) -> PortResult<Vec<ContentItem>>;
}

/// What the generator is asked to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    /// Zero-based attempt index within one gate run.
    pub attempt: u32,
    /// Dimensions the last scored draft fell short on, empty until a draft
    /// has been scored.
    pub weak_dimensions: Vec<Dimension>,
}

#[async_trait]
pub trait ArticleGenerator: Send + Sync {
    /// Produces one new draft per call.
    async fn generate(&self, request: &GenerationRequest) -> PortResult<ArticleDraft>;
}

#[async_trait]
pub trait PublicationSink: Send + Sync {
    /// Persists an accepted draft and returns the backend's identifier for it.
    async fn publish(&self, draft: &ArticleDraft, report: &QualityReport) -> PortResult<String>;
}

/// The knowledge base that quality reports are written into.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn save_report(&self, report: &StoredReport) -> PortResult<()>;

    /// Most recent reports first.
    async fn recent_reports(&self, limit: usize) -> PortResult<Vec<StoredReport>>;
}
