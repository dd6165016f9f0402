//! crates/content_quality_core/src/domain.rs
//!
//! Defines the pure, core data structures for the engine.
//! These structs are independent of any backend or storage format; they derive
//! `serde` traits so reports can be handed to any sink as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated but not-yet-accepted candidate article.
///
/// Drafts are never mutated after scoring; regeneration produces a new draft
/// with a fresh id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ArticleDraft {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub topic: String,
}

impl ArticleDraft {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            body: body.into(),
            topic: topic.into(),
        }
    }
}

/// What kind of entry an existing content item is on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Post,
    Page,
    Product,
}

/// An existing page, post or product pulled from the content repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ContentItem {
    pub id: String,
    pub kind: ContentKind,
    pub title: String,
    pub body: String,
}

/// Presence flags produced by the structure analyzer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StructureFlags {
    pub has_headings: bool,
    pub has_paragraphs: bool,
    pub has_lists: bool,
    pub has_emphasis: bool,
    pub has_escaped_markup: bool,
}

/// Raw measurements of one draft. Recomputed on every scoring pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MetricsSnapshot {
    pub word_count: usize,
    pub sentence_count: usize,
    pub syllable_count: usize,
    /// Relative readability proxy in [0, 100].
    pub readability: f64,
    pub internal_links: usize,
    pub structure: StructureFlags,
}

/// The five fixed on-page SEO checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SeoCheckKind {
    TitleLength,
    HeadingStructure,
    Hyperlinks,
    ImageAltText,
    ContentLength,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SeoCheck {
    pub kind: SeoCheckKind,
    pub passed: bool,
    /// Points awarded, either 0 or the check's full value.
    pub points: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SeoCheckResult {
    /// Sum of awarded points, always a multiple of 20 in [0, 100].
    pub score: u32,
    pub checks: Vec<SeoCheck>,
}

impl SeoCheckResult {
    pub fn failed(&self) -> impl Iterator<Item = &SeoCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StructureResult {
    /// One of the eleven tenths in [0, 1].
    pub score: f64,
    pub flags: StructureFlags,
    pub issues: Vec<String>,
}

/// A scoring dimension of the weighted aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    WordCount,
    Readability,
    Seo,
    Structure,
    InternalLinks,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::WordCount,
        Dimension::Readability,
        Dimension::Seo,
        Dimension::Structure,
        Dimension::InternalLinks,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::WordCount => "word count",
            Dimension::Readability => "readability",
            Dimension::Seo => "SEO",
            Dimension::Structure => "structure",
            Dimension::InternalLinks => "internal links",
        }
    }
}

/// Per-dimension values normalized to [0, 1] before weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DimensionRatios {
    pub word_count: f64,
    pub readability: f64,
    pub seo: f64,
    pub structure: f64,
    pub internal_links: f64,
}

/// The outcome of scoring one draft against one threshold configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct QualityReport {
    pub draft_id: Uuid,
    /// Name of the threshold configuration that produced this report.
    pub profile: String,
    pub overall_score: f64,
    pub metrics: MetricsSnapshot,
    pub seo: SeoCheckResult,
    pub structure: StructureResult,
    pub ratios: DimensionRatios,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
    /// Dimensions whose raw value fell below the configured minimum.
    pub weak_dimensions: Vec<Dimension>,
    /// Dimensions whose raw value reached the configured optimum.
    pub strong_dimensions: Vec<Dimension>,
    pub acceptance_threshold: f64,
    pub passed: bool,
}

/// One ranked topic with its component scores, all on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TopicCandidate {
    pub topic: String,
    pub seo_potential: f64,
    pub gap_score: f64,
    pub user_interest: f64,
    pub business_value: f64,
    pub competition: f64,
    pub composite: f64,
}

/// Which process produced a stored report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ReportOrigin {
    Gate,
    Audit,
}

impl ReportOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportOrigin::Gate => "gate",
            ReportOrigin::Audit => "audit",
        }
    }
}

/// A quality report as written into the knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StoredReport {
    pub id: Uuid,
    pub origin: ReportOrigin,
    pub topic: Option<String>,
    pub title: String,
    pub report: QualityReport,
    pub created_at: DateTime<Utc>,
}

impl StoredReport {
    pub fn new(
        origin: ReportOrigin,
        topic: Option<String>,
        title: impl Into<String>,
        report: QualityReport,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            topic,
            title: title.into(),
            report,
            created_at: Utc::now(),
        }
    }
}
