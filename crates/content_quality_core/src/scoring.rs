//! crates/content_quality_core/src/scoring.rs
//!
//! The weighted aggregator. Combines text metrics, readability, SEO, structure
//! and internal-link density into one overall score in [0, 1], and derives the
//! issue and strength lists from the raw metrics.

use crate::domain::{
    ArticleDraft, Dimension, DimensionRatios, MetricsSnapshot, QualityReport, SeoCheckResult,
    StructureResult,
};
use crate::metrics::{self, InternalLinkRules};
use crate::readability::readability_index;
use crate::seo::check_seo;
use crate::structure::analyze_structure;
use crate::thresholds::{ConfigError, QualityThresholds};

/// Scores drafts against one validated threshold configuration.
///
/// Construction is the only place a configuration can be rejected; once built,
/// scoring never fails and is a pure function of the draft.
#[derive(Debug, Clone)]
pub struct QualityScorer {
    thresholds: QualityThresholds,
    link_rules: InternalLinkRules,
}

impl QualityScorer {
    pub fn new(thresholds: QualityThresholds) -> Result<Self, ConfigError> {
        thresholds.validate()?;
        Ok(Self {
            thresholds,
            link_rules: InternalLinkRules::default(),
        })
    }

    pub fn with_link_rules(mut self, link_rules: InternalLinkRules) -> Self {
        self.link_rules = link_rules;
        self
    }

    pub fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }

    /// Measures and scores a draft.
    pub fn score(&self, draft: &ArticleDraft) -> QualityReport {
        let text = metrics::extract(&draft.body);
        let structure = analyze_structure(&draft.body);
        let seo = check_seo(&draft.title, &draft.body, text.words);
        let snapshot = MetricsSnapshot {
            word_count: text.words,
            sentence_count: text.sentences,
            syllable_count: text.syllables,
            readability: readability_index(text.words, text.sentences, text.syllables),
            internal_links: self.link_rules.count_internal_links(&draft.body),
            structure: structure.flags,
        };

        let ratios = if draft.body.trim().is_empty() {
            DimensionRatios::default()
        } else {
            self.ratios(&snapshot, &seo, &structure)
        };
        self.aggregate(draft, snapshot, seo, structure, ratios)
    }

    /// Normalizes every dimension to [0, 1].
    pub fn ratios(
        &self,
        metrics: &MetricsSnapshot,
        seo: &SeoCheckResult,
        structure: &StructureResult,
    ) -> DimensionRatios {
        let t = &self.thresholds;
        DimensionRatios {
            word_count: unit(metrics.word_count as f64 / t.word_count.optimal),
            readability: unit(metrics.readability / 100.0),
            seo: unit(f64::from(seo.score) / 100.0),
            structure: unit(structure.score),
            internal_links: unit(metrics.internal_links as f64 / t.internal_links.optimal),
        }
    }

    fn aggregate(
        &self,
        draft: &ArticleDraft,
        metrics: MetricsSnapshot,
        seo: SeoCheckResult,
        structure: StructureResult,
        ratios: DimensionRatios,
    ) -> QualityReport {
        let t = &self.thresholds;
        let w = &t.weights;
        let overall = unit(
            ratios.word_count * w.word_count
                + ratios.readability * w.readability
                + ratios.seo * w.seo
                + ratios.structure * w.structure
                + ratios.internal_links * w.internal_links,
        );

        let mut issues = Vec::new();
        let mut strengths = Vec::new();
        let mut weak_dimensions = Vec::new();
        let mut strong_dimensions = Vec::new();
        for dimension in Dimension::ALL {
            let raw = raw_value(dimension, &metrics, &seo, &structure);
            let bounds = match dimension {
                Dimension::WordCount => t.word_count,
                Dimension::Readability => t.readability,
                Dimension::Seo => t.seo_score,
                Dimension::Structure => t.structure,
                Dimension::InternalLinks => t.internal_links,
            };
            if raw < bounds.min {
                weak_dimensions.push(dimension);
                issues.push(describe_shortfall(dimension, raw, bounds.min));
            } else if raw >= bounds.optimal {
                strong_dimensions.push(dimension);
                strengths.push(describe_strength(dimension, raw));
            }
        }
        issues.extend(seo.failed().map(|c| c.description.clone()));
        issues.extend(structure.issues.iter().cloned());

        QualityReport {
            draft_id: draft.id,
            profile: t.name.clone(),
            overall_score: overall,
            metrics,
            seo,
            structure,
            ratios,
            issues,
            strengths,
            weak_dimensions,
            strong_dimensions,
            acceptance_threshold: t.acceptance_threshold,
            passed: overall >= t.acceptance_threshold,
        }
    }
}

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn raw_value(
    dimension: Dimension,
    metrics: &MetricsSnapshot,
    seo: &SeoCheckResult,
    structure: &StructureResult,
) -> f64 {
    match dimension {
        Dimension::WordCount => metrics.word_count as f64,
        Dimension::Readability => metrics.readability,
        Dimension::Seo => f64::from(seo.score),
        Dimension::Structure => structure.score,
        Dimension::InternalLinks => metrics.internal_links as f64,
    }
}

fn describe_shortfall(dimension: Dimension, raw: f64, min: f64) -> String {
    match dimension {
        Dimension::WordCount => format!(
            "content too short: {raw:.0} words, {:.0} below the minimum of {min:.0}",
            min - raw
        ),
        Dimension::Readability => format!(
            "low readability: {raw:.1}, {:.1} below the minimum of {min:.0}",
            min - raw
        ),
        Dimension::Seo => format!(
            "weak SEO: {raw:.0}/100, {:.0} below the minimum of {min:.0}",
            min - raw
        ),
        Dimension::Structure => format!(
            "weak structure: {:.0}%, {:.0} points below the minimum of {:.0}%",
            raw * 100.0,
            (min - raw) * 100.0,
            min * 100.0
        ),
        Dimension::InternalLinks => format!(
            "too few internal links: {raw:.0}, {:.0} below the minimum of {min:.0}",
            min - raw
        ),
    }
}

fn describe_strength(dimension: Dimension, raw: f64) -> String {
    match dimension {
        Dimension::WordCount => format!("good content length ({raw:.0} words)"),
        Dimension::Readability => format!("high readability ({raw:.0})"),
        Dimension::Seo => format!("strong SEO ({raw:.0}/100)"),
        Dimension::Structure => format!("solid structure ({:.0}%)", raw * 100.0),
        Dimension::InternalLinks => format!("good internal linking ({raw:.0} links)"),
    }
}
