//! crates/content_quality_core/src/thresholds.rs
//!
//! Named scoring configurations: per-metric bounds, aggregation weights and the
//! acceptance threshold. Configurations are validated once, before any scoring.

use serde::{Deserialize, Serialize};

/// Tolerance used when checking that a weight set sums to 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// A rejected scoring or ranking configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("weights of '{profile}' sum to {sum}, expected 1.0")]
    WeightSum { profile: String, sum: f64 },
    #[error("weight '{name}' of '{profile}' is negative or not finite: {value}")]
    InvalidWeight {
        profile: String,
        name: &'static str,
        value: f64,
    },
    #[error("bounds for {metric} of '{profile}' must satisfy min <= optimal <= max (got {min} / {optimal} / {max})")]
    Bounds {
        profile: String,
        metric: &'static str,
        min: f64,
        optimal: f64,
        max: f64,
    },
    #[error("optimal {metric} of '{profile}' must be positive")]
    ZeroOptimal {
        profile: String,
        metric: &'static str,
    },
    #[error("acceptance threshold of '{profile}' must be within [0, 1], got {value}")]
    AcceptanceThreshold { profile: String, value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Bounds {
    pub min: f64,
    pub optimal: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, optimal: f64, max: f64) -> Self {
        Self { min, optimal, max }
    }
}

/// Weights of the five normalized dimensions. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ScoreWeights {
    pub word_count: f64,
    pub readability: f64,
    pub seo: f64,
    pub structure: f64,
    pub internal_links: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            word_count: 0.2,
            readability: 0.2,
            seo: 0.3,
            structure: 0.2,
            internal_links: 0.1,
        }
    }
}

impl ScoreWeights {
    fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("word_count", self.word_count),
            ("readability", self.readability),
            ("seo", self.seo),
            ("structure", self.structure),
            ("internal_links", self.internal_links),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct QualityThresholds {
    pub name: String,
    pub word_count: Bounds,
    pub readability: Bounds,
    pub seo_score: Bounds,
    pub internal_links: Bounds,
    pub structure: Bounds,
    pub weights: ScoreWeights,
    pub acceptance_threshold: f64,
}

impl QualityThresholds {
    /// The stricter configuration used to gate generated articles.
    pub fn publish_gate() -> Self {
        Self {
            name: "publish-gate".to_string(),
            word_count: Bounds::new(800.0, 1200.0, 2000.0),
            readability: Bounds::new(60.0, 75.0, 90.0),
            seo_score: Bounds::new(70.0, 85.0, 95.0),
            internal_links: Bounds::new(3.0, 5.0, 8.0),
            structure: Bounds::new(0.7, 0.85, 0.95),
            weights: ScoreWeights::default(),
            acceptance_threshold: 0.8,
        }
    }

    /// The looser configuration used to audit content that is already live.
    pub fn audit() -> Self {
        Self {
            name: "audit".to_string(),
            acceptance_threshold: 0.6,
            ..Self::publish_gate()
        }
    }

    pub fn with_acceptance_threshold(mut self, threshold: f64) -> Self {
        self.acceptance_threshold = threshold;
        self
    }

    /// Checks bounds ordering, divisor positivity, weight sum and the
    /// acceptance threshold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (metric, bounds) in [
            ("word count", self.word_count),
            ("readability", self.readability),
            ("SEO score", self.seo_score),
            ("internal links", self.internal_links),
            ("structure", self.structure),
        ] {
            let ordered = bounds.min <= bounds.optimal && bounds.optimal <= bounds.max;
            if !ordered || !bounds.min.is_finite() || !bounds.max.is_finite() {
                return Err(ConfigError::Bounds {
                    profile: self.name.clone(),
                    metric,
                    min: bounds.min,
                    optimal: bounds.optimal,
                    max: bounds.max,
                });
            }
        }

        for (metric, bounds) in [
            ("word count", self.word_count),
            ("internal links", self.internal_links),
        ] {
            if bounds.optimal <= 0.0 {
                return Err(ConfigError::ZeroOptimal {
                    profile: self.name.clone(),
                    metric,
                });
            }
        }

        validate_weights(&self.name, &self.weights.named())?;

        if !(0.0..=1.0).contains(&self.acceptance_threshold) {
            return Err(ConfigError::AcceptanceThreshold {
                profile: self.name.clone(),
                value: self.acceptance_threshold,
            });
        }
        Ok(())
    }
}

/// Rejects negative or non-finite weights and sets that do not sum to 1.0.
pub(crate) fn validate_weights(
    profile: &str,
    weights: &[(&'static str, f64)],
) -> Result<(), ConfigError> {
    for &(name, value) in weights {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidWeight {
                profile: profile.to_string(),
                name,
                value,
            });
        }
    }
    let sum: f64 = weights.iter().map(|(_, w)| w).sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::WeightSum {
            profile: profile.to_string(),
            sum,
        });
    }
    Ok(())
}
