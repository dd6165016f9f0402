//! crates/content_quality_core/src/topics.rs
//!
//! Topic selection: gap snapshots over the existing inventory, declared user
//! intent, and a weighted ranking of candidate topics.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{ContentItem, ContentKind, TopicCandidate};
use crate::markup;
use crate::thresholds::{validate_weights, ConfigError};

/// Static domain knowledge about one topic. All scores are on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TopicProfile {
    pub seo_potential: f64,
    pub business_value: f64,
    pub competition: f64,
    /// Lower-case phrases that mark content (or a query) as being about this topic.
    pub keywords: Vec<String>,
}

/// Per-topic lookup tables, in a stable order, plus a fallback profile for
/// topics the catalog does not know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicCatalog {
    topics: Vec<(String, TopicProfile)>,
    fallback: TopicProfile,
}

impl Default for TopicCatalog {
    /// The site's product topics.
    fn default() -> Self {
        let profile = |seo_potential, business_value, competition, keywords: &[&str]| TopicProfile {
            seo_potential,
            business_value,
            competition,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        };
        Self {
            topics: vec![
                (
                    "rfid_technology".to_string(),
                    profile(35.0, 85.0, 70.0, &["rfid", "radio frequency"]),
                ),
                (
                    "time_tracking".to_string(),
                    profile(80.0 / 3.0, 85.0, 80.0, &["tidterminal", "tidklocka", "time tracking", "time clock"]),
                ),
                (
                    "interactive_floor".to_string(),
                    profile(100.0 / 3.0, 60.0, 40.0, &["lekgolv", "active floor", "interactive floor"]),
                ),
            ],
            fallback: profile(70.0 / 3.0, 60.0, 50.0, &[]),
        }
    }
}

impl TopicCatalog {
    pub fn new(topics: Vec<(String, TopicProfile)>, fallback: TopicProfile) -> Self {
        Self { topics, fallback }
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(|(name, _)| name.as_str())
    }

    /// The topic's profile, or the fallback profile for unknown topics.
    pub fn profile(&self, topic: &str) -> &TopicProfile {
        self.topics
            .iter()
            .find(|(name, _)| name == topic)
            .map(|(_, profile)| profile)
            .unwrap_or(&self.fallback)
    }

    /// Keywords for a topic; unknown topics match on their own name.
    fn keywords(&self, topic: &str) -> Vec<String> {
        let profile = self.profile(topic);
        if profile.keywords.is_empty() {
            vec![topic.replace('_', " ").to_lowercase()]
        } else {
            profile.keywords.clone()
        }
    }

    fn mentions(&self, topic: &str, lowercase_text: &str) -> bool {
        self.keywords(topic)
            .iter()
            .any(|keyword| lowercase_text.contains(keyword.as_str()))
    }
}

/// The set of catalog topics with no matching post or page.
///
/// Presence in the snapshot is a deliberately coarse, binary signal; it does not
/// measure how badly a topic is covered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapSnapshot {
    topics: HashSet<String>,
}

impl GapSnapshot {
    pub fn new<I, S>(topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            topics: topics.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds the snapshot from the current inventory. Products describe what
    /// is sold, not what has been written about, so they never close a gap.
    pub fn from_inventory(catalog: &TopicCatalog, items: &[ContentItem]) -> Self {
        let written: Vec<String> = items
            .iter()
            .filter(|item| item.kind != ContentKind::Product)
            .map(|item| format!("{} {}", item.title, markup::strip_markup(&item.body)).to_lowercase())
            .collect();
        let topics = catalog
            .topics()
            .filter(|topic| !written.iter().any(|text| catalog.mentions(topic, text)))
            .map(str::to_string)
            .collect();
        Self { topics }
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.topics.contains(topic)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

/// A caller's declared topic preference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserIntent {
    pub preferred_topic: Option<String>,
}

impl UserIntent {
    pub fn preferring(topic: impl Into<String>) -> Self {
        Self {
            preferred_topic: Some(topic.into()),
        }
    }

    /// Picks the first catalog topic whose keyword occurs in `query`.
    pub fn from_query(catalog: &TopicCatalog, query: &str) -> Self {
        let query = query.to_lowercase();
        Self {
            preferred_topic: catalog
                .topics()
                .find(|topic| catalog.mentions(topic, &query))
                .map(str::to_string),
        }
    }
}

/// The preferred topic first, then the catalog topics, without duplicates.
pub fn candidate_topics(catalog: &TopicCatalog, intent: &UserIntent) -> Vec<String> {
    let mut seen = HashSet::new();
    intent
        .preferred_topic
        .iter()
        .map(String::as_str)
        .chain(catalog.topics())
        .filter(|topic| seen.insert(topic.to_string()))
        .map(str::to_string)
        .collect()
}

/// Weights of the composite topic score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingWeights {
    pub seo_potential: f64,
    pub gap: f64,
    pub user_interest: f64,
    pub business_value: f64,
    pub competition: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            seo_potential: 0.3,
            gap: 0.25,
            user_interest: 0.2,
            business_value: 0.15,
            competition: 0.1,
        }
    }
}

/// Term values for the binary gap and interest signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalScores {
    pub gap_present: f64,
    pub gap_absent: f64,
    pub interest_match: f64,
    pub interest_default: f64,
}

impl Default for SignalScores {
    fn default() -> Self {
        Self {
            gap_present: 90.0,
            gap_absent: 30.0,
            interest_match: 90.0,
            interest_default: 50.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TopicRanker {
    catalog: TopicCatalog,
    weights: RankingWeights,
    signals: SignalScores,
}

impl TopicRanker {
    pub fn new(catalog: TopicCatalog, weights: RankingWeights) -> Result<Self, ConfigError> {
        validate_weights(
            "topic-ranking",
            &[
                ("seo_potential", weights.seo_potential),
                ("gap", weights.gap),
                ("user_interest", weights.user_interest),
                ("business_value", weights.business_value),
                ("competition", weights.competition),
            ],
        )?;
        Ok(Self {
            catalog,
            weights,
            signals: SignalScores::default(),
        })
    }

    pub fn with_signals(mut self, signals: SignalScores) -> Self {
        self.signals = signals;
        self
    }

    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }

    pub fn score(&self, topic: &str, gaps: &GapSnapshot, intent: &UserIntent) -> TopicCandidate {
        let profile = self.catalog.profile(topic);
        let gap_score = if gaps.contains(topic) {
            self.signals.gap_present
        } else {
            self.signals.gap_absent
        };
        let user_interest = if intent.preferred_topic.as_deref() == Some(topic) {
            self.signals.interest_match
        } else {
            self.signals.interest_default
        };
        let w = &self.weights;
        let composite = w.seo_potential * profile.seo_potential
            + w.gap * gap_score
            + w.user_interest * user_interest
            + w.business_value * profile.business_value
            + w.competition * (100.0 - profile.competition);

        TopicCandidate {
            topic: topic.to_string(),
            seo_potential: profile.seo_potential,
            gap_score,
            user_interest,
            business_value: profile.business_value,
            competition: profile.competition,
            composite,
        }
    }

    /// Scores every distinct candidate and orders them by composite, highest
    /// first. Equal composites keep their first-seen order.
    pub fn rank(
        &self,
        candidates: &[String],
        gaps: &GapSnapshot,
        intent: &UserIntent,
    ) -> Vec<TopicCandidate> {
        let mut seen = HashSet::new();
        let mut ranked: Vec<TopicCandidate> = candidates
            .iter()
            .filter(|topic| seen.insert(topic.as_str()))
            .map(|topic| self.score(topic, gaps, intent))
            .collect();
        // `sort_by` is stable, which gives the first-seen tie break.
        ranked.sort_by(|a, b| b.composite.total_cmp(&a.composite));
        ranked
    }

    pub fn select(
        &self,
        candidates: &[String],
        gaps: &GapSnapshot,
        intent: &UserIntent,
    ) -> Option<TopicCandidate> {
        self.rank(candidates, gaps, intent).into_iter().next()
    }
}
