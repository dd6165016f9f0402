//! crates/content_quality_core/src/audit.rs
//!
//! Audits content that is already live: scores every item, bands it, and
//! summarizes which problems and strengths recur across the site.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{ArticleDraft, ContentItem, Dimension, QualityReport};
use crate::scoring::QualityScorer;
use crate::structure;

const COMMON_ISSUE_LIMIT: usize = 5;
const COMMON_STRENGTH_LIMIT: usize = 3;

/// Overall-score bands for existing content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuditBands {
    /// Items scoring below this need work.
    pub needs_work_below: f64,
    /// Items scoring above this are held up as examples.
    pub strong_above: f64,
}

impl Default for AuditBands {
    fn default() -> Self {
        Self {
            needs_work_below: 0.6,
            strong_above: 0.8,
        }
    }
}

impl AuditBands {
    pub fn band(&self, overall_score: f64) -> AuditBand {
        if overall_score < self.needs_work_below {
            AuditBand::NeedsWork
        } else if overall_score > self.strong_above {
            AuditBand::Strong
        } else {
            AuditBand::Acceptable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditBand {
    NeedsWork,
    Acceptable,
    Strong,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    pub item_id: String,
    pub title: String,
    pub band: AuditBand,
    pub report: QualityReport,
}

/// Counts of recurring problems among the items that need work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuePatterns {
    pub short_content: usize,
    pub low_readability: usize,
    pub weak_seo: usize,
    pub poor_structure: usize,
    pub missing_links: usize,
    pub markup_errors: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditSummary {
    pub total_items: usize,
    pub entries: Vec<AuditEntry>,
    pub average_score: f64,
    /// Most frequent issue labels across every item, with counts.
    pub common_issues: Vec<(String, usize)>,
    /// Most frequent strength dimensions across strong items, with counts.
    pub common_strengths: Vec<(String, usize)>,
    pub patterns: IssuePatterns,
}

impl AuditSummary {
    pub fn in_band(&self, band: AuditBand) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter().filter(move |e| e.band == band)
    }
}

/// Scores every item with `scorer` and summarizes the results.
pub fn audit_content(scorer: &QualityScorer, items: &[ContentItem], bands: AuditBands) -> AuditSummary {
    let entries: Vec<AuditEntry> = items
        .iter()
        .map(|item| {
            let draft = ArticleDraft::new(item.title.clone(), item.body.clone(), "");
            let report = scorer.score(&draft);
            AuditEntry {
                item_id: item.id.clone(),
                title: item.title.clone(),
                band: bands.band(report.overall_score),
                report,
            }
        })
        .collect();

    let average_score = if entries.is_empty() {
        0.0
    } else {
        entries.iter().map(|e| e.report.overall_score).sum::<f64>() / entries.len() as f64
    };

    let common_issues = top_counts(
        entries.iter().flat_map(|e| issue_labels(&e.report)),
        COMMON_ISSUE_LIMIT,
    );
    let common_strengths = top_counts(
        entries
            .iter()
            .filter(|e| e.band == AuditBand::Strong)
            .flat_map(|e| strength_labels(&e.report)),
        COMMON_STRENGTH_LIMIT,
    );

    let mut patterns = IssuePatterns::default();
    for entry in entries.iter().filter(|e| e.band == AuditBand::NeedsWork) {
        let report = &entry.report;
        let weak = |d: Dimension| report.weak_dimensions.contains(&d);
        patterns.short_content += usize::from(weak(Dimension::WordCount));
        patterns.low_readability += usize::from(weak(Dimension::Readability));
        patterns.weak_seo += usize::from(weak(Dimension::Seo));
        patterns.poor_structure += usize::from(weak(Dimension::Structure));
        patterns.missing_links += usize::from(weak(Dimension::InternalLinks));
        patterns.markup_errors += usize::from(report.structure.flags.has_escaped_markup);
    }

    AuditSummary {
        total_items: items.len(),
        entries,
        average_score,
        common_issues,
        common_strengths,
        patterns,
    }
}

/// Stable labels for a report's issues. Metric issues carry numbers, so they
/// are grouped by dimension instead of by message.
fn issue_labels(report: &QualityReport) -> Vec<String> {
    let mut labels: Vec<String> = report
        .weak_dimensions
        .iter()
        .map(|d| format!("{} below minimum", d.label()))
        .collect();
    labels.extend(report.seo.failed().map(|c| c.description.clone()));
    labels.extend(
        report
            .structure
            .issues
            .iter()
            .filter(|issue| issue.as_str() != structure::EMPTY_BODY)
            .cloned(),
    );
    labels
}

fn strength_labels(report: &QualityReport) -> Vec<String> {
    report
        .strong_dimensions
        .iter()
        .map(|d| d.label().to_string())
        .collect()
}

/// Counts labels and keeps the `limit` most frequent. Ties keep first-seen order.
fn top_counts(labels: impl Iterator<Item = String>, limit: usize) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for label in labels {
        let count = counts.entry(label.clone()).or_insert(0);
        if *count == 0 {
            order.push(label);
        }
        *count += 1;
    }
    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|label| {
            let count = counts[&label];
            (label, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}
