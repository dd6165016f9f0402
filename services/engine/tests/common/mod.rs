//! In-memory fakes of the engine's ports.
#![allow(dead_code)]

use async_trait::async_trait;
use content_quality_core::domain::{
    ArticleDraft, ContentItem, ContentKind, QualityReport, StoredReport,
};
use content_quality_core::ports::{
    ArticleGenerator, ContentRepository, GenerationRequest, PortError, PortResult,
    PublicationSink, ReportStore,
};
use engine_lib::adapters::TemplateArticleGenerator;
use engine_lib::config::Config;
use engine_lib::web::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub struct FakeContent {
    items: PortResult<Vec<ContentItem>>,
    pub fetches: AtomicUsize,
}

impl FakeContent {
    pub fn with_items(items: Vec<ContentItem>) -> Arc<Self> {
        Arc::new(Self {
            items: Ok(items),
            fetches: AtomicUsize::new(0),
        })
    }

    pub fn failing(error: PortError) -> Arc<Self> {
        Arc::new(Self {
            items: Err(error),
            fetches: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ContentRepository for FakeContent {
    async fn fetch_content(&self) -> PortResult<Vec<ContentItem>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.items.clone()
    }
}

#[derive(Default)]
pub struct FakePublisher {
    pub published: Mutex<Vec<ArticleDraft>>,
}

#[async_trait]
impl PublicationSink for FakePublisher {
    async fn publish(&self, draft: &ArticleDraft, _report: &QualityReport) -> PortResult<String> {
        let mut published = self.published.lock().unwrap();
        published.push(draft.clone());
        Ok(format!("{}", 100 + published.len()))
    }
}

#[derive(Default)]
pub struct FakeReports {
    pub saved: Mutex<Vec<StoredReport>>,
    pub requested_limits: Mutex<Vec<usize>>,
}

#[async_trait]
impl ReportStore for FakeReports {
    async fn save_report(&self, report: &StoredReport) -> PortResult<()> {
        self.saved.lock().unwrap().push(report.clone());
        Ok(())
    }

    async fn recent_reports(&self, limit: usize) -> PortResult<Vec<StoredReport>> {
        self.requested_limits.lock().unwrap().push(limit);
        let saved = self.saved.lock().unwrap();
        Ok(saved.iter().rev().take(limit).cloned().collect())
    }
}

/// Always returns the same thin draft.
pub struct ThinGenerator;

#[async_trait]
impl ArticleGenerator for ThinGenerator {
    async fn generate(&self, request: &GenerationRequest) -> PortResult<ArticleDraft> {
        Ok(ArticleDraft::new("Thin", "<p>Not much here.</p>", request.topic.clone()))
    }
}

pub struct Harness {
    pub state: Arc<AppState>,
    pub content: Arc<FakeContent>,
    pub publisher: Arc<FakePublisher>,
    pub reports: Arc<FakeReports>,
}

pub fn config(extra: &[(&str, &str)]) -> Config {
    let mut env: HashMap<String, String> = [
        ("DATABASE_URL", "postgres://localhost/engine_test"),
        ("WORDPRESS_API_URL", "http://wordpress.invalid/wp-json/wp/v2"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in extra {
        env.insert(k.to_string(), v.to_string());
    }
    Config::from_lookup(|key| env.get(key).cloned()).unwrap()
}

pub fn harness_with(
    content: Arc<FakeContent>,
    generator: Arc<dyn ArticleGenerator>,
    extra_config: &[(&str, &str)],
) -> Harness {
    let publisher = Arc::new(FakePublisher::default());
    let reports = Arc::new(FakeReports::default());
    let state = AppState::new(
        Arc::new(config(extra_config)),
        content.clone(),
        publisher.clone(),
        reports.clone(),
        generator,
    )
    .unwrap();
    Harness {
        state: Arc::new(state),
        content,
        publisher,
        reports,
    }
}

pub fn harness(content: Arc<FakeContent>, extra_config: &[(&str, &str)]) -> Harness {
    harness_with(content, Arc::new(TemplateArticleGenerator::with_year(2025)), extra_config)
}

pub fn post(id: &str, title: &str, body: &str) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        kind: ContentKind::Post,
        title: title.to_string(),
        body: body.to_string(),
    }
}
