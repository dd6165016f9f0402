//! services/engine/src/adapters/wordpress.rs
//!
//! The WordPress REST adapter. Implements the `ContentRepository` port over the
//! posts, pages and (optionally) WooCommerce products of the site, and the
//! `PublicationSink` port by creating posts.

use async_trait::async_trait;
use content_quality_core::domain::{ArticleDraft, ContentItem, ContentKind, QualityReport};
use content_quality_core::ports::{ContentRepository, PortError, PortResult, PublicationSink};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{Config, Credentials, StoreConfig};

const PAGE_SIZE: &str = "100";

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Debug, Deserialize)]
struct Rendered {
    rendered: String,
}

#[derive(Debug, Deserialize)]
struct WpEntry {
    id: u64,
    title: Rendered,
    content: Rendered,
}

#[derive(Debug, Deserialize)]
struct WcProduct {
    id: u64,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Serialize)]
struct NewPost<'a> {
    title: &'a str,
    content: &'a str,
    status: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatedPost {
    id: u64,
}

impl WpEntry {
    fn to_domain(self, kind: ContentKind) -> ContentItem {
        ContentItem {
            id: self.id.to_string(),
            kind,
            title: self.title.rendered,
            body: self.content.rendered,
        }
    }
}

impl WcProduct {
    fn to_domain(self) -> ContentItem {
        ContentItem {
            id: self.id.to_string(),
            kind: ContentKind::Product,
            title: self.name,
            body: self.description,
        }
    }
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

#[derive(Clone)]
pub struct WordPressAdapter {
    client: Client,
    api_url: String,
    credentials: Option<Credentials>,
    store: Option<StoreConfig>,
    publish_status: String,
}

impl WordPressAdapter {
    pub fn new(
        client: Client,
        api_url: impl Into<String>,
        credentials: Option<Credentials>,
        store: Option<StoreConfig>,
        publish_status: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            credentials,
            store,
            publish_status: publish_status.into(),
        }
    }

    pub fn from_config(client: Client, config: &Config) -> Self {
        Self::new(
            client,
            config.wordpress_api_url.clone(),
            config.wordpress_credentials.clone(),
            config.store.clone(),
            config.publish_status.clone(),
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(c) => request.basic_auth(&c.username, Some(&c.password)),
            None => request,
        }
    }

    async fn fetch_entries(&self, endpoint: &str, kind: ContentKind) -> PortResult<Vec<ContentItem>> {
        let url = format!("{}/{}", self.api_url, endpoint);
        let request = self
            .authorized(self.client.get(&url))
            .query(&[("per_page", PAGE_SIZE)]);
        let entries: Vec<WpEntry> = read_json(&url, send(&url, request).await?).await?;
        debug!(endpoint, count = entries.len(), "Fetched WordPress entries.");
        Ok(entries.into_iter().map(|e| e.to_domain(kind)).collect())
    }

    async fn fetch_products(&self, store: &StoreConfig) -> PortResult<Vec<ContentItem>> {
        let url = format!("{}/wp-json/wc/v3/products", store.url);
        let request = self
            .client
            .get(&url)
            .basic_auth(&store.credentials.username, Some(&store.credentials.password))
            .query(&[("per_page", PAGE_SIZE), ("status", "publish")]);
        let products: Vec<WcProduct> = read_json(&url, send(&url, request).await?).await?;
        debug!(count = products.len(), "Fetched WooCommerce products.");
        Ok(products.into_iter().map(WcProduct::to_domain).collect())
    }
}

/// Sends a request. Transport failures mean the backend is unavailable.
async fn send(url: &str, request: RequestBuilder) -> PortResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| PortError::Unavailable(format!("Request to {} failed: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PortError::Unexpected(format!("{} returned {}", url, status)));
    }
    Ok(response)
}

async fn read_json<T: serde::de::DeserializeOwned>(url: &str, response: Response) -> PortResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| PortError::Unexpected(format!("Decoding JSON from {} failed: {}", url, e)))
}

//=========================================================================================
// Port Implementations
//=========================================================================================

#[async_trait]
impl ContentRepository for WordPressAdapter {
    async fn fetch_content(&self) -> PortResult<Vec<ContentItem>> {
        let (mut items, pages) = futures::try_join!(
            self.fetch_entries("posts", ContentKind::Post),
            self.fetch_entries("pages", ContentKind::Page),
        )?;
        items.extend(pages);
        if let Some(store) = &self.store {
            items.extend(self.fetch_products(store).await?);
        }
        info!(count = items.len(), "Content inventory fetched.");
        Ok(items)
    }
}

#[async_trait]
impl PublicationSink for WordPressAdapter {
    async fn publish(&self, draft: &ArticleDraft, report: &QualityReport) -> PortResult<String> {
        let url = format!("{}/posts", self.api_url);
        let post = NewPost {
            title: &draft.title,
            content: &draft.body,
            status: &self.publish_status,
        };
        let request = self.authorized(self.client.post(&url)).json(&post);
        let created: CreatedPost = read_json(&url, send(&url, request).await?).await?;
        info!(
            post_id = created.id,
            topic = %draft.topic,
            score = report.overall_score,
            status = %self.publish_status,
            "Article published."
        );
        Ok(created.id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_entries_map_to_content_items() {
        let json = r#"[{"id": 7, "title": {"rendered": "Om RFID"}, "content": {"rendered": "<p>Text</p>"}, "slug": "om-rfid"}]"#;
        let entries: Vec<WpEntry> = serde_json::from_str(json).unwrap();
        let item = entries.into_iter().next().unwrap().to_domain(ContentKind::Page);
        assert_eq!(item.id, "7");
        assert_eq!(item.kind, ContentKind::Page);
        assert_eq!(item.title, "Om RFID");
        assert_eq!(item.body, "<p>Text</p>");
    }

    #[test]
    fn products_without_description_get_an_empty_body() {
        let json = r#"[{"id": 3, "name": "Tidterminal X"}]"#;
        let products: Vec<WcProduct> = serde_json::from_str(json).unwrap();
        let item = products.into_iter().next().unwrap().to_domain();
        assert_eq!(item.kind, ContentKind::Product);
        assert_eq!(item.body, "");
    }

    #[test]
    fn new_posts_carry_the_configured_status() {
        let post = NewPost {
            title: "T",
            content: "<p>B</p>",
            status: "draft",
        };
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["status"], "draft");
        assert_eq!(value["content"], "<p>B</p>");
    }

    #[tokio::test]
    async fn unreachable_backend_is_reported_as_unavailable() {
        let adapter = WordPressAdapter::new(
            Client::new(),
            "http://127.0.0.1:9/wp-json/wp/v2",
            None,
            None,
            "draft",
        );
        let err = adapter.fetch_content().await.unwrap_err();
        assert!(matches!(err, PortError::Unavailable(_)), "got {err:?}");
    }
}
