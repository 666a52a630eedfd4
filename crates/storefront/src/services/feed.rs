//! Fashion-news feed aggregation.
//!
//! Fetches the configured upstream RSS feeds, normalizes them into a single
//! JSON-friendly shape and serves the merged list newest-first. Each source
//! is independent: a feed that fails to fetch or parse is logged and
//! skipped, never fatal. The merged result is cached for 10 minutes.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use rss::Channel;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Cache TTL for the merged feed.
const FEED_CACHE_TTL_SECS: u64 = 600;

/// Per-source fetch timeout.
const FETCH_TIMEOUT_SECS: u64 = 10;

/// A normalized feed entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub summary: Option<String>,
    /// Title of the channel the entry came from.
    pub source: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Aggregates the configured RSS sources.
#[derive(Clone)]
pub struct FeedService {
    inner: Arc<FeedServiceInner>,
}

struct FeedServiceInner {
    client: reqwest::Client,
    sources: Vec<String>,
    cache: Cache<&'static str, Arc<Vec<FeedItem>>>,
}

impl FeedService {
    /// Create a feed service over a list of RSS source URLs.
    #[must_use]
    pub fn new(sources: Vec<String>) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(FEED_CACHE_TTL_SECS))
            .build();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            inner: Arc::new(FeedServiceInner {
                client,
                sources,
                cache,
            }),
        }
    }

    /// The merged feed, newest entries first.
    ///
    /// Sources that fail are skipped; an empty list is a valid result (all
    /// sources down, or none configured).
    #[instrument(skip(self))]
    pub async fn aggregate(&self) -> Arc<Vec<FeedItem>> {
        if let Some(items) = self.inner.cache.get("merged").await {
            return items;
        }

        let mut items = Vec::new();
        for source in &self.inner.sources {
            match self.fetch_source(source).await {
                Ok(mut entries) => items.append(&mut entries),
                Err(e) => warn!(source, "skipping feed source: {e}"),
            }
        }

        // Newest first; undated entries sink to the end.
        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        let items = Arc::new(items);
        self.inner.cache.insert("merged", Arc::clone(&items)).await;
        items
    }

    /// Fetch and normalize a single RSS source.
    async fn fetch_source(&self, url: &str) -> Result<Vec<FeedItem>, FeedError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let channel = Channel::read_from(&body[..])?;
        Ok(normalize_channel(&channel))
    }
}

/// Errors from fetching one feed source. Internal: callers only ever log these.
#[derive(Debug, thiserror::Error)]
enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("feed returned status {0}")]
    Status(u16),
    #[error("RSS parse error: {0}")]
    Parse(#[from] rss::Error),
}

/// Flatten an RSS channel into normalized entries.
///
/// Entries without a link are dropped; a missing title falls back to the
/// link. HTML enrichment of summaries is deliberately not attempted here.
fn normalize_channel(channel: &Channel) -> Vec<FeedItem> {
    let source = channel.title().to_string();

    channel
        .items()
        .iter()
        .filter_map(|item| {
            let link = item.link()?.to_string();
            let title = item
                .title()
                .map_or_else(|| link.clone(), ToString::to_string);

            Some(FeedItem {
                title,
                link,
                summary: item.description().map(ToString::to_string),
                source: source.clone(),
                published_at: item
                    .pub_date()
                    .and_then(|date| DateTime::parse_from_rfc2822(date).ok())
                    .map(|date| date.with_timezone(&Utc)),
            })
        })
        .collect()
}
