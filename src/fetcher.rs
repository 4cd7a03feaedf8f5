//! Feed fetching and parsing collaborator.

use crate::types::{AggregatorError, ParsedEntry, ParsedFeed, Result};
use async_trait::async_trait;
use feed_rs::parser;
use reqwest::Client;
use tracing::{debug, info};

const USER_AGENT: &str = "post-suggester/0.1";

/// Fetch collaborator: given a feed URL, return the parsed feed. The seam
/// exists so the pipeline can run against a fake in tests.
#[async_trait]
pub trait FetchFeed: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<ParsedFeed>;
}

/// HTTP-backed fetcher. Failures surface immediately; there is no retry,
/// and no request timeout is configured.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FetchFeed for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<ParsedFeed> {
        debug!("fetching feed: {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AggregatorError::General(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let bytes = response.bytes().await?;
        let feed = parser::parse(bytes.as_ref())
            .map_err(|e| AggregatorError::Parse(format!("failed to parse feed: {}", e)))?;

        let entries: Vec<ParsedEntry> = feed.entries.into_iter().map(parse_entry).collect();
        info!("parsed feed {} with {} entries", url, entries.len());
        Ok(ParsedFeed { entries })
    }
}

fn parse_entry(entry: feed_rs::model::Entry) -> ParsedEntry {
    let title = entry.title.map(|t| t.content);
    let summary = entry.summary.map(|s| s.content);
    let content = entry.content.and_then(|c| c.body);
    let link = entry.links.first().map(|l| l.href.clone());
    // feed-rs normalizes dates; rendered RFC 3339 they lead with the year
    let published = entry
        .published
        .or(entry.updated)
        .map(|dt| dt.to_rfc3339());

    ParsedEntry {
        title,
        summary,
        content,
        link,
        published,
    }
}
