//! Per-feed transformation pipeline.

use crate::composer::compose_post;
use crate::config::{KEYWORD_COUNT, SUMMARY_KEPT_CHARS, SUMMARY_MAX_CHARS};
use crate::fetcher::FetchFeed;
use crate::keywords::KeywordRanker;
use crate::normalizer::normalize_text;
use crate::translator::Translator;
use crate::types::{AggregatorError, FeedError, FeedOutcome, FeedResult, ParsedEntry, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Published strings leading with a 4-digit year are treated as
/// machine-formatted and never translated.
static NUMERIC_DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}").expect("valid pattern"));

/// Builds exactly one outcome record per feed source. Every failure is
/// isolated to its own feed; this type never propagates an error to the
/// caller.
pub struct FeedItemBuilder {
    fetcher: Arc<dyn FetchFeed>,
    translator: Arc<Translator>,
    ranker: Arc<dyn KeywordRanker>,
}

impl FeedItemBuilder {
    pub fn new(
        fetcher: Arc<dyn FetchFeed>,
        translator: Arc<Translator>,
        ranker: Arc<dyn KeywordRanker>,
    ) -> Self {
        Self {
            fetcher,
            translator,
            ranker,
        }
    }

    /// Process one feed source into exactly one [`FeedOutcome`].
    pub async fn build_item(&self, feed_url: &str) -> FeedOutcome {
        let site = site_name(feed_url);
        match self.try_build(feed_url, &site).await {
            Ok(result) => FeedOutcome::Item(result),
            Err(e) => {
                warn!("feed {} failed: {}", feed_url, e);
                FeedOutcome::Error(FeedError {
                    site,
                    error: e.to_string(),
                })
            }
        }
    }

    async fn try_build(&self, feed_url: &str, site: &str) -> Result<FeedResult> {
        let feed = self.fetcher.fetch(feed_url).await?;

        // feeds are assumed pre-ordered newest-first
        let entry = feed
            .entries
            .into_iter()
            .next()
            .ok_or(AggregatorError::EmptyFeed)?;

        let title = entry.title.as_deref().unwrap_or("").trim().to_string();
        let body = extract_body(&entry);

        let title = self.translator.translate(&title).await;
        let body = self.translator.translate(&body).await;
        let summary = truncate_summary(&body);

        let keywords = self
            .ranker
            .rank(&format!("{} {}", title, body), KEYWORD_COUNT);

        let link = entry
            .link
            .clone()
            .unwrap_or_else(|| feed_url.to_string());
        let suggested_post = compose_post(&title, &summary, &link, site, self.ranker.as_ref());
        let published = self.resolve_published(entry.published.as_deref()).await;

        debug!("built item for {} ({} keywords)", site, keywords.len());
        Ok(FeedResult {
            site: site.to_string(),
            feed_url: feed_url.to_string(),
            published,
            title,
            summary,
            keywords,
            link,
            suggested_post,
        })
    }

    /// Dates already in a year-leading numeric form pass through unchanged;
    /// anything else is treated as free text and translated.
    async fn resolve_published(&self, published: Option<&str>) -> String {
        let published = published.unwrap_or("");
        if published.is_empty() || !needs_translation(published) {
            published.to_string()
        } else {
            self.translator.translate(published).await
        }
    }
}

/// Whether a published/updated string should be run through the translator.
pub fn needs_translation(published: &str) -> bool {
    !NUMERIC_DATE_RE.is_match(published)
}

/// Host of the feed URL, minus a leading "www.".
pub fn site_name(feed_url: &str) -> String {
    Url::parse(feed_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .map(|host| host.strip_prefix("www.").map(str::to_string).unwrap_or(host))
        .unwrap_or_default()
}

/// Body text with the fallback order of the source formats: summary first,
/// then the structured content block, both normalized to plain text.
fn extract_body(entry: &ParsedEntry) -> String {
    let mut body = normalize_text(entry.summary.as_deref().unwrap_or(""));
    if body.is_empty() {
        if let Some(content) = entry.content.as_deref() {
            body = normalize_text(content);
        }
    }
    body
}

/// Truncate to the summary ceiling, ellipsis-terminated when cut.
fn truncate_summary(text: &str) -> String {
    if text.chars().count() > SUMMARY_MAX_CHARS {
        let kept: String = text.chars().take(SUMMARY_KEPT_CHARS).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}
