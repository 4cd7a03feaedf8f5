//! Process-wide aggregate cache with bounded staleness.

use crate::builder::FeedItemBuilder;
use crate::types::{Aggregate, FeedOutcome, EMPTY_FEED_REASON};
use chrono::{SecondsFormat, Utc};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

struct Snapshot {
    refreshed_at_ms: i64,
    updated_at: String,
    items: Vec<FeedOutcome>,
}

/// Holds the last complete batch of outcome records. `get()` serves the
/// snapshot while fresh and performs a full synchronous refresh when stale.
/// Partial batches are never published: the snapshot is replaced as a whole
/// under the write lock.
pub struct AggregateCache {
    builder: FeedItemBuilder,
    feeds: Vec<String>,
    ttl: Duration,
    snapshot: RwLock<Snapshot>,
}

impl AggregateCache {
    pub fn new(builder: FeedItemBuilder, feeds: Vec<String>, ttl: Duration) -> Self {
        Self {
            builder,
            feeds,
            ttl,
            snapshot: RwLock::new(Snapshot {
                refreshed_at_ms: 0,
                updated_at: String::new(),
                items: Vec::new(),
            }),
        }
    }

    /// Return the aggregate, refreshing first if the snapshot is stale
    /// (older than the TTL, or never populated). Readers waiting on an
    /// in-flight refresh block until the new snapshot is fully assembled.
    pub async fn get(&self) -> Aggregate {
        {
            let snapshot = self.snapshot.read().await;
            if self.is_fresh(&snapshot) {
                debug!("cache hit ({} items)", snapshot.items.len());
                return to_aggregate(&snapshot);
            }
        }

        let mut snapshot = self.snapshot.write().await;
        // another caller may have refreshed while we waited for the lock
        if self.is_fresh(&snapshot) {
            return to_aggregate(&snapshot);
        }

        let items = self.refresh_items().await;
        snapshot.refreshed_at_ms = Utc::now().timestamp_millis();
        snapshot.updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        snapshot.items = items;
        info!("cache refreshed with {} items", snapshot.items.len());
        to_aggregate(&snapshot)
    }

    fn is_fresh(&self, snapshot: &Snapshot) -> bool {
        if snapshot.items.is_empty() {
            return false;
        }
        let age_ms = Utc::now().timestamp_millis() - snapshot.refreshed_at_ms;
        age_ms <= self.ttl.as_millis() as i64
    }

    /// One full pass over the configured feeds, in list order, one at a
    /// time. Empty-feed errors are nothing to report and are dropped from
    /// the batch.
    async fn refresh_items(&self) -> Vec<FeedOutcome> {
        let mut items = Vec::with_capacity(self.feeds.len());
        for feed_url in &self.feeds {
            items.push(self.builder.build_item(feed_url).await);
        }
        items.retain(|outcome| {
            !matches!(outcome, FeedOutcome::Error(err) if err.error == EMPTY_FEED_REASON)
        });
        items
    }
}

fn to_aggregate(snapshot: &Snapshot) -> Aggregate {
    Aggregate {
        updated_at: snapshot.updated_at.clone(),
        items: snapshot.items.clone(),
    }
}
