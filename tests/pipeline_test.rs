use async_trait::async_trait;
use post_suggester::{
    AggregateCache, AggregatorError, FeedItemBuilder, FeedOutcome, FetchFeed, FrequencyRanker,
    KeywordRanker, ParsedEntry, ParsedFeed, Result, Translator,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Canned response for one feed URL.
#[derive(Clone)]
enum Canned {
    Feed(Vec<ParsedEntry>),
    Failure(String),
}

/// Fake fetch collaborator that records every call in order.
struct MockFetcher {
    responses: HashMap<String, Canned>,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    fn new(responses: Vec<(&str, Canned)>) -> Self {
        Self {
            responses: responses
                .into_iter()
                .map(|(url, canned)| (url.to_string(), canned))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FetchFeed for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<ParsedFeed> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.responses.get(url) {
            Some(Canned::Feed(entries)) => Ok(ParsedFeed {
                entries: entries.clone(),
            }),
            Some(Canned::Failure(message)) => Err(AggregatorError::General(message.clone())),
            None => Err(AggregatorError::General(format!("unexpected URL: {url}"))),
        }
    }
}

fn entry(title: &str, summary: &str, link: &str, published: &str) -> ParsedEntry {
    ParsedEntry {
        title: Some(title.to_string()),
        summary: Some(summary.to_string()),
        content: None,
        link: Some(link.to_string()),
        published: Some(published.to_string()),
    }
}

fn builder_with(fetcher: Arc<MockFetcher>) -> FeedItemBuilder {
    let ranker: Arc<dyn KeywordRanker> = Arc::new(FrequencyRanker);
    FeedItemBuilder::new(fetcher, Arc::new(Translator::noop()), ranker)
}

#[tokio::test]
async fn builder_produces_result_for_populated_feed() {
    let fetcher = Arc::new(MockFetcher::new(vec![(
        "https://www.news.example/rss",
        Canned::Feed(vec![entry(
            "Markets rally worldwide",
            "<p>Stock markets rally as rates drop across major economies.</p>",
            "https://news.example/story",
            "2024-08-12T10:00:00Z",
        )]),
    )]));
    let builder = builder_with(fetcher);

    let outcome = builder.build_item("https://www.news.example/rss").await;
    let result = match outcome {
        FeedOutcome::Item(result) => result,
        FeedOutcome::Error(err) => panic!("expected result, got error: {err:?}"),
    };

    assert_eq!(result.site, "news.example");
    assert_eq!(result.feed_url, "https://www.news.example/rss");
    assert_eq!(result.title, "Markets rally worldwide");
    assert_eq!(
        result.summary,
        "Stock markets rally as rates drop across major economies."
    );
    assert_eq!(result.link, "https://news.example/story");
    // year-leading date passes through untranslated
    assert_eq!(result.published, "2024-08-12T10:00:00Z");
    assert!(!result.keywords.is_empty());
    assert!(result.keywords.len() <= 5);
    assert_eq!(result.keywords[0], "markets");
    assert!(result.suggested_post.contains("Markets rally worldwide"));
    assert!(result.suggested_post.contains("🔗 https://news.example/story"));
    assert!(result.suggested_post.contains("Lemos news.example"));
}

#[tokio::test]
async fn builder_falls_back_to_feed_url_for_missing_link() {
    let fetcher = Arc::new(MockFetcher::new(vec![(
        "https://blog.example/feed",
        Canned::Feed(vec![ParsedEntry {
            title: Some("Untitled linkless".to_string()),
            summary: Some("body".to_string()),
            ..Default::default()
        }]),
    )]));
    let builder = builder_with(fetcher);

    match builder.build_item("https://blog.example/feed").await {
        FeedOutcome::Item(result) => {
            assert_eq!(result.link, "https://blog.example/feed");
            assert_eq!(result.published, "");
        }
        FeedOutcome::Error(err) => panic!("unexpected error: {err:?}"),
    }
}

#[tokio::test]
async fn fetch_failure_becomes_error_record() {
    let fetcher = Arc::new(MockFetcher::new(vec![(
        "https://slow.example/rss",
        Canned::Failure("timed out".to_string()),
    )]));
    let builder = builder_with(fetcher);

    match builder.build_item("https://slow.example/rss").await {
        FeedOutcome::Error(err) => {
            assert_eq!(err.site, "slow.example");
            assert_eq!(err.error, "timed out");
        }
        FeedOutcome::Item(result) => panic!("unexpected result: {result:?}"),
    }
}

#[tokio::test]
async fn long_summary_is_truncated_to_exact_ceiling() {
    let body = "palavra ".repeat(100);
    let fetcher = Arc::new(MockFetcher::new(vec![(
        "https://long.example/rss",
        Canned::Feed(vec![entry(
            "Long body",
            &body,
            "https://long.example/story",
            "2024-01-01",
        )]),
    )]));
    let builder = builder_with(fetcher);

    match builder.build_item("https://long.example/rss").await {
        FeedOutcome::Item(result) => {
            assert_eq!(result.summary.chars().count(), 240);
            assert!(result.summary.ends_with("..."));
        }
        FeedOutcome::Error(err) => panic!("unexpected error: {err:?}"),
    }
}

#[tokio::test]
async fn empty_feed_is_filtered_from_aggregate() {
    let fetcher = Arc::new(MockFetcher::new(vec![
        (
            "https://full.example/rss",
            Canned::Feed(vec![entry(
                "Story",
                "Body text here.",
                "https://full.example/story",
                "2024-01-01",
            )]),
        ),
        ("https://empty.example/rss", Canned::Feed(vec![])),
        (
            "https://down.example/rss",
            Canned::Failure("connection refused".to_string()),
        ),
    ]));
    let builder = builder_with(fetcher.clone());
    let cache = AggregateCache::new(
        builder,
        vec![
            "https://full.example/rss".to_string(),
            "https://empty.example/rss".to_string(),
            "https://down.example/rss".to_string(),
        ],
        Duration::from_secs(600),
    );

    let aggregate = cache.get().await;

    // the empty feed is dropped entirely; the hard failure stays visible
    assert_eq!(aggregate.items.len(), 2);
    assert!(matches!(&aggregate.items[0], FeedOutcome::Item(r) if r.site == "full.example"));
    assert!(
        matches!(&aggregate.items[1], FeedOutcome::Error(e) if e.error == "connection refused")
    );
}

#[tokio::test]
async fn cache_is_idempotent_within_ttl() {
    let fetcher = Arc::new(MockFetcher::new(vec![(
        "https://a.example/rss",
        Canned::Feed(vec![entry(
            "Story",
            "Body.",
            "https://a.example/story",
            "2024-01-01",
        )]),
    )]));
    let builder = builder_with(fetcher.clone());
    let cache = AggregateCache::new(
        builder,
        vec!["https://a.example/rss".to_string()],
        Duration::from_secs(600),
    );

    let first = cache.get().await;
    let second = cache.get().await;

    // only the initial refresh touched the collaborator
    assert_eq!(fetcher.calls().len(), 1);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn stale_cache_refreshes_in_list_order() {
    let feeds = vec![
        "https://one.example/rss".to_string(),
        "https://two.example/rss".to_string(),
        "https://three.example/rss".to_string(),
    ];
    let fetcher = Arc::new(MockFetcher::new(vec![
        (
            "https://one.example/rss",
            Canned::Feed(vec![entry("1", "b", "https://one.example/x", "2024-01-01")]),
        ),
        (
            "https://two.example/rss",
            Canned::Feed(vec![entry("2", "b", "https://two.example/x", "2024-01-01")]),
        ),
        (
            "https://three.example/rss",
            Canned::Feed(vec![entry("3", "b", "https://three.example/x", "2024-01-01")]),
        ),
    ]));
    let builder = builder_with(fetcher.clone());
    let cache = AggregateCache::new(builder, feeds.clone(), Duration::ZERO);

    cache.get().await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    cache.get().await;

    let calls = fetcher.calls();
    assert_eq!(calls.len(), feeds.len() * 2);
    assert_eq!(&calls[..feeds.len()], feeds.as_slice());
    assert_eq!(&calls[feeds.len()..], feeds.as_slice());
}

#[tokio::test]
async fn outcome_json_shapes_match_contract() {
    let fetcher = Arc::new(MockFetcher::new(vec![
        (
            "https://ok.example/rss",
            Canned::Feed(vec![entry(
                "Title",
                "Body.",
                "https://ok.example/story",
                "2024-01-01",
            )]),
        ),
        (
            "https://bad.example/rss",
            Canned::Failure("timed out".to_string()),
        ),
    ]));
    let builder = builder_with(fetcher);

    let ok = builder.build_item("https://ok.example/rss").await;
    let ok_json = serde_json::to_value(&ok).unwrap();
    let ok_map = ok_json.as_object().unwrap();
    for key in [
        "site",
        "feed_url",
        "published",
        "title",
        "summary",
        "keywords",
        "link",
        "suggested_post",
    ] {
        assert!(ok_map.contains_key(key), "missing key {key}");
    }
    assert!(ok_map["keywords"].is_array());

    let bad = builder.build_item("https://bad.example/rss").await;
    let bad_json = serde_json::to_value(&bad).unwrap();
    let bad_map = bad_json.as_object().unwrap();
    assert_eq!(bad_map.len(), 2);
    assert_eq!(bad_map["site"], "bad.example");
    assert_eq!(bad_map["error"], "timed out");
}

#[tokio::test]
async fn human_readable_dates_go_through_translator() {
    // with the pass-through translator the string survives unchanged, which
    // still exercises the heuristic branch without a network backend
    let fetcher = Arc::new(MockFetcher::new(vec![(
        "https://dated.example/rss",
        Canned::Feed(vec![entry(
            "Dated story",
            "Body.",
            "https://dated.example/story",
            "Mon, 12 Aug 2024 10:00:00 GMT",
        )]),
    )]));
    let builder = builder_with(fetcher);

    match builder.build_item("https://dated.example/rss").await {
        FeedOutcome::Item(result) => {
            assert_eq!(result.published, "Mon, 12 Aug 2024 10:00:00 GMT");
        }
        FeedOutcome::Error(err) => panic!("unexpected error: {err:?}"),
    }
}
