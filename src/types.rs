use serde::Serialize;

/// Fixed reason attached to a [`FeedError`] when a feed parses but carries no
/// entries. The aggregate cache filters these records out of the published
/// batch entirely.
pub const EMPTY_FEED_REASON: &str = "no items in feed";

/// A feed as returned by the fetch collaborator: an ordered sequence of
/// entries, assumed pre-ordered newest-first by the source.
#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    pub entries: Vec<ParsedEntry>,
}

/// One entry of a parsed feed. Every field is optional; the builder applies
/// the fallback rules.
#[derive(Debug, Clone, Default)]
pub struct ParsedEntry {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub link: Option<String>,
    pub published: Option<String>,
}

/// The translated, keyword-annotated record produced for one feed source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedResult {
    pub site: String,
    pub feed_url: String,
    pub published: String,
    pub title: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub link: String,
    pub suggested_post: String,
}

/// Human-readable failure record for one feed source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedError {
    pub site: String,
    pub error: String,
}

/// Outcome of processing one feed source: exactly one success or one error
/// record, never both. Serialized untagged so the two JSON card shapes come
/// out flat.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeedOutcome {
    Item(FeedResult),
    Error(FeedError),
}

/// The full aggregate served to clients: the outcome batch plus the UTC
/// timestamp of the refresh that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub updated_at: String,
    pub items: Vec<FeedOutcome>,
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed parse error: {0}")]
    Parse(String),

    #[error("{}", EMPTY_FEED_REASON)]
    EmptyFeed,

    #[error("translation error: {0}")]
    Translation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
