pub mod builder;
pub mod cache;
pub mod composer;
pub mod config;
pub mod fetcher;
pub mod keywords;
pub mod normalizer;
pub mod translator;
pub mod types;

pub use builder::FeedItemBuilder;
pub use cache::AggregateCache;
pub use fetcher::{FetchFeed, HttpFetcher};
pub use keywords::{FrequencyRanker, KeywordRanker};
pub use translator::Translator;
pub use types::*;
