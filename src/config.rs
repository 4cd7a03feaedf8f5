use crate::types::Result;
use std::path::Path;

/// Cache staleness threshold.
pub const CACHE_TTL_SECS: u64 = 600;

/// Keywords ranked per feed item.
pub const KEYWORD_COUNT: usize = 5;

/// Hard ceiling on a stored summary, including the ellipsis.
pub const SUMMARY_MAX_CHARS: usize = 240;

/// Characters kept before the ellipsis when a summary is truncated.
pub const SUMMARY_KEPT_CHARS: usize = 237;

/// Language the pipeline translates into unless overridden.
pub const DEFAULT_TARGET_LANG: &str = "pt";

/// Built-in feed list, used when no feeds file is given.
pub const DEFAULT_FEEDS: &[&str] = &[
    "https://feeds.bbci.co.uk/news/rss.xml?edition=int",
    "https://www.theguardian.com/world/rss",
    "https://www.aljazeera.com/xml/rss/all.xml",
    "https://apnews.com/index.rss",
    "https://neilpatel.com/br/blog/feed/",
    "https://rockcontent.com/br/blog/feed/",
    "https://www.rdstation.com/blog/feed/",
    "https://blog.hubspot.com/marketing/rss.xml",
    "https://contentmarketinginstitute.com/feed/",
    "https://www.archdaily.com.br/br/rss",
    "https://casa.abril.com.br/feed/",
    "https://www.archdaily.com/rss",
    "http://feeds.reuters.com/reuters/worldNews",
    "http://rss.cnn.com/rss/edition_world.rss",
    "https://rss.nytimes.com/services/xml/rss/nyt/World.xml",
    "https://feeds.elpais.com/mrss-s/pages/ep/site/elpais.com/section/internacional/portada",
    "http://feeds.feedburner.com/TechCrunch/",
    "https://www.wired.com/feed/rss",
    "https://www.technologyreview.com/feed/",
    "https://hbr.org/feed",
    "https://www.forbes.com/business/feed/",
    "https://www.ft.com/rss/world",
];

/// The built-in feed list as owned strings.
pub fn default_feeds() -> Vec<String> {
    DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect()
}

/// Load a feed list from a JSON file holding an array of URL strings.
pub fn load_feeds(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)?;
    let feeds: Vec<String> = serde_json::from_str(&raw)?;
    Ok(feeds)
}
