use clap::Parser;
use post_suggester::{
    config, AggregateCache, FeedItemBuilder, FetchFeed, FrequencyRanker, HttpFetcher,
    KeywordRanker, Translator,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "post-suggester")]
#[command(about = "Aggregate syndication feeds into translated post suggestions")]
struct Args {
    /// JSON file holding an array of feed URLs; defaults to the built-in list
    #[arg(long)]
    feeds: Option<PathBuf>,

    /// Target language for translation
    #[arg(long, default_value = config::DEFAULT_TARGET_LANG)]
    target_lang: String,

    /// Skip the remote translation backend (pass-through mode)
    #[arg(long)]
    no_translate: bool,

    /// Cache TTL in seconds
    #[arg(long, default_value_t = config::CACHE_TTL_SECS)]
    ttl: u64,

    /// Pretty-print the JSON aggregate
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let feeds = match &args.feeds {
        Some(path) => config::load_feeds(path)?,
        None => config::default_feeds(),
    };
    info!("aggregating {} feeds", feeds.len());

    let fetcher: Arc<dyn FetchFeed> = Arc::new(HttpFetcher::new()?);
    let translator = Arc::new(if args.no_translate {
        Translator::noop()
    } else {
        Translator::remote(&args.target_lang)
    });
    let ranker: Arc<dyn KeywordRanker> = Arc::new(FrequencyRanker);

    let builder = FeedItemBuilder::new(fetcher, translator, ranker);
    let cache = AggregateCache::new(builder, feeds, Duration::from_secs(args.ttl));

    let aggregate = cache.get().await;
    let json = if args.pretty {
        serde_json::to_string_pretty(&aggregate)?
    } else {
        serde_json::to_string(&aggregate)?
    };
    println!("{json}");
    Ok(())
}
