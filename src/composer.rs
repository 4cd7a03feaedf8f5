//! Suggested-post composition.

use crate::keywords::KeywordRanker;

/// Hashtags appended to a suggested post.
pub const HASHTAG_COUNT: usize = 3;

/// Render the shareable post text: title, summary, attribution naming the
/// site, the marked link, and up to three hashtags from the top keywords of
/// title + summary. Pure and deterministic for identical inputs.
pub fn compose_post(
    title: &str,
    summary: &str,
    link: &str,
    site_name: &str,
    ranker: &dyn KeywordRanker,
) -> String {
    let hashtags: Vec<String> = ranker
        .rank(&format!("{title} {summary}"), HASHTAG_COUNT)
        .into_iter()
        .map(|keyword| format!("#{}", capitalize(&keyword)))
        .collect();

    format!(
        "{title}\n\n{summary}\n\nLemos {site_name} e separamos este destaque. O que você acha?\n🔗 {link}\n{}",
        hashtags.join(" ")
    )
}

/// Uppercase the first character, lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
