//! Frequency-based keyword ranking with a fixed bilingual stopword set.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Maximal runs of Latin letters (accented included), digits and hyphens.
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-zÀ-ÖØ-öø-ÿ0-9-]+").expect("valid token pattern"));

/// Portuguese and English connector/pronoun/adjective words excluded from
/// ranking.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    "a o os as um uma umas uns de da do das dos e em para por com sem no na nas nos
     que como mais menos muito pouco hoje ontem amanhã sobre após antes entre até
     ser estar ter fazer poder ir vir já não sim foi são seremos serão
     the of to in on for from by with and or is are was were be being been this that
     these those as at it its into your our their we you they i he she his her them
     an but if then so than just also only new latest veja saiba guia dicas estudo"
        .split_whitespace()
        .collect()
});

/// Strategy seam for keyword extraction, so stronger extraction can be
/// swapped in without touching callers.
pub trait KeywordRanker: Send + Sync {
    /// Produce at most `k` keyword tokens for `text`, best first.
    fn rank(&self, text: &str, k: usize) -> Vec<String>;
}

/// Default ranker: lowercase tokens, stopwords and tokens of length <= 2
/// dropped, ranked by descending frequency with ties broken by first
/// appearance. Deterministic for a given input.
pub struct FrequencyRanker;

impl KeywordRanker for FrequencyRanker {
    fn rank(&self, text: &str, k: usize) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut first_seen: Vec<&str> = Vec::new();

        for m in TOKEN_RE.find_iter(&lowered) {
            let token = m.as_str();
            if token.chars().count() <= 2 || STOPWORDS.contains(token) {
                continue;
            }
            let count = counts.entry(token).or_insert(0);
            if *count == 0 {
                first_seen.push(token);
            }
            *count += 1;
        }

        // stable sort over first-seen order keeps the tie-break deterministic
        let mut ranked = first_seen;
        ranked.sort_by_key(|token| std::cmp::Reverse(counts[token]));
        ranked.into_iter().take(k).map(str::to_string).collect()
    }
}
