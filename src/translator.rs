//! Best-effort translation adapter.
//!
//! Translation is an enrichment step, never a hard dependency: when the
//! remote backend is unavailable or a call fails, the original text is
//! returned unchanged.

use crate::types::{AggregatorError, Result};
use serde_json::Value;
use tracing::{debug, warn};

/// Inputs longer than this are translated in chunks.
pub const CHUNK_THRESHOLD: usize = 4000;

/// Size of each positional chunk, in characters.
pub const CHUNK_SIZE: usize = 3500;

const ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
const USER_AGENT: &str = "post-suggester/0.1";

/// Capability-typed translator, selected once at startup.
pub enum Translator {
    /// Pass-through mode: every input is returned unchanged.
    Noop,
    /// Network-backed translation with fail-soft semantics.
    Remote(RemoteTranslator),
}

impl Translator {
    /// Pass-through translator.
    pub fn noop() -> Self {
        Translator::Noop
    }

    /// Build a remote translator targeting `target_lang`. Falls back to
    /// pass-through mode for the process lifetime when the backend cannot
    /// be constructed.
    pub fn remote(target_lang: &str) -> Self {
        match RemoteTranslator::new(target_lang) {
            Ok(remote) => Translator::Remote(remote),
            Err(e) => {
                warn!("translation backend unavailable, running in pass-through mode: {}", e);
                Translator::Noop
            }
        }
    }

    /// Translate `text` to the configured target language. Never fails:
    /// any backend error yields the original text for this call.
    pub async fn translate(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let remote = match self {
            Translator::Noop => return text.to_string(),
            Translator::Remote(remote) => remote,
        };
        let attempt = if text.chars().count() > CHUNK_THRESHOLD {
            remote.translate_chunked(text).await
        } else {
            remote.translate_once(text).await
        };
        match attempt {
            Ok(translated) => translated,
            Err(e) => {
                warn!("translation failed, keeping original text: {}", e);
                text.to_string()
            }
        }
    }
}

/// Translation client for the public Google endpoint, the same backend the
/// deep-translator stack wraps.
pub struct RemoteTranslator {
    client: reqwest::Client,
    target_lang: String,
}

impl RemoteTranslator {
    fn new(target_lang: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            target_lang: target_lang.to_string(),
        })
    }

    async fn translate_once(&self, text: &str) -> Result<String> {
        debug!("translating {} chars to {}", text.chars().count(), self.target_lang);
        let body: Value = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", self.target_lang.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // response shape: [[["translated", "original", ...], ...], ...]
        let mut out = String::new();
        if let Some(segments) = body.get(0).and_then(Value::as_array) {
            for segment in segments {
                if let Some(piece) = segment.get(0).and_then(Value::as_str) {
                    out.push_str(piece);
                }
            }
        }
        if out.is_empty() {
            return Err(AggregatorError::Translation(
                "empty translation response".to_string(),
            ));
        }
        Ok(out)
    }

    async fn translate_chunked(&self, text: &str) -> Result<String> {
        let mut parts = Vec::new();
        for chunk in chunk_text(text, CHUNK_SIZE) {
            parts.push(self.translate_once(&chunk).await?);
        }
        Ok(parts.join(" "))
    }
}

/// Split `text` into sequential chunks of at most `size` characters.
/// Positional slicing only, not sentence-aware.
fn chunk_text(text: &str, size: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(size)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
