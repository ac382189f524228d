//! Emotion-tag protocol.
//!
//! The system prompt instructs the model to prefix every reply with
//! `[EMOTION:<identifier>]`. Parsing is best-effort: a missing or
//! unrecognized tag degrades silently to [`Emotion::DEFAULT`], no error
//! is surfaced.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::Emotion;

static RE_EMOTION_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[EMOTION:(\w+)\]\s*").unwrap());

/// Split a raw model reply into its emotion and clean text.
///
/// The tag is only matched at the start of the string; the matched prefix
/// (including trailing whitespace) is stripped from the returned text.
/// Identifiers outside the closed vocabulary fall back to the default.
pub fn parse_tagged_reply(raw: &str) -> (Emotion, String) {
    match RE_EMOTION_TAG.captures(raw) {
        Some(caps) => {
            let ident = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let emotion = Emotion::from_identifier(ident).unwrap_or_else(|| {
                tracing::debug!(identifier = ident, "unrecognized emotion tag, using default");
                Emotion::DEFAULT
            });
            let clean = raw[caps.get(0).unwrap().end()..].to_string();
            (emotion, clean)
        }
        None => (Emotion::DEFAULT, raw.to_string()),
    }
}
