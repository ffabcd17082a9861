//! Source citations out of a chat reply.

use crate::api::ChatReply;
use crate::types::SourceCitation;
use once_cell::sync::Lazy;
use regex::Regex;

/// `Source:` / `Sources:` followed by a list of page references. ASCII word
/// characters only, so the list stops at the first punctuation mark.
static SOURCES_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)sources?:\s*([A-Za-z0-9_\s,]+)").expect("sources pattern is valid")
});

static PAGE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("page pattern is valid"));

/// Structured `sources` win whenever the backend sent the field, even empty.
/// Otherwise the reply text is scanned.
pub fn parse_sources(reply: &ChatReply) -> Vec<SourceCitation> {
    match &reply.sources {
        Some(sources) => sources.clone(),
        None => parse_sources_from_text(&reply.response),
    }
}

/// "Sources: Page 2, Page 5" → pages 2 and 5. Entries without a number are
/// dropped.
pub fn parse_sources_from_text(text: &str) -> Vec<SourceCitation> {
    let Some(list) = SOURCES_LINE.captures(text).and_then(|caps| caps.get(1)) else {
        return Vec::new();
    };

    list.as_str()
        .split(',')
        .filter_map(|entry| PAGE_NUMBER.find(entry))
        .filter_map(|digits| digits.as_str().parse::<u32>().ok())
        .map(SourceCitation::page)
        .collect()
}
