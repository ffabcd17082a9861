use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub created_at: Option<OffsetDateTime>,
    /// Retrieved chunks the backend cited for this reply.
    pub sources: Vec<SourceCitation>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            created_at: Some(OffsetDateTime::now_utc()),
            sources: Vec::new(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            created_at: Some(OffsetDateTime::now_utc()),
            sources: Vec::new(),
        }
    }
}

const SESSION_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque correlation token sent with every chat request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// `session_<9 base-36 chars>_<unix millis>`
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let tag: String = (0..9)
            .map(|_| SESSION_ALPHABET[rng.gen_range(0..SESSION_ALPHABET.len())] as char)
            .collect();
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        Self(format!("session_{tag}_{millis}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The single document loaded into the workspace.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub name: String,
    /// Backend-assigned id of the indexed document.
    pub collection_name: String,
    pub preview_url: String,
}

/// A page reference the backend grounded an answer on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    #[serde(default, deserialize_with = "lenient_page")]
    pub page: Option<u32>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub chunk_id: Option<String>,
}

impl SourceCitation {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }
}

/// Accepts `3`, `3.0` or `"3"`; anything else reads as no page.
fn lenient_page<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let page = match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(page.and_then(|p| u32::try_from(p).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_have_expected_shape() {
        let id = SessionId::generate();
        let parts: Vec<&str> = id.as_str().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "session");
        assert_eq!(parts[1].len(), 9);
        assert!(parts[1].bytes().all(|b| SESSION_ALPHABET.contains(&b)));
        assert!(parts[2].parse::<i128>().is_ok());
    }

    #[test]
    fn session_ids_differ() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn citation_pages_are_read_leniently() {
        let parsed: Vec<SourceCitation> =
            serde_json::from_str(r#"[{"page":3},{"page":"7"},{"page":2.0},{"page":-1},{"text":"chunk"}]"#)
                .unwrap();
        let pages: Vec<Option<u32>> = parsed.iter().map(|s| s.page).collect();
        assert_eq!(pages, vec![Some(3), Some(7), Some(2), None, None]);
        assert_eq!(parsed[4].text.as_deref(), Some("chunk"));
    }
}
