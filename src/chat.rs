use crate::api::ChatReply;
use crate::error::ApiError;
use crate::types::{ChatMessage, SourceCitation};
use crate::visibility::ComposerState;

pub const WELCOME_MESSAGE: &str = "Hello! I've processed your document. Ask me anything about it!";
pub const APOLOGY_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";
pub const INPUT_PLACEHOLDER: &str = "Ask another question about your document...";

/// Transcript and composer for the loaded document.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversation {
    pub messages: Vec<ChatMessage>,
    /// Typing placeholder shown while a reply is outstanding.
    pub typing: bool,
    pub sending: bool,
    pub composer: ComposerState,
}

impl Default for Conversation {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::bot(WELCOME_MESSAGE)],
            typing: false,
            sending: false,
            composer: ComposerState::ready(),
        }
    }
}

impl Conversation {
    /// Append the user's message and lock the send control. Returns the
    /// query to send, or `None` for blank input or while a send is pending.
    pub fn begin(&mut self, input: &str) -> Option<String> {
        let query = input.trim();
        if query.is_empty() || self.sending {
            return None;
        }
        self.messages.push(ChatMessage::user(query));
        self.typing = true;
        self.sending = true;
        self.composer = ComposerState::sending();
        Some(query.to_string())
    }

    pub fn push_bot(&mut self, reply: &ChatReply) {
        let mut message = ChatMessage::bot(reply.response.clone());
        message.sources = reply
            .sources
            .iter()
            .flatten()
            .filter(|source| source.text.is_some())
            .cloned()
            .collect::<Vec<SourceCitation>>();
        self.typing = false;
        self.messages.push(message);
    }

    pub fn push_apology(&mut self) {
        self.typing = false;
        self.messages.push(ChatMessage::bot(APOLOGY_MESSAGE));
    }

    /// Runs after every send, whatever the outcome.
    pub fn settle(&mut self) {
        self.typing = false;
        self.sending = false;
        self.composer = ComposerState::ready();
    }
}

pub fn send_failure_message(err: &ApiError) -> String {
    format!("Failed to send message: {err}")
}
