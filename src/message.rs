//! Conversation data types
//!
//! These types don't depend on the terminal UI; the list renders them but
//! never changes them once they are appended.

/// Text shown in place of an answer whenever the request path fails.
pub const FALLBACK_ANSWER: &str =
    "Sorry, there was an error processing your question. Please try again.";

/// A single entry in the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub origin: Origin,
}

/// Who authored a message. Used for styling only; bot text is still literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    Bot,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: Origin::User,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: Origin::Bot,
        }
    }

    pub fn fallback() -> Self {
        Self::bot(FALLBACK_ANSWER)
    }
}

impl Origin {
    pub fn label(&self) -> &'static str {
        match self {
            Origin::User => "You:",
            Origin::Bot => "Bot:",
        }
    }
}
