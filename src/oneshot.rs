use anyhow::{bail, Result};

use crate::client::Transport;
use crate::message::FALLBACK_ANSWER;

/// What a single non-interactive question produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneShot {
    /// Text to print: the answer, or the fallback message
    pub text: String,
    pub answered: bool,
}

impl OneShot {
    pub fn exit_code(&self) -> i32 {
        if self.answered {
            0
        } else {
            1
        }
    }
}

/// Ask one question outside the terminal UI. Request failures become the
/// fallback text and are logged; only a blank question is an error.
pub async fn ask_once(transport: &dyn Transport, question: &str) -> Result<OneShot> {
    let question = question.trim();
    if question.is_empty() {
        bail!("question is empty");
    }

    match transport.ask(question).await {
        Ok(answer) => Ok(OneShot {
            text: answer.answer,
            answered: true,
        }),
        Err(err) => {
            tracing::error!(error = %err, "answer unavailable");
            Ok(OneShot {
                text: FALLBACK_ANSWER.to_string(),
                answered: false,
            })
        }
    }
}
