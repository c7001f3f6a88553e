use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::AskError;

pub const ASK_PATH: &str = "/ask";

#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

/// Body of a reply from the answering service. Only `answer` is required;
/// the rest is informational.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Answer {
    pub answer: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Something that can turn a question into an answer.
///
/// The widget only talks to this trait, so tests can swap in a scripted
/// transport instead of a live server.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn ask(&self, question: &str) -> Result<Answer, AskError>;
}

#[derive(Clone)]
pub struct AskClient {
    client: Client,
    url: String,
}

impl AskClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            url: format!("{}{}", base_url.trim_end_matches('/'), ASK_PATH),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for AskClient {
    async fn ask(&self, question: &str) -> Result<Answer, AskError> {
        tracing::debug!(url = %self.url, "sending question");

        let transport_err = |source| AskError::Transport {
            url: self.url.clone(),
            source,
        };

        // `.json()` sets Content-Type: application/json
        let response = self
            .client
            .post(&self.url)
            .json(&AskRequest { question })
            .send()
            .await
            .map_err(transport_err)?;

        // The status is not a verdict on its own: any body carrying an
        // `answer` field is accepted.
        let status = response.status();
        let body = response.bytes().await.map_err(transport_err)?;

        let answer: Answer = serde_json::from_slice(&body).map_err(|source| AskError::Decode {
            status: status.as_u16(),
            source,
        })?;

        tracing::debug!(
            status = status.as_u16(),
            confidence = ?answer.confidence,
            source = ?answer.source,
            suggestions = answer.suggestions.len(),
            "received answer"
        );

        Ok(answer)
    }
}
