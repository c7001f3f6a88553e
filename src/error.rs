use thiserror::Error;

/// Why an answer could not be obtained. Every variant is shown to the user
/// as the same fallback message; the detail only goes to the log.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not decode answer (status {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}
