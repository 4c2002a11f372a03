//! Errors raised while talking to the language model.

use thiserror::Error;

/// Errors from the language model adapters.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key is configured.
    #[error("No language model API key configured")]
    MissingApiKey,

    /// The HTTP request could not be sent or its body could not be read.
    #[error("Language model request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Language model returned HTTP {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, for diagnostics.
        body: String,
    },

    /// The response contained no candidate text.
    #[error("Language model returned no text")]
    EmptyResponse,

    /// The model's text was not valid JSON.
    #[error("Language model returned invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A field of the extracted vessel record was missing or unusable.
    #[error("Vessel record field '{field}' is missing or invalid")]
    InvalidField {
        /// The offending field.
        field: String,
    },
}
