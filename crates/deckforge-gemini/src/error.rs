use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("No valid JSON found in the response.")]
    NoJsonFound,

    #[error("Invalid JSON structure or missing required fields.")]
    InvalidStructure,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("client configuration error: {0}")]
    Config(String),
}
