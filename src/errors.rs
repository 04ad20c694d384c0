use thiserror::Error;

pub const ALREADY_VOTED: &str = "You have already voted for this share.";
pub const RATE_LIMITED: &str = "Rate limit exceeded. Please wait before voting again.";
pub const GENERIC_FAILURE: &str = "An error occurred while voting.";
pub const NETWORK_FAILURE: &str = "A network error occurred.";

/// Every way a vote can fail to land. All of them leave the card retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoteError {
    #[error("Failed to parse JSON response: {reason}")]
    MalformedResponse { reason: String },

    #[error("Failed to parse error JSON: {reason}. You have already voted for this share.")]
    MalformedConflict { reason: String },

    #[error("Rate limit exceeded. Please wait before voting again.")]
    RateLimited,

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Failed to parse error JSON. Status: {status}. Response text: {body}")]
    UnexpectedBody { status: u16, body: String },

    #[error("A network error occurred. {0}")]
    Network(String),
}

impl VoteError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }
}

/// Failures outside the vote flow: configuration, sharing and read API calls.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Please provide a command to run.")]
    EmptyCommand,

    #[error("Command not found: '{0}'")]
    CommandNotFound(String),

    #[error("Error running command: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Please provide a delete token.")]
    MissingDeleteToken,

    #[error("Share not found or already deleted.")]
    ShareNotFound,
}

impl ClientError {
    pub fn invalid_base_url(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InvalidBaseUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
