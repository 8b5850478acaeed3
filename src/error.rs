use reqwest::StatusCode;
use serde_json::{Value, json};

/// Everything that can go wrong while answering a command.
///
/// All variants are terminal for the process: nothing is retried internally
/// and the binary reports exactly one of them before exiting non-zero.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or unreadable credentials and configuration values.
    #[error("configuration: {0}")]
    Configuration(String),

    /// The token endpoint rejected the client credentials.
    #[error("authentication failed ({status}): {body}")]
    Authentication { status: StatusCode, body: String },

    /// An API call returned a non-2xx status.
    #[error("upstream returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    /// An API call succeeded but its payload was not what we expected.
    #[error("unexpected payload: {0}")]
    Payload(String),

    /// A malformed command-line value.
    #[error("invalid input: {0}")]
    Input(String),

    /// The request never produced a response.
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
}

impl Error {
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Configuration(_) => "configuration",
            Error::Authentication { .. } => "authentication",
            Error::Upstream { .. } => "upstream",
            Error::Payload(_) => "payload",
            Error::Input(_) => "input",
            Error::Transport(_) => "transport",
        }
    }

    /// The JSON object printed on standard output when a command fails.
    pub fn to_json(&self) -> Value {
        json!({
            "error": self.to_string(),
            "kind": self.kind(),
        })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Payload(err.to_string())
    }
}
