use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorCode {
    /// A required field is missing or has the wrong shape.
    MalformedInput,
    /// The character service answered with a failure status or payload.
    UpstreamRejection,
    /// The token exchange succeeded but carried no usable token.
    StaleCredential,
}

impl CoreErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedInput => "malformed_input",
            Self::UpstreamRejection => "upstream_rejection",
            Self::StaleCredential => "stale_credential",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code:?}: {message}")]
pub struct CoreError {
    pub code: CoreErrorCode,
    pub message: String,
}

impl CoreError {
    pub fn new(code: CoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(CoreErrorCode::MalformedInput, message)
    }
}
