use thiserror::Error;

/// Raised when a token sequence cannot be turned into a parameter assignment, or a rendering
/// cannot be turned back into a grounded action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{action} expects {expected} parameter token(s), found {found}")]
    TokenCount {
        action: String,
        expected: usize,
        found: usize,
    },

    #[error("parameter {slot}: cannot resolve {token:?}")]
    UnresolvableReference { slot: String, token: String },

    #[error("parameter {slot}: expected {expected}, found {token:?}")]
    TypeMismatch {
        slot: String,
        expected: String,
        token: String,
    },

    #[error("no action named {0:?}")]
    UnknownAction(String),

    #[error("grounding of {0:?} has no acting agent")]
    EmptyAgent(String),

    #[error("malformed action rendering {0:?}")]
    MalformedRendering(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("action {0:?} is defined more than once")]
    DuplicateAction(String),

    #[error("agent {0:?} is listed more than once")]
    DuplicateAgent(String),

    #[error("invalid {kind} name {name:?}")]
    InvalidName { kind: &'static str, name: String },
}
