use thiserror::Error;

/// Failure talking to the recall server.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse server response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// True when the server could not be reached or refused the request, as
    /// opposed to a reply that arrived but could not be understood.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::Transport(_) | ApiError::Status { .. } | ApiError::InvalidUrl(_)
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Type a search query or pick a tag first")]
    NothingSelected,

    #[error("The search text is blank")]
    BlankQuery,

    #[error("Clear the search text to pick a tag")]
    TagsDisabled,

    #[error("Unknown tag: {0}")]
    UnknownTag(String),
}

/// A quiz action that is not allowed in the current state. State is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("{action} is not available while {phase}")]
    WrongPhase {
        action: &'static str,
        phase: &'static str,
    },

    #[error("answer already revealed")]
    AlreadyRevealed,

    #[error("no option selected")]
    NoSelection,

    #[error("answer not revealed yet")]
    NotRevealed,

    #[error("'{0}' is not an option for this question")]
    UnknownOption(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}
