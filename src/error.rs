use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("connection is not open")]
    ChannelNotOpen,

    #[error("failed to open websocket to {0}")]
    ChannelOpen(String),

    #[error("failed to send frame: {0}")]
    ChannelSend(String),

    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("both players and both end positions must be placed")]
    IncompleteBoard,

    #[error("missing DOM element: {0}")]
    MissingElement(&'static str),
}

impl ClientError {
    /// Text shown in the status area for errors the user can act on.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::ChannelNotOpen | ClientError::ChannelOpen(_) => {
                "Connection error. Please refresh the page.".to_string()
            }
            ClientError::IncompleteBoard => {
                "Please place both players and end positions before starting!".to_string()
            }
            other => other.to_string(),
        }
    }
}
