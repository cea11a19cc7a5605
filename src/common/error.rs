use thiserror::Error;

use super::types::MessageId;

pub type ChatResult<T> = Result<T, ChatError>;

#[derive(Debug, Error)]
pub enum ChatError {
    /// Empty content or missing sender identity.
    #[error("invalid message {id}: {reason}")]
    InvalidMessage { id: MessageId, reason: &'static str },

    #[error("message id {0} already exists in the store")]
    DuplicateMessageId(MessageId),

    #[error("failed to access config file {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_error_display() {
        let err = ChatError::InvalidMessage {
            id: MessageId(7),
            reason: "content is empty",
        };
        assert_eq!(err.to_string(), "invalid message 7: content is empty");

        let err = ChatError::DuplicateMessageId(MessageId(3));
        assert_eq!(err.to_string(), "message id 3 already exists in the store");
    }
}
