pub mod commands;
pub mod error;
pub mod events;
pub mod types;

pub use commands::ChatCommand;
pub use error::{ChatError, ChatResult};
pub use events::{ChatEvent, RemovalReason};
pub use types::{
    ChatMessage, MessageId, Millis, Notification, NotificationId, NotificationKind, Participant,
    PermissionStatus, Presence, TypingState,
};
