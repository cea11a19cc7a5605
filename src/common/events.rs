use super::types::{ChatMessage, Notification, NotificationId, Participant, PermissionStatus, TypingState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    Expired,
    Dismissed,
}

/// Sự kiện từ controller gửi lên UI (hoặc headless runner).
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    MessageAppended(ChatMessage),
    MessagesCleared,
    NotificationShown(Notification),
    NotificationRemoved {
        id: NotificationId,
        reason: RemovalReason,
    },
    TypingChanged(TypingState),
    SendLockChanged(bool),
    RecipientChanged(Participant),
    PermissionChanged(PermissionStatus),
}
