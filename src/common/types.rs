use std::fmt;

use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch.
pub type Millis = i64;

/// Message id, minted from the controller's monotonic counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Notification id, minted from the notification center's own counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification-{}", self.0)
    }
}

/// Domain model đại diện một tin nhắn chat. Không thay đổi sau khi append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender_id: String,
    pub sender_name: String,
    pub content: String,
    pub timestamp: Millis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

/// Transient alert shown on top of the chat surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub description: String,
    pub kind: NotificationKind,
    pub created_at: Millis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Online,
    Away,
    Offline,
}

impl Presence {
    pub fn label(self) -> &'static str {
        match self {
            Presence::Online => "online",
            Presence::Away => "away",
            Presence::Offline => "offline",
        }
    }
}

/// Reference data for one side of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub display_name: String,
    pub avatar_ref: String,
    pub presence: Presence,
}

impl Participant {
    pub fn new(id: &str, display_name: &str, presence: Presence) -> Self {
        let seed = display_name.split_whitespace().next().unwrap_or(id);
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            avatar_ref: format!("https://api.dicebear.com/7.x/avataaars/svg?seed={seed}"),
            presence,
        }
    }

    /// Up to two initials, used where the avatar image is not rendered.
    pub fn initials(&self) -> String {
        self.display_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

/// Whether the selected recipient is "composing" a synthetic reply.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypingState {
    #[default]
    Idle,
    Typing {
        recipient_id: String,
        started_at: Millis,
    },
}

impl TypingState {
    pub fn is_typing(&self) -> bool {
        matches!(self, TypingState::Typing { .. })
    }
}

/// Desktop notification permission as reported by the permission gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    #[default]
    Default,
    Granted,
    Denied,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_render_as_strings() {
        assert_eq!(MessageId(5).to_string(), "5");
        assert_eq!(NotificationId(12).to_string(), "notification-12");
    }

    #[test]
    fn initials_take_first_two_words() {
        let bob = Participant::new("bob", "Bob Smith", Presence::Online);
        assert_eq!(bob.initials(), "BS");
        assert!(bob.avatar_ref.ends_with("seed=Bob"));

        let solo = Participant::new("x", "xavier", Presence::Away);
        assert_eq!(solo.initials(), "X");
    }

    #[test]
    fn notification_kind_serializes_lowercase() {
        let json = serde_json::to_string(&NotificationKind::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        let status: PermissionStatus = serde_json::from_str("\"granted\"").unwrap();
        assert_eq!(status, PermissionStatus::Granted);
    }
}
