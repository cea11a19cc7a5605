use chrono::{DateTime, Local};

use crate::common::{ChatEvent, PermissionStatus, RemovalReason, TypingState};

const MAX_ACTIVITY: usize = 100;

/// Một dòng trong activity log của demo panel.
#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Local>,
    pub event_type: &'static str,
    pub message: String,
}

/// Trạng thái cục bộ của UI. Conversation state nằm trong controller.
#[derive(Debug, Default)]
pub struct UiState {
    pub input_text: String,
    pub activity: Vec<ActivityEntry>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: &ChatEvent) {
        let (event_type, message) = match event {
            ChatEvent::MessageAppended(message) => (
                "MESSAGE",
                format!("{}: {}", message.sender_name, message.content),
            ),
            ChatEvent::MessagesCleared => ("CLEARED", "Conversation cleared".to_string()),
            ChatEvent::NotificationShown(notification) => {
                ("NOTIFY", format!("{} {}", notification.id, notification.title))
            }
            ChatEvent::NotificationRemoved { id, reason } => {
                let how = match reason {
                    RemovalReason::Expired => "expired",
                    RemovalReason::Dismissed => "dismissed",
                };
                ("NOTIFY", format!("{id} {how}"))
            }
            ChatEvent::TypingChanged(TypingState::Typing { recipient_id, .. }) => {
                ("TYPING", format!("{recipient_id} started typing"))
            }
            ChatEvent::TypingChanged(TypingState::Idle) => ("TYPING", "Typing stopped".to_string()),
            ChatEvent::SendLockChanged(true) => ("SEND", "Sending...".to_string()),
            ChatEvent::SendLockChanged(false) => ("SEND", "Delivered".to_string()),
            ChatEvent::RecipientChanged(participant) => (
                "RECIPIENT",
                format!("Now chatting with {}", participant.display_name),
            ),
            ChatEvent::PermissionChanged(status) => {
                let label = match status {
                    PermissionStatus::Default => "not requested",
                    PermissionStatus::Granted => "granted",
                    PermissionStatus::Denied => "denied",
                };
                ("PERMISSION", format!("Notifications {label}"))
            }
        };
        self.push_activity(event_type, message);
    }

    fn push_activity(&mut self, event_type: &'static str, message: String) {
        self.activity.push(ActivityEntry {
            timestamp: Local::now(),
            event_type,
            message,
        });

        // Giữ tối đa 100 events để không chiếm quá nhiều bộ nhớ
        if self.activity.len() > MAX_ACTIVITY {
            self.activity.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::NotificationId;

    #[test]
    fn activity_log_is_capped() {
        let mut state = UiState::new();
        for _ in 0..(MAX_ACTIVITY + 5) {
            state.record(&ChatEvent::MessagesCleared);
        }
        assert_eq!(state.activity.len(), MAX_ACTIVITY);
    }

    #[test]
    fn removal_reason_is_described() {
        let mut state = UiState::new();
        state.record(&ChatEvent::NotificationRemoved {
            id: NotificationId(3),
            reason: RemovalReason::Dismissed,
        });
        let entry = &state.activity[0];
        assert_eq!(entry.event_type, "NOTIFY");
        assert_eq!(entry.message, "notification-3 dismissed");
    }
}
