//! Canned content for the demo conversation.

use crate::common::{ChatMessage, MessageId, Millis, Participant};

/// Phrases the simulated recipient picks from when replying.
pub const REPLY_PHRASES: &[&str] = &[
    "That's awesome! The egui widgets look great 👍",
    "This chat interface is really smooth and professional!",
    "I love the real-time messaging feature 💬",
    "The push notifications work perfectly!",
    "Great job on the responsive layout 📱",
    "This Rust integration looks amazing! 🎨",
    "The typing indicator is a nice touch ⌨",
    "The UI is so clean and modern! ✨",
];

pub const WELCOME_TITLE: &str = "🚀 Welcome to Chat App!";
pub const WELCOME_BODY: &str =
    "Select a user from the dropdown to start chatting. Try the demo controls below!";

pub const DEMO_PUSH_TITLE: &str = "🔔 Push Notification Demo";
pub const DEMO_PUSH_BODY: &str = "This is how notifications appear when the app is in background!";

/// Four-message history between the current user and `peer`, oldest first.
///
/// Returns the messages plus the next free message id.
pub fn seed_messages(
    current_user: &Participant,
    peer: &Participant,
    now: Millis,
) -> (Vec<ChatMessage>, u64) {
    let lines: [(&Participant, &str, Millis); 4] = [
        (current_user, "Hey! How are you doing? 👋", 300_000),
        (
            peer,
            "Hi! I'm doing great, thanks for asking. How about you?",
            240_000,
        ),
        (
            current_user,
            "I'm good too! Working on this new chat app project with push notifications 🚀",
            180_000,
        ),
        (
            peer,
            "That sounds exciting! Can you show me how the notifications work?",
            120_000,
        ),
    ];

    let messages: Vec<ChatMessage> = lines
        .iter()
        .enumerate()
        .map(|(index, (sender, content, age))| ChatMessage {
            id: MessageId(index as u64 + 1),
            sender_id: sender.id.clone(),
            sender_name: sender.display_name.clone(),
            content: content.to_string(),
            timestamp: now - age,
        })
        .collect();
    let next_id = messages.len() as u64 + 1;
    (messages, next_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Presence;

    #[test]
    fn seed_alternates_senders_oldest_first() {
        let alice = Participant::new("alice", "Alice Johnson", Presence::Online);
        let bob = Participant::new("bob", "Bob Smith", Presence::Online);
        let (messages, next_id) = seed_messages(&alice, &bob, 1_000_000);

        assert_eq!(messages.len(), 4);
        assert_eq!(next_id, 5);
        let senders: Vec<_> = messages.iter().map(|m| m.sender_id.as_str()).collect();
        assert_eq!(senders, vec!["alice", "bob", "alice", "bob"]);
        assert!(messages.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert_eq!(messages[0].timestamp, 700_000);
    }
}
