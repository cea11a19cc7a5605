use std::collections::HashSet;

use crate::common::{ChatError, ChatMessage, ChatResult, MessageId};

/// Append-only log of the active conversation, in insertion order.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<ChatMessage>,
    // Ids stay reserved after `clear` so they are unique for the store's lifetime.
    seen_ids: HashSet<MessageId>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: ChatMessage) -> ChatResult<()> {
        if message.content.trim().is_empty() {
            return Err(ChatError::InvalidMessage {
                id: message.id,
                reason: "content is empty",
            });
        }
        if message.sender_id.is_empty() || message.sender_name.is_empty() {
            return Err(ChatError::InvalidMessage {
                id: message.id,
                reason: "sender identity is missing",
            });
        }
        if !self.seen_ids.insert(message.id) {
            return Err(ChatError::DuplicateMessageId(message.id));
        }

        self.messages.push(message);
        Ok(())
    }

    pub fn all(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: u64, sender: &str, content: &str, timestamp: i64) -> ChatMessage {
        ChatMessage {
            id: MessageId(id),
            sender_id: sender.to_lowercase(),
            sender_name: sender.to_string(),
            content: content.to_string(),
            timestamp,
        }
    }

    #[test]
    fn keeps_insertion_order_over_timestamps() {
        let mut store = MessageStore::new();
        store.append(message(1, "Alice", "later", 2_000)).unwrap();
        store.append(message(2, "Bob", "earlier", 1_000)).unwrap();

        let contents: Vec<_> = store.all().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["later", "earlier"]);
        assert_eq!(store.last().map(|m| m.id), Some(MessageId(2)));
    }

    #[test]
    fn rejects_blank_content_and_missing_sender() {
        let mut store = MessageStore::new();
        let err = store.append(message(1, "Alice", "   ", 0)).unwrap_err();
        assert!(matches!(err, ChatError::InvalidMessage { .. }));

        let mut anonymous = message(2, "Alice", "hi", 0);
        anonymous.sender_id.clear();
        let err = store.append(anonymous).unwrap_err();
        assert!(matches!(
            err,
            ChatError::InvalidMessage {
                reason: "sender identity is missing",
                ..
            }
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn ids_stay_unique_across_clear() {
        let mut store = MessageStore::new();
        store.append(message(1, "Alice", "hi", 0)).unwrap();
        assert!(matches!(
            store.append(message(1, "Bob", "dup", 0)),
            Err(ChatError::DuplicateMessageId(MessageId(1)))
        ));

        store.clear();
        assert_eq!(store.len(), 0);
        assert!(store.append(message(1, "Bob", "reused", 0)).is_err());
        store.append(message(2, "Bob", "fresh", 0)).unwrap();
        assert_eq!(store.len(), 1);
    }
}
