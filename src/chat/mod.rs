pub mod controller;
pub mod demo;
pub mod message_store;
pub mod notification_center;
pub mod timestamp;
pub mod typing;

use crate::common::{NotificationId, Participant};

pub use controller::{ConversationController, ReplyTrigger};
pub use message_store::MessageStore;
pub use notification_center::NotificationCenter;
pub use timestamp::format_timestamp;
pub use typing::{ReplyReady, TypingSimulator};

/// Work the controller parks in its timer queue.
#[derive(Debug, Clone, PartialEq)]
pub enum Deferred {
    /// Delivery confirmation for a user-authored send; releases the send lock.
    DeliveryConfirmed { recipient_name: String },
    /// Synthetic reply delay elapsed; the recipient was captured at send time.
    ReplyDue { recipient: Participant },
    TypingFinished { session: u64 },
    NotificationExpired { id: NotificationId },
    Welcome,
}
