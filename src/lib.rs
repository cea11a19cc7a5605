pub mod chat;
pub mod clock;
pub mod common;
pub mod config;
pub mod directory;
pub mod permission;
pub mod ui;

pub use chat::{ConversationController, ReplyTrigger};
pub use clock::{Clock, ManualClock, SystemClock};
pub use common::{ChatCommand, ChatError, ChatEvent, ChatMessage, Notification, Participant};
pub use config::AppConfig;
