use super::types::NotificationId;

/// Lệnh UI gửi xuống conversation controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    SelectRecipient {
        user_id: String,
    },
    /// Gửi tin nhắn tới recipient đang chọn.
    /// - content: nội dung chưa trim, lấy từ ô input
    SendMessage {
        content: String,
    },
    ClearMessages,
    /// Kích hoạt thủ công pipeline typing -> reply (nút "Simulate Message").
    SimulateIncoming,
    ShowDemoNotification,
    DismissNotification {
        id: NotificationId,
    },
}

impl ChatCommand {
    /// Log-safe command tag.
    pub fn tag(&self) -> &'static str {
        match self {
            ChatCommand::SelectRecipient { .. } => "SelectRecipient",
            ChatCommand::SendMessage { .. } => "SendMessage",
            ChatCommand::ClearMessages => "ClearMessages",
            ChatCommand::SimulateIncoming => "SimulateIncoming",
            ChatCommand::ShowDemoNotification => "ShowDemoNotification",
            ChatCommand::DismissNotification { .. } => "DismissNotification",
        }
    }
}
