use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;

use crate::clock::{Clock, TimerQueue};
use crate::common::{
    ChatCommand, ChatEvent, ChatMessage, MessageId, Millis, Notification, NotificationId,
    NotificationKind, Participant, PermissionStatus, RemovalReason, TypingState,
};
use crate::config::{AppConfig, Timings};
use crate::directory::{DemoDirectory, UserDirectory};
use crate::permission::PermissionGateway;

use super::demo::{self, DEMO_PUSH_BODY, DEMO_PUSH_TITLE, WELCOME_BODY, WELCOME_TITLE};
use super::{Deferred, MessageStore, NotificationCenter, ReplyReady, TypingSimulator};

/// What started a typing session. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTrigger {
    AutoReply,
    Manual,
}

/// Owns all conversation state and every pending timer.
///
/// Single-threaded: the owner calls [`ConversationController::tick`] regularly
/// (every frame in the UI, on an interval in headless mode) to run deferred work.
pub struct ConversationController<C: Clock> {
    clock: C,
    timings: Timings,
    directory: Box<dyn UserDirectory + Send>,
    current_user: Participant,
    recipient: Option<Participant>,
    store: MessageStore,
    notifications: NotificationCenter,
    typing: TypingSimulator,
    timers: TimerQueue<Deferred>,
    send_lock: bool,
    next_message_id: u64,
    permission: PermissionStatus,
    rng: StdRng,
    subscribers: Vec<mpsc::UnboundedSender<ChatEvent>>,
}

impl<C: Clock> ConversationController<C> {
    /// Demo directory and an entropy-seeded RNG.
    pub fn with_defaults(clock: C, config: &AppConfig) -> Self {
        Self::new(
            clock,
            config,
            DemoDirectory::default(),
            StdRng::from_entropy(),
        )
    }

    pub fn new(
        clock: C,
        config: &AppConfig,
        directory: impl UserDirectory + Send + 'static,
        rng: StdRng,
    ) -> Self {
        let timings = config.timings.clone();
        let mut controller = Self {
            clock,
            directory: Box::new(directory),
            current_user: config.current_user.clone(),
            recipient: None,
            store: MessageStore::new(),
            notifications: NotificationCenter::new(timings.notification_ttl_ms),
            typing: TypingSimulator::new(timings.typing_duration_ms),
            timers: TimerQueue::new(),
            send_lock: false,
            next_message_id: 1,
            permission: PermissionStatus::Default,
            rng,
            subscribers: Vec::new(),
            timings,
        };

        let now = controller.clock.now_ms();
        if config.seed_demo_messages {
            controller.seed_demo_messages(now);
        }
        if config.welcome_notification {
            controller
                .timers
                .after(now, controller.timings.welcome_delay_ms, Deferred::Welcome);
        }
        controller
    }

    fn seed_demo_messages(&mut self, now: Millis) {
        let Some(peer) = self.directory.participants().into_iter().next() else {
            log::warn!("Directory is empty; skipping demo messages");
            return;
        };
        let (messages, next_id) = demo::seed_messages(&self.current_user, &peer, now);
        for message in messages {
            self.append(message);
        }
        self.next_message_id = next_id;
    }

    /// Receive every state change from now on.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<ChatEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Returns `true` when the command changed state.
    pub fn dispatch(&mut self, command: ChatCommand) -> bool {
        log::debug!("Dispatching {}", command.tag());
        match command {
            ChatCommand::SelectRecipient { user_id } => self.select_recipient(&user_id),
            ChatCommand::SendMessage { content } => self.send_message(&content).is_some(),
            ChatCommand::ClearMessages => {
                self.clear_messages();
                true
            }
            ChatCommand::SimulateIncoming => {
                self.simulate_incoming_message(ReplyTrigger::Manual)
            }
            ChatCommand::ShowDemoNotification => {
                self.show_demo_notification();
                true
            }
            ChatCommand::DismissNotification { id } => self.dismiss_notification(id),
        }
    }

    /// Switch the active recipient. Pending replies for the previous one still arrive.
    pub fn select_recipient(&mut self, user_id: &str) -> bool {
        let Some(participant) = self.directory.lookup(user_id) else {
            log::warn!("Unknown recipient `{user_id}`");
            return false;
        };
        log::info!("Chatting with {}", participant.display_name);
        self.recipient = Some(participant.clone());
        self.emit(ChatEvent::RecipientChanged(participant));
        true
    }

    /// Append a message from the current user and schedule its confirmation and reply.
    ///
    /// `None` means the send was skipped (blank content, no recipient, or a send
    /// still in flight); the caller keeps its input buffer. On `Some` the caller
    /// clears it.
    pub fn send_message(&mut self, content: &str) -> Option<MessageId> {
        let content = content.trim();
        if content.is_empty() {
            log::debug!("Send skipped: empty content");
            return None;
        }
        let Some(recipient) = self.recipient.clone() else {
            log::debug!("Send skipped: no recipient selected");
            return None;
        };
        if self.send_lock {
            log::debug!("Send skipped: previous send still in flight");
            return None;
        }

        let now = self.clock.now_ms();
        let id = self.mint_message_id();
        let message = ChatMessage {
            id,
            sender_id: self.current_user.id.clone(),
            sender_name: self.current_user.display_name.clone(),
            content: content.to_string(),
            timestamp: now,
        };
        if !self.append(message) {
            return None;
        }

        self.send_lock = true;
        self.emit(ChatEvent::SendLockChanged(true));
        self.timers.after(
            now,
            self.timings.delivery_delay_ms,
            Deferred::DeliveryConfirmed {
                recipient_name: recipient.display_name.clone(),
            },
        );

        let delay = self.reply_delay();
        log::debug!("Auto-reply from {} in {delay}ms", recipient.id);
        self.timers
            .after(now, delay, Deferred::ReplyDue { recipient });
        Some(id)
    }

    pub fn clear_messages(&mut self) {
        self.store.clear();
        self.emit(ChatEvent::MessagesCleared);
        let now = self.clock.now_ms();
        self.notify(
            "Messages Cleared",
            "All messages have been cleared",
            NotificationKind::Info,
            now,
        );
    }

    /// Start the typing -> reply pipeline for the current recipient right away.
    pub fn simulate_incoming_message(&mut self, trigger: ReplyTrigger) -> bool {
        let Some(recipient) = self.recipient.clone() else {
            log::debug!("Simulated message skipped: no recipient selected");
            return false;
        };
        let now = self.clock.now_ms();
        self.start_typing(&recipient, trigger, now)
    }

    pub fn show_demo_notification(&mut self) -> NotificationId {
        let now = self.clock.now_ms();
        self.notify(DEMO_PUSH_TITLE, DEMO_PUSH_BODY, NotificationKind::Info, now)
    }

    pub fn dismiss_notification(&mut self, id: NotificationId) -> bool {
        match self.notifications.dismiss(id, &mut self.timers) {
            Some(_) => {
                self.emit(ChatEvent::NotificationRemoved {
                    id,
                    reason: RemovalReason::Dismissed,
                });
                true
            }
            None => false,
        }
    }

    /// Pick up the gateway's current answer without prompting.
    pub fn refresh_permission(&mut self, gateway: &impl PermissionGateway) {
        self.set_permission(gateway.query());
    }

    /// Record the outcome of a permission prompt.
    pub fn apply_permission_result(&mut self, status: PermissionStatus) {
        self.set_permission(status);
        if status == PermissionStatus::Granted {
            let now = self.clock.now_ms();
            self.notify(
                "🎉 Notifications Enabled!",
                "You'll now receive push notifications for new messages.",
                NotificationKind::Success,
                now,
            );
        }
    }

    fn set_permission(&mut self, status: PermissionStatus) {
        if self.permission != status {
            self.permission = status;
            self.emit(ChatEvent::PermissionChanged(status));
        }
    }

    /// Run every deferred task whose deadline has passed. Returns how many ran.
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now_ms();
        let mut fired = 0;
        while let Some(due) = self.timers.pop_due(now) {
            fired += 1;
            self.run_deferred(due.task, due.due_at);
        }
        fired
    }

    // Tasks run at their own deadline so simulated timestamps do not depend on
    // how late the owner got around to ticking.
    fn run_deferred(&mut self, task: Deferred, at: Millis) {
        match task {
            Deferred::DeliveryConfirmed { recipient_name } => {
                self.notify(
                    "Message Sent",
                    format!("Message delivered to {recipient_name}"),
                    NotificationKind::Success,
                    at,
                );
                self.send_lock = false;
                self.emit(ChatEvent::SendLockChanged(false));
            }
            Deferred::ReplyDue { recipient } => {
                self.start_typing(&recipient, ReplyTrigger::AutoReply, at);
            }
            Deferred::TypingFinished { session } => {
                if let Some(reply) = self.typing.finish(session, &mut self.rng) {
                    self.emit(ChatEvent::TypingChanged(TypingState::Idle));
                    self.deliver_reply(reply, at);
                }
            }
            Deferred::NotificationExpired { id } => {
                if self.notifications.expire(id).is_some() {
                    self.emit(ChatEvent::NotificationRemoved {
                        id,
                        reason: RemovalReason::Expired,
                    });
                }
            }
            Deferred::Welcome => {
                self.notify(WELCOME_TITLE, WELCOME_BODY, NotificationKind::Info, at);
            }
        }
    }

    fn start_typing(&mut self, recipient: &Participant, trigger: ReplyTrigger, now: Millis) -> bool {
        if !self.typing.start(recipient, now, &mut self.timers) {
            return false;
        }
        log::debug!("{} is typing ({trigger:?})", recipient.display_name);
        self.emit(ChatEvent::TypingChanged(self.typing.state().clone()));
        true
    }

    fn deliver_reply(&mut self, reply: ReplyReady, now: Millis) {
        let id = self.mint_message_id();
        let message = ChatMessage {
            id,
            sender_id: reply.recipient.id.clone(),
            sender_name: reply.recipient.display_name.clone(),
            content: reply.content,
            timestamp: now,
        };
        let title = format!("New message from {}", message.sender_name);
        let description = message.content.clone();
        if self.append(message) {
            self.notify(title, description, NotificationKind::Info, now);
        }
    }

    fn append(&mut self, message: ChatMessage) -> bool {
        match self.store.append(message.clone()) {
            Ok(()) => {
                log::info!("Message {} from {}", message.id, message.sender_id);
                self.emit(ChatEvent::MessageAppended(message));
                true
            }
            Err(err) => {
                log::error!("Dropping message: {err}");
                false
            }
        }
    }

    fn notify(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        kind: NotificationKind,
        now: Millis,
    ) -> NotificationId {
        let notification =
            self.notifications
                .enqueue(title, description, kind, now, &mut self.timers);
        log::info!("Notification {}: {}", notification.id, notification.title);
        let id = notification.id;
        self.emit(ChatEvent::NotificationShown(notification));
        id
    }

    fn mint_message_id(&mut self) -> MessageId {
        let id = MessageId(self.next_message_id);
        self.next_message_id += 1;
        id
    }

    fn reply_delay(&mut self) -> Millis {
        let min = self.timings.reply_delay_min_ms;
        let max = self.timings.reply_delay_max_ms;
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    fn emit(&mut self, event: ChatEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.store.all()
    }

    /// Newest first.
    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    pub fn typing(&self) -> &TypingState {
        self.typing.state()
    }

    pub fn reply_phrases(&self) -> &'static [&'static str] {
        self.typing.phrases()
    }

    pub fn is_sending(&self) -> bool {
        self.send_lock
    }

    pub fn recipient(&self) -> Option<&Participant> {
        self.recipient.as_ref()
    }

    pub fn current_user(&self) -> &Participant {
        &self.current_user
    }

    pub fn participants(&self) -> Vec<Participant> {
        self.directory.participants()
    }

    pub fn permission(&self) -> PermissionStatus {
        self.permission
    }

    pub fn now_ms(&self) -> Millis {
        self.clock.now_ms()
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }
}
