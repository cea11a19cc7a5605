use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::chat::ConversationController;
use crate::clock::SystemClock;
use crate::common::{ChatCommand, ChatEvent, PermissionStatus, TypingState};
use crate::permission::{PermissionGateway, SimulatedPermissionGateway};

use super::components::{
    chat_area::{self, ChatAreaView},
    demo_panel, input_bar, notifications,
    sidebar::{self, SidebarActions},
};
use super::state::UiState;

const REPAINT_INTERVAL: Duration = Duration::from_millis(100);
const IDLE_REPAINT_INTERVAL: Duration = Duration::from_secs(1);

pub struct ChatApp {
    controller: ConversationController<SystemClock>,
    state: UiState,
    event_receiver: mpsc::UnboundedReceiver<ChatEvent>,
    gateway: Arc<SimulatedPermissionGateway>,
    permission_sender: mpsc::UnboundedSender<PermissionStatus>,
    permission_receiver: mpsc::UnboundedReceiver<PermissionStatus>,
    runtime: Handle,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        mut controller: ConversationController<SystemClock>,
        gateway: Arc<SimulatedPermissionGateway>,
        runtime: Handle,
    ) -> Self {
        let event_receiver = controller.subscribe();
        controller.refresh_permission(gateway.as_ref());
        let (permission_sender, permission_receiver) = mpsc::unbounded_channel();

        Self {
            controller,
            state: UiState::new(),
            event_receiver,
            gateway,
            permission_sender,
            permission_receiver,
            runtime,
        }
    }

    fn handle_background_results(&mut self) {
        while let Ok(status) = self.permission_receiver.try_recv() {
            self.controller.apply_permission_result(status);
        }
        while let Ok(event) = self.event_receiver.try_recv() {
            self.state.record(&event);
        }
    }

    fn request_permission(&self) {
        let gateway = Arc::clone(&self.gateway);
        let sender = self.permission_sender.clone();
        self.runtime.spawn(async move {
            let status = gateway.request().await;
            if let Err(err) = sender.send(status) {
                log::warn!("Failed to report permission result to UI: {err}");
            }
        });
    }

    fn apply_commands(&mut self, commands: Vec<ChatCommand>) {
        for command in commands {
            let is_send = matches!(command, ChatCommand::SendMessage { .. });
            if self.controller.dispatch(command) && is_send {
                self.state.input_text.clear();
            }
        }
    }

    fn typing_name(&self) -> Option<String> {
        let TypingState::Typing { recipient_id, .. } = self.controller.typing() else {
            return None;
        };
        let name = self
            .controller
            .participants()
            .into_iter()
            .find(|p| &p.id == recipient_id)
            .map(|p| p.display_name)
            .unwrap_or_else(|| recipient_id.clone());
        Some(name)
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.tick();
        self.handle_background_results();

        let mut commands = Vec::new();
        let mut wants_permission = false;
        let participants = self.controller.participants();

        egui::SidePanel::left("contact_sidebar")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                let actions: SidebarActions = sidebar::render(
                    ui,
                    self.controller.current_user(),
                    &participants,
                    self.controller.recipient(),
                    self.controller.permission(),
                );
                if let Some(user_id) = actions.select_recipient {
                    commands.push(ChatCommand::SelectRecipient { user_id });
                }
                wants_permission = actions.request_permission;
            });

        egui::SidePanel::right("demo_panel")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                if let Some(command) = demo_panel::render(ui, &self.state.activity) {
                    commands.push(command);
                }
            });

        egui::TopBottomPanel::bottom("input_panel").show(ctx, |ui| {
            ui.add_space(6.0);
            let can_send = self.controller.recipient().is_some();
            let sending = self.controller.is_sending();
            if let Some(content) =
                input_bar::render(ui, &mut self.state.input_text, can_send, sending)
            {
                commands.push(ChatCommand::SendMessage { content });
            }
            ui.add_space(6.0);
        });

        let typing_name = self.typing_name();
        egui::CentralPanel::default().show(ctx, |ui| {
            match self.controller.recipient() {
                Some(recipient) => ui.heading(format!("Chat with {}", recipient.display_name)),
                None => ui.heading("Select a user from the dropdown to start chatting"),
            };
            ui.separator();
            chat_area::render(
                ui,
                &ChatAreaView {
                    messages: self.controller.messages(),
                    current_user_id: &self.controller.current_user().id,
                    typing_name: typing_name.as_deref(),
                    now: self.controller.now_ms(),
                },
            );
        });

        if let Some(id) = notifications::render(ctx, self.controller.notifications()) {
            commands.push(ChatCommand::DismissNotification { id });
        }

        self.apply_commands(commands);
        if wants_permission {
            self.request_permission();
        }

        // Pending timers need a steady redraw; otherwise only relative timestamps age.
        if self.controller.next_deadline().is_some() {
            ctx.request_repaint_after(REPAINT_INTERVAL);
        } else {
            ctx.request_repaint_after(IDLE_REPAINT_INTERVAL);
        }
    }
}
