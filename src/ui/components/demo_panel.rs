use eframe::egui;

use crate::common::ChatCommand;
use crate::ui::state::ActivityEntry;

pub fn render(ui: &mut egui::Ui, activity: &[ActivityEntry]) -> Option<ChatCommand> {
    let mut command = None;

    ui.heading("🎮 Demo Controls");
    ui.separator();

    if ui.button("Simulate Message").clicked() {
        command = Some(ChatCommand::SimulateIncoming);
    }
    if ui.button("Demo Push Notification").clicked() {
        command = Some(ChatCommand::ShowDemoNotification);
    }
    if ui.button("Clear Messages").clicked() {
        command = Some(ChatCommand::ClearMessages);
    }

    ui.separator();

    // Hiển thị log events gần đây
    ui.label("Recent Events:");
    egui::ScrollArea::vertical()
        .max_height(240.0)
        .show(ui, |ui| {
            for entry in activity.iter().rev().take(20) {
                let time_str = entry.timestamp.format("%H:%M:%S");
                let color = match entry.event_type {
                    "MESSAGE" => egui::Color32::LIGHT_BLUE,
                    "NOTIFY" => egui::Color32::YELLOW,
                    "TYPING" => egui::Color32::GRAY,
                    "PERMISSION" => egui::Color32::GREEN,
                    "CLEARED" => egui::Color32::RED,
                    _ => egui::Color32::WHITE,
                };

                ui.horizontal(|ui| {
                    ui.colored_label(color, format!("[{}]", time_str));
                    ui.label(entry.message.as_str());
                });
            }
        });

    command
}
