use eframe::egui;

use crate::chat::format_timestamp;
use crate::common::{ChatMessage, Millis};

pub struct ChatAreaView<'a> {
    pub messages: &'a [ChatMessage],
    pub current_user_id: &'a str,
    /// Display name of whoever is typing right now.
    pub typing_name: Option<&'a str>,
    pub now: Millis,
}

pub fn render(ui: &mut egui::Ui, view: &ChatAreaView<'_>) {
    egui::ScrollArea::vertical()
        .stick_to_bottom(true)
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            if view.messages.is_empty() {
                ui.label(egui::RichText::new("No messages yet").weak());
            }

            for message in view.messages {
                let own = message.sender_id == view.current_user_id;
                let (align, fill) = if own {
                    (egui::Align::Max, egui::Color32::from_rgb(37, 99, 235))
                } else {
                    (egui::Align::Min, ui.visuals().faint_bg_color)
                };

                ui.with_layout(egui::Layout::top_down(align), |ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{} · {}",
                            message.sender_name,
                            format_timestamp(message.timestamp, view.now)
                        ))
                        .small()
                        .weak(),
                    );
                    egui::Frame::group(ui.style()).fill(fill).show(ui, |ui| {
                        let text = egui::RichText::new(message.content.as_str());
                        ui.label(if own {
                            text.color(egui::Color32::WHITE)
                        } else {
                            text
                        });
                    });
                });
                ui.add_space(6.0);
            }

            // Typing indicator
            if let Some(name) = view.typing_name {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(egui::RichText::new(format!("{name} is typing...")).italics());
                });
            }
        });
}
