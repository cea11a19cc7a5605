use eframe::egui;

use crate::common::{Notification, NotificationId, NotificationKind};

fn kind_style(kind: NotificationKind) -> (&'static str, egui::Color32) {
    match kind {
        NotificationKind::Success => ("✅", egui::Color32::from_rgb(22, 163, 74)),
        NotificationKind::Error => ("❌", egui::Color32::from_rgb(220, 38, 38)),
        NotificationKind::Warning => ("⚠", egui::Color32::from_rgb(202, 138, 4)),
        NotificationKind::Info => ("💬", egui::Color32::from_rgb(37, 99, 235)),
    }
}

/// Toast stack in the top-right corner. Returns the id whose close button was clicked.
pub fn render<'a>(
    ctx: &egui::Context,
    notifications: impl Iterator<Item = &'a Notification>,
) -> Option<NotificationId> {
    let mut dismissed = None;

    egui::Area::new(egui::Id::new("notification_stack"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-24.0, 24.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.set_max_width(360.0);
            for notification in notifications {
                let (icon, color) = kind_style(notification.kind);
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.colored_label(color, icon);
                        ui.vertical(|ui| {
                            ui.label(egui::RichText::new(notification.title.as_str()).strong());
                            ui.label(
                                egui::RichText::new(notification.description.as_str()).small(),
                            );
                        });
                        if ui.small_button("✕").clicked() {
                            dismissed = Some(notification.id);
                        }
                    });
                });
                ui.add_space(8.0);
            }
        });

    dismissed
}
