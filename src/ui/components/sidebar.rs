use eframe::egui;

use crate::common::{Participant, PermissionStatus, Presence};

#[derive(Default)]
pub struct SidebarActions {
    pub select_recipient: Option<String>,
    pub request_permission: bool,
}

fn presence_color(presence: Presence) -> egui::Color32 {
    match presence {
        Presence::Online => egui::Color32::GREEN,
        Presence::Away => egui::Color32::YELLOW,
        Presence::Offline => egui::Color32::GRAY,
    }
}

pub fn render(
    ui: &mut egui::Ui,
    current_user: &Participant,
    participants: &[Participant],
    recipient: Option<&Participant>,
    permission: PermissionStatus,
) -> SidebarActions {
    let mut actions = SidebarActions::default();

    ui.heading("Chat");
    ui.horizontal(|ui| {
        ui.colored_label(presence_color(current_user.presence), "●");
        ui.label(egui::RichText::new(current_user.display_name.as_str()).strong());
    });
    ui.separator();

    // Recipient picker
    ui.label("Send to:");
    let selected_text = recipient
        .map(|r| format!("{} ({})", r.display_name, r.initials()))
        .unwrap_or_else(|| "Select a user".to_string());
    egui::ComboBox::from_id_salt("recipient_picker")
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            for participant in participants {
                let selected = recipient.is_some_and(|r| r.id == participant.id);
                let label = format!(
                    "{}  ·  {}",
                    participant.display_name,
                    participant.presence.label()
                );
                if ui.selectable_label(selected, label).clicked() {
                    actions.select_recipient = Some(participant.id.clone());
                }
            }
        });

    ui.add_space(8.0);
    ui.label("Contacts:");
    for participant in participants {
        ui.horizontal(|ui| {
            ui.colored_label(presence_color(participant.presence), "●");
            ui.label(participant.display_name.as_str());
            ui.label(egui::RichText::new(participant.presence.label()).weak());
        });
    }

    ui.separator();
    ui.label("Push notifications:");
    let (text, color) = match permission {
        PermissionStatus::Granted => ("✅ Enabled", egui::Color32::GREEN),
        PermissionStatus::Denied => ("❌ Blocked", egui::Color32::RED),
        PermissionStatus::Default => ("⏳ Not requested", egui::Color32::YELLOW),
    };
    ui.colored_label(color, text);
    if permission == PermissionStatus::Default && ui.button("Enable notifications").clicked() {
        actions.request_permission = true;
    }

    actions
}
