use eframe::egui;

/// Returns the typed text when the user asks to send. The caller clears the
/// buffer only if the controller accepted it.
pub fn render(
    ui: &mut egui::Ui,
    input_text: &mut String,
    can_send: bool,
    sending: bool,
) -> Option<String> {
    let mut send = false;
    ui.horizontal(|ui| {
        let hint = if can_send {
            "Type a message..."
        } else {
            "Select a recipient first"
        };
        let response = ui.add_enabled(
            can_send,
            egui::TextEdit::singleline(input_text).hint_text(hint),
        );

        let label = if sending { "Sending..." } else { "Send" };
        if ui
            .add_enabled(can_send && !sending, egui::Button::new(label))
            .clicked()
        {
            send = true;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
        }
    });

    if send && !input_text.trim().is_empty() {
        return Some(input_text.clone());
    }

    None
}
