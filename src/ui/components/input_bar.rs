//! Question input bar
//!
//! Single-line text field with a microphone button for voice input and a
//! send button. Enter submits whatever is in the field; the service is
//! the judge of what makes a valid question.

use crate::ui::state::AppState;
use crate::ui::strings;
use crate::ui::theme::Theme;
use egui::{Key, RichText, TextEdit, Ui};

pub struct InputBar<'a> {
    theme: &'a Theme,
}

impl<'a> InputBar<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    pub fn show(self, ui: &mut Ui, state: &mut AppState) {
        let mut submit = false;
        let mut voice = false;

        ui.horizontal(|ui| {
            let mic_label = if state.capturing { "⏳" } else { "🎤" };
            let mic = ui.add_enabled(
                !state.capturing,
                egui::Button::new(RichText::new(mic_label).size(18.0))
                    .rounding(self.theme.button_rounding),
            );
            if mic.on_hover_text(strings::TOOLTIP_VOICE_INPUT).clicked() {
                voice = true;
            }

            let send_width = 36.0;
            let field_width = ui.available_width() - send_width - ui.spacing().item_spacing.x;

            // The whole row is inert while a capture session is open,
            // matching a modal recognizer dialog.
            ui.add_enabled_ui(!state.capturing, |ui| {
                let response = ui.add(
                    TextEdit::singleline(&mut state.input_text)
                        .hint_text(strings::INPUT_HINT)
                        .desired_width(field_width),
                );

                if response.changed() {
                    state.input_error = None;
                }
                if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                    submit = true;
                    response.request_focus();
                }

                let send = ui.add(
                    egui::Button::new(RichText::new("➤").size(16.0))
                        .rounding(self.theme.button_rounding),
                );
                if send.on_hover_text(strings::TOOLTIP_SEND).clicked() {
                    submit = true;
                }
            });
        });

        if let Some(error) = &state.input_error {
            ui.label(RichText::new(error).color(self.theme.error).small());
        }

        if voice {
            state.start_voice_input();
        }
        if submit {
            state.submit_current();
        }
    }
}
