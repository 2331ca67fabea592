//! Scrollable answer list
//!
//! Renders one card per result with its title and text content. Clicking
//! a card activates it, which the app turns into a speak request.

use crate::results::ResultItem;
use crate::ui::strings;
use crate::ui::theme::Theme;
use egui::{Label, RichText, ScrollArea, Sense, Ui};

pub struct PodList<'a> {
    items: &'a [ResultItem],
    theme: &'a Theme,
}

impl<'a> PodList<'a> {
    pub fn new(items: &'a [ResultItem], theme: &'a Theme) -> Self {
        Self { items, theme }
    }

    /// Render the list. Returns the item the user clicked, if any.
    pub fn show(self, ui: &mut Ui) -> Option<ResultItem> {
        if self.items.is_empty() {
            self.show_empty_state(ui);
            return None;
        }

        let mut activated = None;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(self.theme.spacing_sm);

                for item in self.items {
                    if self.show_card(ui, item) {
                        activated = Some(item.clone());
                    }
                    ui.add_space(self.theme.spacing_sm);
                }
            });

        activated
    }

    fn show_card(&self, ui: &mut Ui, item: &ResultItem) -> bool {
        let response = egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());

                ui.label(
                    RichText::new(&item.title)
                        .strong()
                        .color(self.theme.primary),
                );
                ui.add_space(self.theme.spacing_sm / 2.0);
                ui.add(
                    Label::new(
                        RichText::new(&item.content).color(self.theme.text_primary),
                    )
                    .wrap(),
                );
            })
            .response;

        response
            .interact(Sense::click())
            .on_hover_text("Read aloud")
            .clicked()
    }

    fn show_empty_state(&self, ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.3);
            ui.label(
                RichText::new(strings::EMPTY_STATE_TITLE)
                    .size(20.0)
                    .color(self.theme.text_secondary),
            );
            ui.add_space(self.theme.spacing_sm);
            ui.label(
                RichText::new(strings::EMPTY_STATE_HINT).color(self.theme.text_muted),
            );
        });
    }
}
