//! Main application window

use crate::ui::components::{InputBar, PodList};
use crate::ui::state::AppState;
use crate::ui::strings;
use crate::ui::theme::Theme;
use egui::RichText;
use std::time::Duration;

pub struct AskpodApp {
    state: AppState,
    theme: Theme,
}

impl AskpodApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        let theme = Theme::default();
        theme.apply(&cc.egui_ctx);

        Self { state, theme }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(self.theme.spacing_sm),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(strings::APP_TITLE)
                                .size(18.0)
                                .strong()
                                .color(self.theme.primary),
                        );
                        ui.label(
                            RichText::new(strings::APP_SUBTITLE)
                                .small()
                                .color(self.theme.text_muted),
                        );
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button(RichText::new("🗑").size(16.0))
                            .on_hover_text(strings::TOOLTIP_CLEAR)
                            .clicked()
                        {
                            self.state.clear_all();
                        }

                        if ui
                            .button(RichText::new("🔇").size(16.0))
                            .on_hover_text(strings::TOOLTIP_STOP_SPEECH)
                            .clicked()
                        {
                            self.state.stop_speech();
                        }

                        if self.state.orchestrator.is_busy() {
                            ui.add(egui::Spinner::new().color(self.theme.primary));
                        }
                    });
                });
            });
    }

    fn show_input_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("input")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(self.theme.spacing_sm),
            )
            .show(ctx, |ui| {
                InputBar::new(&self.theme).show(ui, &mut self.state);
            });
    }

    fn show_notice_panel(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.state.notice.clone() else {
            return;
        };

        egui::TopBottomPanel::bottom("notice")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_tertiary)
                    .inner_margin(self.theme.spacing_sm),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(notice).color(self.theme.warning));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(strings::NOTICE_DISMISS).clicked() {
                            self.state.dismiss_notice();
                        }
                    });
                });
            });
    }

    fn show_results(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing_sm),
            )
            .show(ctx, |ui| {
                let clicked =
                    PodList::new(self.state.orchestrator.results(), &self.theme).show(ui);
                if let Some(item) = clicked {
                    self.state.select_item(&item);
                }
            });
    }
}

impl eframe::App for AskpodApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_events();

        self.show_header(ctx);
        // Bottom panels stack upward, so the input bar is declared first
        // to sit at the very bottom with the notice above it.
        self.show_input_panel(ctx);
        self.show_notice_panel(ctx);
        self.show_results(ctx);

        if self.state.orchestrator.is_busy() || self.state.capturing {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.shutdown();
    }
}
