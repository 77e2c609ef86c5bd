//! View rendering (form card, result, history, settings window)

use super::App;
use crate::api::PredictionEndpoint;
use crate::controller::Feedback;
use crate::form::Field;
use crate::theme;
use crate::types::PredictionResult;
use crate::ui::components::{affordability_meter, field_input, primary_button, tier_badge};
use eframe::egui;

impl App {
    pub fn render_form(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.vertical_centered(|ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new("PREDIKSI HARGA RUMAH")
                        .size(theme::FONT_TITLE)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                )
                .selectable(false),
            );
        });
        ui.add_space(theme::SPACING_XXL);

        for field in Field::ALL {
            let mut value = self.controller.form().get(field).to_string();
            let response = field_input(ui, field.key(), field.label(), field.hint(), &mut value);
            if response.changed() {
                self.controller.update(field, value);
            }
            // Enter in any field submits
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.start_submission(ctx);
            }
            ui.add_space(theme::SPACING_SM);
        }

        ui.add_space(theme::SPACING_LG);
        if primary_button(ui, "Prediksi Harga", "Loading...", self.controller.is_loading()) {
            self.start_submission(ctx);
        }

        ui.add_space(theme::SPACING_SM);
        ui.horizontal(|ui| {
            let dirty = !self.controller.form().is_blank()
                || self.controller.result().is_some()
                || self.controller.feedback().is_some();
            let reset = theme::button(format!(
                "{}  Reset",
                egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE
            ));
            if ui.add_enabled(dirty, reset).clicked() {
                self.controller.reset();
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let gear = ui.add(
                    egui::Button::new(
                        egui::RichText::new(egui_phosphor::regular::GEAR)
                            .size(theme::FONT_BODY)
                            .color(theme::TEXT_MUTED),
                    )
                    .frame(false),
                );
                if gear.on_hover_text("Pengaturan backend").clicked() {
                    self.show_settings = !self.show_settings;
                }
            });
        });
    }

    pub fn render_feedback(&self, ui: &mut egui::Ui) {
        let Some(feedback) = self.controller.feedback() else {
            return;
        };
        let color = match feedback {
            Feedback::Validation => theme::STATUS_WARNING,
            Feedback::Prediction(_) | Feedback::Transport { .. } => theme::STATUS_ERROR,
        };
        ui.add_space(theme::SPACING_LG);
        ui.vertical_centered(|ui| {
            let label = ui.add(
                egui::Label::new(
                    egui::RichText::new(feedback.message())
                        .size(theme::FONT_BODY)
                        .strong()
                        .color(color),
                )
                .wrap(),
            );
            if let Some(detail) = feedback.detail() {
                label.on_hover_text(detail);
            }
        });
    }

    pub fn render_result(&self, ui: &mut egui::Ui) {
        let Some(result) = self.controller.result() else {
            return;
        };
        ui.add_space(theme::SPACING_XL);
        theme::section_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("Prediksi harga")
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(&result.formatted)
                            .size(theme::FONT_PRICE)
                            .strong()
                            .color(theme::ACCENT_TEXT),
                    )
                    .selectable(true),
                );
                ui.add_space(theme::SPACING_SM);
                tier_badge(
                    ui,
                    result.classification.tier.label(),
                    result.classification.color,
                );
            });
            ui.add_space(theme::SPACING_MD);
            affordability_meter(ui, &result.classification);
        });
    }

    pub fn render_history(&self, ui: &mut egui::Ui) {
        let history = self.controller.history();
        if history.is_empty() {
            return;
        }
        ui.add_space(theme::SPACING_XL);
        ui.add(
            egui::Label::new(
                egui::RichText::new("RIWAYAT TERAKHIR")
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
            )
            .selectable(false),
        );
        ui.add_space(theme::SPACING_SM);
        for entry in history.iter() {
            history_row(ui, entry);
            ui.add_space(theme::SPACING_SM);
        }
    }

    pub fn render_settings(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }
        let mut open = true;
        egui::Window::new("Pengaturan")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new("URL backend")
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_MUTED),
                );
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.backend_url_input)
                        .desired_width(320.0)
                        .hint_text(crate::constants::DEFAULT_BACKEND_URL),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if let Some(err) = &self.settings_error {
                    ui.colored_label(theme::STATUS_ERROR, err);
                }
                ui.add_space(theme::SPACING_MD);
                ui.horizontal(|ui| {
                    if ui.add(theme::button("Simpan")).clicked() || submitted {
                        self.apply_backend_url();
                    }
                    ui.label(
                        egui::RichText::new(self.endpoint.url())
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    );
                });
            });
        if !open {
            self.show_settings = false;
            self.backend_url_input = self.settings.backend_url().to_string();
            self.settings_error = None;
        }
    }
}

fn history_row(ui: &mut egui::Ui, entry: &PredictionResult) {
    let (_, color) = theme::tier_colors(entry.classification.color);
    egui::Frame::new()
        .fill(theme::BG_INPUT)
        .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE))
        .corner_radius(theme::RADIUS_MEDIUM)
        .inner_margin(egui::Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                let (dot, _) =
                    ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
                ui.painter().circle_filled(dot.center(), 4.0, color);
                ui.label(
                    egui::RichText::new(&entry.formatted)
                        .size(theme::FONT_BODY)
                        .color(theme::TEXT_PRIMARY),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(entry.received_at.format("%H:%M:%S").to_string())
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    );
                    ui.label(
                        egui::RichText::new(entry.classification.tier.label())
                            .size(theme::FONT_SMALL)
                            .color(color),
                    );
                });
            });
            ui.label(
                egui::RichText::new(entry.inputs.summary())
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_MUTED),
            );
        });
}
