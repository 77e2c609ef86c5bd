//! Reusable UI components
//!
//! This module contains standalone UI components that can be used
//! throughout the application.

use crate::classify::{Classification, ColorToken};
use crate::theme;
use eframe::egui;

/// Labelled single-line numeric input bound to a form field
pub fn field_input(
    ui: &mut egui::Ui,
    id_salt: &str,
    label: &str,
    hint: &str,
    value: &mut String,
) -> egui::Response {
    ui.add(
        egui::Label::new(
            egui::RichText::new(label)
                .size(theme::FONT_LABEL)
                .color(theme::TEXT_MUTED),
        )
        .selectable(false),
    );
    ui.add(
        egui::TextEdit::singleline(value)
            .id_salt(id_salt)
            .hint_text(hint)
            .min_size(egui::vec2(0.0, theme::INPUT_HEIGHT))
            .vertical_align(egui::Align::Center)
            .desired_width(ui.available_width()),
    )
}

/// Full-width accent button. Shows a spinner and `busy_label` while busy.
pub fn primary_button(ui: &mut egui::Ui, label: &str, busy_label: &str, busy: bool) -> bool {
    let size = egui::vec2(ui.available_width(), theme::BUTTON_HEIGHT_LARGE);
    let sense = if busy { egui::Sense::hover() } else { egui::Sense::click() };
    let (rect, response) = ui.allocate_exact_size(size, sense);

    if !busy && response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    if ui.is_rect_visible(rect) {
        let base = if busy { theme::ACCENT_MUTED } else { theme::ACCENT };
        let (fill, draw_rect) = if busy {
            (base, rect)
        } else {
            theme::button_visual(&response, base, rect)
        };
        let painter = ui.painter();
        painter.rect_filled(draw_rect, theme::RADIUS_LARGE, fill);

        let text = if busy { busy_label } else { label };
        painter.text(
            draw_rect.center(),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(theme::FONT_BODY),
            theme::TEXT_PRIMARY,
        );
        if busy {
            let spinner_rect = egui::Rect::from_center_size(
                egui::pos2(draw_rect.left() + 20.0, draw_rect.center().y),
                egui::vec2(16.0, 16.0),
            );
            ui.put(spinner_rect, egui::Spinner::new().size(14.0).color(theme::TEXT_PRIMARY));
        }
    }

    !busy && response.clicked()
}

/// Small pill showing the tier label in its color
pub fn tier_badge(ui: &mut egui::Ui, label: &str, token: ColorToken) {
    let (bg, fg) = theme::tier_colors(token);
    egui::Frame::new()
        .fill(bg)
        .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, fg))
        .corner_radius(theme::BADGE_HEIGHT / 2.0)
        .inner_margin(egui::Margin::symmetric(10, 3))
        .show(ui, |ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new(label)
                        .size(theme::FONT_LABEL)
                        .strong()
                        .color(fg),
                )
                .selectable(false),
            );
        });
}

/// Horizontal bar filled to the classification width
pub fn affordability_meter(ui: &mut egui::Ui, classification: &Classification) {
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), theme::METER_HEIGHT),
        egui::Sense::hover(),
    );
    if !ui.is_rect_visible(rect) {
        return;
    }
    let (_, fg) = theme::tier_colors(classification.color);
    let painter = ui.painter();
    let radius = theme::METER_HEIGHT / 2.0;
    painter.rect_filled(rect, radius, theme::BG_SURFACE);

    let fill_w = rect.width() * meter_fraction(classification.width);
    let fill = egui::Rect::from_min_size(rect.min, egui::vec2(fill_w, rect.height()));
    painter.rect_filled(fill, radius, fg);
}

fn meter_fraction(width: u8) -> f32 {
    width.min(100) as f32 / 100.0
}
