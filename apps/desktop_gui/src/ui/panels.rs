use crate::controller::reducer::{DropZone, ResultsPanel, SubmitControl};
use crate::ui::theme::{tone_icon, Palette};

const DROP_ZONE_PROMPT_HEIGHT: f32 = 190.0;
const PREVIEW_MAX_HEIGHT: f32 = 256.0;
const DROP_ZONE_PADDING: f32 = 16.0;

pub fn card_frame(palette: &Palette) -> egui::Frame {
    egui::Frame::NONE
        .fill(palette.card_fill)
        .corner_radius(12.0)
        .stroke(egui::Stroke::new(1.0, palette.card_stroke))
        .inner_margin(egui::Margin::symmetric(24, 22))
}

pub fn header(ui: &mut egui::Ui, palette: &Palette) {
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new("🧠").size(44.0).color(palette.accent));
        ui.add_space(4.0);
        ui.heading(egui::RichText::new("Brain Tumor Classification").size(30.0).strong());
        ui.label(
            egui::RichText::new(
                "Upload a brain MRI scan to detect the presence of tumors using advanced AI",
            )
            .size(16.0)
            .color(palette.muted_text),
        );
    });
}

/// Clickable drop target. Returns the click response so the caller can open
/// the picker.
pub fn drop_zone(
    ui: &mut egui::Ui,
    zone: &DropZone<'_>,
    texture: Option<&egui::TextureHandle>,
    files_hovering: bool,
    palette: &Palette,
) -> egui::Response {
    let width = ui.available_width();
    let preview_size = match (zone, texture) {
        (DropZone::Preview(_), Some(texture)) => {
            let size = texture.size_vec2();
            let max_w = (width - 2.0 * DROP_ZONE_PADDING).max(1.0);
            let scale = (PREVIEW_MAX_HEIGHT / size.y).min(max_w / size.x).min(1.0);
            Some(size * scale)
        }
        _ => None,
    };
    let height = preview_size
        .map(|size| size.y + 2.0 * DROP_ZONE_PADDING)
        .unwrap_or(DROP_ZONE_PROMPT_HEIGHT);

    let (rect, response) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::click());
    let painter = ui.painter_at(rect);

    if files_hovering || response.hovered() {
        painter.rect_filled(
            rect,
            egui::CornerRadius::same(8),
            palette.accent.gamma_multiply(0.12),
        );
    }
    let stroke_color = if files_hovering {
        palette.accent
    } else {
        palette.drop_zone_stroke
    };
    let outline = rect.shrink(1.0);
    let corners = [
        outline.left_top(),
        outline.right_top(),
        outline.right_bottom(),
        outline.left_bottom(),
        outline.left_top(),
    ];
    painter.extend(egui::Shape::dashed_line(
        &corners,
        egui::Stroke::new(2.0, stroke_color),
        8.0,
        5.0,
    ));

    match (zone, texture, preview_size) {
        (DropZone::Preview(_), Some(texture), Some(size)) => {
            let image_rect = egui::Rect::from_center_size(rect.center(), size);
            painter.image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        (DropZone::Preview(handle), _, _) => {
            let name = if handle.image().is_none() {
                "Preview unavailable"
            } else {
                "Loading preview..."
            };
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                name,
                egui::FontId::proportional(15.0),
                palette.muted_text,
            );
        }
        (DropZone::Prompt(prompt), _, _) => {
            painter.text(
                rect.center() - egui::vec2(0.0, 18.0),
                egui::Align2::CENTER_CENTER,
                "⬆",
                egui::FontId::proportional(40.0),
                palette.drop_zone_stroke,
            );
            painter.text(
                rect.center() + egui::vec2(0.0, 26.0),
                egui::Align2::CENTER_CENTER,
                *prompt,
                egui::FontId::proportional(15.0),
                palette.muted_text,
            );
        }
    }

    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}

pub fn error_row(ui: &mut egui::Ui, message: &str, palette: &Palette) {
    ui.add_space(12.0);
    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new("⚠").color(palette.alert).size(18.0));
        ui.label(egui::RichText::new(message).color(palette.alert));
    });
}

/// Returns `true` when the button was clicked.
pub fn submit_button(ui: &mut egui::Ui, control: SubmitControl, palette: &Palette) -> bool {
    ui.add_space(18.0);
    let fill = if control.enabled {
        palette.accent
    } else {
        palette.disabled
    };
    let button = egui::Button::new(
        egui::RichText::new(control.label)
            .strong()
            .size(16.0)
            .color(egui::Color32::WHITE),
    )
    .fill(fill)
    .corner_radius(egui::CornerRadius::same(8))
    .min_size(egui::vec2(ui.available_width(), 44.0));

    ui.add_enabled(control.enabled, button).clicked()
}

pub fn results_card(ui: &mut egui::Ui, results: &ResultsPanel<'_>, palette: &Palette) {
    let tone_color = palette.tone_color(results.tone);
    card_frame(palette).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(tone_icon(results.tone))
                    .color(tone_color)
                    .size(22.0),
            );
            ui.label(egui::RichText::new(results.title).size(24.0).strong());
        });
        ui.add_space(8.0);
        ui.label(egui::RichText::new(results.label).size(18.0).color(tone_color));
        if let Some(confidence) = &results.confidence_text {
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(confidence)
                    .size(13.0)
                    .color(palette.muted_text),
            );
        }
    });
}
