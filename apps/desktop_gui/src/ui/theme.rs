//! Colors and visuals for the classifier window.

use crate::controller::reducer::Tone;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub app_background: egui::Color32,
    pub card_fill: egui::Color32,
    pub card_stroke: egui::Color32,
    pub accent: egui::Color32,
    pub accent_hover: egui::Color32,
    pub disabled: egui::Color32,
    pub alert: egui::Color32,
    pub success: egui::Color32,
    pub muted_text: egui::Color32,
    pub drop_zone_stroke: egui::Color32,
}

impl Palette {
    pub fn clinical_dark() -> Self {
        let app_background = egui::Color32::from_rgb(23, 37, 84);
        Self {
            app_background,
            card_fill: lighten_color(app_background, 0.08),
            card_stroke: egui::Color32::from_rgb(71, 85, 105),
            accent: egui::Color32::from_rgb(79, 70, 229),
            accent_hover: egui::Color32::from_rgb(67, 56, 202),
            disabled: egui::Color32::from_rgb(107, 114, 128),
            alert: egui::Color32::from_rgb(239, 68, 68),
            success: egui::Color32::from_rgb(34, 197, 94),
            muted_text: egui::Color32::from_rgb(156, 163, 175),
            drop_zone_stroke: egui::Color32::from_rgb(129, 140, 248),
        }
    }

    pub fn tone_color(&self, tone: Tone) -> egui::Color32 {
        match tone {
            Tone::Alert => self.alert,
            Tone::Success => self.success,
        }
    }
}

pub fn tone_icon(tone: Tone) -> &'static str {
    match tone {
        Tone::Alert => "⚠",
        Tone::Success => "✔",
    }
}

pub fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

pub fn visuals_for_palette(palette: &Palette) -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(egui::Color32::from_rgb(226, 232, 240));
    visuals.window_fill = palette.card_fill;
    visuals.panel_fill = palette.app_background;
    visuals.extreme_bg_color = palette.app_background;
    visuals.faint_bg_color = lighten_color(palette.app_background, 0.04);
    visuals.hyperlink_color = palette.accent;
    visuals.selection.bg_fill = palette.accent;
    visuals.widgets.active.bg_fill = palette.accent;
    visuals.widgets.hovered.bg_fill = palette.accent_hover;
    visuals.window_stroke = egui::Stroke::new(1.0, palette.card_stroke);
    visuals.window_corner_radius = egui::CornerRadius::same(12);
    visuals
}
