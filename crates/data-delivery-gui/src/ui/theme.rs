use eframe::egui::{self, Color32, FontId, Margin, RichText, Stroke, Style, TextStyle, Vec2};

#[derive(Clone)]
pub struct Palette {
    pub background: Color32,
    pub panel: Color32,
    pub input_background: Color32,
    pub header_top: Color32,
    pub header_bottom: Color32,
    pub accent: Color32,
    pub soft_accent: Color32,
    pub separator: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    /// Fill of the button that creates the delivery.
    pub delivery_button: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(12, 22, 34),
            panel: Color32::from_rgb(17, 30, 45),
            input_background: Color32::from_rgb(28, 44, 62),
            header_top: Color32::from_rgb(12, 22, 34),
            header_bottom: Color32::from_rgb(20, 48, 78),
            accent: Color32::from_rgb(98, 147, 227),
            soft_accent: Color32::from_rgb(54, 84, 122),
            separator: Color32::from_rgb(98, 147, 227),
            text_primary: Color32::from_rgb(222, 230, 240),
            text_muted: Color32::from_rgb(140, 156, 176),
            delivery_button: Color32::from_rgb(98, 147, 227),
        }
    }
}

pub fn install(ctx: &egui::Context, palette: &Palette) {
    apply_visuals(ctx, palette);
    ctx.style_mut(|style| {
        apply_text_styles(style);
        apply_spacing(style);
    });
}

pub fn section_heading(ui: &egui::Ui, palette: &Palette, text: impl Into<String>) -> RichText {
    let size = ui.style().text_styles[&TextStyle::Heading].size;
    RichText::new(text)
        .font(FontId::proportional(size))
        .color(palette.accent)
}

fn apply_visuals(ctx: &egui::Context, palette: &Palette) {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(palette.text_primary);
    visuals.widgets.noninteractive.bg_fill = palette.input_background;
    visuals.widgets.noninteractive.fg_stroke.color = palette.text_primary;
    visuals.widgets.inactive.bg_fill = palette.input_background;
    visuals.widgets.inactive.fg_stroke.color = palette.text_primary;
    visuals.widgets.hovered.bg_fill = palette.soft_accent;
    visuals.widgets.active.bg_fill = palette.accent.gamma_multiply(0.7);
    visuals.selection.bg_fill = palette.soft_accent;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent);
    visuals.extreme_bg_color = palette.background;
    visuals.faint_bg_color = palette.panel;
    visuals.panel_fill = palette.panel;
    visuals.window_fill = palette.panel;
    visuals.window_stroke.color = palette.accent;

    ctx.set_visuals(visuals);
}

fn apply_spacing(style: &mut Style) {
    style.spacing.item_spacing = Vec2::new(10.0, 6.0);
    style.spacing.button_padding = Vec2::new(12.0, 6.0);
    style.spacing.window_margin = Margin::same(12);
    style.spacing.indent = 16.0;
}

fn apply_text_styles(style: &mut Style) {
    for (text_style, font) in [
        (TextStyle::Heading, FontId::proportional(20.0)),
        (TextStyle::Body, FontId::proportional(15.0)),
        (TextStyle::Button, FontId::proportional(15.0)),
        (TextStyle::Small, FontId::proportional(12.0)),
        (TextStyle::Monospace, FontId::monospace(14.0)),
    ] {
        style.text_styles.insert(text_style, font);
    }
}

/// Fills `rect` with a top-to-bottom colour blend.
pub fn draw_vertical_gradient(
    painter: &egui::Painter,
    rect: egui::Rect,
    top: Color32,
    bottom: Color32,
) {
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return;
    }

    let mut mesh = egui::epaint::Mesh::default();
    for (pos, color) in [
        (rect.left_top(), top),
        (rect.right_top(), top),
        (rect.left_bottom(), bottom),
        (rect.right_bottom(), bottom),
    ] {
        mesh.colored_vertex(pos, color);
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(2, 1, 3);

    painter.add(egui::Shape::mesh(mesh));
}

pub fn draw_separator(painter: &egui::Painter, rect: egui::Rect, color: Color32) {
    painter.rect_filled(rect, 0.0, color);
}
