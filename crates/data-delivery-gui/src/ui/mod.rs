use eframe::egui;

pub mod page_ctd;
pub mod theme;

pub(crate) fn centered_column<R>(
    ui: &mut egui::Ui,
    max_width: f32,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    let available = ui.available_width();
    let width = available.min(max_width);
    let margin = ((available - width) * 0.5).max(0.0);

    ui.horizontal(|ui| {
        if margin > 0.0 {
            ui.add_space(margin);
        }
        let inner = ui
            .scope(|ui| {
                ui.set_width(width);
                ui.with_layout(egui::Layout::top_down(egui::Align::Min), add_contents)
                    .inner
            })
            .inner;
        if margin > 0.0 {
            ui.add_space(margin);
        }
        inner
    })
    .inner
}

/// Framed group with a heading, one per area of the page.
pub(crate) fn section<R>(
    ui: &mut egui::Ui,
    palette: &theme::Palette,
    title: &str,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(1.0, palette.soft_accent))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(theme::section_heading(ui, palette, title));
            ui.add_space(4.0);
            add_contents(ui)
        })
        .inner
}
