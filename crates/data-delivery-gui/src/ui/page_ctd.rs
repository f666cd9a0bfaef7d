use ctd_package::{DeliveryBackend, Statistics, STATISTICS_SUFFIXES};
use delivery_core::{
    action_button, statistics_label, Action, ActionDescriptor, ActionDispatcher, MetadataField,
    PathField, SelectionAction,
};
use eframe::egui;

use crate::dialogs::Dialogs;
use crate::state::DeliveryApp;
use crate::ui::{section, theme::Palette};

pub const PATHS_TITLE: &str = "Sökvägar";
pub const STATISTICS_ALL_TITLE: &str = "Statistik (alla filer)";
pub const FILES_TITLE: &str = "Inkludera filer";
pub const METADATA_TITLE: &str = "Information om leveransen";
pub const STATISTICS_SELECTED_TITLE: &str = "Statistik (valda filer)";
pub const OVERWRITE_LABEL: &str = "Skriv över filer";
pub const CREATE_DELIVERY_LABEL: &str = "Skapa leverans";

/// Actions reachable from the keyboard.
pub fn shortcut_actions() -> Vec<ActionDescriptor> {
    vec![
        ActionDescriptor::new(
            Action::SelectSourceDirectory,
            PathField::LocalRootDir.label(),
        )
        .with_shortcut(egui::KeyboardShortcut::new(
            egui::Modifiers::COMMAND,
            egui::Key::O,
        )),
        ActionDescriptor::new(Action::RescanSourceDirectory, "Läs in källmappen igen")
            .with_shortcut(egui::KeyboardShortcut::new(
                egui::Modifiers::NONE,
                egui::Key::F5,
            )),
        ActionDescriptor::new(Action::CreateDelivery, CREATE_DELIVERY_LABEL).with_shortcut(
            egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Enter),
        ),
    ]
}

pub fn path_section<B: DeliveryBackend, D: Dialogs>(app: &mut DeliveryApp<B, D>, ui: &mut egui::Ui) {
    let palette = app.theme.clone();
    section(ui, &palette, PATHS_TITLE, |ui| {
        egui::Grid::new("ctd_paths")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for (field, action) in [
                    (PathField::LocalRootDir, Action::SelectSourceDirectory),
                    (PathField::OutputDir, Action::SelectOutputDirectory),
                    (PathField::SharkwebFile, Action::SelectSharkwebFile),
                ] {
                    let descriptor = ActionDescriptor::new(action, field.label());
                    action_button(ui, app, &descriptor);
                    ui.label(app.page.fields.path(field).get());
                    ui.end_row();
                }
            });
    });
}

pub fn statistics_section(
    ui: &mut egui::Ui,
    palette: &Palette,
    title: &str,
    statistics: Option<&Statistics>,
) {
    section(ui, palette, title, |ui| {
        egui::Grid::new(title)
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                for suffix in STATISTICS_SUFFIXES {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(format!("Antal {suffix}-filer:"));
                    });
                    ui.label(statistics_label(statistics, suffix));
                    ui.end_row();
                }
            });
    });
}

/// Dual-list selector: clicking a name moves it to the other list.
pub fn file_selector<B: DeliveryBackend, D: Dialogs>(app: &mut DeliveryApp<B, D>, ui: &mut egui::Ui) {
    let palette = app.theme.clone();
    let mut clicked = None;

    section(ui, &palette, FILES_TITLE, |ui| {
        let selection = app.page.selection();
        ui.columns(2, |columns| {
            columns[0].label(egui::RichText::new("Tillgängliga").color(palette.text_muted));
            egui::ScrollArea::vertical()
                .id_salt("ctd_available_files")
                .max_height(320.0)
                .show(&mut columns[0], |ui| {
                    for name in selection.available() {
                        if ui.selectable_label(false, name).clicked() {
                            clicked = Some(SelectionAction::Select(name.to_string()));
                        }
                    }
                });

            columns[1].label(egui::RichText::new("Valda").color(palette.text_muted));
            egui::ScrollArea::vertical()
                .id_salt("ctd_selected_files")
                .max_height(320.0)
                .show(&mut columns[1], |ui| {
                    for name in selection.selected() {
                        if ui.selectable_label(true, name.as_str()).clicked() {
                            clicked = Some(SelectionAction::Deselect(name.clone()));
                        }
                    }
                });
        });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui.button("Välj alla").clicked() {
                clicked = Some(SelectionAction::SelectAll);
            }
            if ui.button("Avmarkera alla").clicked() {
                clicked = Some(SelectionAction::DeselectAll);
            }
        });
    });

    if let Some(selection) = clicked {
        app.trigger_action(Action::Selection(selection));
    }
}

pub fn metadata_section<B: DeliveryBackend, D: Dialogs>(
    app: &mut DeliveryApp<B, D>,
    ui: &mut egui::Ui,
) {
    let palette = app.theme.clone();
    section(ui, &palette, METADATA_TITLE, |ui| {
        egui::Grid::new("ctd_metadata")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for field in MetadataField::ALL {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(field.label());
                    });
                    ui.add(
                        egui::TextEdit::singleline(app.page.fields.metadata_mut(field).buffer_mut())
                            .desired_width(f32::INFINITY),
                    );
                    ui.end_row();
                }

                ui.label("");
                ui.checkbox(app.page.overwrite.buffer_mut(), OVERWRITE_LABEL);
                ui.end_row();
            });

        ui.add_space(6.0);
        ui.scope(|ui| {
            let widgets = &mut ui.visuals_mut().widgets;
            widgets.inactive.weak_bg_fill = palette.delivery_button;
            widgets.hovered.weak_bg_fill = palette.delivery_button.gamma_multiply(0.85);
            ui.spacing_mut().button_padding.y = 10.0;
            let descriptor = ActionDescriptor::new(Action::CreateDelivery, CREATE_DELIVERY_LABEL);
            action_button(ui, app, &descriptor);
        });
    });
}
