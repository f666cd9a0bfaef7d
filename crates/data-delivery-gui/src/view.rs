use ctd_package::DeliveryBackend;
use delivery_core::handle_shortcuts;
use eframe::egui;

use crate::{
    dialogs::Dialogs,
    state::{self, DeliveryApp},
    ui::{self, page_ctd, theme},
};

pub const WINDOW_TITLE: &str = "Dataleverans";

impl<B: DeliveryBackend, D: Dialogs> DeliveryApp<B, D> {
    /// Draws the CTD page into `ctx` without handling dialogs or close
    /// requests.
    pub fn show_page(&mut self, ctx: &egui::Context) {
        handle_shortcuts(ctx, self, &page_ctd::shortcut_actions());

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().fill(self.theme.background))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                theme::draw_vertical_gradient(
                    ui.painter(),
                    rect,
                    self.theme.header_top,
                    self.theme.header_bottom,
                );
                let separator_rect =
                    egui::Rect::from_min_max(egui::pos2(rect.min.x, rect.max.y - 2.0), rect.max);
                theme::draw_separator(ui.painter(), separator_rect, self.theme.separator);
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.add_space(12.0);
                    ui.label(theme::section_heading(ui, &self.theme, "CTD"));
                });
                ui.add_space(6.0);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.theme.background).inner_margin(egui::Margin::same(8)))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui::centered_column(ui, state::CENTERED_COLUMN_MAX_WIDTH, |ui| {
                        page_ctd::path_section(self, ui);
                        ui.add_space(8.0);

                        let palette = self.theme.clone();
                        if ui.available_width() >= state::TWO_COLUMN_MIN_WIDTH {
                            ui.columns(4, |columns| {
                                page_ctd::statistics_section(
                                    &mut columns[0],
                                    &palette,
                                    page_ctd::STATISTICS_ALL_TITLE,
                                    self.page.statistics_all(),
                                );
                                page_ctd::file_selector(self, &mut columns[1]);
                                page_ctd::metadata_section(self, &mut columns[2]);
                                page_ctd::statistics_section(
                                    &mut columns[3],
                                    &palette,
                                    page_ctd::STATISTICS_SELECTED_TITLE,
                                    self.page.statistics_selected(),
                                );
                            });
                        } else {
                            page_ctd::file_selector(self, ui);
                            ui.add_space(8.0);
                            page_ctd::metadata_section(self, ui);
                            ui.add_space(8.0);
                            ui.columns(2, |columns| {
                                page_ctd::statistics_section(
                                    &mut columns[0],
                                    &palette,
                                    page_ctd::STATISTICS_ALL_TITLE,
                                    self.page.statistics_all(),
                                );
                                page_ctd::statistics_section(
                                    &mut columns[1],
                                    &palette,
                                    page_ctd::STATISTICS_SELECTED_TITLE,
                                    self.page.statistics_selected(),
                                );
                            });
                        }
                    });
                });
            });
    }
}

impl<B: DeliveryBackend, D: Dialogs> eframe::App for DeliveryApp<B, D> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_close_request(ctx);
        self.show_page(ctx);
        self.process_events();
        self.process_notices();
    }
}
