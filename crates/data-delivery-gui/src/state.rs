use std::path::PathBuf;

use ctd_package::{DeliveryBackend, FsDeliveryBackend};
use delivery_core::{
    format_missing_sensorinfo_message, Action, ActionDispatcher, CtdPage, DeliveryOutcome,
    PageEvent, PathField, Saves, INCOMPLETE_INFORMATION_TITLE,
};
use eframe::egui;
use log::{error, info};

use crate::dialogs::{
    Dialogs, RfdDialogs, OUTPUT_DIRECTORY_TITLE, SHARKWEB_FILE_TITLE, SOURCE_DIRECTORY_TITLE,
};
use crate::ui::theme;

pub const CENTERED_COLUMN_MAX_WIDTH: f32 = 1180.0;
pub const TWO_COLUMN_MIN_WIDTH: f32 = 760.0;

pub struct DeliveryApp<B = FsDeliveryBackend, D = RfdDialogs> {
    pub(crate) page: CtdPage<B>,
    pub(crate) saves: Saves,
    pub(crate) dialogs: D,
    pub(crate) theme: theme::Palette,
    pub(crate) settings_saved: bool,
}

impl DeliveryApp {
    pub fn new(cc: &eframe::CreationContext<'_>, saves: Saves) -> Self {
        let app = Self::with_parts(CtdPage::default(), saves, RfdDialogs);
        theme::install(&cc.egui_ctx, &app.theme);
        app
    }
}

impl<B: DeliveryBackend, D: Dialogs> DeliveryApp<B, D> {
    /// Builds the app and restores the page from `saves`.
    pub fn with_parts(page: CtdPage<B>, saves: Saves, dialogs: D) -> Self {
        let mut app = Self {
            page,
            saves,
            dialogs,
            theme: theme::Palette::default(),
            settings_saved: false,
        };
        app.page.startup(&app.saves);
        app
    }

    pub fn page(&self) -> &CtdPage<B> {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut CtdPage<B> {
        &mut self.page
    }

    pub fn saves(&self) -> &Saves {
        &self.saves
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    /// Answers the picker requests queued by the page.
    pub fn process_events(&mut self) {
        for event in self.page.take_events() {
            match event {
                PageEvent::PickSourceDirectory => {
                    let start = self.start_location(PathField::LocalRootDir);
                    let directory = self
                        .dialogs
                        .pick_folder(SOURCE_DIRECTORY_TITLE, start.as_deref());
                    self.page.choose_source_directory(directory);
                }
                PageEvent::PickOutputDirectory => {
                    let start = self.start_location(PathField::OutputDir);
                    let directory = self
                        .dialogs
                        .pick_folder(OUTPUT_DIRECTORY_TITLE, start.as_deref());
                    self.page.choose_output_directory(directory);
                }
                PageEvent::PickSharkwebFile => {
                    let start = self
                        .start_location(PathField::SharkwebFile)
                        .and_then(|file| file.parent().map(PathBuf::from));
                    let file = self
                        .dialogs
                        .pick_file(SHARKWEB_FILE_TITLE, start.as_deref());
                    self.page.choose_sharkweb_file(file);
                }
            }
        }
    }

    /// Shows queued notices, then asks about a delivery waiting for
    /// confirmation.
    pub fn process_notices(&mut self) {
        for notice in self.page.take_notices() {
            self.dialogs.show_notice(&notice);
        }

        let Some(pending) = self.page.pending_delivery() else {
            return;
        };
        let message = format_missing_sensorinfo_message(&pending.missing_sensorinfo);
        let action = if self.dialogs.confirm(INCOMPLETE_INFORMATION_TITLE, &message) {
            Action::ConfirmDelivery
        } else {
            Action::CancelDelivery
        };
        self.trigger_action(action);
        for notice in self.page.take_notices() {
            self.dialogs.show_notice(&notice);
        }
    }

    /// Persists the page fields. Runs once per close request.
    pub fn save_settings(&mut self) {
        if self.settings_saved {
            return;
        }
        match self.page.close(&mut self.saves) {
            Ok(()) => info!("settings saved to {}", self.saves.file_path().display()),
            Err(err) => error!("could not save settings: {err}"),
        }
        self.settings_saved = true;
    }

    fn start_location(&self, field: PathField) -> Option<PathBuf> {
        let text = self.page.fields.path(field).trimmed();
        (!text.is_empty()).then(|| PathBuf::from(text))
    }

    fn report_delivery(&mut self, result: Result<DeliveryOutcome, delivery_core::PageError>) {
        match result {
            Ok(DeliveryOutcome::Created { note_path }) => {
                info!("delivery note written to {}", note_path.display())
            }
            Ok(outcome) => info!("delivery not created: {outcome:?}"),
            Err(err) => error!("{err}"),
        }
    }

    pub(crate) fn handle_close_request(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.viewport().close_requested()) {
            self.save_settings();
        }
    }
}

impl<B: DeliveryBackend, D: Dialogs> ActionDispatcher for DeliveryApp<B, D> {
    fn is_action_enabled(&self, action: Action) -> bool {
        match action {
            Action::RescanSourceDirectory => !self.page.fields.local_root_dir.is_blank(),
            Action::ConfirmDelivery | Action::CancelDelivery => {
                self.page.pending_delivery().is_some()
            }
            Action::CreateDelivery => self.page.pending_delivery().is_none(),
            _ => true,
        }
    }

    fn trigger_action(&mut self, action: Action) {
        match action {
            Action::SelectSourceDirectory => self.page.request(PageEvent::PickSourceDirectory),
            Action::SelectOutputDirectory => self.page.request(PageEvent::PickOutputDirectory),
            Action::SelectSharkwebFile => self.page.request(PageEvent::PickSharkwebFile),
            Action::RescanSourceDirectory => self.page.rescan_source_directory(),
            Action::CreateDelivery => {
                let result = self.page.create_delivery();
                self.report_delivery(result);
            }
            Action::ConfirmDelivery => {
                let result = self.page.confirm_pending_delivery();
                self.report_delivery(result);
            }
            Action::CancelDelivery => self.page.cancel_pending_delivery(),
            Action::Selection(selection) => self.page.apply_selection_action(selection),
        }
    }
}
