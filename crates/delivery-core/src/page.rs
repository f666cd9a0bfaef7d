use std::{
    collections::HashSet,
    fmt,
    path::{Path, PathBuf},
};

use ctd_package::{
    key_from_file_name, partition_standard_format, statistics_for_packages, DeliveryBackend,
    DeliveryMetadata, FsDeliveryBackend, Package, Statistics, SENSORINFO_SUFFIX,
    STANDARD_FORMAT_SUFFIX, TEMP_DIRECTORY,
};
use log::{debug, error, info, warn};

use crate::actions::SelectionAction;
use crate::commands::{Notice, PageEvent};
use crate::fields::{FormFields, PathField, Toggle};
use crate::saves::{SaveComponents, Saves, SettingsError};
use crate::selection::FileSelection;
use crate::validation::{
    format_file_exists_message, format_internal_error_message,
    format_missing_sensorinfo_message, format_missing_standard_format_message,
    format_no_packages_message, missing_path_message, DELIVERY_CREATED_MESSAGE, DELIVERY_TITLE,
    INSUFFICIENT_INFORMATION_TITLE, MISSING_FILES_TITLE,
    NO_FILES_SELECTED_MESSAGE,
};

pub const PAGE_KEY: &str = "ctd";
pub const OVERWRITE_ID: &str = "overwrite";

#[derive(Debug)]
pub enum PageError {
    Delivery(ctd_package::Error),
    Settings(SettingsError),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::Delivery(err) => write!(f, "Delivery failed: {err}"),
            PageError::Settings(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PageError {}

impl From<ctd_package::Error> for PageError {
    fn from(err: ctd_package::Error) -> Self {
        PageError::Delivery(err)
    }
}

impl From<SettingsError> for PageError {
    fn from(err: SettingsError) -> Self {
        PageError::Settings(err)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Created { note_path: PathBuf },
    AlreadyExists { path: PathBuf },
    /// A guard failed; a warning notice explains which.
    Aborted,
    /// Waiting for the operator to accept packages with incomplete information.
    AwaitingConfirmation,
}

/// A delivery parked until the operator confirms it despite missing sensor info.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingDelivery {
    pub packages: Vec<Package>,
    pub output_dir: PathBuf,
    pub metadata: DeliveryMetadata,
    pub missing_sensorinfo: Vec<String>,
}

/// State and behaviour of the CTD delivery page.
pub struct CtdPage<B = FsDeliveryBackend> {
    backend: B,
    saves: SaveComponents,
    pub fields: FormFields,
    pub overwrite: Toggle,
    all_packages: Vec<Package>,
    selected_packages: Vec<Package>,
    selection: FileSelection,
    statistics_all: Option<Statistics>,
    statistics_selected: Option<Statistics>,
    pending_delivery: Option<PendingDelivery>,
    notices: Vec<Notice>,
    events: Vec<PageEvent>,
}

impl Default for CtdPage<FsDeliveryBackend> {
    fn default() -> Self {
        Self::new(FsDeliveryBackend)
    }
}

impl<B: DeliveryBackend> CtdPage<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            saves: SaveComponents::new(PAGE_KEY),
            fields: FormFields::default(),
            overwrite: Toggle::new(OVERWRITE_ID),
            all_packages: Vec::new(),
            selected_packages: Vec::new(),
            selection: FileSelection::default(),
            statistics_all: None,
            statistics_selected: None,
            pending_delivery: None,
            notices: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Registers the form fields, restores them from `store` and scans the
    /// stored source root if it still exists.
    pub fn startup(&mut self, store: &Saves) {
        self.saves.add_components(FormFields::ids());
        let applied = self.saves.load(store, self.fields.components_mut());
        debug!("restored {applied} fields for page {PAGE_KEY}");
        self.check_missing_paths();
        self.rescan_source_directory();
    }

    pub fn close(&self, store: &mut Saves) -> Result<(), SettingsError> {
        self.saves.save(store, self.fields.components())
    }

    pub fn take_events(&mut self) -> Vec<PageEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn request(&mut self, event: PageEvent) {
        self.events.push(event);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn packages(&self) -> &[Package] {
        &self.all_packages
    }

    pub fn selected_packages(&self) -> &[Package] {
        &self.selected_packages
    }

    pub fn selection(&self) -> &FileSelection {
        &self.selection
    }

    pub fn statistics_all(&self) -> Option<&Statistics> {
        self.statistics_all.as_ref()
    }

    pub fn statistics_selected(&self) -> Option<&Statistics> {
        self.statistics_selected.as_ref()
    }

    pub fn pending_delivery(&self) -> Option<&PendingDelivery> {
        self.pending_delivery.as_ref()
    }

    /// `None` means the picker was cancelled.
    pub fn choose_source_directory(&mut self, directory: Option<PathBuf>) {
        let Some(directory) = directory else {
            return;
        };
        self.fields
            .local_root_dir
            .set(directory.display().to_string());
        self.rescan_source_directory();
    }

    pub fn choose_output_directory(&mut self, directory: Option<PathBuf>) {
        if let Some(directory) = directory {
            self.fields.output_dir.set(directory.display().to_string());
        }
    }

    pub fn choose_sharkweb_file(&mut self, file: Option<PathBuf>) {
        if let Some(file) = file {
            self.fields.sharkweb_file.set(file.display().to_string());
        }
    }

    /// Clears every path field that is blank or no longer exists and returns
    /// those fields. Losing the source root drops the discovered packages.
    pub fn check_missing_paths(&mut self) -> Vec<PathField> {
        let mut missing = Vec::new();
        for field in PathField::ALL {
            let text = self.fields.path(field).trimmed();
            if text.is_empty() {
                self.fields.path_mut(field).clear();
                missing.push(field);
                continue;
            }
            if !Path::new(text).exists() {
                debug!("{} no longer exists: {text}", field.id());
                self.fields.path_mut(field).clear();
                missing.push(field);
                if field == PathField::LocalRootDir {
                    self.reset_packages();
                }
            }
        }
        missing
    }

    /// Path of `field` after validation, `None` when it is missing.
    pub fn path(&mut self, field: PathField) -> Option<PathBuf> {
        if self.check_missing_paths().contains(&field) {
            None
        } else {
            Some(PathBuf::from(self.fields.path(field).trimmed()))
        }
    }

    pub fn rescan_source_directory(&mut self) {
        let Some(directory) = self.path(PathField::LocalRootDir) else {
            return;
        };
        self.reset_packages();

        let packages = match self.backend.discover(&directory, Some(TEMP_DIRECTORY)) {
            Ok(packages) => packages,
            Err(err) => {
                warn!("package discovery in {} failed: {err}", directory.display());
                self.notices
                    .push(Notice::warning(MISSING_FILES_TITLE, err.to_string()));
                return;
            }
        };
        info!("found {} packages in {}", packages.len(), directory.display());

        if packages.is_empty() {
            let message = format_no_packages_message(&directory);
            warn!("{message}");
            self.notices
                .push(Notice::warning(MISSING_FILES_TITLE, message));
            return;
        }

        let (packages, missing) = partition_standard_format(packages);
        self.all_packages = packages;
        if !missing.is_empty() {
            let message = format_missing_standard_format_message(&missing);
            warn!("{message}");
            self.notices
                .push(Notice::warning(INSUFFICIENT_INFORMATION_TITLE, message));
        }

        self.statistics_all = statistics_for_packages(&self.all_packages);
        let file_names = self
            .all_packages
            .iter()
            .filter_map(|package| package.file_name(STANDARD_FORMAT_SUFFIX))
            .map(str::to_string)
            .collect();
        self.selection.set_items(file_names);
    }

    /// Makes `names` the highlighted entries of the file selector.
    pub fn select_files<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.selection.set_selected(names);
        self.refresh_selected_packages();
    }

    pub fn apply_selection_action(&mut self, action: SelectionAction) {
        let changed = match action {
            SelectionAction::Select(name) => self.selection.select(&name),
            SelectionAction::Deselect(name) => self.selection.deselect(&name),
            SelectionAction::SelectAll => self.selection.select_all(),
            SelectionAction::DeselectAll => self.selection.deselect_all(),
        };
        if changed {
            self.refresh_selected_packages();
        }
    }

    fn refresh_selected_packages(&mut self) {
        let keys = self
            .selection
            .selected()
            .iter()
            .map(|name| key_from_file_name(name))
            .collect::<HashSet<_>>();
        self.selected_packages = self
            .all_packages
            .iter()
            .filter(|package| keys.contains(package.key()))
            .cloned()
            .collect();
        self.statistics_selected = statistics_for_packages(&self.selected_packages);
    }

    fn reset_packages(&mut self) {
        self.all_packages.clear();
        self.selected_packages.clear();
        self.selection.clear();
        self.statistics_all = None;
        self.statistics_selected = None;
    }

    pub fn metadata(&self) -> DeliveryMetadata {
        DeliveryMetadata::from_fields(
            self.fields.program.get(),
            self.fields.description.get(),
            self.fields.contact.get(),
            self.fields.comment.get(),
        )
    }

    /// Keys of selected packages without a sensor info file.
    pub fn missing_sensorinfo(&self) -> Vec<String> {
        self.selected_packages
            .iter()
            .filter(|package| !package.has_suffix(SENSORINFO_SUFFIX))
            .map(|package| package.key().to_string())
            .collect()
    }

    /// Validates the inputs and creates the delivery. Collisions with existing
    /// files are reported and returned as an outcome; any other backend failure
    /// is reported and returned as an error.
    pub fn create_delivery(&mut self) -> Result<DeliveryOutcome, PageError> {
        if self.pending_delivery.is_some() {
            return Ok(DeliveryOutcome::AwaitingConfirmation);
        }

        let missing = self.check_missing_paths();
        for field in [PathField::LocalRootDir, PathField::OutputDir] {
            if missing.contains(&field) {
                if let Some(message) = missing_path_message(field) {
                    self.notices.push(Notice::warning(DELIVERY_TITLE, message));
                }
                return Ok(DeliveryOutcome::Aborted);
            }
        }
        if self.selected_packages.is_empty() {
            self.notices
                .push(Notice::warning(DELIVERY_TITLE, NO_FILES_SELECTED_MESSAGE));
            return Ok(DeliveryOutcome::Aborted);
        }

        let output_dir = PathBuf::from(self.fields.output_dir.trimmed());
        let metadata = self.metadata();
        let packages = self.selected_packages.clone();

        let missing_sensorinfo = self.missing_sensorinfo();
        if !missing_sensorinfo.is_empty() {
            error!("{}", format_missing_sensorinfo_message(&missing_sensorinfo));
            self.pending_delivery = Some(PendingDelivery {
                packages,
                output_dir,
                metadata,
                missing_sensorinfo,
            });
            return Ok(DeliveryOutcome::AwaitingConfirmation);
        }

        self.run_delivery(&packages, &output_dir, &metadata)
    }

    pub fn confirm_pending_delivery(&mut self) -> Result<DeliveryOutcome, PageError> {
        let Some(pending) = self.pending_delivery.take() else {
            return Ok(DeliveryOutcome::Aborted);
        };
        self.run_delivery(&pending.packages, &pending.output_dir, &pending.metadata)
    }

    pub fn cancel_pending_delivery(&mut self) {
        if let Some(pending) = self.pending_delivery.take() {
            info!(
                "delivery of {} packages cancelled by operator",
                pending.packages.len()
            );
        }
    }

    fn run_delivery(
        &mut self,
        packages: &[Package],
        output_dir: &Path,
        metadata: &DeliveryMetadata,
    ) -> Result<DeliveryOutcome, PageError> {
        let overwrite = self.overwrite.get();
        info!("output_dir={}", output_dir.display());
        info!("metadata={metadata:?}");

        match self
            .backend
            .create_delivery(packages, output_dir, overwrite, metadata)
        {
            Ok(note_path) => {
                self.notices
                    .push(Notice::info(DELIVERY_TITLE, DELIVERY_CREATED_MESSAGE));
                Ok(DeliveryOutcome::Created { note_path })
            }
            Err(ctd_package::Error::FileExists(path)) => {
                self.notices.push(Notice::error(
                    DELIVERY_TITLE,
                    format_file_exists_message(&path),
                ));
                Ok(DeliveryOutcome::AlreadyExists { path })
            }
            Err(err) => {
                error!("delivery to {} failed: {err:?}", output_dir.display());
                self.notices.push(Notice::error(
                    DELIVERY_TITLE,
                    format_internal_error_message(&format!("{err:?}")),
                ));
                Err(PageError::Delivery(err))
            }
        }
    }
}
