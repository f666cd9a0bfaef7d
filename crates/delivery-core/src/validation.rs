use std::path::Path;

use ctd_package::Statistics;

use crate::fields::PathField;

pub const DELIVERY_TITLE: &str = "Skapa leverans";
pub const MISSING_FILES_TITLE: &str = "Filer saknas";
pub const INSUFFICIENT_INFORMATION_TITLE: &str = "Otillräcklig information";
pub const INCOMPLETE_INFORMATION_TITLE: &str = "Ofullständig information";
pub const NO_FILES_SELECTED_MESSAGE: &str = "Kan inte skapa leverans. Inga filer valda!";
pub const DELIVERY_CREATED_MESSAGE: &str = "Leverans har skapats!";

/// Warning shown when a path needed for a delivery is missing.
pub fn missing_path_message(field: PathField) -> Option<&'static str> {
    match field {
        PathField::LocalRootDir => Some("Kan inte skapa leverans. Källmapp saknas!"),
        PathField::OutputDir => Some("Kan inte skapa leverans. Exportmap saknas!"),
        PathField::SharkwebFile => None,
    }
}

pub fn format_no_packages_message(directory: &Path) -> String {
    format!("inga fullständiga paket i rotkatalogen: {}", directory.display())
}

pub fn format_missing_standard_format_message(keys: &[String]) -> String {
    format!(
        "Det saknas standardformat för: {}. Dessa kommer inte att inkluderas",
        keys.join(", ")
    )
}

pub fn format_missing_sensorinfo_message(keys: &[String]) -> String {
    format!(
        "Det saknas sensorinfo för: {}. Vill du skapa leveransen ändå?",
        keys.join(", ")
    )
}

pub fn format_file_exists_message(path: &Path) -> String {
    format!("Fil finns redan: {}", path.display())
}

pub fn format_internal_error_message(detail: &str) -> String {
    format!("Internt fel: {detail}")
}

/// Text of one statistics cell: blank without packages, `0` for a suffix the
/// packages do not have.
pub fn statistics_label(statistics: Option<&Statistics>, suffix: &str) -> String {
    statistics
        .map(|statistics| statistics.count(suffix).to_string())
        .unwrap_or_default()
}
