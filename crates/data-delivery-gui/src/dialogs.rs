use std::path::{Path, PathBuf};

use delivery_core::{Notice, NoticeLevel};

pub const SOURCE_DIRECTORY_TITLE: &str = "Välj lokal rotmapp";
pub const OUTPUT_DIRECTORY_TITLE: &str = "Välj exportmapp";
pub const SHARKWEB_FILE_TITLE: &str = "Välj SHARKweb-fil (radformat)";

/// Native dialogs used by the app. Every call blocks until the operator
/// answers.
pub trait Dialogs {
    fn pick_folder(&mut self, title: &str, start: Option<&Path>) -> Option<PathBuf>;
    fn pick_file(&mut self, title: &str, start: Option<&Path>) -> Option<PathBuf>;
    fn show_notice(&mut self, notice: &Notice);
    /// Yes/no question; `true` means yes.
    fn confirm(&mut self, title: &str, message: &str) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RfdDialogs;

impl RfdDialogs {
    fn file_dialog(title: &str, start: Option<&Path>) -> rfd::FileDialog {
        let dialog = rfd::FileDialog::new().set_title(title);
        match start.filter(|path| path.is_dir()) {
            Some(directory) => dialog.set_directory(directory),
            None => dialog,
        }
    }
}

impl Dialogs for RfdDialogs {
    fn pick_folder(&mut self, title: &str, start: Option<&Path>) -> Option<PathBuf> {
        Self::file_dialog(title, start).pick_folder()
    }

    fn pick_file(&mut self, title: &str, start: Option<&Path>) -> Option<PathBuf> {
        Self::file_dialog(title, start).pick_file()
    }

    fn show_notice(&mut self, notice: &Notice) {
        let level = match notice.level {
            NoticeLevel::Info => rfd::MessageLevel::Info,
            NoticeLevel::Warning => rfd::MessageLevel::Warning,
            NoticeLevel::Error => rfd::MessageLevel::Error,
        };
        rfd::MessageDialog::new()
            .set_level(level)
            .set_title(notice.title.as_str())
            .set_description(notice.message.as_str())
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }

    fn confirm(&mut self, title: &str, message: &str) -> bool {
        let answer = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::YesNo)
            .show();
        answer == rfd::MessageDialogResult::Yes
    }
}
