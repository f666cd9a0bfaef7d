use std::path::{Path, PathBuf};

pub mod delivery;
pub mod package;
pub mod statistics;

pub use delivery::{
    create_delivery_for_packages, delivery_subdirectory, DeliveryMetadata, DELIVERY_NOTE_FILE,
};
pub use package::{
    get_packages_in_directory, key_from_file_name, normalize_suffix, partition_standard_format,
    Package, PackageFile, SENSORINFO_SUFFIX, STANDARD_FORMAT_SUFFIX, TEMP_DIRECTORY,
};
pub use statistics::{statistics_for_packages, Statistics, STATISTICS_SUFFIXES};

/// Collaborator used by the delivery page to find packages and build deliveries.
pub trait DeliveryBackend {
    fn discover(&self, root: &Path, exclude_directory: Option<&str>) -> Result<Vec<Package>, Error>;

    fn create_delivery(
        &self,
        packages: &[Package],
        output_dir: &Path,
        overwrite: bool,
        metadata: &DeliveryMetadata,
    ) -> Result<PathBuf, Error>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FsDeliveryBackend;

impl DeliveryBackend for FsDeliveryBackend {
    fn discover(&self, root: &Path, exclude_directory: Option<&str>) -> Result<Vec<Package>, Error> {
        get_packages_in_directory(root, exclude_directory)
    }

    fn create_delivery(
        &self,
        packages: &[Package],
        output_dir: &Path,
        overwrite: bool,
        metadata: &DeliveryMetadata,
    ) -> Result<PathBuf, Error> {
        create_delivery_for_packages(packages, output_dir, overwrite, metadata)
    }
}

#[derive(Debug)]
pub enum Error {
    MissingDirectory(PathBuf),
    NoPackages,
    FileExists(PathBuf),
    IOError(std::io::Error),
    NoteError(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingDirectory(path) => write!(f, "Directory {} does not exist", path.display()),
            Error::NoPackages => write!(f, "No packages to deliver"),
            Error::FileExists(path) => write!(f, "{}", path.display()),
            Error::IOError(err) => write!(f, "{err:?}"),
            Error::NoteError(err) => write!(f, "Failed to write delivery note: {err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IOError(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::IOError(err.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::NoteError(err)
    }
}
