use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::Error;

/// Suffix of the standard text format every deliverable package must carry.
pub const STANDARD_FORMAT_SUFFIX: &str = ".txt";
pub const SENSORINFO_SUFFIX: &str = ".sensorinfo";
/// Working directory skipped when scanning a source root.
pub const TEMP_DIRECTORY: &str = "temp";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageFile {
    path: PathBuf,
    suffix: String,
}

impl PackageFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let suffix = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(normalize_suffix)
            .unwrap_or_default();
        Self { path, suffix }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    pub fn key(&self) -> &str {
        key_from_file_name(self.name())
    }
}

/// One CTD cast: every file sharing the same key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Package {
    key: String,
    files: Vec<PackageFile>,
}

impl Package {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            files: Vec::new(),
        }
    }

    pub fn with_files(key: impl Into<String>, files: impl IntoIterator<Item = PackageFile>) -> Self {
        let mut package = Self::new(key);
        package.files.extend(files);
        package.sort_files();
        package
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn files(&self) -> &[PackageFile] {
        &self.files
    }

    pub fn has_suffix(&self, suffix: &str) -> bool {
        self.file(suffix).is_some()
    }

    pub fn file_path(&self, suffix: &str) -> Option<&Path> {
        self.file(suffix).map(PackageFile::path)
    }

    pub fn file_name(&self, suffix: &str) -> Option<&str> {
        self.file(suffix).map(PackageFile::name)
    }

    fn file(&self, suffix: &str) -> Option<&PackageFile> {
        let suffix = normalize_suffix(suffix);
        self.files.iter().find(|file| file.suffix == suffix)
    }

    fn sort_files(&mut self) {
        self.files
            .sort_by(|left, right| left.name().cmp(right.name()));
    }
}

/// Lowercases a suffix and makes sure it starts with a dot, so `"TXT"` and
/// `".txt"` address the same files.
pub fn normalize_suffix(suffix: &str) -> String {
    let trimmed = suffix.trim().trim_start_matches('.');
    format!(".{}", trimmed.to_ascii_lowercase())
}

/// Package key of a file name: everything before the first `.`.
pub fn key_from_file_name(name: &str) -> &str {
    name.split_once('.').map(|(key, _)| key).unwrap_or(name)
}

pub fn get_packages_in_directory(
    root: &Path,
    exclude_directory: Option<&str>,
) -> Result<Vec<Package>, Error> {
    if !root.is_dir() {
        return Err(Error::MissingDirectory(root.to_path_buf()));
    }

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        let excluded = entry.depth() > 0
            && entry.file_type().is_dir()
            && exclude_directory.is_some_and(|name| entry.file_name() == name);
        !excluded
    });

    let mut packages: BTreeMap<String, Package> = BTreeMap::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file = PackageFile::new(entry.path());
        if file.suffix().is_empty() || file.key().is_empty() {
            debug!("skipping {}: no package key or suffix", entry.path().display());
            continue;
        }

        let key = file.key().to_string();
        packages
            .entry(key.clone())
            .or_insert_with(|| Package::new(key))
            .files
            .push(file);
    }

    let packages = packages
        .into_values()
        .map(|mut package| {
            package.sort_files();
            package
        })
        .collect::<Vec<_>>();
    debug!("found {} packages in {}", packages.len(), root.display());
    Ok(packages)
}

/// Splits packages into those carrying the standard text format and the keys of
/// those that do not. Each missing key is reported once.
pub fn partition_standard_format(packages: Vec<Package>) -> (Vec<Package>, Vec<String>) {
    let mut complete = Vec::with_capacity(packages.len());
    let mut missing = Vec::new();
    let mut seen = HashSet::new();

    for package in packages {
        if package.has_suffix(STANDARD_FORMAT_SUFFIX) {
            complete.push(package);
        } else if seen.insert(package.key.clone()) {
            missing.push(package.key);
        }
    }

    (complete, missing)
}
