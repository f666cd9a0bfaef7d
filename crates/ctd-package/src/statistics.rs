use std::collections::BTreeMap;

use crate::package::normalize_suffix;
use crate::Package;

/// Suffixes shown in the statistics panels, in display order.
pub const STATISTICS_SUFFIXES: [&str; 15] = [
    ".txt",
    ".cnv",
    ".hex",
    ".hdr",
    ".ros",
    ".bl",
    ".btl",
    ".xmlcon",
    ".con",
    ".zip",
    ".jpg",
    ".png",
    ".deliverynote",
    ".metadata",
    ".sensorinfo",
];

/// Number of files per suffix over a set of packages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    nr_files: BTreeMap<String, usize>,
}

impl Statistics {
    /// Count for `suffix`; suffixes never seen count as zero. Accepts the
    /// same spellings as [`Package::has_suffix`].
    pub fn count(&self, suffix: &str) -> usize {
        self.nr_files
            .get(&normalize_suffix(suffix))
            .copied()
            .unwrap_or(0)
    }

    pub fn contains(&self, suffix: &str) -> bool {
        self.nr_files.contains_key(&normalize_suffix(suffix))
    }

    pub fn total(&self) -> usize {
        self.nr_files.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.nr_files
            .iter()
            .map(|(suffix, count)| (suffix.as_str(), *count))
    }
}

/// `None` when there are no packages at all, which is distinct from packages
/// that simply lack a given suffix.
pub fn statistics_for_packages(packages: &[Package]) -> Option<Statistics> {
    if packages.is_empty() {
        return None;
    }

    let mut statistics = Statistics::default();
    for package in packages {
        for file in package.files() {
            *statistics
                .nr_files
                .entry(file.suffix().to_string())
                .or_insert(0) += 1;
        }
    }
    Some(statistics)
}
