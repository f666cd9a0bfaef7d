use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use log::{debug, info};
use serde::Serialize;

use crate::{Error, Package};

pub const DELIVERY_NOTE_FILE: &str = "delivery_note.json";

/// Free-text information attached to a delivery. Blank fields are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl DeliveryMetadata {
    pub fn from_fields(program: &str, description: &str, contact: &str, comment: &str) -> Self {
        Self {
            program: non_blank(program),
            description: non_blank(description),
            contact: non_blank(contact),
            comment: non_blank(comment),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.program.is_none()
            && self.description.is_none()
            && self.contact.is_none()
            && self.comment.is_none()
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

mod date_format {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }
}

#[derive(Debug, Serialize)]
struct DeliveryNote<'a> {
    #[serde(serialize_with = "date_format::serialize")]
    created: NaiveDateTime,
    #[serde(flatten)]
    metadata: &'a DeliveryMetadata,
    packages: Vec<PackageNote<'a>>,
}

#[derive(Debug, Serialize)]
struct PackageNote<'a> {
    key: &'a str,
    files: Vec<&'a str>,
}

/// Directory inside a delivery that receives files of `suffix`.
pub fn delivery_subdirectory(suffix: &str) -> &'static str {
    match suffix {
        ".txt" => "processed_data",
        ".cnv" => "cnv",
        ".hex" | ".hdr" | ".ros" | ".bl" | ".btl" | ".xmlcon" | ".con" | ".zip" => "raw_data",
        ".jpg" | ".png" => "plots",
        _ => "metadata",
    }
}

/// Copies every file of `packages` into `output_dir` and writes a delivery note
/// next to them. Without `overwrite` all targets are checked before anything
/// is written. Two files mapped to the same target are always rejected, and a
/// file that already is its own target is left alone. Returns the path of the
/// delivery note.
pub fn create_delivery_for_packages(
    packages: &[Package],
    output_dir: &Path,
    overwrite: bool,
    metadata: &DeliveryMetadata,
) -> Result<PathBuf, Error> {
    if packages.is_empty() {
        return Err(Error::NoPackages);
    }
    if !output_dir.is_dir() {
        return Err(Error::MissingDirectory(output_dir.to_path_buf()));
    }

    let note_path = output_dir.join(DELIVERY_NOTE_FILE);
    let copies = plan_copies(packages, output_dir);

    let mut planned = BTreeSet::new();
    if let Some((_, target)) = copies.iter().find(|(_, target)| !planned.insert(target)) {
        return Err(Error::FileExists(target.clone()));
    }

    if !overwrite {
        let collision = copies
            .iter()
            .map(|(_, target)| target.as_path())
            .chain(std::iter::once(note_path.as_path()))
            .find(|target| target.exists());
        if let Some(target) = collision {
            return Err(Error::FileExists(target.to_path_buf()));
        }
    }

    let directories = copies
        .iter()
        .filter_map(|(_, target)| target.parent())
        .collect::<BTreeSet<_>>();
    for directory in directories {
        fs::create_dir_all(directory)?;
    }

    for (source, target) in &copies {
        if is_same_file(source, target) {
            debug!("{} is already in place", target.display());
            continue;
        }
        debug!("copy {} -> {}", source.display(), target.display());
        fs::copy(source, target)?;
    }

    let note = DeliveryNote {
        created: Local::now().naive_local(),
        metadata,
        packages: packages
            .iter()
            .map(|package| PackageNote {
                key: package.key(),
                files: package.files().iter().map(|file| file.name()).collect(),
            })
            .collect(),
    };
    fs::write(&note_path, serde_json::to_string_pretty(&note)?)?;

    info!(
        "delivered {} files from {} packages to {}",
        copies.len(),
        packages.len(),
        output_dir.display()
    );
    Ok(note_path)
}

fn plan_copies(packages: &[Package], output_dir: &Path) -> Vec<(PathBuf, PathBuf)> {
    packages
        .iter()
        .flat_map(|package| package.files())
        .map(|file| {
            let target = output_dir
                .join(delivery_subdirectory(file.suffix()))
                .join(file.name());
            (file.path().to_path_buf(), target)
        })
        .collect()
}

fn is_same_file(source: &Path, target: &Path) -> bool {
    if source == target {
        return true;
    }
    match (fs::canonicalize(source), fs::canonicalize(target)) {
        (Ok(source), Ok(target)) => source == target,
        _ => false,
    }
}
