use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, warn};
use serde_json::{Map, Value};

use crate::fields::SaveComponent;

pub const SAVES_FILE: &str = "saves.json";

/// A stored widget value. Booleans keep their type, everything else is text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettingValue {
    Text(String),
    Flag(bool),
}

impl SettingValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(text) => Some(text),
            SettingValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            SettingValue::Flag(flag) => Some(*flag),
            SettingValue::Text(_) => None,
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(SettingValue::Text(text.clone())),
            Value::Bool(flag) => Some(SettingValue::Flag(*flag)),
            _ => None,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            SettingValue::Text(text) => Value::String(text.clone()),
            SettingValue::Flag(flag) => Value::Bool(*flag),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_owned())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Flag(value)
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Parse(serde_json::Error),
    NoConfigDirectory,
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SettingsError::Io(err) => write!(f, "Failed to access settings file: {err}"),
            SettingsError::Parse(err) => write!(f, "Settings file is not valid JSON: {err}"),
            SettingsError::NoConfigDirectory => write!(f, "Could not determine config directory"),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<io::Error> for SettingsError {
    fn from(err: io::Error) -> Self {
        SettingsError::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err)
    }
}

/// Disk-backed mapping page key -> component key -> value.
///
/// Every write rewrites the whole file. There is no locking; the last writer
/// wins.
#[derive(Debug)]
pub struct Saves {
    file_path: PathBuf,
    data: Map<String, Value>,
}

impl Saves {
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let dirs = ProjectDirs::from("se", "sharktools", "data-delivery")
            .ok_or(SettingsError::NoConfigDirectory)?;
        Ok(dirs.config_dir().join(SAVES_FILE))
    }

    /// Reads `path` if it exists, otherwise starts empty. Malformed JSON is an
    /// error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let file_path = path.into();
        let data = match fs::read_to_string(&file_path) {
            Ok(content) => serde_json::from_str::<Map<String, Value>>(&content)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Map::new(),
            Err(err) => return Err(err.into()),
        };
        debug!("loaded {} pages from {}", data.len(), file_path.display());
        Ok(Self { file_path, data })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn value(&self, page: &str, component: &str) -> Option<SettingValue> {
        self.data
            .get(page)
            .and_then(Value::as_object)
            .and_then(|components| components.get(component))
            .and_then(SettingValue::from_json)
    }

    pub fn get(&self, page: &str, component: &str, default: SettingValue) -> SettingValue {
        self.value(page, component).unwrap_or(default)
    }

    pub fn set(
        &mut self,
        page: &str,
        component: &str,
        value: impl Into<SettingValue>,
    ) -> Result<(), SettingsError> {
        let entry = self
            .data
            .entry(page.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(components) = entry {
            components.insert(component.to_string(), value.into().to_json());
        }
        self.write()
    }

    /// Replaces all values of `page` with `values` in a single write.
    pub fn set_page<I>(&mut self, page: &str, values: I) -> Result<(), SettingsError>
    where
        I: IntoIterator<Item = (String, SettingValue)>,
    {
        let components = values
            .into_iter()
            .map(|(component, value)| (component, value.to_json()))
            .collect::<Map<_, _>>();
        self.data.insert(page.to_string(), Value::Object(components));
        self.write()
    }

    fn write(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.file_path, serde_json::to_string_pretty(&self.data)?)?;
        Ok(())
    }
}

/// The set of components a page persists under its key.
#[derive(Clone, Debug)]
pub struct SaveComponents {
    page_key: String,
    registered: BTreeSet<String>,
}

impl SaveComponents {
    pub fn new(page_key: impl Into<String>) -> Self {
        Self {
            page_key: page_key.into(),
            registered: BTreeSet::new(),
        }
    }

    pub fn page_key(&self) -> &str {
        &self.page_key
    }

    pub fn add_components<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registered.extend(ids.into_iter().map(Into::into));
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.registered.contains(id)
    }

    /// Writes every registered component. A component whose value cannot be
    /// read is left out; the others are still saved.
    pub fn save<'a, I>(&self, store: &mut Saves, components: I) -> Result<(), SettingsError>
    where
        I: IntoIterator<Item = &'a dyn SaveComponent>,
    {
        let mut values = Vec::new();
        for component in components {
            if !self.is_registered(component.id()) {
                continue;
            }
            match component.value() {
                Ok(value) => values.push((component.id().to_string(), value)),
                Err(err) => warn!("not saving {}: {err}", component.id()),
            }
        }
        store.set_page(&self.page_key, values)
    }

    /// Applies stored values to the registered components and returns how
    /// many were applied. Missing values and failing setters are skipped.
    pub fn load<'a, I>(&self, store: &Saves, components: I) -> usize
    where
        I: IntoIterator<Item = &'a mut dyn SaveComponent>,
    {
        let mut applied = 0;
        for component in components {
            if !self.is_registered(component.id()) {
                continue;
            }
            let Some(value) = store.value(&self.page_key, component.id()) else {
                continue;
            };
            match component.apply(&value) {
                Ok(()) => applied += 1,
                Err(err) => debug!("skipping stored {}: {err}", component.id()),
            }
        }
        applied
    }
}
