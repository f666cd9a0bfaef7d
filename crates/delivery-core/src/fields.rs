use std::fmt;

use crate::saves::SettingValue;

/// A value holder that can be persisted through [`crate::SaveComponents`].
pub trait SaveComponent {
    fn id(&self) -> &str;
    fn value(&self) -> Result<SettingValue, ComponentError>;
    fn apply(&mut self, value: &SettingValue) -> Result<(), ComponentError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComponentError {
    TypeMismatch { id: String, expected: &'static str },
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentError::TypeMismatch { id, expected } => {
                write!(f, "{id} expects a {expected} value")
            }
        }
    }
}

/// Text bound to an entry or label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextField {
    id: &'static str,
    value: String,
}

impl TextField {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            value: String::new(),
        }
    }

    pub fn with_value(id: &'static str, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }

    pub fn get(&self) -> &str {
        &self.value
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Direct access for text-edit widgets.
    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.value
    }
}

impl SaveComponent for TextField {
    fn id(&self) -> &str {
        self.id
    }

    fn value(&self) -> Result<SettingValue, ComponentError> {
        Ok(SettingValue::Text(self.value.clone()))
    }

    fn apply(&mut self, value: &SettingValue) -> Result<(), ComponentError> {
        let text = value.as_text().ok_or_else(|| ComponentError::TypeMismatch {
            id: self.id.to_string(),
            expected: "text",
        })?;
        self.value = text.to_string();
        Ok(())
    }
}

/// Checkbox state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toggle {
    id: &'static str,
    value: bool,
}

impl Toggle {
    pub fn new(id: &'static str) -> Self {
        Self { id, value: false }
    }

    pub fn with_value(id: &'static str, value: bool) -> Self {
        Self { id, value }
    }

    pub fn get(&self) -> bool {
        self.value
    }

    pub fn set(&mut self, value: bool) {
        self.value = value;
    }

    pub fn buffer_mut(&mut self) -> &mut bool {
        &mut self.value
    }
}

impl SaveComponent for Toggle {
    fn id(&self) -> &str {
        self.id
    }

    fn value(&self) -> Result<SettingValue, ComponentError> {
        Ok(SettingValue::Flag(self.value))
    }

    fn apply(&mut self, value: &SettingValue) -> Result<(), ComponentError> {
        self.value = value.as_flag().ok_or_else(|| ComponentError::TypeMismatch {
            id: self.id.to_string(),
            expected: "boolean",
        })?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathField {
    LocalRootDir,
    OutputDir,
    SharkwebFile,
}

impl PathField {
    pub const ALL: [PathField; 3] = [
        PathField::LocalRootDir,
        PathField::OutputDir,
        PathField::SharkwebFile,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            PathField::LocalRootDir => "local_root_dir",
            PathField::OutputDir => "output_dir",
            PathField::SharkwebFile => "sharkweb_file",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PathField::LocalRootDir => "Lokal rotmapp (källmapp)",
            PathField::OutputDir => "Exportmapp",
            PathField::SharkwebFile => "Sökväg till SHARKweb-uttag (radformat)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetadataField {
    Program,
    Description,
    Contact,
    Comment,
}

impl MetadataField {
    pub const ALL: [MetadataField; 4] = [
        MetadataField::Program,
        MetadataField::Description,
        MetadataField::Contact,
        MetadataField::Comment,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            MetadataField::Program => "mprog",
            MetadataField::Description => "description",
            MetadataField::Contact => "contact",
            MetadataField::Comment => "comment",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MetadataField::Program => "Mätprogram",
            MetadataField::Description => "Beskrivning",
            MetadataField::Contact => "Kontaktperson",
            MetadataField::Comment => "Kommentar",
        }
    }
}

/// The persisted text fields of the CTD page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormFields {
    pub local_root_dir: TextField,
    pub output_dir: TextField,
    pub sharkweb_file: TextField,
    pub program: TextField,
    pub description: TextField,
    pub contact: TextField,
    pub comment: TextField,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            local_root_dir: TextField::new(PathField::LocalRootDir.id()),
            output_dir: TextField::new(PathField::OutputDir.id()),
            sharkweb_file: TextField::new(PathField::SharkwebFile.id()),
            program: TextField::new(MetadataField::Program.id()),
            description: TextField::new(MetadataField::Description.id()),
            contact: TextField::new(MetadataField::Contact.id()),
            comment: TextField::new(MetadataField::Comment.id()),
        }
    }
}

impl FormFields {
    pub fn ids() -> impl Iterator<Item = &'static str> {
        PathField::ALL
            .into_iter()
            .map(PathField::id)
            .chain(MetadataField::ALL.into_iter().map(MetadataField::id))
    }

    pub fn path(&self, field: PathField) -> &TextField {
        match field {
            PathField::LocalRootDir => &self.local_root_dir,
            PathField::OutputDir => &self.output_dir,
            PathField::SharkwebFile => &self.sharkweb_file,
        }
    }

    pub fn path_mut(&mut self, field: PathField) -> &mut TextField {
        match field {
            PathField::LocalRootDir => &mut self.local_root_dir,
            PathField::OutputDir => &mut self.output_dir,
            PathField::SharkwebFile => &mut self.sharkweb_file,
        }
    }

    pub fn metadata_mut(&mut self, field: MetadataField) -> &mut TextField {
        match field {
            MetadataField::Program => &mut self.program,
            MetadataField::Description => &mut self.description,
            MetadataField::Contact => &mut self.contact,
            MetadataField::Comment => &mut self.comment,
        }
    }

    pub fn components(&self) -> [&dyn SaveComponent; 7] {
        [
            &self.local_root_dir,
            &self.output_dir,
            &self.sharkweb_file,
            &self.program,
            &self.description,
            &self.contact,
            &self.comment,
        ]
    }

    pub fn components_mut(&mut self) -> [&mut dyn SaveComponent; 7] {
        let Self {
            local_root_dir,
            output_dir,
            sharkweb_file,
            program,
            description,
            contact,
            comment,
        } = self;
        [
            local_root_dir,
            output_dir,
            sharkweb_file,
            program,
            description,
            contact,
            comment,
        ]
    }
}
