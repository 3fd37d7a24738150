use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a form document definition.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read form definition {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid form definition: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kind of form control an element represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementTag {
    Input,
    Select,
    Textarea,
}

impl ElementTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Select => "select",
            Self::Textarea => "textarea",
        }
    }
}

/// Single form control held by a [`FormDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub tag: ElementTag,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default)]
    value: String,
    #[serde(skip)]
    writes: u64,
}

impl FormElement {
    /// Creates an element with an empty value.
    pub fn new(tag: ElementTag, name: impl Into<String>) -> Self {
        Self {
            id: None,
            tag,
            name: name.into(),
            input_type: None,
            label: None,
            options: Vec::new(),
            value: String::new(),
            writes: 0,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the initial value without counting it as a mutation.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the current value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.writes += 1;
    }

    /// Number of writes made through [`FormElement::set_value`].
    pub fn write_count(&self) -> u64 {
        self.writes
    }
}

/// Element lookup and mutation surface of a hosted document.
pub trait Document {
    /// Returns the first element whose id equals `id`.
    fn element_by_id(&self, id: &str) -> Option<&FormElement>;

    /// Mutable variant of [`Document::element_by_id`].
    fn element_by_id_mut(&mut self, id: &str) -> Option<&mut FormElement>;

    /// Total number of value writes across every element.
    fn mutation_count(&self) -> u64;
}

/// In-memory form page: a title, a submit target and its controls in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDocument {
    pub title: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub elements: Vec<FormElement>,
}

impl FormDocument {
    pub fn new(title: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            action: action.into(),
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: FormElement) {
        self.elements.push(element);
    }

    /// Parses a JSON form definition.
    pub fn from_json(raw: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads and parses a JSON form definition from disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }
}

impl Document for FormDocument {
    fn element_by_id(&self, id: &str) -> Option<&FormElement> {
        self.elements
            .iter()
            .find(|element| element.id.as_deref() == Some(id))
    }

    fn element_by_id_mut(&mut self, id: &str) -> Option<&mut FormElement> {
        self.elements
            .iter_mut()
            .find(|element| element.id.as_deref() == Some(id))
    }

    fn mutation_count(&self) -> u64 {
        self.elements.iter().map(FormElement::write_count).sum()
    }
}
