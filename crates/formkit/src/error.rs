//! Error types for fields and forms.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Why a single validator rejected a field value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The value could not be converted to the field's type.
    #[error("{value:?} is not a valid integer")]
    Parse {
        /// The submitted value.
        value: String,
    },

    /// The value is below the field's lower bound.
    #[error("{name} is less than {min}")]
    TooSmall { name: String, min: i64 },

    /// The value is above the field's upper bound.
    #[error("{name} is more than {max}")]
    TooLarge { name: String, max: i64 },

    /// Any other rule failure, carrying its message.
    #[error("{0}")]
    Invalid(String),
}

impl ValidationError {
    /// Creates an `Invalid` error from a message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    /// Returns whether the value failed type conversion.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns whether the value fell outside its bounds.
    pub fn is_bounds(&self) -> bool {
        matches!(self, Self::TooSmall { .. } | Self::TooLarge { .. })
    }
}

/// A validation failure attached to the field that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name}: {cause}")]
pub struct FieldError {
    name: String,
    #[source]
    cause: ValidationError,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new(name: impl Into<String>, cause: ValidationError) -> Self {
        Self {
            name: name.into(),
            cause,
        }
    }

    /// Returns the name of the failing field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the validator's error.
    pub fn cause(&self) -> &ValidationError {
        &self.cause
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldError", 2)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("message", &self.cause.to_string())?;
        state.end()
    }
}

/// Validation failures of a form, one entry per failing field.
///
/// Entries keep the order in which the form's fields were validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a field error, replacing any earlier error for the same field.
    pub fn add(&mut self, error: FieldError) {
        match self.errors.iter_mut().find(|e| e.name == error.name) {
            Some(slot) => *slot = error,
            None => self.errors.push(error),
        }
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the error for a field, if it failed.
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.name == field)
    }

    /// Returns whether the given field failed.
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Returns the names of the failing fields.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(FieldError::name)
    }

    /// Iterates over the errors.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Renders the errors as a JSON object of `field: message`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.errors
                .iter()
                .map(|e| {
                    (
                        e.name.clone(),
                        serde_json::Value::String(e.cause.to_string()),
                    )
                })
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a FormErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for error in &self.errors {
            writeln!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

impl Serialize for FormErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for error in &self.errors {
            map.serialize_entry(&error.name, &error.cause.to_string())?;
        }
        map.end()
    }
}

/// Form-level errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// The submitted parameters could not be decoded.
    #[error("failed to parse form data: {0}")]
    RequestParse(String),

    /// A percent escape was truncated or not hexadecimal.
    #[error("invalid percent escape in {input:?}")]
    InvalidEscape { input: String },

    /// Decoded bytes were not valid UTF-8.
    #[error("form data is not valid UTF-8")]
    InvalidUtf8,

    /// A JSON body could not be parsed.
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    /// One or more fields failed validation.
    ///
    /// Not produced by this crate; it lets a handler returning [`Result`]
    /// chain `form.load(..)?` and `form.validate()?`.
    #[error("validation errors:\n{0}")]
    Validation(#[from] FormErrors),
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
