//! Form orchestration: bind, validate, render.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use tracing::{debug, warn};

use crate::error::{FormErrors, Result};
use crate::html::{html_escape, RawHtml};
use crate::input::Field;
use crate::request::FormSource;

/// A set of uniquely named fields with a submission action and method.
///
/// Fields keep insertion order, which is the order used for rendering and
/// for error aggregation. A form is meant to be owned by one request
/// handler at a time; it does no locking of its own.
pub struct Form {
    action: String,
    method: String,
    fields: Vec<Box<dyn Field>>,
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("action", &self.action)
            .field("method", &self.method)
            .field("fields", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for Form {
    fn default() -> Self {
        Self {
            action: String::new(),
            method: "GET".to_string(),
            fields: Vec::new(),
        }
    }
}

impl Form {
    /// Creates an empty GET form with no action.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing any field with the same name.
    #[must_use]
    pub fn add_input(mut self, field: impl Field + 'static) -> Self {
        self.insert_input(field);
        self
    }

    /// Adds a field in place, replacing any field with the same name.
    ///
    /// A replaced field keeps its position.
    pub fn insert_input(&mut self, field: impl Field + 'static) -> &mut Self {
        let field: Box<dyn Field> = Box::new(field);
        match self.fields.iter().position(|f| f.name() == field.name()) {
            Some(index) => self.fields[index] = field,
            None => self.fields.push(field),
        }
        self
    }

    /// Sets the `action` attribute.
    #[must_use]
    pub fn set_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Returns the `action` attribute.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Sets the `method` attribute. Any string is accepted.
    #[must_use]
    pub fn set_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Returns the `method` attribute.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the field with the given name.
    pub fn field(&self, name: &str) -> Option<&(dyn Field + 'static)> {
        self.fields
            .iter()
            .find(|f| f.name() == name)
            .map(Box::as_ref)
    }

    /// Returns the field with the given name mutably.
    ///
    /// Names stay unique: if the field is renamed to the name of another
    /// field, the other field is dropped when the guard goes out of scope.
    pub fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        let index = self.fields.iter().position(|f| f.name() == name)?;
        Some(FieldMut {
            fields: &mut self.fields,
            index,
        })
    }

    /// Returns the field names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name())
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Binds submitted values to every field.
    ///
    /// `None` leaves the form untouched. GET forms read the query string,
    /// all other methods read the body. A name missing from the submission
    /// binds to the empty string. If the submission cannot be decoded the
    /// error is returned and no field is changed.
    pub fn load(&mut self, request: Option<&dyn FormSource>) -> Result<&mut Self> {
        let Some(request) = request else {
            return Ok(self);
        };

        let params = request.params().inspect_err(|e| {
            warn!(method = request.method(), error = %e, "failed to parse submitted form");
        })?;
        let source = if self.method == "GET" {
            &params.query
        } else {
            &params.body
        };

        for field in &mut self.fields {
            let value = source.get(field.name()).unwrap_or_default().to_string();
            field.set_value(&value);
        }

        debug!(
            method = %self.method,
            fields = self.fields.len(),
            "bound submitted form"
        );
        Ok(self)
    }

    /// Validates every field and collects the failures.
    pub fn validate(&self) -> std::result::Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        for field in &self.fields {
            if let Err(error) = field.validate() {
                errors.add(error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            debug!(failed = errors.len(), "form validation failed");
            Err(errors)
        }
    }

    /// Renders the form element with its fields in order.
    pub fn html(&self) -> RawHtml {
        let mut html = format!(
            r#"<form action="{}" method="{}">"#,
            html_escape(&self.action),
            html_escape(&self.method)
        );
        for field in &self.fields {
            html.push_str(&field.render());
        }
        html.push_str("</form>");
        RawHtml::from_trusted(html)
    }

    /// Returns every field's current value.
    pub fn values(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .map(|f| (f.name().to_string(), f.value().to_string()))
            .collect()
    }

    /// Returns every field's current value as a JSON object, in field order.
    pub fn values_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|f| {
                    (
                        f.name().to_string(),
                        serde_json::Value::String(f.value().to_string()),
                    )
                })
                .collect(),
        )
    }
}

/// Mutable access to one field of a [`Form`], returned by
/// [`Form::field_mut`].
pub struct FieldMut<'a> {
    fields: &'a mut Vec<Box<dyn Field>>,
    index: usize,
}

impl Deref for FieldMut<'_> {
    type Target = dyn Field;

    fn deref(&self) -> &Self::Target {
        self.fields[self.index].as_ref()
    }
}

impl DerefMut for FieldMut<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.fields[self.index].as_mut()
    }
}

impl Drop for FieldMut<'_> {
    fn drop(&mut self) {
        let name = self.fields[self.index].name();
        let clash = self
            .fields
            .iter()
            .enumerate()
            .position(|(i, f)| i != self.index && f.name() == name);
        if let Some(other) = clash {
            debug!(name, "renamed field replaced an existing field");
            self.fields.remove(other);
        }
    }
}
