//! The field capability and its base implementation.

use std::fmt;

use crate::error::FieldError;
use crate::html::{html_escape, Attrs};
use crate::validation::Validator;

/// Attribute keys rendered from dedicated state rather than the attribute set.
const RESERVED_ATTRS: &[&str] = &["type", "name", "value", "class", "required"];

/// Common behaviour of every field kind.
///
/// Implementors embed an [`Input`] and expose it through [`Field::input`];
/// the provided methods cover accessors, validation and rendering.
pub trait Field: Send + Sync {
    /// Returns the underlying input.
    fn input(&self) -> &Input;

    /// Returns the underlying input mutably.
    fn input_mut(&mut self) -> &mut Input;

    /// Returns the field name.
    fn name(&self) -> &str {
        self.input().name()
    }

    /// Sets the field name.
    fn set_name(&mut self, name: &str) {
        self.input_mut().set_name(name);
    }

    /// Returns the current value.
    fn value(&self) -> &str {
        self.input().value()
    }

    /// Sets the current value. No validation happens here.
    fn set_value(&mut self, value: &str) {
        self.input_mut().set_value(value);
    }

    /// Appends a boxed validator to the pipeline.
    fn push_validator(&mut self, validator: Box<dyn Validator>) -> &mut Input {
        let input = self.input_mut();
        input.validators.push(validator);
        input
    }

    /// Runs the validator pipeline, stopping at the first failure.
    fn validate(&self) -> Result<(), FieldError> {
        self.input().validate()
    }

    /// Renders the field as escaped HTML.
    fn render(&self) -> String {
        self.input().render()
    }
}

/// A generic `<input>` element with an ordered validator pipeline.
pub struct Input {
    kind: String,
    name: String,
    value: String,
    classes: Vec<String>,
    min: i64,
    max: i64,
    required: bool,
    attrs: Attrs,
    pub(crate) validators: Vec<Box<dyn Validator>>,
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("value", &self.value)
            .field("classes", &self.classes)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("required", &self.required)
            .field("attrs", &self.attrs)
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl Default for Input {
    fn default() -> Self {
        Self {
            kind: "text".to_string(),
            name: String::new(),
            value: String::new(),
            classes: Vec::new(),
            min: i64::from(i32::MIN),
            max: i64::from(i32::MAX),
            required: false,
            attrs: Attrs::new(),
            validators: Vec::new(),
        }
    }
}

impl Input {
    /// Creates a text input with no validators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input with a preset validator pipeline.
    pub(crate) fn with_validators(validators: Vec<Box<dyn Validator>>) -> Self {
        Self {
            validators,
            ..Self::default()
        }
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Sets the `type` attribute.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Adds a CSS class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an HTML attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attr(key, value);
        self
    }

    /// Sets the inclusive lower bound.
    #[must_use]
    pub fn with_min(mut self, min: i64) -> Self {
        self.min = min;
        self
    }

    /// Sets the inclusive upper bound.
    #[must_use]
    pub fn with_max(mut self, max: i64) -> Self {
        self.max = max;
        self
    }

    /// Marks the field as required in the rendered markup.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Appends a validator.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.add_validator(validator);
        self
    }

    /// Sets the name.
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Sets the value.
    pub fn set_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.value = value.into();
        self
    }

    /// Sets the `type` attribute.
    pub fn set_kind(&mut self, kind: impl Into<String>) -> &mut Self {
        self.kind = kind.into();
        self
    }

    /// Adds a CSS class unless it is already present.
    pub fn add_class(&mut self, class: impl Into<String>) -> &mut Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Sets an HTML attribute, replacing an earlier value for the same key.
    ///
    /// A key that is not a valid attribute name (see
    /// [`is_valid_attr_name`](crate::is_valid_attr_name)) is ignored.
    pub fn add_attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attrs.set(key, value);
        self
    }

    /// Sets the inclusive lower bound.
    pub fn set_min(&mut self, min: i64) -> &mut Self {
        self.min = min;
        self
    }

    /// Sets the inclusive upper bound.
    pub fn set_max(&mut self, max: i64) -> &mut Self {
        self.max = max;
        self
    }

    /// Sets whether the field is required.
    pub fn set_required(&mut self, required: bool) -> &mut Self {
        self.required = required;
        self
    }

    /// Appends a validator to the pipeline.
    pub fn add_validator(&mut self, validator: impl Validator + 'static) -> &mut Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Returns the `type` attribute.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the CSS classes in insertion order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Returns the lower bound.
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Returns the upper bound.
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Returns whether the field is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the attribute set.
    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// Returns the number of validators in the pipeline.
    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }

    /// Runs the pipeline in insertion order and returns the first failure.
    pub fn validate(&self) -> Result<(), FieldError> {
        for validator in &self.validators {
            validator
                .validate(self)
                .map_err(|cause| FieldError::new(&self.name, cause))?;
        }
        Ok(())
    }

    /// Renders the input element. Every interpolated value is escaped.
    pub fn render(&self) -> String {
        let class_attr = if self.classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, html_escape(&self.classes.join(" ")))
        };
        let required_attr = if self.required { " required" } else { "" };

        format!(
            r#"<input type="{}" name="{}" value="{}"{class_attr}{required_attr}{}>"#,
            html_escape(&self.kind),
            html_escape(&self.name),
            html_escape(&self.value),
            self.attrs.to_html_except(RESERVED_ATTRS),
        )
    }
}

impl Field for Input {
    fn input(&self) -> &Input {
        self
    }

    fn input_mut(&mut self) -> &mut Input {
        self
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
