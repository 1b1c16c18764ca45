//! Field validators.
//!
//! A validator looks at the whole [`Input`] (value, name, bounds) and either
//! accepts it or returns a [`ValidationError`]. Plain functions and closures
//! with the right signature are validators too, so presets such as
//! [`is_integer`](crate::fields::is_integer) are ordinary `fn`s.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::input::Input;

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Validates the field's current state.
    fn validate(&self, input: &Input) -> Result<(), ValidationError>;
}

impl<F> Validator for F
where
    F: Fn(&Input) -> Result<(), ValidationError> + Send + Sync,
{
    fn validate(&self, input: &Input) -> Result<(), ValidationError> {
        self(input)
    }
}

/// Validator that requires a non-blank value.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Creates a new RequiredValidator with default message.
    pub fn new() -> Self {
        Self::with_message("This field is required.")
    }

    /// Creates a new RequiredValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, input: &Input) -> Result<(), ValidationError> {
        if input.value().trim().is_empty() {
            Err(ValidationError::invalid(&self.message))
        } else {
            Ok(())
        }
    }
}

/// Validator that enforces a maximum length in characters.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    max_length: usize,
    message: String,
}

impl MaxLengthValidator {
    /// Creates a new MaxLengthValidator.
    pub fn new(max_length: usize) -> Self {
        Self::with_message(
            max_length,
            format!("Ensure this value has at most {max_length} characters."),
        )
    }

    /// Creates a new MaxLengthValidator with custom message.
    pub fn with_message(max_length: usize, message: impl Into<String>) -> Self {
        Self {
            max_length,
            message: message.into(),
        }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, input: &Input) -> Result<(), ValidationError> {
        if input.value().chars().count() > self.max_length {
            Err(ValidationError::invalid(&self.message))
        } else {
            Ok(())
        }
    }
}

/// Validator that enforces a minimum length in characters.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    min_length: usize,
    message: String,
}

impl MinLengthValidator {
    /// Creates a new MinLengthValidator.
    pub fn new(min_length: usize) -> Self {
        Self::with_message(
            min_length,
            format!("Ensure this value has at least {min_length} characters."),
        )
    }

    /// Creates a new MinLengthValidator with custom message.
    pub fn with_message(min_length: usize, message: impl Into<String>) -> Self {
        Self {
            min_length,
            message: message.into(),
        }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, input: &Input) -> Result<(), ValidationError> {
        if input.value().chars().count() < self.min_length {
            Err(ValidationError::invalid(&self.message))
        } else {
            Ok(())
        }
    }
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

/// Validator for email addresses.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    message: String,
}

impl EmailValidator {
    /// Creates a new EmailValidator with default message.
    pub fn new() -> Self {
        Self::with_message("Enter a valid email address.")
    }

    /// Creates a new EmailValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for EmailValidator {
    fn validate(&self, input: &Input) -> Result<(), ValidationError> {
        if EMAIL_RE.is_match(input.value()) {
            Ok(())
        } else {
            Err(ValidationError::invalid(&self.message))
        }
    }
}

/// Validator for http(s) URLs.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    message: String,
}

impl UrlValidator {
    /// Creates a new UrlValidator with default message.
    pub fn new() -> Self {
        Self::with_message("Enter a valid URL.")
    }

    /// Creates a new UrlValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for UrlValidator {
    fn validate(&self, input: &Input) -> Result<(), ValidationError> {
        let value = input.value();
        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(())
        } else {
            Err(ValidationError::invalid(&self.message))
        }
    }
}

/// Validator using a custom regex pattern.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    pattern: Regex,
    message: String,
}

impl RegexValidator {
    /// Creates a new RegexValidator.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            message: message.into(),
        })
    }
}

impl Validator for RegexValidator {
    fn validate(&self, input: &Input) -> Result<(), ValidationError> {
        if self.pattern.is_match(input.value()) {
            Ok(())
        } else {
            Err(ValidationError::invalid(&self.message))
        }
    }
}
