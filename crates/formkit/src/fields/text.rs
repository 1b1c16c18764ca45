//! Free-text input.

use crate::input::Input;

use super::impl_input_variant;

/// A `type="text"` input with no preset validators.
#[derive(Debug, Default)]
pub struct TextInput {
    input: Input,
}

impl TextInput {
    /// Creates a new text input.
    pub fn new() -> Self {
        Self {
            input: Input::new().with_kind("text"),
        }
    }
}

impl_input_variant!(TextInput);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::input::Field;
    use crate::validation::{MaxLengthValidator, RequiredValidator};

    #[test]
    fn test_text_input_has_no_presets() {
        let field = TextInput::new().with_name("name");
        assert_eq!(field.kind(), "text");
        assert_eq!(field.validator_count(), 0);
        assert!(Field::validate(&field).is_ok());
    }

    #[test]
    fn test_caller_validators_run_in_order() {
        let mut field = TextInput::new()
            .with_name("username")
            .validator(RequiredValidator::new())
            .validator(MaxLengthValidator::new(3));

        assert_eq!(
            Field::validate(&field).unwrap_err().cause(),
            &ValidationError::invalid("This field is required.")
        );

        field.set_value("abcd");
        assert_eq!(
            Field::validate(&field).unwrap_err().cause().to_string(),
            "Ensure this value has at most 3 characters."
        );

        field.set_value("abc");
        assert!(Field::validate(&field).is_ok());
    }

    #[test]
    fn test_render_through_display() {
        let field = TextInput::new()
            .with_name("name")
            .with_value("Alice")
            .with_attr("placeholder", "Your name");
        assert_eq!(
            field.to_string(),
            r#"<input type="text" name="name" value="Alice" placeholder="Your name">"#
        );
    }
}
