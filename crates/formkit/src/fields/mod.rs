//! Typed field variants.
//!
//! Each variant wraps an [`Input`](crate::Input) and installs its own preset
//! validator pipeline when constructed. Shared setup goes through the
//! consuming builders generated below or, via `DerefMut`, the `Input` setters.

/// Implements the builders, `Field`, `Deref` and `Display` for a variant
/// that stores its state in an `input: Input` field.
macro_rules! impl_input_variant {
    ($ty:ty) => {
        impl $ty {
            /// Sets the name.
            #[must_use]
            pub fn with_name(mut self, name: impl Into<String>) -> Self {
                self.input.set_name(name);
                self
            }

            /// Sets the initial value.
            #[must_use]
            pub fn with_value(mut self, value: impl Into<String>) -> Self {
                self.input.set_value(value);
                self
            }

            /// Adds a CSS class.
            #[must_use]
            pub fn with_class(mut self, class: impl Into<String>) -> Self {
                self.input.add_class(class);
                self
            }

            /// Sets an HTML attribute.
            #[must_use]
            pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
                self.input.add_attr(key, value);
                self
            }

            /// Sets the inclusive lower bound.
            #[must_use]
            pub fn with_min(mut self, min: i64) -> Self {
                self.input.set_min(min);
                self
            }

            /// Sets the inclusive upper bound.
            #[must_use]
            pub fn with_max(mut self, max: i64) -> Self {
                self.input.set_max(max);
                self
            }

            /// Marks the field as required in the rendered markup.
            #[must_use]
            pub fn required(mut self) -> Self {
                self.input.set_required(true);
                self
            }

            /// Appends a validator after the preset ones.
            #[must_use]
            pub fn validator(mut self, validator: impl $crate::validation::Validator + 'static) -> Self {
                self.input.add_validator(validator);
                self
            }
        }

        impl $crate::input::Field for $ty {
            fn input(&self) -> &$crate::input::Input {
                &self.input
            }

            fn input_mut(&mut self) -> &mut $crate::input::Input {
                &mut self.input
            }
        }

        impl std::ops::Deref for $ty {
            type Target = $crate::input::Input;

            fn deref(&self) -> &Self::Target {
                &self.input
            }
        }

        impl std::ops::DerefMut for $ty {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.input
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.input.render())
            }
        }
    };
}

pub(crate) use impl_input_variant;

mod integer;
mod text;

pub use integer::{integer_bound, is_integer, IntegerInput};
pub use text::TextInput;
