//! Integer input with parse and bounds checks.

use crate::error::ValidationError;
use crate::input::Input;
use crate::validation::Validator;

use super::impl_input_variant;

/// Fails unless the value parses as a base-10 32-bit signed integer.
pub fn is_integer(input: &Input) -> Result<(), ValidationError> {
    parse_i32(input).map(|_| ())
}

/// Fails if the value is outside `[min, max]`.
///
/// Runs after [`is_integer`] in the preset pipeline; an unparseable value
/// still yields a parse error rather than a panic.
pub fn integer_bound(input: &Input) -> Result<(), ValidationError> {
    let n = i64::from(parse_i32(input)?);
    if n < input.min() {
        return Err(ValidationError::TooSmall {
            name: input.name().to_string(),
            min: input.min(),
        });
    }
    if n > input.max() {
        return Err(ValidationError::TooLarge {
            name: input.name().to_string(),
            max: input.max(),
        });
    }
    Ok(())
}

fn parse_i32(input: &Input) -> Result<i32, ValidationError> {
    input
        .value()
        .parse::<i32>()
        .map_err(|_| ValidationError::Parse {
            value: input.value().to_string(),
        })
}

/// An input that only accepts integers within inclusive bounds.
///
/// The bounds default to the full `i32` range. The `type` attribute stays
/// `"text"`; use `set_kind("number")` for a numeric keypad.
#[derive(Debug)]
pub struct IntegerInput {
    input: Input,
}

impl IntegerInput {
    /// Creates a new integer input with the `is_integer` and
    /// `integer_bound` validators installed, in that order.
    pub fn new() -> Self {
        let presets: Vec<Box<dyn Validator>> = vec![
            Box::new(is_integer) as Box<dyn Validator>,
            Box::new(integer_bound) as Box<dyn Validator>,
        ];
        Self {
            input: Input::with_validators(presets),
        }
    }

    /// Returns the value parsed as an integer, if it is one.
    pub fn parsed(&self) -> Option<i32> {
        self.input.value().parse().ok()
    }
}

impl Default for IntegerInput {
    fn default() -> Self {
        Self::new()
    }
}

impl_input_variant!(IntegerInput);
