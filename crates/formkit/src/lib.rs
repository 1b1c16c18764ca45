//! # formkit
//!
//! Declarative HTML form fields with ordered validation pipelines.
//!
//! This crate provides:
//! - Typed fields ([`TextInput`], [`IntegerInput`]) built on a shared [`Input`]
//! - Validator pipelines where the first failure wins
//! - A [`Form`] that binds submitted values, validates and renders
//! - Escaped rendering returned as pre-sanitized [`RawHtml`]
//!
//! ## Quick Start
//!
//! ```rust
//! use formkit::{Form, IntegerInput, Request, TextInput};
//! use formkit::validation::RequiredValidator;
//!
//! let mut form = Form::new()
//!     .set_action("/signup")
//!     .set_method("POST")
//!     .add_input(
//!         TextInput::new()
//!             .with_name("name")
//!             .validator(RequiredValidator::new()),
//!     )
//!     .add_input(
//!         IntegerInput::new()
//!             .with_name("age")
//!             .with_min(0)
//!             .with_max(130),
//!     );
//!
//! let request = Request::post().form_body("name=Ann&age=200");
//! form.load(Some(&request)).unwrap();
//!
//! let errors = form.validate().unwrap_err();
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors.get("age").unwrap().cause().to_string(), "age is more than 130");
//! assert_eq!(form.values()["name"], "Ann");
//!
//! let html = form.html();
//! assert!(html.as_str().starts_with(r#"<form action="/signup" method="POST">"#));
//! ```
//!
//! ## Custom validators
//!
//! Any `Fn(&Input) -> Result<(), ValidationError>` is a validator:
//!
//! ```rust
//! use formkit::{Field, Input, TextInput, ValidationError};
//!
//! let field = TextInput::new()
//!     .with_name("slug")
//!     .with_value("Hello World")
//!     .validator(|input: &Input| {
//!         if input.value().contains(' ') {
//!             Err(ValidationError::invalid("no spaces allowed"))
//!         } else {
//!             Ok(())
//!         }
//!     });
//!
//! let err = Field::validate(&field).unwrap_err();
//! assert_eq!(err.to_string(), "slug: no spaces allowed");
//! ```
//!
//! ## Escaping
//!
//! Names, values, classes and attributes are stored as given and escaped
//! only when rendered. [`Form::html`] returns [`RawHtml`] so that template
//! layers embed it without escaping it a second time.

mod error;
pub mod fields;
mod form;
mod html;
mod input;
pub mod request;
pub mod validation;

pub use error::{FieldError, FormError, FormErrors, Result, ValidationError};
pub use fields::{IntegerInput, TextInput};
pub use form::{FieldMut, Form};
pub use html::{html_escape, is_valid_attr_name, Attrs, RawHtml};
pub use input::{Field, Input};
pub use request::{FormParams, FormSource, Params, Request};
pub use validation::Validator;
