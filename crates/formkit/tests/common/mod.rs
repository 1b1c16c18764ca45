#![allow(dead_code)]

use formkit::{Form, IntegerInput, Request, TextInput};

pub fn age_field() -> IntegerInput {
    IntegerInput::new()
        .with_name("age")
        .with_min(0)
        .with_max(130)
}

pub fn age_form(method: &str) -> Form {
    Form::new().set_method(method).add_input(age_field())
}

/// Binds `age` through a request matching the form's method.
pub fn submit_age(value: &str) -> Form {
    let mut form = age_form("POST");
    let body = format!("age={value}");
    let request = Request::post().form_body(body);
    form.load(Some(&request))
        .unwrap_or_else(|e| panic!("Failed to load age={value}: {e}"));
    form
}

pub fn text_field(name: &str) -> TextInput {
    TextInput::new().with_name(name)
}
