// validate.rs - Field-level checks
//
// The submit interceptor runs these before the confirmation dialog may
// open; each error anchors to one field container on the page.

use super::FormState;

/// Minimum trimmed name length.
pub const MIN_NAME_LEN: usize = 2;

/// Which form field an error belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldId {
    Name,
    Os,
    /// Question blocks, 1-based to match the markup ids.
    Question(u8),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: FieldId,
    pub message: String,
}

impl FieldError {
    fn new(field: FieldId, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check every field. An empty result clears the form for confirmation.
pub fn validate(form: &FormState) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if form.name.trim().chars().count() < MIN_NAME_LEN {
        errors.push(FieldError::new(
            FieldId::Name,
            "Please enter your name (at least 2 characters).",
        ));
    }

    if form.os.is_none() {
        errors.push(FieldError::new(
            FieldId::Os,
            "Select your system (Windows, macOS or Linux).",
        ));
    }

    for (i, answer) in form.answers.iter().enumerate() {
        if answer.is_none() {
            let number = i as u8 + 1;
            errors.push(FieldError::new(
                FieldId::Question(number),
                format!("Please answer question {number}."),
            ));
        }
    }

    errors
}
