//! Shared validation helpers for inbound HTTP adapters.
//!
//! Payload validation failures are reported in one response that itemizes
//! every failing field, mirroring how form UIs surface them: the error
//! `details` carry a `fieldErrors` array of `{field, code, message}` objects.

use serde_json::json;

use crate::domain::{ComplaintValidationError, Error, RegistrationValidationError};

/// One failing payload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldError {
    field: &'static str,
    code: &'static str,
    message: String,
}

impl FieldError {
    pub(crate) fn new(field: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }
}

/// Fold field failures into a single invalid-request error.
pub(crate) fn validation_error(errors: Vec<FieldError>) -> Error {
    let items: Vec<serde_json::Value> = errors
        .iter()
        .map(|error| {
            json!({
                "field": error.field,
                "code": error.code,
                "message": error.message,
            })
        })
        .collect();
    let message = errors
        .first()
        .map_or_else(|| "invalid request".to_owned(), |error| error.message.clone());
    Error::invalid_request(message).with_details(json!({ "fieldErrors": items }))
}

pub(crate) fn registration_field_error(error: &RegistrationValidationError) -> FieldError {
    let message = error.to_string();
    match error {
        RegistrationValidationError::EmptyUsername => {
            FieldError::new("username", "empty_username", message)
        }
        RegistrationValidationError::PasswordTooShort { .. } => {
            FieldError::new("password", "password_too_short", message)
        }
        RegistrationValidationError::FullNameTooShort { .. } => {
            FieldError::new("fullName", "full_name_too_short", message)
        }
        RegistrationValidationError::InvalidEmail => {
            FieldError::new("email", "invalid_email", message)
        }
    }
}

pub(crate) fn complaint_field_error(error: &ComplaintValidationError) -> FieldError {
    let message = error.to_string();
    match error {
        ComplaintValidationError::UnknownKind { .. } => {
            FieldError::new("type", "unknown_type", message)
        }
        ComplaintValidationError::DescriptionTooShort { .. } => {
            FieldError::new("description", "description_too_short", message)
        }
        ComplaintValidationError::UnknownStatus { .. } => {
            FieldError::new("status", "unknown_status", message)
        }
        ComplaintValidationError::StatusNotDeskAssignable => {
            FieldError::new("status", "status_not_assignable", message)
        }
        ComplaintValidationError::NonPositiveDepartment { .. } => {
            FieldError::new("departmentId", "non_positive_department", message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DESCRIPTION_MIN;

    #[test]
    fn every_failing_field_is_itemized() {
        let error = validation_error(vec![
            complaint_field_error(&ComplaintValidationError::UnknownKind {
                value: "NOISE".to_owned(),
            }),
            complaint_field_error(&ComplaintValidationError::DescriptionTooShort {
                min: DESCRIPTION_MIN,
            }),
        ]);

        let details = error.details().expect("details present");
        let items = details["fieldErrors"].as_array().expect("array");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["field"], "type");
        assert_eq!(items[1]["field"], "description");
        assert_eq!(items[1]["code"], "description_too_short");
    }

    #[test]
    fn top_level_message_is_the_first_field_failure() {
        let error = validation_error(vec![registration_field_error(
            &RegistrationValidationError::EmptyUsername,
        )]);
        assert_eq!(error.message(), "username must not be empty");
    }
}
