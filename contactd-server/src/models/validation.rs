//! Validation error types

use std::fmt;

use serde::Serialize;

/// Kind of constraint a field failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    /// Field is missing or null
    Required,
    /// Field has the wrong JSON type
    InvalidType,
    /// String is shorter than the minimum
    TooSmall,
    /// String doesn't match the required format (e.g., email)
    InvalidString,
    /// Timestamp could not be parsed
    InvalidDate,
}

/// A single failed constraint, addressed by field path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub path: Vec<String>,
    pub code: ViolationCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<usize>,
}

impl FieldViolation {
    pub fn required(field: &str) -> Self {
        Self::new(field, ViolationCode::Required, "Required".to_owned())
    }

    pub fn invalid_type(field: &str, expected: &str) -> Self {
        Self::new(
            field,
            ViolationCode::InvalidType,
            format!("Expected {}", expected),
        )
    }

    pub fn too_small(field: &str, minimum: usize) -> Self {
        Self {
            minimum: Some(minimum),
            ..Self::new(
                field,
                ViolationCode::TooSmall,
                format!("String must contain at least {} character(s)", minimum),
            )
        }
    }

    pub fn invalid_string(field: &str, what: &str) -> Self {
        Self::new(field, ViolationCode::InvalidString, format!("Invalid {}", what))
    }

    pub fn invalid_date(field: &str) -> Self {
        Self::new(field, ViolationCode::InvalidDate, "Invalid date".to_owned())
    }

    fn new(field: &str, code: ViolationCode, message: String) -> Self {
        // The empty field name addresses the payload itself
        let path = if field.is_empty() {
            Vec::new()
        } else {
            vec![field.to_owned()]
        };
        Self {
            path,
            code,
            message,
            minimum: None,
        }
    }

    /// Field name, or `None` for a violation on the whole payload
    pub fn field(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field() {
            Some(field) => write!(f, "{}: {}", field, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Validation failure carrying every violated constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Single-violation error for a payload that couldn't be read at all
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::new(vec![FieldViolation {
            path: Vec::new(),
            code: ViolationCode::InvalidType,
            message: reason.into(),
            minimum: None,
        }])
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.violations.iter().map(ToString::to_string).collect();
        write!(f, "validation failed: {}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::new(vec![
            FieldViolation::too_small("name", 2),
            FieldViolation::invalid_string("email", "email"),
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: name: String must contain at least 2 character(s); email: Invalid email"
        );
    }

    #[test]
    fn violation_serializes_with_path_and_code() {
        let json = serde_json::to_value(FieldViolation::too_small("message", 10)).unwrap();
        assert_eq!(json["path"], serde_json::json!(["message"]));
        assert_eq!(json["code"], "too_small");
        assert_eq!(json["minimum"], 10);

        let json = serde_json::to_value(FieldViolation::required("name")).unwrap();
        assert!(json.get("minimum").is_none());
    }

    #[test]
    fn malformed_addresses_root() {
        let err = ValidationError::malformed("Expected object");
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].field(), None);
        assert!(err.violations()[0].path.is_empty());
    }
}
