//! Form field validation
//!
//! Static per-field rules evaluated locally; a failing field blocks
//! submission before any request is made.

use std::collections::BTreeSet;
use validator::ValidateEmail;

/// Minimum length for name and job title fields
pub const MIN_TEXT_LEN: usize = 3;

/// A single field-level validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorKind {
    Required,
    MinLength,
    Email,
}

impl ErrorKind {
    /// Human-readable message for the form
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::Required => "required",
            ErrorKind::MinLength => "too short (min 3 characters)",
            ErrorKind::Email => "not a valid email address",
        }
    }
}

/// Static validation rules attached to a form field.
///
/// Length and email checks only apply to non-empty values; an empty value
/// fails `required` alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldRules {
    pub required: bool,
    pub min_len: Option<usize>,
    pub email: bool,
}

impl FieldRules {
    /// No constraints
    pub fn none() -> Self {
        Self::default()
    }

    /// Required, nothing else
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    /// Required with a minimum length
    pub fn required_min(min_len: usize) -> Self {
        Self {
            required: true,
            min_len: Some(min_len),
            ..Self::default()
        }
    }

    /// Required email syntax
    pub fn required_email() -> Self {
        Self {
            required: true,
            email: true,
            ..Self::default()
        }
    }

    /// Evaluate the rules against a raw field value
    pub fn check(&self, value: &str) -> BTreeSet<ErrorKind> {
        let mut errors = BTreeSet::new();

        if value.is_empty() {
            if self.required {
                errors.insert(ErrorKind::Required);
            }
            return errors;
        }

        if let Some(min) = self.min_len
            && value.chars().count() < min
        {
            errors.insert(ErrorKind::MinLength);
        }

        if self.email && !value.validate_email() {
            errors.insert(ErrorKind::Email);
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_fails_required_only() {
        let errors = FieldRules::required_min(MIN_TEXT_LEN).check("");
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(&ErrorKind::Required));
    }

    #[test]
    fn min_length_boundary() {
        let rules = FieldRules::required_min(MIN_TEXT_LEN);
        assert!(rules.check("Al").contains(&ErrorKind::MinLength));
        assert!(rules.check("Ann").is_empty());
    }

    #[test]
    fn email_syntax() {
        let rules = FieldRules::required_email();
        assert!(rules.check("not-an-email").contains(&ErrorKind::Email));
        assert!(rules.check("a@b.com").is_empty());
        assert_eq!(rules.check(""), BTreeSet::from([ErrorKind::Required]));
    }

    #[test]
    fn unconstrained_field_accepts_anything() {
        assert!(FieldRules::none().check("").is_empty());
        assert!(FieldRules::none().check("whatever").is_empty());
    }
}
