//! Validation utilities for user input
//!
//! These checks run before a request is dispatched. The backend validates
//! again; a failure here only saves a round trip.

use shared::RegisterRequest;

use crate::core::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    /// Convert into a [`Result`], mapping failure to [`AppError::Validation`].
    pub fn into_result(self) -> Result<()> {
        match self.error {
            Some(message) if !self.is_valid => Err(AppError::Validation(message)),
            _ => Ok(()),
        }
    }
}

/// Validate email format
pub fn validate_email(email: &str) -> ValidationResult {
    if email.is_empty() {
        return ValidationResult::err("Email is required");
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return ValidationResult::err("Invalid email format");
    }

    if parts[0].is_empty() {
        return ValidationResult::err("Email username cannot be empty");
    }

    if parts[1].is_empty() || !parts[1].contains('.') {
        return ValidationResult::err("Invalid email domain");
    }

    ValidationResult::ok()
}

/// Validate a phone number: optional leading `+`, then 7 to 15 digits.
/// Spaces, dashes, dots and parentheses are accepted as separators.
pub fn validate_phone(phone: &str) -> ValidationResult {
    let phone = phone.trim();
    if phone.is_empty() {
        return ValidationResult::err("Phone number is required");
    }

    let body = phone.strip_prefix('+').unwrap_or(phone);
    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')'))
    {
        return ValidationResult::err("Please enter a valid phone number");
    }

    let digits = body.chars().filter(char::is_ascii_digit).count();
    if !(7..=15).contains(&digits) {
        return ValidationResult::err("Please enter a valid phone number");
    }

    ValidationResult::ok()
}

/// Validate a monetary amount entered by the user
pub fn validate_amount(amount: f64) -> ValidationResult {
    if !amount.is_finite() {
        return ValidationResult::err("Please enter a valid amount");
    }

    if amount <= 0.0 {
        return ValidationResult::err("Amount must be greater than 0");
    }

    ValidationResult::ok()
}

/// Validate a registration form
pub fn validate_registration(request: &RegisterRequest) -> ValidationResult {
    if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
        return ValidationResult::err("First and last name are required");
    }

    let email = validate_email(&request.email);
    if !email.is_valid {
        return email;
    }

    if request.password.is_empty() {
        return ValidationResult::err("Password is required");
    }

    if request.country.as_deref().map_or(true, |c| c.trim().is_empty()) {
        return ValidationResult::err("Please select a country");
    }

    validate_phone(request.phone.as_deref().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(validate_email("test@example.com").is_valid);
        assert!(validate_email("user@domain.co.uk").is_valid);
        assert!(!validate_email("").is_valid);
        assert!(!validate_email("invalid").is_valid);
        assert!(!validate_email("@example.com").is_valid);
        assert!(!validate_email("test@").is_valid);
        assert!(!validate_email("a@b@c.com").is_valid);
    }

    #[test]
    fn test_phone_validation() {
        assert!(validate_phone("+1 (555) 010-2030").is_valid);
        assert!(validate_phone("07911 123456").is_valid);
        assert!(!validate_phone("").is_valid);
        assert!(!validate_phone("12345").is_valid);
        assert!(!validate_phone("+1 555 CALL NOW").is_valid);
        assert!(!validate_phone("1234567890123456").is_valid);
    }

    #[test]
    fn test_amount_validation() {
        assert!(validate_amount(0.01).is_valid);
        assert!(!validate_amount(0.0).is_valid);
        assert!(!validate_amount(-5.0).is_valid);
        assert!(!validate_amount(f64::NAN).is_valid);
        assert_eq!(
            validate_amount(0.0).error.as_deref(),
            Some("Amount must be greater than 0")
        );
    }

    #[test]
    fn test_registration_validation() {
        let mut request = RegisterRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "password1".to_string(),
            phone: Some("+44 7911 123456".to_string()),
            country: Some("GB".to_string()),
        };
        // No strength rule: any non-empty password is sent
        assert!(validate_registration(&request).is_valid);

        request.password = String::new();
        assert_eq!(
            validate_registration(&request).error.as_deref(),
            Some("Password is required")
        );
        request.password = "pw".to_string();

        request.country = None;
        assert_eq!(
            validate_registration(&request).error.as_deref(),
            Some("Please select a country")
        );
        request.country = Some("GB".to_string());

        request.phone = Some("12".to_string());
        assert_eq!(
            validate_registration(&request).error.as_deref(),
            Some("Please enter a valid phone number")
        );
        request.phone = None;
        assert!(!validate_registration(&request).is_valid);
        request.phone = Some("+44 7911 123456".to_string());

        request.last_name = " ".to_string();
        assert!(!validate_registration(&request).is_valid);
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationResult::ok().into_result().is_ok());
        let err = ValidationResult::err("Email is required").into_result().unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == "Email is required"));
    }
}
