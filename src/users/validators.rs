// src/users/validators.rs

use regex::Regex;

use super::models::{LoginRequest, RegisterRequest};
use crate::common::{ValidationResult, Validator};

// ============================================================================
// User Validators
// ============================================================================

pub struct RegisterValidator;

impl Validator<RegisterRequest> for RegisterValidator {
    fn validate(&self, data: &RegisterRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        match data.full_name.as_deref().map(str::trim) {
            None | Some("") => result.add_error("full_name", "Full name is required"),
            Some(name) if name.len() > 120 => {
                result.add_error("full_name", "Full name must be less than 120 characters")
            }
            _ => {}
        }

        match data.email.as_deref().map(str::trim) {
            None | Some("") => result.add_error("email", "Email is required"),
            Some(email) if !is_valid_email(email) => {
                result.add_error("email", "Email address is not valid")
            }
            _ => {}
        }

        match data.password.as_deref() {
            None | Some("") => result.add_error("password", "Password is required"),
            Some(password) if password.len() < 8 => {
                result.add_error("password", "Password must be at least 8 characters")
            }
            Some(password) if password.len() > 72 => {
                // bcrypt truncates input beyond 72 bytes
                result.add_error("password", "Password must be at most 72 characters")
            }
            _ => {}
        }

        result
    }
}

pub struct LoginValidator;

impl Validator<LoginRequest> for LoginValidator {
    fn validate(&self, data: &LoginRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.email.as_deref().map_or(true, |e| e.trim().is_empty()) {
            result.add_error("email", "Email is required");
        }
        if data.password.as_deref().map_or(true, |p| p.is_empty()) {
            result.add_error("password", "Password is required");
        }

        result
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn is_valid_email(email: &str) -> bool {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .map(|re| re.is_match(email))
        .unwrap_or(false)
}
