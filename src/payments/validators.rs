// src/payments/validators.rs

use super::models::InitPaymentRequest;
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Payment Validators
// ============================================================================

pub struct InitPaymentValidator;

impl Validator<InitPaymentRequest> for InitPaymentValidator {
    fn validate(&self, data: &InitPaymentRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        match data.amount {
            None => result.add_error("amount", "Amount is required"),
            Some(amount) if amount <= 0 => {
                result.add_error("amount", "Amount must be a positive number of minor units")
            }
            _ => {}
        }

        if let Some(currency) = &data.currency {
            if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
                result.add_error("currency", "Currency must be a 3-letter code");
            }
        }

        if let Some(email) = &data.email {
            if !email.contains('@') {
                result.add_error("email", "Billing email is not valid");
            }
        }

        result
    }
}
