// src/jobs/validators.rs

use super::models::*;
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Job Validators
// ============================================================================

pub struct JobValidator;

impl Validator<CreateJob> for JobValidator {
    fn validate(&self, data: &CreateJob) -> ValidationResult {
        let mut result = ValidationResult::new();

        // Validate title
        match data.title.as_deref().map(str::trim) {
            None | Some("") => result.add_error("title", "Job title is required"),
            Some(title) if title.len() > 255 => {
                result.add_error("title", "Job title must be less than 255 characters")
            }
            _ => {}
        }

        // Validate description length if provided
        if let Some(description) = &data.description {
            if description.len() > 10000 {
                result.add_error(
                    "description",
                    "Description must be less than 10000 characters",
                );
            }
        }

        // Validate category length if provided
        if let Some(category) = &data.category {
            if category.len() > 100 {
                result.add_error("category", "Category must be less than 100 characters");
            }
        }

        // Validate location length if provided
        if let Some(location) = &data.location {
            if location.len() > 255 {
                result.add_error("location", "Location must be less than 255 characters");
            }
        }

        // Validate budget range
        if let Some(min) = data.budget_min {
            if min < 0 {
                result.add_error("budget_min", "Minimum budget cannot be negative");
            }
        }
        if let Some(max) = data.budget_max {
            if max < 0 {
                result.add_error("budget_max", "Maximum budget cannot be negative");
            }
        }
        if let (Some(min), Some(max)) = (data.budget_min, data.budget_max) {
            if min > max {
                result.add_error(
                    "budget_range",
                    "Minimum budget cannot be greater than maximum budget",
                );
            }
        }

        result
    }
}
