//! Book payload validation
//!
//! Errors are collected, never short-circuited: callers get every violation
//! of a payload in one list, in field order.

use serde_json::Value;

use crate::models::book::{coerce_year, is_truthy, BookPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Every field must be present and truthy (create)
    Strict,
    /// Only supplied fields are checked (update)
    Partial,
}

#[derive(Debug, Clone, Copy)]
pub struct BookValidator {
    /// Latest acceptable publication year
    max_year: i64,
}

impl BookValidator {
    pub fn new(current_year: i64, year_horizon: i64) -> Self {
        Self {
            max_year: current_year + year_horizon,
        }
    }

    pub fn max_year(&self) -> i64 {
        self.max_year
    }

    /// Returns the violations of `payload`; an empty list means valid.
    pub fn validate(&self, payload: &BookPayload, mode: ValidationMode) -> Vec<String> {
        let mut errors = Vec::new();
        let fields = [
            ("title", &payload.title),
            ("author", &payload.author),
            ("genre", &payload.genre),
            ("year", &payload.year),
        ];

        if mode == ValidationMode::Strict {
            for (name, value) in fields {
                if !supplied(value) {
                    errors.push(format!("'{}' is required", name));
                }
            }
        }

        for &(name, value) in &fields[..3] {
            if let Some(v) = value.as_ref().filter(|v| is_truthy(v)) {
                if !v.is_string() {
                    errors.push(format!("'{}' must be a string", name));
                }
            }
        }

        if let Some(year) = payload.year.as_ref().filter(|v| is_truthy(v)) {
            match coerce_year(year) {
                Some(y) if y < 0 || y > self.max_year => {
                    errors.push("'year' must be a valid year".to_string());
                }
                Some(_) => {}
                None => errors.push("'year' must be a valid integer".to_string()),
            }
        }

        errors
    }
}

fn supplied(value: &Option<Value>) -> bool {
    value.as_ref().map_or(false, is_truthy)
}
