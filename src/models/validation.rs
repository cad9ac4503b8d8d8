//! Result of a stateless change validation

use serde::{Deserialize, Serialize};

/// Problems found in proposed content; `is_valid` only reflects `errors`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            ..Default::default()
        }
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.is_valid = false;
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn recommend(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.recommendations.contains(&message) {
            self.recommendations.push(message);
        }
    }
}
