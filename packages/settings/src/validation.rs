// ABOUTME: Validation capabilities attached to settings
// ABOUTME: Outcome severities, the Validator trait and the numeric range validator

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a validation result, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationOutcome {
    Success,
    Warning,
    Error,
}

/// Result of validating one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub outcome: ValidationOutcome,
    pub message: String,
}

impl Validation {
    pub fn success() -> Self {
        Self {
            outcome: ValidationOutcome::Success,
            message: String::new(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            outcome: ValidationOutcome::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            outcome: ValidationOutcome::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == ValidationOutcome::Success
    }

    /// Fold several results into one: the most severe outcome wins and the
    /// messages of every non-success result are joined with newlines.
    pub fn aggregate(results: impl IntoIterator<Item = Validation>) -> Validation {
        let mut outcome = ValidationOutcome::Success;
        let mut messages = Vec::new();
        for result in results {
            outcome = outcome.max(result.outcome);
            if result.outcome != ValidationOutcome::Success {
                messages.push(result.message);
            }
        }
        Validation {
            outcome,
            message: messages.join("\n"),
        }
    }
}

/// A check run against a setting's string value. Validators report, they never
/// block a write.
pub trait Validator: fmt::Debug + Send + Sync {
    fn validate(&self, value: &str) -> Validation;

    /// Configure range bounds; validators without bounds ignore this.
    fn set_bounds(&mut self, _min: Option<f64>, _max: Option<f64>) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Float,
    Int,
}

/// Parses the value as a number and checks optional inclusive bounds
#[derive(Debug, Clone, PartialEq)]
pub struct NumericRange {
    kind: NumberKind,
    min: Option<f64>,
    max: Option<f64>,
}

impl NumericRange {
    pub fn float() -> Self {
        Self {
            kind: NumberKind::Float,
            min: None,
            max: None,
        }
    }

    pub fn int() -> Self {
        Self {
            kind: NumberKind::Int,
            min: None,
            max: None,
        }
    }

    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    fn parse(&self, value: &str) -> Option<f64> {
        let text = value.trim().replace(',', ".");
        match self.kind {
            NumberKind::Float => text.parse::<f64>().ok().filter(|v| v.is_finite()),
            NumberKind::Int => text.parse::<i64>().ok().map(|v| v as f64),
        }
    }
}

impl Validator for NumericRange {
    fn validate(&self, value: &str) -> Validation {
        let Some(number) = self.parse(value) else {
            return match self.kind {
                NumberKind::Float => Validation::error(format!("{:?} is not a valid number", value)),
                NumberKind::Int => {
                    Validation::error(format!("{:?} is not a valid whole number", value))
                }
            };
        };

        if let Some(min) = self.min {
            if number < min {
                return Validation::error(format!("Should not be below {}", min));
            }
        }

        if let Some(max) = self.max {
            if number > max {
                return Validation::error(format!("Should not be above {}", max));
            }
        }

        Validation::success()
    }

    fn set_bounds(&mut self, min: Option<f64>, max: Option<f64>) {
        self.min = min;
        self.max = max;
    }
}
