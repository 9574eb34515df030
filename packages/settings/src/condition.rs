// ABOUTME: Conditions gating whether a setting is active for display and queries
// ABOUTME: Inspectable common cases plus a closure escape hatch

use std::fmt;
use std::sync::Arc;

use crate::registry::Registry;

type Check = Arc<dyn Fn(&Registry) -> bool + Send + Sync>;

/// Predicate evaluated against the registry. Conditions only filter queries;
/// they never prevent a value from being stored.
#[derive(Clone)]
pub enum Condition {
    /// Another setting currently holds exactly `value`
    Equals { setting: String, value: String },
    /// Another setting currently holds a non-empty value
    NonEmpty { setting: String },
    /// Arbitrary logic
    Custom { description: String, check: Check },
}

impl Condition {
    pub fn equals(setting: impl Into<String>, value: impl Into<String>) -> Self {
        Condition::Equals {
            setting: setting.into(),
            value: value.into(),
        }
    }

    pub fn non_empty(setting: impl Into<String>) -> Self {
        Condition::NonEmpty {
            setting: setting.into(),
        }
    }

    pub fn custom<F>(description: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Registry) -> bool + Send + Sync + 'static,
    {
        Condition::Custom {
            description: description.into(),
            check: Arc::new(check),
        }
    }

    /// Unknown settings never satisfy `Equals` or `NonEmpty`.
    pub fn evaluate(&self, registry: &Registry) -> bool {
        match self {
            Condition::Equals { setting, value } => registry.value(setting) == Some(value.as_str()),
            Condition::NonEmpty { setting } => registry.value(setting).is_some_and(|v| !v.is_empty()),
            Condition::Custom { check, .. } => check(registry),
        }
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Equals { setting, value } => f
                .debug_struct("Equals")
                .field("setting", setting)
                .field("value", value)
                .finish(),
            Condition::NonEmpty { setting } => {
                f.debug_struct("NonEmpty").field("setting", setting).finish()
            }
            Condition::Custom { description, .. } => {
                f.debug_struct("Custom").field("description", description).finish()
            }
        }
    }
}
