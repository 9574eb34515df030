// ABOUTME: Type definitions for setting categories and value types
// ABOUTME: Category strings map onto preference, machine or profile semantics

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared type of a setting's value; decides which validator is auto-attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Float,
    Int,
    #[serde(rename = "string")]
    Str,
}

impl ValueType {
    pub fn as_str(&self) -> &str {
        match self {
            ValueType::Float => "float",
            ValueType::Int => "int",
            ValueType::Str => "string",
        }
    }
}

/// Category a setting belongs to.
///
/// Any category string other than `preference` or `machine` is a profile
/// category; the raw string is kept so category queries can still tell
/// e.g. `basic` from `advanced`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Preference,
    Machine,
    Profile(String),
}

impl Category {
    pub fn profile() -> Self {
        Category::Profile("profile".to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Preference => "preference",
            Category::Machine => "machine",
            Category::Profile(raw) => raw,
        }
    }

    pub fn is_preference(&self) -> bool {
        matches!(self, Category::Preference)
    }

    pub fn is_machine(&self) -> bool {
        matches!(self, Category::Machine)
    }

    pub fn is_profile(&self) -> bool {
        matches!(self, Category::Profile(_))
    }
}

impl From<&str> for Category {
    fn from(raw: &str) -> Self {
        match raw {
            "preference" => Category::Preference,
            "machine" => Category::Machine,
            other => Category::Profile(other.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        Category::from(raw.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
