// ABOUTME: Typed, ordered settings registry for profiles, preferences and machines
// ABOUTME: Setting definitions, validation, conditions, namespaced accessors and compact strings

pub mod accessors;
pub mod codec;
pub mod condition;
pub mod defaults;
pub mod error;
pub mod machine;
pub mod registry;
pub mod setting;
pub mod types;
pub mod validation;

// Re-export main types
pub use condition::Condition;
pub use error::{CodecError, CodecResult, SettingsError, SettingsResult};
pub use machine::{MachineNameFixup, UniqueMachineName};
pub use registry::Registry;
pub use setting::{Identity, Setting, Translate};
pub use types::{Category, ValueType};
pub use validation::{NumericRange, Validation, ValidationOutcome, Validator};

// Re-export codec entry points
pub use codec::{preferences_string, profile_string, set_profile_from_string};

// Re-export built-in declarations
pub use defaults::register_defaults;
