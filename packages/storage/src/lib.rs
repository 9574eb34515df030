// ABOUTME: Persistence of the settings registry to INI files
// ABOUTME: Profile, preferences and machine files in single or all-instances layouts

pub mod error;
pub mod ini;
pub mod store;

pub use error::{IniError, StorageError, StorageResult};
pub use ini::IniDocument;
pub use store::{
    load_machine_settings, load_preferences, load_profile, reset_profile, save_preferences,
    save_profile, Layout, SettingsStore,
};
