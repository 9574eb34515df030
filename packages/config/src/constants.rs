// ABOUTME: Environment variable, file and section name constants
// ABOUTME: Centralized definitions of every fixed name profilekit reads or writes

// Base Directory Configuration
pub const PROFILEKIT_HOME: &str = "PROFILEKIT_HOME";
pub const BASE_DIR_NAME: &str = ".profilekit";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

// Settings Files
pub const PROFILE_FILE: &str = "current_profile.ini";
pub const PREFERENCES_FILE: &str = "preferences.ini";
pub const MACHINE_FILE: &str = "machine.ini";

// INI Sections
pub const PROFILE_SECTION: &str = "profile";
pub const PREFERENCE_SECTION: &str = "preference";
pub const MACHINE_SECTION: &str = "machine";

/// Section holding the profile of instance `index` in an all-instances profile file
pub fn profile_section(index: usize) -> String {
    format!("{}_{}", PROFILE_SECTION, index)
}

/// Section holding the machine settings of instance `index` in the preferences file
pub fn machine_section(index: usize) -> String {
    format!("{}_{}", MACHINE_SECTION, index)
}

// Well-known Setting Names
pub const MACHINE_NAME: &str = "machine_name";
pub const DEFAULT_MACHINE_NAME: &str = "Machine";

/// Upper bound (exclusive) on machine indices
pub const MAX_MACHINES: usize = 64;

// System Environment Variables
pub const HOME: &str = "HOME";
