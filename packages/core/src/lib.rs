// ABOUTME: Core utilities for profilekit
// ABOUTME: Foundational package providing path resolution and compact transport helpers

pub mod constants;
pub mod utils;

// Re-export path helpers
pub use constants::{
    alternative_base_paths, base_dir, default_profile_path, ensure_base_dir,
    machine_settings_path, preferences_path,
};

// Re-export utilities
pub use utils::{compress_data, decode_transport, decompress_data, encode_transport, insert_newlines};
