// ABOUTME: Library side of the profilekit command line tool
// ABOUTME: Subcommand definitions, handlers and the JSON setting snapshot

pub mod commands;
pub mod snapshot;

pub use commands::{handle_command, parse_machine_index, SettingsCommands};
pub use snapshot::SettingSnapshot;
