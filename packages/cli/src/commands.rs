// ABOUTME: Settings subcommands of the profilekit CLI
// ABOUTME: Handlers work on a loaded registry and persist changes through the settings store

use std::path::PathBuf;

use clap::Subcommand;
use colored::*;
use profilekit_config::{MACHINE_NAME, MAX_MACHINES};
use profilekit_core::insert_newlines;
use profilekit_settings::{
    preferences_string, profile_string, set_profile_from_string, Registry, Setting, SettingsError,
    UniqueMachineName, Validation, ValidationOutcome,
};
use profilekit_storage::{load_machine_settings, reset_profile, SettingsStore};
use tracing::info;

use crate::snapshot::SettingSnapshot;

pub type CommandResult = Result<String, Box<dyn std::error::Error>>;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SettingsCommands {
    /// List settings with their values for the selected machine
    Show {
        /// Only list active settings of this category (basic, preference, machine, ...)
        #[arg(short, long)]
        category: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the value of one setting
    Get {
        /// Setting name
        name: String,
    },
    /// Change a setting and save it
    Set {
        /// Setting name
        name: String,
        /// New value
        value: String,
    },
    /// Print the profile as a compact string
    ExportProfile {
        /// Break the string every N characters
        #[arg(long)]
        wrap: Option<usize>,
    },
    /// Apply a compact profile string and save the profile
    ImportProfile {
        /// String printed by export-profile; whitespace and line breaks are ignored
        string: String,
    },
    /// Print the preferences as a compact string
    ExportPreferences,
    /// Read a [machine] file into the selected machine and save preferences
    ImportMachine {
        /// Machine file (defaults to machine.ini in the settings directory)
        path: Option<PathBuf>,
    },
    /// Reset every profile setting of the selected machine to its default
    ResetProfile,
    /// Validate every active setting
    Validate,
}

/// Parse a `--machine` index, rejecting anything at or above `MAX_MACHINES`
pub fn parse_machine_index(text: &str) -> Result<usize, String> {
    let index: usize = text
        .trim()
        .parse()
        .map_err(|_| format!("{:?} is not a machine index", text))?;
    if index >= MAX_MACHINES {
        return Err(format!("machine index must be below {}", MAX_MACHINES));
    }
    Ok(index)
}

/// Run one subcommand and return what should be printed
pub fn handle_command(
    command: SettingsCommands,
    registry: &mut Registry,
    store: &SettingsStore,
) -> CommandResult {
    match command {
        SettingsCommands::Show { category, json } => show(registry, category.as_deref(), json),
        SettingsCommands::Get { name } => get(registry, &name),
        SettingsCommands::Set { name, value } => set(registry, store, &name, &value),
        SettingsCommands::ExportProfile { wrap } => {
            let encoded = profile_string(registry)?;
            Ok(match wrap {
                Some(every) => insert_newlines(&encoded, every),
                None => encoded,
            })
        }
        SettingsCommands::ImportProfile { string } => {
            let applied = set_profile_from_string(registry, &string)?;
            store.save_profile(registry)?;
            Ok(format!("{} Applied {} values", "✓".green(), applied))
        }
        SettingsCommands::ExportPreferences => Ok(preferences_string(registry)?),
        SettingsCommands::ImportMachine { path } => {
            match path {
                Some(path) => load_machine_settings(registry, &path, &UniqueMachineName),
                None => store.load_machine(registry, &UniqueMachineName),
            }
            store.save_preferences(registry)?;
            Ok(format!(
                "{} Machine {} is now {:?}",
                "✓".green(),
                registry.current_index(),
                registry.machine_setting(MACHINE_NAME, None)
            ))
        }
        SettingsCommands::ResetProfile => {
            reset_profile(registry);
            store.save_profile(registry)?;
            Ok(format!("{} Profile reset to defaults", "✓".green()))
        }
        SettingsCommands::Validate => validate(registry),
    }
}

fn show(registry: &Registry, category: Option<&str>, json: bool) -> CommandResult {
    let settings: Vec<&Setting> = match category {
        Some(category) => registry.settings_for(category, None),
        None => registry.iter().collect(),
    };
    let snapshots: Vec<SettingSnapshot> = settings
        .into_iter()
        .map(|setting| SettingSnapshot::capture(registry, setting))
        .collect();

    if json {
        return Ok(serde_json::to_string_pretty(&snapshots)?);
    }

    if snapshots.is_empty() {
        return Ok("No settings found".yellow().to_string());
    }

    let mut lines = Vec::new();
    let mut last_category: Option<&str> = None;
    for snapshot in &snapshots {
        let category = snapshot.category.as_str();
        if last_category != Some(category) {
            lines.push(format!("[{}]", category).blue().bold().to_string());
            last_category = Some(category);
        }

        let value = match snapshot.validation {
            ValidationOutcome::Success => snapshot.value.normal(),
            ValidationOutcome::Warning => snapshot.value.yellow(),
            ValidationOutcome::Error => snapshot.value.red(),
        };
        let mut line = format!("  {} = {}", snapshot.name, value);
        if !snapshot.active {
            line.push_str(&" (inactive)".dimmed().to_string());
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

fn get(registry: &Registry, name: &str) -> CommandResult {
    registry
        .value(name)
        .map(str::to_string)
        .ok_or_else(|| SettingsError::UnknownSetting(name.to_string()).into())
}

/// Values failing validation are not saved.
fn set(registry: &mut Registry, store: &SettingsStore, name: &str, value: &str) -> CommandResult {
    registry.set_value(name, value)?;

    let validation = registry.validate(name).unwrap_or_else(Validation::success);
    if validation.outcome == ValidationOutcome::Error {
        return Err(format!("Invalid value for {}: {}", name, validation.message).into());
    }

    store.save(registry)?;
    info!("Set {} to {:?}", name, value);

    let mut output = format!("{} {} = {}", "✓".green(), name, value);
    if validation.outcome == ValidationOutcome::Warning {
        output.push_str(&format!("\n{} {}", "⚠".yellow(), validation.message));
    }
    Ok(output)
}

fn validate(registry: &Registry) -> CommandResult {
    let current = registry.current_index();
    let problems: Vec<(String, Validation)> = registry
        .iter()
        .filter(|setting| setting.check_conditions(registry))
        .map(|setting| (setting.name().to_string(), setting.validate(current)))
        .filter(|(_, validation)| !validation.is_success())
        .collect();

    if problems.is_empty() {
        return Ok(format!("{} All settings valid", "✓".green()));
    }

    let report = problems
        .iter()
        .map(|(name, validation)| format!("  {}: {}", name, validation.message))
        .collect::<Vec<_>>()
        .join("\n");

    if problems
        .iter()
        .any(|(_, validation)| validation.outcome == ValidationOutcome::Error)
    {
        return Err(format!("Some settings are invalid:\n{}", report).into());
    }
    Ok(format!("{} Warnings:\n{}", "⚠".yellow(), report))
}
