// ABOUTME: Maps registry state onto the profile, preferences and machine files
// ABOUTME: Loads never fail the caller; saves overwrite the whole file and report I/O errors

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use profilekit_config::{
    machine_section, profile_section, MACHINE_FILE, MACHINE_SECTION, PREFERENCES_FILE,
    PREFERENCE_SECTION, PROFILE_FILE, PROFILE_SECTION,
};
use profilekit_core::{default_profile_path, machine_settings_path, preferences_path};
use profilekit_settings::{MachineNameFixup, Registry, Setting};
use tracing::{debug, info, warn};

use crate::error::{StorageError, StorageResult};
use crate::ini::IniDocument;

/// Whether a profile file holds only the current instance or every instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// One `[profile]` section for the current instance
    #[default]
    Single,
    /// `[profile_0]`, `[profile_1]`, ... one per known machine
    AllInstances,
}

/// Read a settings file for loading. A missing file reads as an empty
/// document; an unreadable or unparsable one yields `None` so the caller keeps
/// its current state.
fn read_document(path: &Path) -> Option<IniDocument> {
    match IniDocument::load(path) {
        Ok(document) => Some(document),
        Err(StorageError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No settings file at {:?}", path);
            Some(IniDocument::new())
        }
        Err(e) => {
            warn!("Ignoring settings file {:?}: {}", path, e);
            None
        }
    }
}

fn write_document(document: &IniDocument, path: &Path) -> StorageResult<()> {
    fs::write(path, document.to_string())?;
    info!("Saved settings to {:?}", path);
    Ok(())
}

/// Copy every option of `section` that names a setting accepted by `include`
/// into the registry. `index` selects the instance slot; `None` uses the slot
/// the setting's category implies for the current instance.
fn apply_section(
    registry: &mut Registry,
    document: &IniDocument,
    section: &str,
    index: Option<usize>,
    include: impl Fn(&Setting) -> bool,
) -> usize {
    let current = registry.current_index();
    let names: Vec<String> = registry
        .iter()
        .filter(|s| include(*s))
        .map(|s| s.name().to_string())
        .collect();

    let mut applied = 0;
    for name in names {
        let Some(value) = document.get(section, &name) else {
            continue;
        };
        if let Some(setting) = registry.setting_mut(&name) {
            let slot = index.unwrap_or_else(|| setting.index_for(current));
            setting.set_value_at(slot, value);
            applied += 1;
        }
    }
    applied
}

/// Load a profile file into the registry.
///
/// Every non-preference setting found in the file is applied; machine
/// settings included.
pub fn load_profile(registry: &mut Registry, path: &Path, layout: Layout) {
    let Some(document) = read_document(path) else {
        return;
    };

    match layout {
        Layout::Single => {
            let applied = apply_section(registry, &document, PROFILE_SECTION, None, |s| {
                !s.is_preference()
            });
            debug!("Loaded {} profile values from {:?}", applied, path);
        }
        Layout::AllInstances => {
            let mut n = 0;
            while document.has_section(&profile_section(n)) {
                apply_section(registry, &document, &profile_section(n), Some(n), |s| {
                    !s.is_preference()
                });
                n += 1;
            }
            debug!("Loaded {} profiles from {:?}", n, path);
        }
    }
}

/// Save the profile. `Single` writes every non-preference setting of the
/// current instance; `AllInstances` writes the profile settings of each known
/// machine into its own numbered section.
pub fn save_profile(registry: &Registry, path: &Path, layout: Layout) -> StorageResult<()> {
    let mut document = IniDocument::new();

    match layout {
        Layout::Single => {
            let current = registry.current_index();
            document.add_section(PROFILE_SECTION);
            for setting in registry.iter().filter(|s| !s.is_preference()) {
                document.set(
                    PROFILE_SECTION,
                    setting.name(),
                    setting.value_at(setting.index_for(current)),
                );
            }
        }
        Layout::AllInstances => {
            for n in 0..registry.machine_count() {
                let section = profile_section(n);
                document.add_section(&section);
                for setting in registry.iter().filter(|s| s.is_profile()) {
                    document.set(&section, setting.name(), setting.value_at(n));
                }
            }
        }
    }

    write_document(&document, path)
}

/// Load preferences plus the `[machine_N]` sections of every known machine
pub fn load_preferences(registry: &mut Registry, path: &Path) {
    let Some(document) = read_document(path) else {
        return;
    };

    apply_section(registry, &document, PREFERENCE_SECTION, None, |s| {
        s.is_preference()
    });

    let mut n = 0;
    while document.has_section(&machine_section(n)) {
        apply_section(registry, &document, &machine_section(n), Some(n), |s| {
            s.is_machine_setting()
        });
        n += 1;
    }
    debug!("Loaded preferences and {} machines from {:?}", n, path);
}

/// Save preferences, then one `[machine_N]` section per machine up to the
/// first slot without a name.
pub fn save_preferences(registry: &Registry, path: &Path) -> StorageResult<()> {
    let mut document = IniDocument::new();

    document.add_section(PREFERENCE_SECTION);
    for setting in registry.iter().filter(|s| s.is_preference()) {
        document.set(PREFERENCE_SECTION, setting.name(), setting.value_at(0));
    }

    for n in 0..registry.named_machines() {
        let section = machine_section(n);
        document.add_section(&section);
        for setting in registry.iter().filter(|s| s.is_machine_setting()) {
            document.set(&section, setting.name(), setting.value_at(n));
        }
    }

    write_document(&document, path)
}

/// Load a single-machine `[machine]` file into the current machine slot, then
/// run `fixup` so the machine name stays consistent.
pub fn load_machine_settings(registry: &mut Registry, path: &Path, fixup: &dyn MachineNameFixup) {
    let Some(document) = read_document(path) else {
        return;
    };

    let applied = apply_section(registry, &document, MACHINE_SECTION, None, |s| {
        s.is_machine_setting()
    });
    debug!("Loaded {} machine values from {:?}", applied, path);
    fixup.fix_up(registry);
}

/// Reset every profile setting of the current instance to its default
pub fn reset_profile(registry: &mut Registry) {
    registry.reset_profile();
}

/// The three settings files of one installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsStore {
    profile_path: PathBuf,
    preferences_path: PathBuf,
    machine_path: PathBuf,
}

impl Default for SettingsStore {
    /// Files under the resolved base directory
    fn default() -> Self {
        Self {
            profile_path: default_profile_path(),
            preferences_path: preferences_path(),
            machine_path: machine_settings_path(),
        }
    }
}

impl SettingsStore {
    /// Files under `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            profile_path: dir.join(PROFILE_FILE),
            preferences_path: dir.join(PREFERENCES_FILE),
            machine_path: dir.join(MACHINE_FILE),
        }
    }

    pub fn profile_path(&self) -> &Path {
        &self.profile_path
    }

    pub fn preferences_path(&self) -> &Path {
        &self.preferences_path
    }

    pub fn machine_path(&self) -> &Path {
        &self.machine_path
    }

    /// Start-up load: preferences (and machines) first, then the current profile
    pub fn load(&self, registry: &mut Registry) {
        load_preferences(registry, &self.preferences_path);
        load_profile(registry, &self.profile_path, Layout::Single);
    }

    pub fn save(&self, registry: &Registry) -> StorageResult<()> {
        self.ensure_parent(&self.preferences_path)?;
        save_preferences(registry, &self.preferences_path)?;
        self.ensure_parent(&self.profile_path)?;
        save_profile(registry, &self.profile_path, Layout::Single)
    }

    pub fn save_profile(&self, registry: &Registry) -> StorageResult<()> {
        self.ensure_parent(&self.profile_path)?;
        save_profile(registry, &self.profile_path, Layout::Single)
    }

    pub fn save_preferences(&self, registry: &Registry) -> StorageResult<()> {
        self.ensure_parent(&self.preferences_path)?;
        save_preferences(registry, &self.preferences_path)
    }

    pub fn load_machine(&self, registry: &mut Registry, fixup: &dyn MachineNameFixup) {
        load_machine_settings(registry, &self.machine_path, fixup);
    }

    /// Write a preference and persist the preferences file. Returns `false`
    /// (and writes nothing) when `name` is not a preference.
    pub fn put_preference(
        &self,
        registry: &mut Registry,
        name: &str,
        value: impl ToString,
    ) -> StorageResult<bool> {
        if !registry.put_preference(name, value) {
            return Ok(false);
        }
        self.save_preferences(registry)?;
        Ok(true)
    }

    /// Write a machine setting of the current machine and persist the
    /// preferences file, which is where machines live.
    pub fn put_machine_setting(
        &self,
        registry: &mut Registry,
        name: &str,
        value: impl ToString,
    ) -> StorageResult<bool> {
        if !registry.put_machine_setting(name, value) {
            return Ok(false);
        }
        self.save_preferences(registry)?;
        Ok(true)
    }

    fn ensure_parent(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
