// ABOUTME: Ordered registry owning every setting definition
// ABOUTME: Name lookup, current instance index and category/subcategory queries

use std::collections::HashMap;

use profilekit_config::MAX_MACHINES;
use tracing::debug;

use crate::error::{SettingsError, SettingsResult};
use crate::setting::Setting;
use crate::validation::Validation;

/// Every known setting in declaration order, plus the instance index that
/// unqualified reads and writes of machine/profile settings use.
#[derive(Debug, Default)]
pub struct Registry {
    settings: Vec<Setting>,
    index: HashMap<String, usize>,
    current_index: usize,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in declarations
    pub fn with_defaults() -> SettingsResult<Self> {
        let mut registry = Self::new();
        crate::defaults::register_defaults(&mut registry)?;
        Ok(registry)
    }

    /// Append a setting. Names are unique; a second registration of the same
    /// name is rejected and leaves the registry unchanged.
    pub fn register(&mut self, setting: Setting) -> SettingsResult<&mut Setting> {
        if self.index.contains_key(setting.name()) {
            return Err(SettingsError::DuplicateName(setting.name().to_string()));
        }

        let position = self.settings.len();
        debug!("Registering setting {} ({})", setting.name(), setting.category());
        self.index.insert(setting.name().to_string(), position);
        self.settings.push(setting);
        Ok(&mut self.settings[position])
    }

    pub fn setting(&self, name: &str) -> Option<&Setting> {
        self.index.get(name).map(|&i| &self.settings[i])
    }

    pub fn setting_mut(&mut self, name: &str) -> Option<&mut Setting> {
        let i = *self.index.get(name)?;
        Some(&mut self.settings[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Settings in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Setting> {
        self.settings.iter()
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Indices at or above `MAX_MACHINES` are rejected and leave the current
    /// index unchanged.
    pub fn set_current_index(&mut self, index: usize) -> SettingsResult<()> {
        if index >= MAX_MACHINES {
            return Err(SettingsError::MachineOutOfRange(index));
        }
        self.current_index = index;
        Ok(())
    }

    /// Value of `name` at the index its category uses for the current instance
    pub fn value(&self, name: &str) -> Option<&str> {
        let setting = self.setting(name)?;
        Some(setting.value_at(setting.index_for(self.current_index)))
    }

    pub fn set_value(&mut self, name: &str, value: impl ToString) -> SettingsResult<()> {
        let current = self.current_index;
        let setting = self
            .setting_mut(name)
            .ok_or_else(|| SettingsError::UnknownSetting(name.to_string()))?;
        let index = setting.index_for(current);
        setting.set_value_at(index, value);
        Ok(())
    }

    pub fn validate(&self, name: &str) -> Option<Validation> {
        self.setting(name).map(|s| s.validate(self.current_index))
    }

    /// Whether every condition of `name` currently holds
    pub fn is_active(&self, name: &str) -> bool {
        self.setting(name).is_some_and(|s| s.check_conditions(self))
    }

    /// Distinct subcategories of active settings in `category`, first-seen order
    pub fn subcategories_for(&self, category: &str) -> Vec<&str> {
        let mut found: Vec<&str> = Vec::new();
        for setting in self.active_in(category) {
            if !found.contains(&setting.subcategory()) {
                found.push(setting.subcategory());
            }
        }
        found
    }

    /// Active settings in `category`, optionally narrowed to one subcategory
    pub fn settings_for(&self, category: &str, subcategory: Option<&str>) -> Vec<&Setting> {
        self.active_in(category)
            .filter(|s| subcategory.map_or(true, |sub| s.subcategory() == sub))
            .collect()
    }

    fn active_in<'a: 'c, 'c>(
        &'a self,
        category: &'c str,
    ) -> impl Iterator<Item = &'a Setting> + 'c {
        self.settings
            .iter()
            .filter(move |s| s.category().as_str() == category && s.check_conditions(self))
    }

    /// Put every profile setting of the current instance back to its default.
    /// Preferences and machine settings are left alone.
    pub fn reset_profile(&mut self) {
        let current = self.current_index;
        for setting in self.settings.iter_mut().filter(|s| s.is_profile()) {
            let default = setting.default_value().to_string();
            setting.set_value_at(current, default);
        }
        debug!("Reset profile {} to defaults", current);
    }
}
