// ABOUTME: Namespaced getters and setters for profile, preference and machine settings
// ABOUTME: Unknown or miscategorized names degrade to an empty string plus a diagnostic

use std::backtrace::Backtrace;

use tracing::{error, warn};

use crate::registry::Registry;
use crate::setting::{parse_float, Setting};

#[derive(Debug, Clone, Copy)]
enum Namespace {
    Profile,
    Preference,
    Machine,
}

impl Namespace {
    fn contains(self, setting: &Setting) -> bool {
        match self {
            Namespace::Profile => setting.is_profile(),
            Namespace::Preference => setting.is_preference(),
            Namespace::Machine => setting.is_machine_setting(),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Namespace::Profile => "profile settings",
            Namespace::Preference => "preferences",
            Namespace::Machine => "machine settings",
        }
    }
}

impl Registry {
    fn lookup(&self, name: &str, namespace: Namespace) -> Option<&Setting> {
        self.setting(name).filter(|s| namespace.contains(s))
    }

    fn get_in(&self, name: &str, namespace: Namespace, index: Option<usize>) -> String {
        match self.lookup(name, namespace) {
            Some(setting) => {
                let index = index.unwrap_or_else(|| setting.index_for(self.current_index()));
                setting.value_at(index).to_string()
            }
            None => {
                error!(
                    setting = name,
                    backtrace = %Backtrace::capture(),
                    "\"{}\" not found in {}",
                    name,
                    namespace.describe()
                );
                String::new()
            }
        }
    }

    fn put_in(&mut self, name: &str, namespace: Namespace, value: impl ToString) -> bool {
        if self.lookup(name, namespace).is_none() {
            warn!("Ignoring write to \"{}\": not found in {}", name, namespace.describe());
            return false;
        }
        self.set_value(name, value).is_ok()
    }

    /// Profile setting value at the current instance, or "" if unknown
    pub fn profile_setting(&self, name: &str) -> String {
        self.get_in(name, Namespace::Profile, None)
    }

    /// Profile setting as a float; any parse failure yields 0.0
    pub fn profile_setting_float(&self, name: &str) -> f64 {
        parse_float(&self.profile_setting(name)).unwrap_or(0.0)
    }

    /// Profile setting as an integer; any parse failure yields 0
    pub fn profile_setting_int(&self, name: &str) -> i64 {
        self.profile_setting(name).trim().parse().unwrap_or(0)
    }

    pub fn put_profile_setting(&mut self, name: &str, value: impl ToString) -> bool {
        self.put_in(name, Namespace::Profile, value)
    }

    pub fn is_profile_setting(&self, name: &str) -> bool {
        self.lookup(name, Namespace::Profile).is_some()
    }

    pub fn preference(&self, name: &str) -> String {
        self.get_in(name, Namespace::Preference, None)
    }

    pub fn preference_float(&self, name: &str) -> f64 {
        parse_float(&self.preference(name)).unwrap_or(0.0)
    }

    /// Preference stored as `#RRGGBB`, as normalized RGBA with full alpha
    pub fn preference_colour(&self, name: &str) -> Option<[f32; 4]> {
        let text = self.preference(name);
        let hex = text.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        Some([channel(0..2)?, channel(2..4)?, channel(4..6)?, 1.0])
    }

    pub fn put_preference(&mut self, name: &str, value: impl ToString) -> bool {
        self.put_in(name, Namespace::Preference, value)
    }

    pub fn is_preference(&self, name: &str) -> bool {
        self.lookup(name, Namespace::Preference).is_some()
    }

    /// Machine setting at `index`, or at the current machine when `None`
    pub fn machine_setting(&self, name: &str, index: Option<usize>) -> String {
        self.get_in(name, Namespace::Machine, index)
    }

    pub fn machine_setting_float(&self, name: &str, index: Option<usize>) -> f64 {
        parse_float(&self.machine_setting(name, index)).unwrap_or(0.0)
    }

    pub fn put_machine_setting(&mut self, name: &str, value: impl ToString) -> bool {
        self.put_in(name, Namespace::Machine, value)
    }

    pub fn is_machine_setting(&self, name: &str) -> bool {
        self.lookup(name, Namespace::Machine).is_some()
    }
}
