// ABOUTME: Multi-machine helpers on the registry
// ABOUTME: Machine counting, active machine selection and the post-load name fix-up

use profilekit_config::{DEFAULT_MACHINE_NAME, MACHINE_NAME};
use tracing::{debug, info};

use crate::error::SettingsResult;
use crate::registry::Registry;

impl Registry {
    /// Number of consecutive machine slots, starting at 0, that carry a
    /// non-empty `machine_name`. May be zero.
    pub fn named_machines(&self) -> usize {
        let Some(setting) = self.setting(MACHINE_NAME) else {
            return 0;
        };
        let bound = setting.stored_len().max(1);
        (0..bound)
            .take_while(|&n| !setting.value_at(n).is_empty())
            .count()
    }

    /// Number of known machines; there is always at least one.
    pub fn machine_count(&self) -> usize {
        self.named_machines().max(1)
    }

    /// Make `index` the machine that unqualified machine/profile reads and
    /// writes refer to.
    pub fn select_machine(&mut self, index: usize) -> SettingsResult<()> {
        self.set_current_index(index)?;
        info!("Selecting machine {}", index);
        Ok(())
    }
}

/// Consistency step run after machine settings are loaded from a file
pub trait MachineNameFixup {
    fn fix_up(&self, registry: &mut Registry);
}

/// Gives the current machine a name that no other known machine uses.
///
/// An empty name becomes `DEFAULT_MACHINE_NAME`; a taken name gets a
/// ` (2)`, ` (3)`, ... suffix.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniqueMachineName;

impl MachineNameFixup for UniqueMachineName {
    fn fix_up(&self, registry: &mut Registry) {
        let current = registry.current_index();
        let Some(setting) = registry.setting(MACHINE_NAME) else {
            debug!("No {} setting registered, skipping fix-up", MACHINE_NAME);
            return;
        };

        let original = setting.value_at(current).to_string();
        let others: Vec<String> = (0..registry.machine_count().max(current.saturating_add(1)))
            .filter(|&n| n != current)
            .map(|n| setting.value_at(n).to_string())
            .filter(|name| !name.is_empty())
            .collect();

        let base = if original.is_empty() {
            DEFAULT_MACHINE_NAME.to_string()
        } else {
            original.clone()
        };
        let mut candidate = base.clone();
        let mut suffix = 2;
        while others.contains(&candidate) {
            candidate = format!("{} ({})", base, suffix);
            suffix += 1;
        }

        if candidate != original {
            info!("Renaming machine {} from {:?} to {:?}", current, original, candidate);
            // MACHINE_NAME is known to exist at this point
            let _ = registry.set_value(MACHINE_NAME, candidate);
        }
    }
}
