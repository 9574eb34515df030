// ABOUTME: Built-in setting declarations
// ABOUTME: Registered once at process start on a fresh registry

use profilekit_config::MACHINE_NAME;

use crate::error::SettingsResult;
use crate::registry::Registry;
use crate::setting::Setting;
use crate::types::ValueType;

pub fn register_defaults(registry: &mut Registry) -> SettingsResult<()> {
    // Scan
    registry.register(
        Setting::new("step_degrees", 0.45, ValueType::Float, "basic", "Step Degrees")
            .with_range(Some(0.1125), None),
    )?;
    registry.register(
        Setting::new("step_delay", 800, ValueType::Int, "basic", "Step Delay")
            .with_range(Some(100.0), Some(10000.0)),
    )?;

    // Machine
    registry.register(Setting::new(MACHINE_NAME, "", ValueType::Str, "machine", "hidden"))?;

    // Application
    registry.register(
        Setting::new("language", "English", ValueType::Str, "preference", "hidden").with_label(
            "Language",
            "Change the language the application runs in. Switching language requires a restart",
        ),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationOutcome;

    #[test]
    fn test_defaults_register_once() {
        let mut registry = Registry::new();
        register_defaults(&mut registry).unwrap();
        assert_eq!(registry.len(), 4);
        assert!(register_defaults(&mut registry).is_err());
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_step_degrees_range() {
        let mut registry = Registry::with_defaults().unwrap();

        registry.set_value("step_degrees", "0.9").unwrap();
        assert_eq!(
            registry.validate("step_degrees").unwrap().outcome,
            ValidationOutcome::Success
        );

        registry.set_value("step_degrees", "0.01").unwrap();
        assert_eq!(
            registry.validate("step_degrees").unwrap().outcome,
            ValidationOutcome::Error
        );
    }

    #[test]
    fn test_language_label() {
        let registry = Registry::with_defaults().unwrap();
        let language = registry.setting("language").unwrap();
        assert_eq!(language.label(), "Language");
        assert!(language.tooltip().contains("restart"));
    }
}
