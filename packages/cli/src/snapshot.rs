// ABOUTME: Serializable view of one setting for `show --json`
// ABOUTME: Captures the value of the current instance alongside its declaration

use profilekit_settings::{Category, Registry, Setting, ValidationOutcome, ValueType};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingSnapshot {
    pub name: String,
    pub label: String,
    pub category: Category,
    pub subcategory: String,
    pub value_type: ValueType,
    pub value: String,
    pub default: String,
    pub active: bool,
    pub validation: ValidationOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SettingSnapshot {
    pub fn capture(registry: &Registry, setting: &Setting) -> Self {
        let current = registry.current_index();
        let validation = setting.validate(current);
        Self {
            name: setting.name().to_string(),
            label: setting.label().to_string(),
            category: setting.category().clone(),
            subcategory: setting.subcategory().to_string(),
            value_type: setting.value_type(),
            value: setting.value_at(setting.index_for(current)).to_string(),
            default: setting.default_value().to_string(),
            active: setting.check_conditions(registry),
            message: (!validation.message.is_empty()).then_some(validation.message),
            validation: validation.outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_snapshot_json_shape() {
        let mut registry = Registry::with_defaults().unwrap();
        registry.set_value("step_delay", 50).unwrap();

        let setting = registry.setting("step_delay").unwrap();
        let snapshot = SettingSnapshot::capture(&registry, setting);

        assert_eq!(
            serde_json::to_value(&snapshot).unwrap(),
            json!({
                "name": "step_delay",
                "label": "step_delay",
                "category": "basic",
                "subcategory": "Step Delay",
                "value_type": "int",
                "value": "50",
                "default": "800",
                "active": true,
                "validation": "error",
                "message": "Should not be below 100"
            })
        );
    }

    #[test]
    fn test_snapshot_omits_empty_message() {
        let registry = Registry::with_defaults().unwrap();
        let snapshot = SettingSnapshot::capture(&registry, registry.setting("language").unwrap());
        assert_eq!(snapshot.message, None);
        assert_eq!(snapshot.category, Category::Preference);
        assert_eq!(snapshot.value, "English");
    }
}
