// ABOUTME: A single named, typed, categorized setting with per-instance values
// ABOUTME: Values are stored as strings; reads past the stored length fall back to the default

use crate::condition::Condition;
use crate::registry::Registry;
use crate::types::{Category, ValueType};
use crate::validation::{NumericRange, Validation, Validator};

/// Localization capability for labels and tooltips
pub trait Translate {
    fn translate(&self, text: &str) -> String;
}

/// Returns text unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl Translate for Identity {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

#[derive(Debug)]
pub struct Setting {
    name: String,
    label: String,
    tooltip: String,
    value_type: ValueType,
    category: Category,
    subcategory: String,
    default: String,
    values: Vec<String>,
    validators: Vec<Box<dyn Validator>>,
    conditions: Vec<Condition>,
}

impl Setting {
    /// Create a setting. Float and int settings get a numeric validator so
    /// `set_range` has something to configure.
    pub fn new(
        name: impl Into<String>,
        default: impl ToString,
        value_type: ValueType,
        category: impl Into<Category>,
        subcategory: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let validators: Vec<Box<dyn Validator>> = match value_type {
            ValueType::Float => vec![Box::new(NumericRange::float())],
            ValueType::Int => vec![Box::new(NumericRange::int())],
            ValueType::Str => Vec::new(),
        };

        Self {
            label: name.clone(),
            name,
            tooltip: String::new(),
            value_type,
            category: category.into(),
            subcategory: subcategory.into(),
            default: default.to_string(),
            values: Vec::new(),
            validators,
            conditions: Vec::new(),
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>, tooltip: impl Into<String>) -> &mut Self {
        self.label = label.into();
        self.tooltip = tooltip.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>, tooltip: impl Into<String>) -> Self {
        self.set_label(label, tooltip);
        self
    }

    /// Configure the bounds of the first validator; no-op when there is none.
    pub fn set_range(&mut self, min: Option<f64>, max: Option<f64>) -> &mut Self {
        if let Some(validator) = self.validators.first_mut() {
            validator.set_bounds(min, max);
        }
        self
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.set_range(min, max);
        self
    }

    pub fn add_validator(&mut self, validator: Box<dyn Validator>) -> &mut Self {
        self.validators.push(validator);
        self
    }

    pub fn add_condition(&mut self, condition: Condition) -> &mut Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.add_condition(condition);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    pub fn translated_label(&self, translator: &dyn Translate) -> String {
        translator.translate(&self.label)
    }

    pub fn translated_tooltip(&self, translator: &dyn Translate) -> String {
        translator.translate(&self.tooltip)
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn subcategory(&self) -> &str {
        &self.subcategory
    }

    pub fn default_value(&self) -> &str {
        &self.default
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_preference(&self) -> bool {
        self.category.is_preference()
    }

    pub fn is_machine_setting(&self) -> bool {
        self.category.is_machine()
    }

    pub fn is_profile(&self) -> bool {
        self.category.is_profile()
    }

    /// Instance index used for a read/write given the registry's current index.
    /// Preferences are singletons and always live at index 0.
    pub fn index_for(&self, current: usize) -> usize {
        if self.is_preference() {
            0
        } else {
            current
        }
    }

    /// Number of instance slots that hold an explicitly stored value
    pub fn stored_len(&self) -> usize {
        self.values.len()
    }

    pub fn value_at(&self, index: usize) -> &str {
        self.values
            .get(index)
            .map(String::as_str)
            .unwrap_or(&self.default)
    }

    /// Store `value` at `index`, padding any skipped slots with the default
    pub fn set_value_at(&mut self, index: usize, value: impl ToString) {
        while self.values.len() <= index {
            self.values.push(self.default.clone());
        }
        self.values[index] = value.to_string();
    }

    pub fn as_float(&self, index: usize) -> Option<f64> {
        parse_float(self.value_at(index))
    }

    pub fn as_int(&self, index: usize) -> Option<i64> {
        self.value_at(index).trim().parse().ok()
    }

    /// Run every validator against the value used at `current`.
    pub fn validate(&self, current: usize) -> Validation {
        let value = self.value_at(self.index_for(current));
        Validation::aggregate(self.validators.iter().map(|v| v.validate(value)))
    }

    pub fn check_conditions(&self, registry: &Registry) -> bool {
        self.conditions.iter().all(|c| c.evaluate(registry))
    }
}

/// Lenient float parse: surrounding whitespace is ignored and a comma is
/// accepted as the decimal separator.
pub(crate) fn parse_float(text: &str) -> Option<f64> {
    text.trim().replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationOutcome;
    use pretty_assertions::assert_eq;

    fn step_degrees() -> Setting {
        Setting::new("step_degrees", 0.45, ValueType::Float, "basic", "Step Degrees")
            .with_range(Some(0.1125), None)
    }

    #[test]
    fn test_new_reads_default() {
        let setting = step_degrees();
        assert_eq!(setting.value_at(0), "0.45");
        assert_eq!(setting.value_at(7), "0.45");
        assert_eq!(setting.stored_len(), 0);
        assert_eq!(setting.label(), "step_degrees");
        assert_eq!(setting.tooltip(), "");
    }

    #[test]
    fn test_set_value_pads_with_default() {
        let mut setting = step_degrees();
        setting.set_value_at(3, 0.9);

        assert_eq!(setting.stored_len(), 4);
        assert_eq!(setting.value_at(0), "0.45");
        assert_eq!(setting.value_at(1), "0.45");
        assert_eq!(setting.value_at(2), "0.45");
        assert_eq!(setting.value_at(3), "0.9");
    }

    #[test]
    fn test_set_value_overwrites_in_place() {
        let mut setting = step_degrees();
        setting.set_value_at(1, "0.5");
        setting.set_value_at(0, "0.6");
        assert_eq!(setting.stored_len(), 2);
        assert_eq!(setting.value_at(0), "0.6");
        assert_eq!(setting.value_at(1), "0.5");
    }

    #[test]
    fn test_validate_step_degrees() {
        let mut setting = step_degrees();

        setting.set_value_at(0, "0.9");
        assert_eq!(setting.validate(0).outcome, ValidationOutcome::Success);

        setting.set_value_at(0, "0.01");
        let result = setting.validate(0);
        assert_eq!(result.outcome, ValidationOutcome::Error);
        assert_eq!(result.message, "Should not be below 0.1125");
        // validation never reverts the write
        assert_eq!(setting.value_at(0), "0.01");
    }

    /// Warns about steps coarser than one degree
    #[derive(Debug)]
    struct CoarseStep;

    impl Validator for CoarseStep {
        fn validate(&self, value: &str) -> Validation {
            match parse_float(value) {
                Some(v) if v > 1.0 => Validation::warning("Coarse steps lose detail"),
                _ => Validation::success(),
            }
        }
    }

    #[test]
    fn test_added_validator_is_aggregated() {
        let mut setting = step_degrees();
        setting.add_validator(Box::new(CoarseStep));

        setting.set_value_at(0, "0.9");
        assert!(setting.validate(0).is_success());

        setting.set_value_at(0, "1.8");
        let result = setting.validate(0);
        assert_eq!(result.outcome, ValidationOutcome::Warning);
        assert_eq!(result.message, "Coarse steps lose detail");

        setting.set_value_at(0, "abc");
        let result = setting.validate(0);
        assert_eq!(result.outcome, ValidationOutcome::Error);
        assert_eq!(result.message, "\"abc\" is not a valid number");
    }

    #[test]
    fn test_added_validator_keeps_range_first() {
        let mut setting = Setting::new("step_delay", 800, ValueType::Int, "basic", "Step Delay");
        setting.add_validator(Box::new(CoarseStep));
        // bounds go to the auto-attached numeric validator, not the added one
        setting.set_range(Some(100.0), None);

        setting.set_value_at(0, "50");
        let result = setting.validate(0);
        assert_eq!(result.outcome, ValidationOutcome::Error);
        assert_eq!(result.message, "Should not be below 100\nCoarse steps lose detail");
    }

    #[test]
    fn test_set_range_without_validator_is_noop() {
        let mut setting = Setting::new("language", "English", ValueType::Str, "preference", "hidden");
        setting.set_range(Some(1.0), Some(2.0));
        assert!(setting.validate(0).is_success());
    }

    #[test]
    fn test_preference_index_is_always_zero() {
        let preference = Setting::new("language", "English", ValueType::Str, "preference", "hidden");
        let machine = Setting::new("machine_name", "", ValueType::Str, "machine", "hidden");
        assert_eq!(preference.index_for(3), 0);
        assert_eq!(machine.index_for(3), 3);
        assert_eq!(step_degrees().index_for(2), 2);
    }

    #[test]
    fn test_typed_accessors() {
        let mut setting = Setting::new("step_delay", 800, ValueType::Int, "basic", "Step Delay");
        assert_eq!(setting.as_int(0), Some(800));
        assert_eq!(setting.as_float(0), Some(800.0));

        setting.set_value_at(0, "fast");
        assert_eq!(setting.as_int(0), None);
        assert_eq!(setting.as_float(0), None);
    }

    #[test]
    fn test_parse_float_accepts_comma() {
        assert_eq!(parse_float("0,5"), Some(0.5));
        assert_eq!(parse_float(" 2 "), Some(2.0));
        assert_eq!(parse_float("NaN"), None);
        assert_eq!(parse_float(""), None);
    }

    #[test]
    fn test_translated_label() {
        struct Shout;
        impl Translate for Shout {
            fn translate(&self, text: &str) -> String {
                text.to_uppercase()
            }
        }

        let setting = Setting::new("language", "English", ValueType::Str, "preference", "hidden")
            .with_label("Language", "Restart required");
        assert_eq!(setting.translated_label(&Identity), "Language");
        assert_eq!(setting.translated_label(&Shout), "LANGUAGE");
        assert_eq!(setting.translated_tooltip(&Shout), "RESTART REQUIRED");
    }
}
