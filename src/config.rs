use crate::classify::{Constraints, DisabledDates};
use crate::date::Date;
use crate::preset::{Preset, PresetRegistry};
use crate::selection::{CalendarMode, CalendarValue, DateRange};
use crate::view::ViewMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("preset {id:?} declared more than once")]
    DuplicatePreset { id: String },
    #[error("default value does not match mode {mode:?}")]
    ValueMode { mode: CalendarMode },
    #[error("min_date {min} is after max_date {max}")]
    InvertedBounds { min: Date, max: Date },
}

// ── Declarative pieces ────────────────────────────────────────────────────────

/// Serializable preset shapes, compiled to resolvers. Arbitrary resolver
/// closures stay a code-level concern ([`Preset::new`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PresetKind {
    Today,
    Yesterday,
    LastDays { days: u32 },
    MonthToDate,
    ThisMonth,
    LastMonth,
    Fixed { start: Date, end: Date },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetDef {
    pub id: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: PresetKind,
}

impl PresetDef {
    pub fn build(&self) -> Preset {
        let (id, label) = (self.id.clone(), self.label.clone());
        match self.kind {
            PresetKind::Today => Preset::today(id, label),
            PresetKind::Yesterday => Preset::yesterday(id, label),
            PresetKind::LastDays { days } => Preset::last_days(id, label, days),
            PresetKind::MonthToDate => Preset::month_to_date(id, label),
            PresetKind::ThisMonth => Preset::this_month(id, label),
            PresetKind::LastMonth => Preset::last_month(id, label),
            PresetKind::Fixed { start, end } => Preset::fixed(id, label, start, end),
        }
    }
}

/// Default-value shape: a bare ISO date in single mode, a start/end mapping in
/// range mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueDef {
    Single(Date),
    Range {
        start: Option<Date>,
        end: Option<Date>,
    },
}

// ── CalendarConfig ────────────────────────────────────────────────────────────

/// Declarative calendar setup, loadable from YAML or JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub mode: CalendarMode,
    pub view: ViewMode,
    pub min_date: Option<Date>,
    pub max_date: Option<Date>,
    pub disabled_dates: Vec<Date>,
    pub presets: Vec<PresetDef>,
    pub default_value: Option<ValueDef>,
}

impl CalendarConfig {
    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let (Some(min), Some(max)) = (self.min_date, self.max_date) {
            if min > max {
                return Err(ConfigError::InvertedBounds { min, max });
            }
        }
        let mut seen = std::collections::HashSet::new();
        for preset in &self.presets {
            if !seen.insert(preset.id.as_str()) {
                return Err(ConfigError::DuplicatePreset {
                    id: preset.id.clone(),
                });
            }
        }
        if let Some(value) = &self.default_value {
            self.coerce_value(value)?;
        }
        Ok(())
    }

    pub fn constraints(&self) -> Constraints {
        Constraints {
            min_date: self.min_date,
            max_date: self.max_date,
            disabled: if self.disabled_dates.is_empty() {
                DisabledDates::None
            } else {
                DisabledDates::from_dates(self.disabled_dates.iter().copied())
            },
        }
    }

    pub fn preset_registry(&self) -> PresetRegistry {
        let mut registry = PresetRegistry::new();
        for def in &self.presets {
            registry.insert(def.build());
        }
        registry
    }

    pub fn initial_value(&self) -> Result<Option<CalendarValue>, ConfigError> {
        self.default_value
            .as_ref()
            .map(|value| self.coerce_value(value))
            .transpose()
    }

    fn coerce_value(&self, value: &ValueDef) -> Result<CalendarValue, ConfigError> {
        match (self.mode, value) {
            (CalendarMode::Single, ValueDef::Single(date)) => {
                Ok(CalendarValue::Single(Some(*date)))
            }
            (CalendarMode::Range, ValueDef::Range { start, end }) => {
                let range = match (*start, *end) {
                    // Sorted on the way in, same as click completion.
                    (Some(a), Some(b)) => DateRange::sorted(a, b),
                    (start, end) => DateRange { start, end },
                };
                Ok(CalendarValue::Range(range))
            }
            (mode, _) => Err(ConfigError::ValueMode { mode }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u8, day: u8) -> Date {
        Date { year, month, day }
    }

    const YAML: &str = "\
mode: range
view: dual-month
min_date: 2024-01-01
max_date: 2024-12-31
disabled_dates:
  - 2024-03-08
presets:
  - id: last-7
    label: Last 7 days
    kind: last-days
    days: 7
  - id: q1
    label: Q1 2024
    kind: fixed
    start: 2024-01-01
    end: 2024-03-31
default_value:
  start: 2024-03-10
  end: 2024-03-05
";

    #[test]
    fn yaml_config_decodes_and_compiles() {
        let config = CalendarConfig::from_yaml_str(YAML).expect("config should parse");
        assert_eq!(config.mode, CalendarMode::Range);
        assert_eq!(config.view, ViewMode::DualMonth);
        assert_eq!(config.min_date, Some(d(2024, 1, 1)));

        let constraints = config.constraints();
        assert!(!constraints.allows(d(2024, 3, 8)));
        assert!(!constraints.allows(d(2023, 12, 31)));
        assert!(constraints.allows(d(2024, 3, 9)));

        let registry = config.preset_registry();
        assert_eq!(registry.len(), 2);
        let q1 = registry.get("q1").expect("q1 preset");
        assert_eq!(
            q1.resolve(d(2024, 6, 1)),
            DateRange::sorted(d(2024, 1, 1), d(2024, 3, 31))
        );

        // Inverted default range comes back sorted.
        let value = config.initial_value().expect("valid value").expect("set");
        assert_eq!(
            value,
            CalendarValue::Range(DateRange::sorted(d(2024, 3, 5), d(2024, 3, 10)))
        );
    }

    #[test]
    fn json_config_decodes_too() {
        let json = r#"{
            "mode": "single",
            "default_value": "2024-03-05",
            "presets": [
                {"id": "t", "label": "Today", "kind": "today"}
            ]
        }"#;
        let config = CalendarConfig::from_json_str(json).expect("config should parse");
        assert_eq!(config.mode, CalendarMode::Single);
        assert_eq!(
            config.initial_value().expect("valid"),
            Some(CalendarValue::Single(Some(d(2024, 3, 5))))
        );
    }

    #[test]
    fn duplicate_preset_ids_are_rejected() {
        let yaml = "\
presets:
  - id: t
    label: Today
    kind: today
  - id: t
    label: Also today
    kind: today
";
        assert!(matches!(
            CalendarConfig::from_yaml_str(yaml),
            Err(ConfigError::DuplicatePreset { id }) if id == "t"
        ));
    }

    #[test]
    fn mode_mismatched_default_value_is_rejected() {
        let yaml = "\
mode: single
default_value:
  start: 2024-03-05
  end: 2024-03-10
";
        assert!(matches!(
            CalendarConfig::from_yaml_str(yaml),
            Err(ConfigError::ValueMode {
                mode: CalendarMode::Single
            })
        ));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let yaml = "\
min_date: 2024-12-31
max_date: 2024-01-01
";
        assert!(matches!(
            CalendarConfig::from_yaml_str(yaml),
            Err(ConfigError::InvertedBounds { .. })
        ));
    }

    #[test]
    fn malformed_dates_fail_to_parse_without_panicking() {
        assert!(CalendarConfig::from_yaml_str("min_date: not-a-date\n").is_err());
        assert!(CalendarConfig::from_yaml_str("min_date: 2023-02-29\n").is_err());
    }
}
