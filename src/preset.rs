use crate::date::Date;
use crate::selection::DateRange;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

// ── Presets ───────────────────────────────────────────────────────────────────

/// Stateless range generator: resolved against a reference date ("today")
/// every time it is activated, never a stored value.
pub type PresetResolver = Arc<dyn Fn(Date) -> DateRange + Send + Sync>;

#[derive(Clone)]
pub struct Preset {
    pub id: String,
    pub label: String,
    resolver: PresetResolver,
}

impl Preset {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        resolver: impl Fn(Date) -> DateRange + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            resolver: Arc::new(resolver),
        }
    }

    pub fn resolve(&self, today: Date) -> DateRange {
        (self.resolver)(today)
    }

    // ── Built-ins ─────────────────────────────────────────────────────────────

    pub fn today(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, |today| DateRange::sorted(today, today))
    }

    pub fn yesterday(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, |today| {
            let day = today.add_days(-1);
            DateRange::sorted(day, day)
        })
    }

    /// The trailing `days`-day window ending today (inclusive).
    pub fn last_days(id: impl Into<String>, label: impl Into<String>, days: u32) -> Self {
        let span = days.max(1) as i32;
        Self::new(id, label, move |today| {
            DateRange::sorted(today.add_days(-(span - 1)), today)
        })
    }

    pub fn month_to_date(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, |today| {
            DateRange::sorted(Date::first_of_month(today.year, today.month), today)
        })
    }

    pub fn this_month(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, |today| {
            DateRange::sorted(
                Date::first_of_month(today.year, today.month),
                Date::last_of_month(today.year, today.month),
            )
        })
    }

    pub fn last_month(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, |today| {
            let prev = Date::first_of_month(today.year, today.month).add_months(-1);
            DateRange::sorted(prev, Date::last_of_month(prev.year, prev.month))
        })
    }

    pub fn fixed(id: impl Into<String>, label: impl Into<String>, start: Date, end: Date) -> Self {
        Self::new(id, label, move |_| DateRange::sorted(start, end))
    }
}

impl fmt::Debug for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preset")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// Presets keyed by id, in declaration order (the order the host renders its
/// preset tabs in).
#[derive(Debug, Clone, Default)]
pub struct PresetRegistry {
    presets: IndexMap<String, Preset>,
}

impl PresetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserting an existing id replaces the preset in place.
    pub fn insert(&mut self, preset: Preset) {
        self.presets.insert(preset.id.clone(), preset);
    }

    pub fn with(mut self, preset: Preset) -> Self {
        self.insert(preset);
        self
    }

    pub fn get(&self, id: &str) -> Option<&Preset> {
        self.presets.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u8, day: u8) -> Date {
        Date { year, month, day }
    }

    const TODAY: Date = Date {
        year: 2024,
        month: 3,
        day: 10,
    };

    #[test]
    fn built_in_resolvers_against_a_fixed_reference() {
        assert_eq!(
            Preset::today("t", "Today").resolve(TODAY),
            DateRange::sorted(d(2024, 3, 10), d(2024, 3, 10))
        );
        assert_eq!(
            Preset::yesterday("y", "Yesterday").resolve(TODAY),
            DateRange::sorted(d(2024, 3, 9), d(2024, 3, 9))
        );
        assert_eq!(
            Preset::last_days("l7", "Last 7 days", 7).resolve(TODAY),
            DateRange::sorted(d(2024, 3, 4), d(2024, 3, 10))
        );
        assert_eq!(
            Preset::month_to_date("mtd", "Month to date").resolve(TODAY),
            DateRange::sorted(d(2024, 3, 1), d(2024, 3, 10))
        );
        assert_eq!(
            Preset::this_month("tm", "This month").resolve(TODAY),
            DateRange::sorted(d(2024, 3, 1), d(2024, 3, 31))
        );
        assert_eq!(
            Preset::last_month("lm", "Last month").resolve(TODAY),
            DateRange::sorted(d(2024, 2, 1), d(2024, 2, 29))
        );
    }

    #[test]
    fn last_days_crosses_month_boundaries() {
        let reference = d(2024, 3, 2);
        assert_eq!(
            Preset::last_days("l7", "Last 7 days", 7).resolve(reference),
            DateRange::sorted(d(2024, 2, 25), d(2024, 3, 2))
        );
    }

    #[test]
    fn registry_preserves_declaration_order() {
        let registry = PresetRegistry::new()
            .with(Preset::today("t", "Today"))
            .with(Preset::last_days("l7", "Last 7 days", 7))
            .with(Preset::this_month("tm", "This month"));
        let ids: Vec<&str> = registry.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["t", "l7", "tm"]);
        assert_eq!(registry.get("l7").map(|p| p.label.as_str()), Some("Last 7 days"));
        assert!(registry.get("missing").is_none());
    }
}
