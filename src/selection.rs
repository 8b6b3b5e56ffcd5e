use crate::date::Date;
use log::debug;
use serde::{Deserialize, Serialize};

// ── Mode & value ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarMode {
    #[default]
    Single,
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl DateRange {
    pub const EMPTY: Self = Self {
        start: None,
        end: None,
    };

    /// A completed range with the endpoints sorted ascending.
    pub fn sorted(a: Date, b: Date) -> Self {
        Self {
            start: Some(a.min(b)),
            end: Some(a.max(b)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

/// The selected value, tagged by mode. A completed range always has
/// `start <= end`; the engine sorts on completion and never exposes an
/// inverted pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarValue {
    Single(Option<Date>),
    Range(DateRange),
}

impl CalendarValue {
    pub fn empty(mode: CalendarMode) -> Self {
        match mode {
            CalendarMode::Single => Self::Single(None),
            CalendarMode::Range => Self::Range(DateRange::EMPTY),
        }
    }

    pub fn mode(&self) -> CalendarMode {
        match self {
            Self::Single(_) => CalendarMode::Single,
            Self::Range(_) => CalendarMode::Range,
        }
    }

    pub fn as_single(&self) -> Option<Date> {
        match self {
            Self::Single(date) => *date,
            Self::Range(_) => None,
        }
    }

    pub fn as_range(&self) -> Option<&DateRange> {
        match self {
            Self::Single(_) => None,
            Self::Range(range) => Some(range),
        }
    }

    /// First set date, used to seed keyboard focus and the displayed month.
    pub fn anchor_date(&self) -> Option<Date> {
        match self {
            Self::Single(date) => *date,
            Self::Range(range) => range.start.or(range.end),
        }
    }
}

// ── Ownership ─────────────────────────────────────────────────────────────────

/// Who owns the value. `Owned` is written in place on every transition;
/// `External` is a host-supplied snapshot: transitions emit the next value but
/// leave the snapshot untouched until the host writes it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    Owned(CalendarValue),
    External(CalendarValue),
}

impl ValueSource {
    pub fn current(&self) -> &CalendarValue {
        match self {
            Self::Owned(value) | Self::External(value) => value,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

// ── Events & result ───────────────────────────────────────────────────────────

/// Notifications emitted by transitions; the host's change/apply/clear hooks
/// consume these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarEvent {
    ValueChanged(CalendarValue),
    Applied(CalendarValue),
    Cleared,
    PresetApplied { id: String, range: DateRange },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionResult {
    pub handled: bool,
    pub events: Vec<CalendarEvent>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            events: Vec::new(),
        }
    }

    pub fn with_event(event: CalendarEvent) -> Self {
        Self {
            handled: true,
            events: vec![event],
        }
    }

    pub fn push(&mut self, event: CalendarEvent) {
        self.handled = true;
        self.events.push(event);
    }
}

// ── Selection state machine ───────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SelectionState {
    mode: CalendarMode,
    source: ValueSource,
    active_preset: Option<String>,
}

impl SelectionState {
    pub fn new(mode: CalendarMode) -> Self {
        Self {
            mode,
            source: ValueSource::Owned(CalendarValue::empty(mode)),
            active_preset: None,
        }
    }

    /// Uncontrolled seed value.
    pub fn with_default(mut self, value: CalendarValue) -> Self {
        self.mode = value.mode();
        self.source = ValueSource::Owned(value);
        self
    }

    /// Switch to controlled mode with a host-supplied value.
    pub fn with_external(mut self, value: CalendarValue) -> Self {
        self.mode = value.mode();
        self.source = ValueSource::External(value);
        self
    }

    pub fn mode(&self) -> CalendarMode {
        self.mode
    }

    pub fn value(&self) -> &CalendarValue {
        self.source.current()
    }

    pub fn active_preset(&self) -> Option<&str> {
        self.active_preset.as_deref()
    }

    /// Host write-back in controlled mode. Authoritative: fully replaces the
    /// cached snapshot, last write wins.
    pub fn set_external(&mut self, value: CalendarValue) {
        self.mode = value.mode();
        self.source = ValueSource::External(value);
    }

    /// Day-click transition. Single mode toggles; range mode runs the
    /// two-click protocol, sorting the endpoints ascending on completion.
    /// Any manual click deactivates the current preset.
    pub fn click_day(&mut self, date: Date) -> InteractionResult {
        let next = match self.value() {
            CalendarValue::Single(current) => {
                if *current == Some(date) {
                    CalendarValue::Single(None)
                } else {
                    CalendarValue::Single(Some(date))
                }
            }
            CalendarValue::Range(range) => match range.start {
                Some(start) if !range.is_complete() => {
                    CalendarValue::Range(DateRange::sorted(start, date))
                }
                // No anchor yet, or a completed range: begin a new one.
                _ => CalendarValue::Range(DateRange {
                    start: Some(date),
                    end: None,
                }),
            },
        };
        self.active_preset = None;
        debug!("day click {date} -> {next:?}");
        self.commit(next)
    }

    /// Reset to the mode-appropriate empty value.
    pub fn clear(&mut self) -> InteractionResult {
        self.active_preset = None;
        let mut result = self.commit(CalendarValue::empty(self.mode));
        result.push(CalendarEvent::Cleared);
        result
    }

    /// Commit signal only; the value is not touched.
    pub fn apply(&self) -> InteractionResult {
        InteractionResult::with_event(CalendarEvent::Applied(self.value().clone()))
    }

    /// Replace the value wholesale with a preset-resolved range.
    pub fn apply_preset(&mut self, id: &str, range: DateRange) -> InteractionResult {
        if self.mode != CalendarMode::Range {
            return InteractionResult::ignored();
        }
        self.active_preset = Some(id.to_string());
        let mut result = self.commit(CalendarValue::Range(range));
        result.push(CalendarEvent::PresetApplied {
            id: id.to_string(),
            range,
        });
        result
    }

    fn commit(&mut self, next: CalendarValue) -> InteractionResult {
        if !self.source.is_external() {
            self.source = ValueSource::Owned(next.clone());
        }
        InteractionResult::with_event(CalendarEvent::ValueChanged(next))
    }
}
