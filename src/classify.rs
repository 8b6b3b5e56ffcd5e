use crate::date::{Date, in_range};
use crate::grid::DayCell;
use crate::selection::{CalendarValue, DateRange};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

// ── Day state ─────────────────────────────────────────────────────────────────

/// Visual/interaction state of one grid cell. Derived per render, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayState {
    Default,
    Today,
    Selected,
    RangeStart,
    RangeCenter,
    RangeEnd,
    Disabled,
}

impl DayState {
    /// Whether the cell is part of the current selection (drives the
    /// host's selected/range-member attribute).
    pub fn is_selected(self) -> bool {
        matches!(
            self,
            Self::Selected | Self::RangeStart | Self::RangeCenter | Self::RangeEnd
        )
    }

    pub fn is_interactive(self) -> bool {
        self != Self::Disabled
    }
}

// ── Constraints ───────────────────────────────────────────────────────────────

/// Disabled-date source. An explicit list is set membership; `Predicate`
/// covers anything else.
#[derive(Clone, Default)]
pub enum DisabledDates {
    #[default]
    None,
    List(BTreeSet<Date>),
    Predicate(Arc<dyn Fn(Date) -> bool + Send + Sync>),
}

impl DisabledDates {
    pub fn from_dates(dates: impl IntoIterator<Item = Date>) -> Self {
        Self::List(dates.into_iter().collect())
    }

    pub fn forbids(&self, date: Date) -> bool {
        match self {
            Self::None => false,
            Self::List(set) => set.contains(&date),
            Self::Predicate(pred) => pred(date),
        }
    }
}

impl fmt::Debug for DisabledDates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("DisabledDates::None"),
            Self::List(set) => f.debug_tuple("DisabledDates::List").field(set).finish(),
            Self::Predicate(_) => f.write_str("DisabledDates::Predicate(..)"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Constraints {
    pub min_date: Option<Date>,
    pub max_date: Option<Date>,
    pub disabled: DisabledDates,
}

impl Constraints {
    pub fn allows(&self, date: Date) -> bool {
        if self.min_date.is_some_and(|min| date < min) {
            return false;
        }
        if self.max_date.is_some_and(|max| date > max) {
            return false;
        }
        !self.disabled.forbids(date)
    }
}

// ── Classification ────────────────────────────────────────────────────────────

/// Assigns a cell its state, in priority order: disabled beats everything
/// (a disabled date never renders as selected, even when present in a
/// host-supplied value), then selection/range membership, then the today
/// overlay, then default.
///
/// An in-progress range whose hover has not arrived yet (keyboard-only
/// interaction, or the pointer off the grid) still marks its anchor as
/// [`DayState::RangeStart`] rather than leaving it unstyled, so the first
/// endpoint stays visible between the two clicks.
pub fn classify(
    cell: &DayCell,
    value: &CalendarValue,
    hover: Option<Date>,
    constraints: &Constraints,
) -> DayState {
    if !constraints.allows(cell.date) {
        return DayState::Disabled;
    }

    match value {
        CalendarValue::Single(selected) => {
            if *selected == Some(cell.date) {
                return DayState::Selected;
            }
        }
        CalendarValue::Range(range) => match (range.start, range.end) {
            (Some(start), Some(end)) => {
                if let Some(state) = classify_against(cell.date, start, end) {
                    return state;
                }
            }
            (Some(anchor), None) => {
                // Preview: order anchor and hover ascending so hovering
                // before the anchor still previews correctly.
                if let Some(hover) = hover {
                    let preview = DateRange::sorted(anchor, hover);
                    if let (Some(start), Some(end)) = (preview.start, preview.end) {
                        if let Some(state) = classify_against(cell.date, start, end) {
                            return state;
                        }
                    }
                } else if cell.date == anchor {
                    return DayState::RangeStart;
                }
            }
            (None, _) => {}
        },
    }

    if cell.is_today {
        DayState::Today
    } else {
        DayState::Default
    }
}

fn classify_against(date: Date, start: Date, end: Date) -> Option<DayState> {
    if date == start && start == end {
        // Degenerate one-day range.
        return Some(DayState::Selected);
    }
    if date == start {
        return Some(DayState::RangeStart);
    }
    if date == end {
        return Some(DayState::RangeEnd);
    }
    if in_range(date, start, end) {
        return Some(DayState::RangeCenter);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CellOrigin, DayCell};

    fn d(year: i32, month: u8, day: u8) -> Date {
        Date { year, month, day }
    }

    fn cell(date: Date) -> DayCell {
        DayCell {
            day: date.day,
            date,
            origin: CellOrigin::CurrentMonth,
            is_today: false,
        }
    }

    fn today_cell(date: Date) -> DayCell {
        DayCell {
            is_today: true,
            ..cell(date)
        }
    }

    fn range(start: Date, end: Date) -> CalendarValue {
        CalendarValue::Range(DateRange::sorted(start, end))
    }

    #[test]
    fn single_mode_marks_only_the_selected_date() {
        let value = CalendarValue::Single(Some(d(2024, 3, 5)));
        let c = Constraints::default();
        assert_eq!(classify(&cell(d(2024, 3, 5)), &value, None, &c), DayState::Selected);
        assert_eq!(classify(&cell(d(2024, 3, 6)), &value, None, &c), DayState::Default);
    }

    #[test]
    fn completed_range_has_start_center_end() {
        let value = range(d(2024, 3, 5), d(2024, 3, 10));
        let c = Constraints::default();
        assert_eq!(classify(&cell(d(2024, 3, 5)), &value, None, &c), DayState::RangeStart);
        assert_eq!(classify(&cell(d(2024, 3, 7)), &value, None, &c), DayState::RangeCenter);
        assert_eq!(classify(&cell(d(2024, 3, 10)), &value, None, &c), DayState::RangeEnd);
        assert_eq!(classify(&cell(d(2024, 3, 11)), &value, None, &c), DayState::Default);
    }

    #[test]
    fn degenerate_range_renders_as_selected() {
        let value = range(d(2024, 3, 5), d(2024, 3, 5));
        let c = Constraints::default();
        assert_eq!(classify(&cell(d(2024, 3, 5)), &value, None, &c), DayState::Selected);
    }

    #[test]
    fn hover_before_anchor_previews_reordered() {
        // Anchor 03-10, hover 03-05: preview is 05..10.
        let value = CalendarValue::Range(DateRange {
            start: Some(d(2024, 3, 10)),
            end: None,
        });
        let hover = Some(d(2024, 3, 5));
        let c = Constraints::default();
        assert_eq!(classify(&cell(d(2024, 3, 5)), &value, hover, &c), DayState::RangeStart);
        assert_eq!(classify(&cell(d(2024, 3, 7)), &value, hover, &c), DayState::RangeCenter);
        assert_eq!(classify(&cell(d(2024, 3, 10)), &value, hover, &c), DayState::RangeEnd);
    }

    #[test]
    fn anchor_without_hover_shows_as_range_start() {
        let value = CalendarValue::Range(DateRange {
            start: Some(d(2024, 3, 10)),
            end: None,
        });
        let c = Constraints::default();
        assert_eq!(classify(&cell(d(2024, 3, 10)), &value, None, &c), DayState::RangeStart);
        assert_eq!(classify(&cell(d(2024, 3, 11)), &value, None, &c), DayState::Default);
    }

    #[test]
    fn disabled_beats_every_selected_state() {
        let weekend = DisabledDates::Predicate(Arc::new(|date: Date| date.weekday().0 >= 5));
        let c = Constraints {
            disabled: weekend,
            ..Constraints::default()
        };
        // 2024-03-09/10 are Saturday/Sunday and sit inside the value.
        let value = range(d(2024, 3, 8), d(2024, 3, 10));
        assert_eq!(classify(&cell(d(2024, 3, 9)), &value, None, &c), DayState::Disabled);
        assert_eq!(classify(&cell(d(2024, 3, 10)), &value, None, &c), DayState::Disabled);
        assert_eq!(classify(&cell(d(2024, 3, 8)), &value, None, &c), DayState::RangeStart);
    }

    #[test]
    fn min_max_bounds_disable_out_of_range_cells() {
        let c = Constraints {
            min_date: Some(d(2024, 3, 5)),
            max_date: Some(d(2024, 3, 20)),
            disabled: DisabledDates::None,
        };
        let value = CalendarValue::Single(None);
        assert_eq!(classify(&cell(d(2024, 3, 4)), &value, None, &c), DayState::Disabled);
        assert_eq!(classify(&cell(d(2024, 3, 5)), &value, None, &c), DayState::Default);
        assert_eq!(classify(&cell(d(2024, 3, 21)), &value, None, &c), DayState::Disabled);
    }

    #[test]
    fn today_overlay_applies_only_when_nothing_else_does() {
        let c = Constraints::default();
        let value = CalendarValue::Single(None);
        assert_eq!(
            classify(&today_cell(d(2024, 3, 6)), &value, None, &c),
            DayState::Today
        );
        let value = CalendarValue::Single(Some(d(2024, 3, 6)));
        assert_eq!(
            classify(&today_cell(d(2024, 3, 6)), &value, None, &c),
            DayState::Selected
        );
    }

    #[test]
    fn explicit_disabled_list_is_set_membership() {
        let c = Constraints {
            disabled: DisabledDates::from_dates([d(2024, 3, 7), d(2024, 3, 8)]),
            ..Constraints::default()
        };
        let value = CalendarValue::Single(None);
        assert_eq!(classify(&cell(d(2024, 3, 7)), &value, None, &c), DayState::Disabled);
        assert_eq!(classify(&cell(d(2024, 3, 9)), &value, None, &c), DayState::Default);
    }
}
