use crate::date::Date;
use log::debug;
use serde::{Deserialize, Serialize};

// ── Sub-views & display mode ──────────────────────────────────────────────────

/// Mutually exclusive picker sub-views; exactly one renders at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubView {
    #[default]
    Days,
    Months,
    Years,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    #[default]
    SingleMonth,
    DualMonth,
}

/// Number of years shown at once in the years sub-view.
pub const YEAR_WINDOW: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearEntry {
    pub year: i32,
    pub selectable: bool,
}

// ── ViewController ────────────────────────────────────────────────────────────

/// Owns what is displayed: the primary month/year, the active sub-view and the
/// hover date. Selection state lives elsewhere.
#[derive(Debug, Clone)]
pub struct ViewController {
    year: i32,
    month: u8,
    sub_view: SubView,
    hover: Option<Date>,
    min_year: Option<i32>,
    max_year: Option<i32>,
}

impl ViewController {
    pub fn new(year: i32, month: u8) -> Self {
        Self {
            year,
            month,
            sub_view: SubView::Days,
            hover: None,
            min_year: None,
            max_year: None,
        }
    }

    pub fn with_year_bounds(mut self, min_year: Option<i32>, max_year: Option<i32>) -> Self {
        self.set_year_bounds(min_year, max_year);
        self
    }

    pub fn set_year_bounds(&mut self, min_year: Option<i32>, max_year: Option<i32>) {
        self.min_year = min_year;
        self.max_year = max_year;
    }

    pub fn displayed(&self) -> (i32, u8) {
        (self.year, self.month)
    }

    /// The read-only companion grid in dual-month mode.
    pub fn secondary(&self) -> (i32, u8) {
        let next = Date::first_of_month(self.year, self.month).add_months(1);
        (next.year, next.month)
    }

    pub fn sub_view(&self) -> SubView {
        self.sub_view
    }

    pub fn hover(&self) -> Option<Date> {
        self.hover
    }

    pub fn set_hover(&mut self, date: Date) {
        self.hover = Some(date);
    }

    pub fn clear_hover(&mut self) {
        self.hover = None;
    }

    /// Whether `date` falls in the primary displayed month.
    pub fn shows(&self, date: Date) -> bool {
        (date.year, date.month) == (self.year, self.month)
    }

    /// Page so that `date`'s month is the primary grid.
    pub fn show_date(&mut self, date: Date) {
        if !self.shows(date) {
            debug!("view pages to {:04}-{:02}", date.year, date.month);
            self.year = date.year;
            self.month = date.month;
        }
    }

    pub fn page_months(&mut self, delta: i32) {
        let next = Date::first_of_month(self.year, self.month).add_months(delta);
        self.year = next.year;
        self.month = next.month;
    }

    // ── Sub-view transitions ──────────────────────────────────────────────────

    /// Month-label activation: Days ⇄ Months. Entering the months sub-view
    /// leaves the displayed year untouched.
    pub fn toggle_months(&mut self) {
        self.sub_view = match self.sub_view {
            SubView::Months => SubView::Days,
            _ => SubView::Months,
        };
    }

    /// Year-label activation: Days ⇄ Years.
    pub fn toggle_years(&mut self) {
        self.sub_view = match self.sub_view {
            SubView::Years => SubView::Days,
            _ => SubView::Years,
        };
    }

    /// Month chosen inside the months sub-view; returns to the day grid.
    pub fn select_month(&mut self, month: u8) {
        if (1..=12).contains(&month) {
            self.month = month;
        }
        self.sub_view = SubView::Days;
    }

    /// Year-stepper inside the months sub-view; stays in the sub-view.
    pub fn step_year(&mut self, delta: i32) {
        self.year += delta;
    }

    // ── Years sub-view ────────────────────────────────────────────────────────

    /// The visible 12-year window, starting five years before the displayed
    /// year. Out-of-bounds years render but are not selectable.
    pub fn year_window(&self) -> Vec<YearEntry> {
        let first = self.year - 5;
        (first..first + YEAR_WINDOW as i32)
            .map(|year| YearEntry {
                year,
                selectable: self.year_selectable(year),
            })
            .collect()
    }

    pub fn year_selectable(&self, year: i32) -> bool {
        if self.min_year.is_some_and(|min| year < min) {
            return false;
        }
        !self.max_year.is_some_and(|max| year > max)
    }

    /// Year chosen inside the years sub-view; returns to the day grid.
    /// Out-of-bounds years are ignored.
    pub fn select_year(&mut self, year: i32) {
        if self.year_selectable(year) {
            self.year = year;
            self.sub_view = SubView::Days;
        }
    }

    /// Decade stepper: shifts the window by ±10 years, clamped so the
    /// displayed year never leaves the optional bounds. Never fails.
    pub fn page_decade(&mut self, delta: i32) {
        let mut year = self.year + delta * 10;
        if let Some(min) = self.min_year {
            year = year.max(min);
        }
        if let Some(max) = self.max_year {
            year = year.min(max);
        }
        self.year = year;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u8, day: u8) -> Date {
        Date { year, month, day }
    }

    #[test]
    fn sub_views_are_mutually_exclusive_toggles() {
        let mut view = ViewController::new(2024, 3);
        assert_eq!(view.sub_view(), SubView::Days);
        view.toggle_months();
        assert_eq!(view.sub_view(), SubView::Months);
        view.toggle_months();
        assert_eq!(view.sub_view(), SubView::Days);
        view.toggle_years();
        assert_eq!(view.sub_view(), SubView::Years);
        // Month label from the years sub-view switches straight over.
        view.toggle_months();
        assert_eq!(view.sub_view(), SubView::Months);
    }

    #[test]
    fn entering_months_keeps_the_displayed_year() {
        let mut view = ViewController::new(2024, 3);
        view.toggle_months();
        assert_eq!(view.displayed(), (2024, 3));
        view.step_year(1);
        assert_eq!(view.displayed(), (2025, 3));
        assert_eq!(view.sub_view(), SubView::Months);
        view.select_month(7);
        assert_eq!(view.displayed(), (2025, 7));
        assert_eq!(view.sub_view(), SubView::Days);
    }

    #[test]
    fn year_window_starts_five_years_back() {
        let view = ViewController::new(2024, 3);
        let window = view.year_window();
        assert_eq!(window.len(), YEAR_WINDOW);
        assert_eq!(window.first().map(|e| e.year), Some(2019));
        assert_eq!(window.last().map(|e| e.year), Some(2030));
        assert!(window.iter().all(|e| e.selectable));
    }

    #[test]
    fn out_of_bounds_years_render_but_are_not_selectable() {
        let mut view = ViewController::new(2024, 3).with_year_bounds(Some(2020), Some(2026));
        let window = view.year_window();
        assert!(!window[0].selectable); // 2019
        assert!(window[1].selectable); // 2020
        assert!(!window[8].selectable); // 2027

        view.toggle_years();
        view.select_year(2019);
        assert_eq!(view.displayed(), (2024, 3));
        assert_eq!(view.sub_view(), SubView::Years);
        view.select_year(2026);
        assert_eq!(view.displayed(), (2026, 3));
        assert_eq!(view.sub_view(), SubView::Days);
    }

    #[test]
    fn decade_paging_clamps_against_bounds() {
        let mut view = ViewController::new(2024, 3).with_year_bounds(Some(2018), Some(2030));
        view.page_decade(1);
        assert_eq!(view.displayed().0, 2030);
        view.page_decade(1);
        assert_eq!(view.displayed().0, 2030);
        view.page_decade(-1);
        assert_eq!(view.displayed().0, 2020);
        view.page_decade(-1);
        assert_eq!(view.displayed().0, 2018);
    }

    #[test]
    fn month_paging_rolls_over_the_year() {
        let mut view = ViewController::new(2024, 12);
        view.page_months(1);
        assert_eq!(view.displayed(), (2025, 1));
        view.page_months(-2);
        assert_eq!(view.displayed(), (2024, 11));
    }

    #[test]
    fn secondary_grid_is_one_month_ahead() {
        let view = ViewController::new(2024, 12);
        assert_eq!(view.secondary(), (2025, 1));
    }

    #[test]
    fn show_date_pages_only_when_needed() {
        let mut view = ViewController::new(2024, 3);
        view.show_date(d(2024, 3, 31));
        assert_eq!(view.displayed(), (2024, 3));
        view.show_date(d(2024, 4, 1));
        assert_eq!(view.displayed(), (2024, 4));
    }
}
