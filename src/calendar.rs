use crate::classify::{Constraints, DayState, DisabledDates, classify};
use crate::config::{CalendarConfig, ConfigError};
use crate::date::{Date, days_in_month, month_name, today};
use crate::grid::{DayCell, MonthGrid};
use crate::key::KeyEvent;
use crate::nav::{FocusState, NavCommand, command_for_key};
use crate::preset::{Preset, PresetRegistry};
use crate::selection::{
    CalendarEvent, CalendarMode, CalendarValue, InteractionResult, SelectionState,
};
use crate::view::{SubView, ViewController, ViewMode, YearEntry};
use log::debug;
use std::sync::Arc;

// ── Render output ─────────────────────────────────────────────────────────────

/// One classified grid cell. `focused` marks the single tab-reachable cell
/// (roving focus); the host maps `state` to its selected/current attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCell {
    pub cell: DayCell,
    pub state: DayState,
    pub focused: bool,
}

// ── Calendar ──────────────────────────────────────────────────────────────────

/// The date-selection engine: wires grid enumeration, classification, the
/// selection state machine, keyboard navigation and sub-view control behind
/// one synchronous, event-driven surface. Rendering and raw input capture
/// belong to the host.
#[derive(Debug, Clone)]
pub struct Calendar {
    view_mode: ViewMode,
    selection: SelectionState,
    view: ViewController,
    focus: FocusState,
    constraints: Constraints,
    presets: PresetRegistry,
    today: Date,
}

impl Calendar {
    pub fn new(mode: CalendarMode) -> Self {
        let today = today();
        let selection = SelectionState::new(mode);
        let focus = FocusState::seed(selection.value(), today);
        Self {
            view_mode: ViewMode::SingleMonth,
            view: ViewController::new(today.year, today.month),
            selection,
            focus,
            constraints: Constraints::default(),
            presets: PresetRegistry::new(),
            today,
        }
    }

    pub fn from_config(config: &CalendarConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut calendar = Self::new(config.mode)
            .with_view(config.view)
            .with_presets(config.preset_registry());
        calendar.constraints = config.constraints();
        calendar.sync_year_bounds();
        if let Some(value) = config.initial_value()? {
            calendar = calendar.with_default_value(value);
        }
        Ok(calendar)
    }

    // ── Builders ──────────────────────────────────────────────────────────────

    /// Pin the reference date; tests and hosts that already track the clock
    /// use this for determinism.
    pub fn with_today(mut self, date: Date) -> Self {
        self.today = date;
        self.rehome(date);
        self
    }

    pub fn with_view(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    /// Uncontrolled seed value.
    pub fn with_default_value(mut self, value: CalendarValue) -> Self {
        self.selection = self.selection.with_default(value);
        self.rehome(self.today);
        self
    }

    /// Controlled mode: the host owns the value and echoes changes back via
    /// [`Calendar::set_external_value`].
    pub fn with_external_value(mut self, value: CalendarValue) -> Self {
        self.selection = self.selection.with_external(value);
        self.rehome(self.today);
        self
    }

    pub fn with_min_date(mut self, date: Date) -> Self {
        self.constraints.min_date = Some(date);
        self.sync_year_bounds();
        self
    }

    pub fn with_max_date(mut self, date: Date) -> Self {
        self.constraints.max_date = Some(date);
        self.sync_year_bounds();
        self
    }

    pub fn with_disabled_dates(mut self, dates: impl IntoIterator<Item = Date>) -> Self {
        self.constraints.disabled = DisabledDates::from_dates(dates);
        self
    }

    pub fn with_disabled_predicate(
        mut self,
        predicate: impl Fn(Date) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.constraints.disabled = DisabledDates::Predicate(Arc::new(predicate));
        self
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.presets.insert(preset);
        self
    }

    pub fn with_presets(mut self, presets: PresetRegistry) -> Self {
        self.presets = presets;
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn mode(&self) -> CalendarMode {
        self.selection.mode()
    }

    pub fn value(&self) -> &CalendarValue {
        self.selection.value()
    }

    pub fn active_preset(&self) -> Option<&str> {
        self.selection.active_preset()
    }

    pub fn focused_date(&self) -> Date {
        self.focus.focused()
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn sub_view(&self) -> SubView {
        self.view.sub_view()
    }

    pub fn displayed(&self) -> (i32, u8) {
        self.view.displayed()
    }

    pub fn secondary_displayed(&self) -> Option<(i32, u8)> {
        matches!(self.view_mode, ViewMode::DualMonth).then(|| self.view.secondary())
    }

    /// "March 2024" for the primary grid header.
    pub fn displayed_label(&self) -> String {
        let (year, month) = self.view.displayed();
        format!("{} {}", month_name(month), year)
    }

    pub fn hover_date(&self) -> Option<Date> {
        self.view.hover()
    }

    pub fn presets(&self) -> &PresetRegistry {
        &self.presets
    }

    pub fn year_window(&self) -> Vec<YearEntry> {
        self.view.year_window()
    }

    // ── Keyboard ──────────────────────────────────────────────────────────────

    /// Grid keyboard protocol. Only the day grid takes key input; unmapped
    /// keys are left unconsumed for the host.
    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if self.view.sub_view() != SubView::Days {
            return InteractionResult::ignored();
        }
        let Some(command) = command_for_key(key) else {
            return InteractionResult::ignored();
        };
        self.on_command(command)
    }

    pub fn on_command(&mut self, command: NavCommand) -> InteractionResult {
        match command {
            NavCommand::Commit => self.click_day(self.focus.focused()),
            _ => {
                let target = self.focus.target_for(command);
                self.focus.set(target);
                // Focus and the visible grid never diverge.
                self.view.show_date(target);
                debug!("focus moves to {target}");
                InteractionResult::handled()
            }
        }
    }

    // ── Pointer & selection ───────────────────────────────────────────────────

    /// Day activation, from a click or a commit key. Disabled dates are
    /// non-interactive in the classified output; a stray activation is a
    /// no-op.
    pub fn click_day(&mut self, date: Date) -> InteractionResult {
        if !self.constraints.allows(date) {
            return InteractionResult::ignored();
        }
        self.focus.set(date);
        self.view.show_date(date);
        let result = self.selection.click_day(date);
        if completes_range(&result) {
            // Hover is reset eagerly so no stale preview survives completion.
            self.view.clear_hover();
        }
        result
    }

    pub fn hover(&mut self, date: Date) {
        self.view.set_hover(date);
    }

    pub fn clear_hover(&mut self) {
        self.view.clear_hover();
    }

    pub fn clear(&mut self) -> InteractionResult {
        self.selection.clear()
    }

    pub fn apply(&self) -> InteractionResult {
        self.selection.apply()
    }

    /// Host write-back in controlled mode; authoritative and whole.
    pub fn set_external_value(&mut self, value: CalendarValue) {
        self.selection.set_external(value);
    }

    /// Preset tab activation: resolve against today, replace the value and
    /// page to the range's start month.
    pub fn select_preset(&mut self, id: &str) -> InteractionResult {
        let Some(preset) = self.presets.get(id) else {
            return InteractionResult::ignored();
        };
        let range = preset.resolve(self.today);
        let result = self.selection.apply_preset(id, range);
        if result.handled {
            if let Some(start) = range.start {
                self.view.show_date(start);
                self.focus.set(start);
            }
            self.view.clear_hover();
        }
        result
    }

    // ── View control ──────────────────────────────────────────────────────────

    pub fn month_label_activated(&mut self) {
        self.view.toggle_months();
        if self.view.sub_view() == SubView::Days {
            self.follow_view();
        }
    }

    pub fn year_label_activated(&mut self) {
        self.view.toggle_years();
        if self.view.sub_view() == SubView::Days {
            self.follow_view();
        }
    }

    pub fn select_month(&mut self, month: u8) {
        self.view.select_month(month);
        self.follow_view();
    }

    pub fn select_year(&mut self, year: i32) {
        self.view.select_year(year);
        self.follow_view();
    }

    pub fn step_year(&mut self, delta: i32) {
        self.view.step_year(delta);
    }

    pub fn page_decade(&mut self, delta: i32) {
        self.view.page_decade(delta);
    }

    /// Header/dual-month steppers. In dual-month mode both grids advance
    /// together; the secondary is always primary + 1.
    pub fn page_months(&mut self, delta: i32) {
        self.view.page_months(delta);
        self.follow_view();
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// The primary grid, classified, with the roving-focus flag.
    pub fn render_cells(&self) -> Vec<Vec<RenderCell>> {
        let (year, month) = self.view.displayed();
        self.render_grid(year, month, true)
    }

    /// The dual-month companion grid; read-only, so nothing in it is
    /// focusable.
    pub fn render_secondary_cells(&self) -> Option<Vec<Vec<RenderCell>>> {
        self.secondary_displayed()
            .map(|(year, month)| self.render_grid(year, month, false))
    }

    fn render_grid(&self, year: i32, month: u8, focusable: bool) -> Vec<Vec<RenderCell>> {
        let grid = MonthGrid::new(year, month, self.today);
        grid.weeks
            .iter()
            .map(|week| {
                week.iter()
                    .map(|cell| RenderCell {
                        cell: *cell,
                        state: classify(
                            cell,
                            self.selection.value(),
                            self.view.hover(),
                            &self.constraints,
                        ),
                        focused: focusable && cell.date == self.focus.focused(),
                    })
                    .collect()
            })
            .collect()
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    /// Re-seed focus and the displayed month from the value, else `fallback`.
    fn rehome(&mut self, fallback: Date) {
        self.focus = FocusState::seed(self.selection.value(), fallback);
        self.view.show_date(self.focus.focused());
    }

    /// After a view-driven page turn, pull focus into the displayed month so
    /// it stays on a rendered cell. The day is clamped to the month's length.
    fn follow_view(&mut self) {
        let (year, month) = self.view.displayed();
        let focused = self.focus.focused();
        if (focused.year, focused.month) != (year, month) {
            let day = focused.day.min(days_in_month(year, month));
            self.focus.set(Date { year, month, day });
        }
    }

    fn sync_year_bounds(&mut self) {
        self.view.set_year_bounds(
            self.constraints.min_date.map(|d| d.year),
            self.constraints.max_date.map(|d| d.year),
        );
    }
}

fn completes_range(result: &InteractionResult) -> bool {
    result.events.iter().any(|event| {
        matches!(
            event,
            CalendarEvent::ValueChanged(CalendarValue::Range(range)) if range.is_complete()
        )
    })
}
