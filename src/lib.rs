pub mod calendar;
pub mod classify;
pub mod config;
pub mod date;
pub mod grid;
pub mod key;
pub mod nav;
pub mod preset;
pub mod selection;
pub mod view;

pub use calendar::{Calendar, RenderCell};
pub use classify::{Constraints, DayState, DisabledDates, classify};
pub use config::{CalendarConfig, ConfigError, PresetDef, PresetKind};
pub use date::{
    Date, DateParseError, MONTH_NAMES, Weekday, days_in_month, month_name, today, weekday_of,
};
pub use grid::{CellOrigin, DayCell, MonthGrid};
pub use key::{KeyCode, KeyEvent, KeyModifiers};
pub use nav::{FocusState, NavCommand, command_for_key};
pub use preset::{Preset, PresetRegistry, PresetResolver};
pub use selection::{
    CalendarEvent, CalendarMode, CalendarValue, DateRange, InteractionResult, SelectionState,
    ValueSource,
};
pub use view::{SubView, ViewController, ViewMode, YearEntry};
