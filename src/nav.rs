use crate::date::Date;
use crate::key::{KeyCode, KeyEvent, KeyModifiers};
use crate::selection::CalendarValue;

// ── Navigation commands ───────────────────────────────────────────────────────

/// What a key asks the day grid to do. Produced by [`command_for_key`] and
/// interpreted in one place; keys that map to nothing are not consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// Move focus by whole days (±1 for left/right, ±7 for up/down).
    MoveBy(i32),
    /// Monday of the focused week.
    JumpToWeekStart,
    /// Sunday of the focused week.
    JumpToWeekEnd,
    PageMonth(i32),
    PageYear(i32),
    /// Commit the focused date as if it had been clicked.
    Commit,
}

pub fn command_for_key(key: KeyEvent) -> Option<NavCommand> {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Left => Some(NavCommand::MoveBy(-1)),
        KeyCode::Right => Some(NavCommand::MoveBy(1)),
        KeyCode::Up => Some(NavCommand::MoveBy(-7)),
        KeyCode::Down => Some(NavCommand::MoveBy(7)),
        KeyCode::Home => Some(NavCommand::JumpToWeekStart),
        KeyCode::End => Some(NavCommand::JumpToWeekEnd),
        KeyCode::PageUp if shift => Some(NavCommand::PageYear(-1)),
        KeyCode::PageUp => Some(NavCommand::PageMonth(-1)),
        KeyCode::PageDown if shift => Some(NavCommand::PageYear(1)),
        KeyCode::PageDown => Some(NavCommand::PageMonth(1)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(NavCommand::Commit),
        _ => None,
    }
}

// ── Focus state ───────────────────────────────────────────────────────────────

/// Roving focus: the single date eligible for keyboard activation. Seeded from
/// the selection's first set date, else today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusState {
    focused: Date,
}

impl FocusState {
    pub fn seed(value: &CalendarValue, today: Date) -> Self {
        Self {
            focused: value.anchor_date().unwrap_or(today),
        }
    }

    pub fn focused(&self) -> Date {
        self.focused
    }

    pub fn set(&mut self, date: Date) {
        self.focused = date;
    }

    /// The date a command would focus, with no view side effects. `Commit`
    /// leaves focus in place.
    pub fn target_for(&self, command: NavCommand) -> Date {
        match command {
            NavCommand::MoveBy(days) => self.focused.add_days(days),
            NavCommand::JumpToWeekStart => self.focused.start_of_week(),
            NavCommand::JumpToWeekEnd => self.focused.end_of_week(),
            NavCommand::PageMonth(delta) => self.focused.add_months(delta),
            NavCommand::PageYear(delta) => self.focused.add_months(delta * 12),
            NavCommand::Commit => self.focused,
        }
    }
}
