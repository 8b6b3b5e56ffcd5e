// ── Key events ────────────────────────────────────────────────────────────────
//
// Engine-owned key types; hosts translate their native events into these.
// A crossterm conversion is provided for terminal hosts.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Unknown,
    Char(char),
    Enter,
    Tab,
    BackTab,
    Esc,
    Backspace,
    Delete,
    Home,
    End,
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers(u8);

impl KeyModifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CONTROL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        use crossterm::event::KeyCode as Ct;

        let code = match event.code {
            Ct::Char(ch) => KeyCode::Char(ch),
            Ct::Enter => KeyCode::Enter,
            Ct::Tab => KeyCode::Tab,
            Ct::BackTab => KeyCode::BackTab,
            Ct::Esc => KeyCode::Esc,
            Ct::Backspace => KeyCode::Backspace,
            Ct::Delete => KeyCode::Delete,
            Ct::Home => KeyCode::Home,
            Ct::End => KeyCode::End,
            Ct::Left => KeyCode::Left,
            Ct::Right => KeyCode::Right,
            Ct::Up => KeyCode::Up,
            Ct::Down => KeyCode::Down,
            Ct::PageUp => KeyCode::PageUp,
            Ct::PageDown => KeyCode::PageDown,
            _ => KeyCode::Unknown,
        };

        let mut modifiers = KeyModifiers::NONE;
        if event
            .modifiers
            .contains(crossterm::event::KeyModifiers::SHIFT)
        {
            modifiers = modifiers.union(KeyModifiers::SHIFT);
        }
        if event
            .modifiers
            .contains(crossterm::event::KeyModifiers::CONTROL)
        {
            modifiers = modifiers.union(KeyModifiers::CONTROL);
        }
        if event
            .modifiers
            .contains(crossterm::event::KeyModifiers::ALT)
        {
            modifiers = modifiers.union(KeyModifiers::ALT);
        }

        Self { code, modifiers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossterm_conversion_keeps_code_and_shift() {
        let ct = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::PageUp,
            crossterm::event::KeyModifiers::SHIFT,
        );
        let key = KeyEvent::from(ct);
        assert_eq!(key.code, KeyCode::PageUp);
        assert!(key.modifiers.contains(KeyModifiers::SHIFT));
        assert!(!key.modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    fn unmapped_codes_become_unknown() {
        let ct = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::F(5),
            crossterm::event::KeyModifiers::NONE,
        );
        assert_eq!(KeyEvent::from(ct).code, KeyCode::Unknown);
    }
}
