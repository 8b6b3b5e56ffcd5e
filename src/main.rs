use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use dategrid::{
    Calendar, CalendarEvent, CalendarMode, CellOrigin, DayState, KeyEvent, MONTH_NAMES, Preset,
    SubView, Weekday,
};
use std::io::{self, Stdout, Write};

// Interactive showcase for the selection engine. Everything here is host-side
// presentation; the engine itself never draws.

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
    }
}

fn run() -> io::Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let result = event_loop(&mut stdout);

    execute!(stdout, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

struct Demo {
    calendar: Calendar,
    // Demo-side cursors for the month/year pickers.
    month_cursor: usize,
    year_cursor: usize,
    last_event: String,
}

impl Demo {
    fn new() -> Self {
        let calendar = Calendar::new(CalendarMode::Range)
            .with_preset(Preset::today("today", "Today"))
            .with_preset(Preset::last_days("last-7", "Last 7 days", 7))
            .with_preset(Preset::this_month("this-month", "This month"));
        Self {
            calendar,
            month_cursor: 0,
            year_cursor: 0,
            last_event: String::new(),
        }
    }

    fn note_events(&mut self, events: &[CalendarEvent]) {
        if let Some(event) = events.last() {
            self.last_event = format!("{event:?}");
        }
    }

    /// Returns false when the demo should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        use dategrid::KeyCode;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Char('m') => {
                self.month_cursor = self.calendar.displayed().1 as usize - 1;
                self.calendar.month_label_activated();
                return true;
            }
            KeyCode::Char('y') => {
                self.year_cursor = 5; // displayed year sits sixth in the window
                self.calendar.year_label_activated();
                return true;
            }
            KeyCode::Char('c') => {
                let result = self.calendar.clear();
                self.note_events(&result.events);
                return true;
            }
            KeyCode::Char('a') => {
                let result = self.calendar.apply();
                self.note_events(&result.events);
                return true;
            }
            KeyCode::Char(digit @ '1'..='3') => {
                let index = digit as usize - '1' as usize;
                let id = self
                    .calendar
                    .presets()
                    .iter()
                    .nth(index)
                    .map(|p| p.id.clone());
                if let Some(id) = id {
                    let result = self.calendar.select_preset(&id);
                    self.note_events(&result.events);
                }
                return true;
            }
            _ => {}
        }

        match self.calendar.sub_view() {
            SubView::Days => {
                let result = self.calendar.on_key(key);
                self.note_events(&result.events);
                // Keyboard navigation previews from the focused date.
                let focused = self.calendar.focused_date();
                self.calendar.hover(focused);
            }
            SubView::Months => self.handle_picker_key(key, true),
            SubView::Years => self.handle_picker_key(key, false),
        }
        true
    }

    fn handle_picker_key(&mut self, key: KeyEvent, months: bool) {
        use dategrid::KeyCode;

        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                let cursor = if months {
                    &mut self.month_cursor
                } else {
                    &mut self.year_cursor
                };
                match key.code {
                    KeyCode::Left => *cursor = cursor.saturating_sub(1),
                    KeyCode::Right => *cursor = (*cursor + 1).min(11),
                    KeyCode::Up => *cursor = cursor.saturating_sub(4),
                    _ => *cursor = (*cursor + 4).min(11),
                }
            }
            KeyCode::Char('[') => {
                if months {
                    self.calendar.step_year(-1);
                } else {
                    self.calendar.page_decade(-1);
                }
            }
            KeyCode::Char(']') => {
                if months {
                    self.calendar.step_year(1);
                } else {
                    self.calendar.page_decade(1);
                }
            }
            KeyCode::Enter => {
                if months {
                    self.calendar.select_month(self.month_cursor as u8 + 1);
                } else {
                    let window = self.calendar.year_window();
                    if let Some(entry) = window.get(self.year_cursor) {
                        self.calendar.select_year(entry.year);
                    }
                }
            }
            _ => {}
        }
    }
}

fn event_loop(stdout: &mut Stdout) -> io::Result<()> {
    let mut demo = Demo::new();
    render(stdout, &demo)?;

    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if !demo.handle_key(KeyEvent::from(key)) {
                    break;
                }
                render(stdout, &demo)?;
            }
            Event::Resize(..) => render(stdout, &demo)?,
            _ => {}
        }
    }
    Ok(())
}

fn next_line(stdout: &mut Stdout, row: &mut u16) -> io::Result<()> {
    *row += 1;
    queue!(stdout, MoveTo(0, *row))
}

fn render(stdout: &mut Stdout, demo: &Demo) -> io::Result<()> {
    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    let calendar = &demo.calendar;
    let mut row = 0u16;

    queue!(
        stdout,
        SetAttribute(Attribute::Bold),
        Print(format!("  {}", calendar.displayed_label())),
        SetAttribute(Attribute::Reset),
        Print("   [m]onths [y]ears [c]lear [a]pply [1-3] presets [q]uit"),
    )?;
    next_line(stdout, &mut row)?;
    next_line(stdout, &mut row)?;

    match calendar.sub_view() {
        SubView::Days => render_days(stdout, demo, &mut row)?,
        SubView::Months => render_months(stdout, demo, &mut row)?,
        SubView::Years => render_years(stdout, demo, &mut row)?,
    }

    next_line(stdout, &mut row)?;
    queue!(stdout, Print(format!("  value: {:?}", calendar.value())))?;
    next_line(stdout, &mut row)?;
    let presets: Vec<String> = calendar
        .presets()
        .iter()
        .map(|p| {
            if calendar.active_preset() == Some(p.id.as_str()) {
                format!("*{}*", p.label)
            } else {
                p.label.clone()
            }
        })
        .collect();
    queue!(stdout, Print(format!("  presets: {}", presets.join(" | "))))?;
    if !demo.last_event.is_empty() {
        next_line(stdout, &mut row)?;
        queue!(stdout, Print(format!("  last: {}", demo.last_event)))?;
    }

    queue!(stdout, ResetColor)?;
    stdout.flush()
}

fn render_days(stdout: &mut Stdout, demo: &Demo, row: &mut u16) -> io::Result<()> {
    let header: String = (0..7)
        .map(|day| format!("  {}", Weekday(day).short_name()))
        .collect();
    queue!(
        stdout,
        SetForegroundColor(Color::DarkGrey),
        Print(format!(" {header}")),
        ResetColor,
    )?;
    next_line(stdout, row)?;

    for week in demo.calendar.render_cells() {
        queue!(stdout, Print("  "))?;
        for rc in week {
            let color = match rc.state {
                DayState::Disabled => Color::DarkGrey,
                DayState::Selected | DayState::RangeStart | DayState::RangeEnd => Color::Cyan,
                DayState::RangeCenter => Color::Blue,
                DayState::Today => Color::Yellow,
                DayState::Default => {
                    if rc.cell.origin == CellOrigin::CurrentMonth {
                        Color::Reset
                    } else {
                        Color::DarkGrey
                    }
                }
            };
            let (l, r) = if rc.focused { ('[', ']') } else { (' ', ' ') };
            queue!(
                stdout,
                SetForegroundColor(color),
                Print(format!("{}{:2}{}", l, rc.cell.day, r)),
                ResetColor,
            )?;
        }
        next_line(stdout, row)?;
    }

    if let Some(weeks) = demo.calendar.render_secondary_cells() {
        next_line(stdout, row)?;
        for week in weeks {
            let days: Vec<String> = week.iter().map(|rc| format!("{:2}", rc.cell.day)).collect();
            queue!(stdout, Print(format!("  {}", days.join("  "))))?;
            next_line(stdout, row)?;
        }
    }
    Ok(())
}

fn render_months(stdout: &mut Stdout, demo: &Demo, row: &mut u16) -> io::Result<()> {
    let year = demo.calendar.displayed().0;
    queue!(
        stdout,
        Print(format!("  [ {year} ]   ('[' / ']' steps the year)"))
    )?;
    next_line(stdout, row)?;
    next_line(stdout, row)?;

    for chunk in 0..3 {
        queue!(stdout, Print("  "))?;
        for slot in 0..4 {
            let index = chunk * 4 + slot;
            let name = &MONTH_NAMES[index][..3];
            if index == demo.month_cursor {
                queue!(stdout, Print(format!("[{name}] ")))?;
            } else {
                queue!(stdout, Print(format!(" {name}  ")))?;
            }
        }
        next_line(stdout, row)?;
    }
    Ok(())
}

fn render_years(stdout: &mut Stdout, demo: &Demo, row: &mut u16) -> io::Result<()> {
    queue!(stdout, Print("  ('[' / ']' steps the decade)"))?;
    next_line(stdout, row)?;
    next_line(stdout, row)?;

    let window = demo.calendar.year_window();
    for chunk in 0..3 {
        queue!(stdout, Print("  "))?;
        for slot in 0..4 {
            let index = chunk * 4 + slot;
            let entry = window[index];
            let color = if entry.selectable {
                Color::Reset
            } else {
                Color::DarkGrey
            };
            let (l, r) = if index == demo.year_cursor {
                ('[', ']')
            } else {
                (' ', ' ')
            };
            queue!(
                stdout,
                SetForegroundColor(color),
                Print(format!("{}{}{} ", l, entry.year, r)),
                ResetColor,
            )?;
        }
        next_line(stdout, row)?;
    }
    Ok(())
}
