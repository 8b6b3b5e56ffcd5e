use crate::date::{Date, days_in_month, first_weekday_of_month, month_name};

// ── Cells ─────────────────────────────────────────────────────────────────────

/// Which month supplied a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellOrigin {
    PreviousMonth,
    CurrentMonth,
    NextMonth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u8,
    pub date: Date,
    pub origin: CellOrigin,
    pub is_today: bool,
}

// ── MonthGrid ─────────────────────────────────────────────────────────────────

/// A month laid out as complete Monday-first weeks. Cells falling before the
/// first or after the last of the month are filled from the adjacent months.
/// Built fresh per render; never stored.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u8,
    pub weeks: Vec<[DayCell; 7]>,
}

impl MonthGrid {
    pub fn new(year: i32, month: u8, today: Date) -> Self {
        let lead = first_weekday_of_month(year, month).0 as usize;
        let month_days = days_in_month(year, month) as usize;
        let total = (lead + month_days).div_ceil(7) * 7;

        let mut cursor = Date::first_of_month(year, month).add_days(-(lead as i32));
        let mut weeks = Vec::with_capacity(total / 7);
        let mut week: Vec<DayCell> = Vec::with_capacity(7);

        for _ in 0..total {
            let origin = match (cursor.year, cursor.month).cmp(&(year, month)) {
                std::cmp::Ordering::Less => CellOrigin::PreviousMonth,
                std::cmp::Ordering::Equal => CellOrigin::CurrentMonth,
                std::cmp::Ordering::Greater => CellOrigin::NextMonth,
            };
            week.push(DayCell {
                day: cursor.day,
                date: cursor,
                origin,
                is_today: cursor == today,
            });
            if week.len() == 7 {
                let full: [DayCell; 7] = week
                    .as_slice()
                    .try_into()
                    .unwrap_or_else(|_| unreachable!("week holds exactly 7 cells"));
                weeks.push(full);
                week.clear();
            }
            cursor = cursor.add_days(1);
        }

        Self { year, month, weeks }
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }

    pub fn contains(&self, date: Date) -> bool {
        self.weeks
            .iter()
            .flatten()
            .any(|cell| cell.date == date)
    }
}
