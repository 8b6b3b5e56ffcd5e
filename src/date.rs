use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ── Date ──────────────────────────────────────────────────────────────────────

/// A plain civil date. Field order gives chronological `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("expected YYYY-MM-DD, got {0:?}")]
    Shape(String),
    #[error("invalid month: {0}")]
    Month(u8),
    #[error("invalid day {day} for {year}-{month:02} (max {max})")]
    Day { year: i32, month: u8, day: u8, max: u8 },
}

// ── Weekday ───────────────────────────────────────────────────────────────────

/// Day of week, Monday-first (`MON` = 0 … `SUN` = 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weekday(pub u8);

impl Weekday {
    pub const MON: Self = Self(0);
    pub const TUE: Self = Self(1);
    pub const WED: Self = Self(2);
    pub const THU: Self = Self(3);
    pub const FRI: Self = Self(4);
    pub const SAT: Self = Self(5);
    pub const SUN: Self = Self(6);

    pub fn short_name(self) -> &'static str {
        ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"][self.0 as usize % 7]
    }
}

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn month_name(month: u8) -> &'static str {
    MONTH_NAMES[(month as usize).saturating_sub(1) % 12]
}

// ── Calendar math ─────────────────────────────────────────────────────────────

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

/// Sakamoto's congruence, shifted so Monday is 0.
pub fn weekday_of(date: Date) -> Weekday {
    let t: [i32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let y = if date.month < 3 {
        date.year - 1
    } else {
        date.year
    };
    let m = date.month as i32;
    let d = date.day as i32;
    let raw = (y + y / 4 - y / 100 + y / 400 + t[(m - 1) as usize] + d) % 7;
    Weekday(((raw + 6) % 7) as u8)
}

pub fn first_weekday_of_month(year: i32, month: u8) -> Weekday {
    weekday_of(Date {
        year,
        month,
        day: 1,
    })
}

/// Inclusive on both ends.
pub fn in_range(date: Date, start: Date, end: Date) -> bool {
    start <= date && date <= end
}

pub fn today() -> Date {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64;
    date_from_unix_days(secs / 86400)
}

/// Civil-from-days (Gregorian, proleptic).
fn date_from_unix_days(days: i64) -> Date {
    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    Date {
        year: y as i32,
        month: m as u8,
        day: d as u8,
    }
}

// ── Date methods ──────────────────────────────────────────────────────────────

impl Date {
    pub fn from_parts(year: i32, month: u8, day: u8) -> Result<Self, DateParseError> {
        if month < 1 || month > 12 {
            return Err(DateParseError::Month(month));
        }
        let max = days_in_month(year, month);
        if day < 1 || day > max {
            return Err(DateParseError::Day {
                year,
                month,
                day,
                max,
            });
        }
        Ok(Self { year, month, day })
    }

    pub fn first_of_month(year: i32, month: u8) -> Self {
        Self {
            year,
            month,
            day: 1,
        }
    }

    pub fn last_of_month(year: i32, month: u8) -> Self {
        Self {
            year,
            month,
            day: days_in_month(year, month),
        }
    }

    pub fn weekday(self) -> Weekday {
        weekday_of(self)
    }

    /// Month arithmetic with the day clamped to the target month's length.
    pub fn add_months(self, delta: i32) -> Self {
        let total = self.month as i32 - 1 + delta;
        let year = self.year + total.div_euclid(12);
        let month = (total.rem_euclid(12) + 1) as u8;
        let day = self.day.min(days_in_month(year, month));
        Self { year, month, day }
    }

    pub fn add_days(self, delta: i32) -> Self {
        let mut d = self;
        let step = if delta >= 0 { 1i32 } else { -1 };
        let mut remaining = delta.abs();
        while remaining > 0 {
            if step > 0 {
                if d.day < days_in_month(d.year, d.month) {
                    d.day += 1;
                } else {
                    d = Self {
                        year: d.year,
                        month: d.month,
                        day: 1,
                    }
                    .add_months(1);
                }
            } else if d.day > 1 {
                d.day -= 1;
            } else {
                let prev = prev_month_of(d);
                d = Self {
                    year: prev.0,
                    month: prev.1,
                    day: days_in_month(prev.0, prev.1),
                };
            }
            remaining -= 1;
        }
        d
    }

    /// Monday of this date's week.
    pub fn start_of_week(self) -> Self {
        self.add_days(-(self.weekday().0 as i32))
    }

    /// Sunday of this date's week.
    pub fn end_of_week(self) -> Self {
        self.add_days(6 - self.weekday().0 as i32)
    }

    pub fn to_iso(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

fn prev_month_of(d: Date) -> (i32, u8) {
    if d.month == 1 {
        (d.year - 1, 12)
    } else {
        (d.year, d.month - 1)
    }
}

// ── Formatting & serde ────────────────────────────────────────────────────────

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for Date {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segs: Vec<&str> = s.split('-').collect();
        if segs.len() != 3 {
            return Err(DateParseError::Shape(s.to_string()));
        }
        let (Ok(y), Ok(m), Ok(d)) = (
            segs[0].parse::<i32>(),
            segs[1].parse::<u8>(),
            segs[2].parse::<u8>(),
        ) else {
            return Err(DateParseError::Shape(s.to_string()));
        };
        Self::from_parts(y, m, d)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u8, day: u8) -> Date {
        Date { year, month, day }
    }

    #[test]
    fn leap_year_february_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn weekday_is_monday_first() {
        // 2024-01-01 was a Monday, 2024-03-10 a Sunday.
        assert_eq!(weekday_of(d(2024, 1, 1)), Weekday::MON);
        assert_eq!(weekday_of(d(2024, 3, 10)), Weekday::SUN);
        assert_eq!(weekday_of(d(2024, 2, 29)), Weekday::THU);
        assert_eq!(Weekday::MON.short_name(), "Mo");
        assert_eq!(weekday_of(d(2024, 3, 10)).short_name(), "Su");
    }

    #[test]
    fn add_months_rolls_over_year_and_clamps_day() {
        assert_eq!(d(2023, 12, 15).add_months(1), d(2024, 1, 15));
        assert_eq!(d(2024, 1, 31).add_months(1), d(2024, 2, 29));
        assert_eq!(d(2024, 1, 15).add_months(-1), d(2023, 12, 15));
        assert_eq!(d(2024, 3, 31).add_months(-1), d(2024, 2, 29));
    }

    #[test]
    fn add_days_crosses_month_and_year_boundaries() {
        assert_eq!(d(2024, 2, 28).add_days(1), d(2024, 2, 29));
        assert_eq!(d(2024, 2, 29).add_days(1), d(2024, 3, 1));
        assert_eq!(d(2024, 1, 1).add_days(-1), d(2023, 12, 31));
        assert_eq!(d(2024, 3, 10).add_days(-7), d(2024, 3, 3));
    }

    #[test]
    fn week_bounds_land_on_monday_and_sunday() {
        // 2024-03-06 is a Wednesday.
        assert_eq!(d(2024, 3, 6).start_of_week(), d(2024, 3, 4));
        assert_eq!(d(2024, 3, 6).end_of_week(), d(2024, 3, 10));
        // Already at the bounds.
        assert_eq!(d(2024, 3, 4).start_of_week(), d(2024, 3, 4));
        assert_eq!(d(2024, 3, 10).end_of_week(), d(2024, 3, 10));
    }

    #[test]
    fn in_range_is_inclusive() {
        let (start, end) = (d(2024, 3, 5), d(2024, 3, 10));
        assert!(in_range(start, start, end));
        assert!(in_range(end, start, end));
        assert!(in_range(d(2024, 3, 7), start, end));
        assert!(!in_range(d(2024, 3, 4), start, end));
        assert!(!in_range(d(2024, 3, 11), start, end));
    }

    #[test]
    fn iso_round_trip_and_errors() {
        assert_eq!("2024-03-05".parse::<Date>(), Ok(d(2024, 3, 5)));
        assert_eq!(d(2024, 3, 5).to_iso(), "2024-03-05");
        assert!(matches!(
            "2024-13-05".parse::<Date>(),
            Err(DateParseError::Month(13))
        ));
        assert!(matches!(
            "2023-02-29".parse::<Date>(),
            Err(DateParseError::Day { .. })
        ));
        assert!(matches!(
            "march 5".parse::<Date>(),
            Err(DateParseError::Shape(_))
        ));
    }

    #[test]
    fn serde_uses_iso_strings() {
        let json = serde_json::to_string(&d(2024, 2, 29)).expect("serialize");
        assert_eq!(json, "\"2024-02-29\"");
        let back: Date = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, d(2024, 2, 29));
        assert!(serde_json::from_str::<Date>("\"2023-02-29\"").is_err());
    }

    #[test]
    fn civil_from_days_epoch_and_leap() {
        assert_eq!(super::date_from_unix_days(0), d(1970, 1, 1));
        assert_eq!(super::date_from_unix_days(19_782), d(2024, 2, 29));
    }
}
