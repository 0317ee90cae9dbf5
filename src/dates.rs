//! Calendar date keys (`YYYY-MM-DD`) used to index the journal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{macros::format_description, Date, Duration, Month, Time};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(Date);

impl DateKey {
    pub fn new(date: Date) -> Self {
        Self(date)
    }

    /// Shift by a whole number of days; `None` outside the supported range.
    pub fn offset_days(self, days: i64) -> Option<Self> {
        self.0.checked_add(Duration::days(days)).map(Self)
    }

    pub fn days_since(self, earlier: DateKey) -> i64 {
        (self.0 - earlier.0).whole_days()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self
            .0
            .format(format_description!("[year]-[month]-[day]"))
            .map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl FromStr for DateKey {
    type Err = time::error::Parse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s.trim(), format_description!("[year]-[month]-[day]")).map(Self)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A calendar month written as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthKey {
    pub year: i32,
    pub month: Month,
}

impl MonthKey {
    /// Every date of the month, in order.
    pub fn dates(self) -> Vec<DateKey> {
        let len = time::util::days_in_year_month(self.year, self.month);
        (1..=len)
            .filter_map(|day| Date::from_calendar_date(self.year, self.month, day).ok())
            .map(DateKey)
            .collect()
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (y, m) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("invalid month {s:?}, expected YYYY-MM"))?;
        if y.len() != 4 || m.len() != 2 {
            return Err(format!("invalid month {s:?}, expected YYYY-MM"));
        }
        let year = y.parse::<i32>().map_err(|e| e.to_string())?;
        let month = m
            .parse::<u8>()
            .map_err(|e| e.to_string())
            .and_then(|n| Month::try_from(n).map_err(|e| e.to_string()))?;
        Ok(Self { year, month })
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month as u8)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Normalizes a wall-clock time to `HH:MM`.
pub fn parse_clock_time(raw: &str) -> Option<String> {
    let t = Time::parse(raw.trim(), format_description!("[hour padding:none]:[minute]")).ok()?;
    Some(format!("{:02}:{:02}", t.hour(), t.minute()))
}
