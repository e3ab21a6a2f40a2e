//! Birth-parameter parsing and validation.
//!
//! Raw request strings are turned into typed parameters once, up front.
//! Everything after this point works on [`BirthParams`].

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ziwei_base::{Gender, time_slot_from_time};

use crate::error::ChartError;

/// Calendar the birth date is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarKind {
    Solar,
    Lunar,
}

impl CalendarKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Solar => "solar",
            Self::Lunar => "lunar",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "solar" => Some(Self::Solar),
            "lunar" => Some(Self::Lunar),
            _ => None,
        }
    }
}

/// A lunar calendar date. Lunar months have 29 or 30 days, so this is not a
/// Gregorian date and is validated only for plausible ranges here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    #[serde(default)]
    pub is_leap_month: bool,
}

impl LunarDate {
    pub fn new(year: i32, month: u8, day: u8, is_leap_month: bool) -> Result<Self, ChartError> {
        if !(1..=12).contains(&month) {
            return Err(ChartError::Validation(format!(
                "lunar month {month} out of range 1-12"
            )));
        }
        if !(1..=30).contains(&day) {
            return Err(ChartError::Validation(format!(
                "lunar day {day} out of range 1-30"
            )));
        }
        Ok(Self {
            year,
            month,
            day,
            is_leap_month,
        })
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leap = if self.is_leap_month { "闰" } else { "" };
        write!(f, "{}-{leap}{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Birth date in the calendar it was given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthDate {
    Solar(NaiveDate),
    Lunar(LunarDate),
}

impl BirthDate {
    pub fn calendar(&self) -> CalendarKind {
        match self {
            Self::Solar(_) => CalendarKind::Solar,
            Self::Lunar(_) => CalendarKind::Lunar,
        }
    }
}

/// Raw chart request, as received. Also echoed back in the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthInput {
    /// `YYYY-MM-DD` in the chosen calendar.
    pub birth_date: String,
    /// `HH:mm`, 24-hour clock.
    pub birth_time: String,
    /// `male` or `female`.
    pub gender: String,
    /// `solar` or `lunar`.
    pub calendar: String,
    /// Lunar input only: the month is the leap month of that year.
    #[serde(default)]
    pub leap_month: bool,
}

impl BirthInput {
    pub fn new(
        birth_date: impl Into<String>,
        birth_time: impl Into<String>,
        gender: impl Into<String>,
        calendar: impl Into<String>,
    ) -> Self {
        Self {
            birth_date: birth_date.into(),
            birth_time: birth_time.into(),
            gender: gender.into(),
            calendar: calendar.into(),
            leap_month: false,
        }
    }

    pub fn with_leap_month(mut self, leap_month: bool) -> Self {
        self.leap_month = leap_month;
        self
    }

    /// Validate every field and derive the time-slot index.
    pub fn parse(&self) -> Result<BirthParams, ChartError> {
        let calendar = CalendarKind::parse(&self.calendar).ok_or_else(|| {
            ChartError::Validation(format!(
                "calendar must be `solar` or `lunar`, got `{}`",
                self.calendar
            ))
        })?;
        let gender = Gender::parse(&self.gender).ok_or_else(|| {
            ChartError::Validation(format!(
                "gender must be `male` or `female`, got `{}`",
                self.gender
            ))
        })?;
        let time = parse_time(&self.birth_time)?;

        let date = match calendar {
            CalendarKind::Solar => {
                if self.leap_month {
                    return Err(ChartError::Validation(
                        "leap_month applies to lunar dates only".to_string(),
                    ));
                }
                BirthDate::Solar(parse_solar_date(&self.birth_date)?)
            }
            CalendarKind::Lunar => {
                BirthDate::Lunar(parse_lunar_date(&self.birth_date, self.leap_month)?)
            }
        };

        let time_index = time_slot_from_time(time);
        debug!(time_index, calendar = calendar.name(), "birth input parsed");
        Ok(BirthParams {
            date,
            time,
            time_index,
            gender,
        })
    }
}

/// Validated birth parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthParams {
    pub date: BirthDate,
    pub time: NaiveTime,
    /// Two-hour slot, 0 (子时) to 11 (亥时).
    pub time_index: u8,
    pub gender: Gender,
}

/// `true` when `s` matches `pattern` byte for byte, where `d` stands for
/// any ASCII digit.
fn has_shape(s: &str, pattern: &str) -> bool {
    s.len() == pattern.len()
        && s.bytes().zip(pattern.bytes()).all(|(c, p)| match p {
            b'd' => c.is_ascii_digit(),
            _ => c == p,
        })
}

const DATE_SHAPE: &str = "dddd-dd-dd";
const TIME_SHAPE: &str = "dd:dd";

fn parse_time(s: &str) -> Result<NaiveTime, ChartError> {
    let bad = || ChartError::Validation(format!("birth time must be HH:mm, got `{s}`"));
    if !has_shape(s, TIME_SHAPE) {
        return Err(bad());
    }
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| bad())
}

fn parse_solar_date(s: &str) -> Result<NaiveDate, ChartError> {
    let bad =
        || ChartError::Validation(format!("birth date must be a valid YYYY-MM-DD, got `{s}`"));
    if !has_shape(s, DATE_SHAPE) {
        return Err(bad());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| bad())
}

fn parse_lunar_date(s: &str, is_leap_month: bool) -> Result<LunarDate, ChartError> {
    let bad = || ChartError::Validation(format!("lunar birth date must be YYYY-MM-DD, got `{s}`"));
    if !has_shape(s, DATE_SHAPE) {
        return Err(bad());
    }
    let year = s[0..4].parse::<i32>().map_err(|_| bad())?;
    let month = s[5..7].parse::<u8>().map_err(|_| bad())?;
    let day = s[8..10].parse::<u8>().map_err(|_| bad())?;
    LunarDate::new(year, month, day, is_leap_month)
}
