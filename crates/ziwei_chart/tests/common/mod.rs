//! Recorded calendar and placement backends for pipeline tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use ziwei_base::NatalChart;
use ziwei_chart::{
    CalendarError, ChartPlacer, LunarCalendar, LunarDate, LunarDescription, PlacementError,
    PlacementRequest,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn fixture_chart() -> NatalChart {
    let json = include_str!("../../../ziwei_base/tests/fixtures/natal_2025_01_29_male.json");
    serde_json::from_str(json).unwrap()
}

fn describe(
    lunar: LunarDate,
    gz: [&str; 3],
    month_chinese: &str,
    day_chinese: &str,
) -> LunarDescription {
    LunarDescription {
        lunar,
        year_gan_zhi: gz[0].to_string(),
        month_gan_zhi: gz[1].to_string(),
        day_gan_zhi: gz[2].to_string(),
        month_chinese: month_chinese.to_string(),
        day_chinese: day_chinese.to_string(),
    }
}

/// A handful of known conversions.
pub struct TableCalendar {
    pub rows: Vec<(NaiveDate, LunarDescription)>,
}

impl TableCalendar {
    pub fn new() -> Self {
        let lunar = |y, m, d, leap| LunarDate::new(y, m, d, leap).unwrap();
        Self {
            rows: vec![
                (
                    date(2025, 1, 29),
                    describe(lunar(2025, 1, 1, false), ["乙巳", "丁丑", "戊戌"], "正", "初一"),
                ),
                (
                    date(2023, 2, 20),
                    describe(lunar(2023, 2, 1, false), ["癸卯", "甲寅", "己酉"], "二", "初一"),
                ),
                (
                    date(2023, 3, 22),
                    describe(lunar(2023, 2, 1, true), ["癸卯", "乙卯", "己卯"], "闰二", "初一"),
                ),
            ],
        }
    }
}

impl LunarCalendar for TableCalendar {
    fn name(&self) -> &'static str {
        "table"
    }

    fn lunar_to_solar(&self, date: &LunarDate) -> Result<NaiveDate, CalendarError> {
        self.rows
            .iter()
            .find(|(_, d)| d.lunar == *date)
            .map(|(solar, _)| *solar)
            .ok_or_else(|| CalendarError::NoSuchDate(date.to_string()))
    }

    fn describe_solar(&self, date: NaiveDate) -> Result<LunarDescription, CalendarError> {
        self.rows
            .iter()
            .find(|(solar, _)| *solar == date)
            .map(|(_, d)| d.clone())
            .ok_or_else(|| CalendarError::OutOfRange(date.to_string()))
    }
}

/// Converts every lunar date to 2025-01-29, breaking the round trip.
pub struct SkewedCalendar(pub TableCalendar);

impl LunarCalendar for SkewedCalendar {
    fn name(&self) -> &'static str {
        "skewed"
    }

    fn lunar_to_solar(&self, _date: &LunarDate) -> Result<NaiveDate, CalendarError> {
        Ok(date(2025, 1, 29))
    }

    fn describe_solar(&self, date: NaiveDate) -> Result<LunarDescription, CalendarError> {
        self.0.describe_solar(date)
    }
}

/// Returns the recorded chart and remembers the last request.
pub struct FixturePlacer {
    pub chart: NatalChart,
    pub last: std::sync::Mutex<Option<PlacementRequest>>,
}

impl FixturePlacer {
    pub fn new() -> Self {
        Self::with_chart(fixture_chart())
    }

    pub fn with_chart(chart: NatalChart) -> Self {
        Self {
            chart,
            last: std::sync::Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<PlacementRequest> {
        *self.last.lock().unwrap()
    }
}

impl ChartPlacer for FixturePlacer {
    fn name(&self) -> &'static str {
        "fixture"
    }

    fn place(&self, request: &PlacementRequest) -> Result<NatalChart, PlacementError> {
        *self.last.lock().unwrap() = Some(*request);
        Ok(self.chart.clone())
    }
}

pub struct FailingPlacer;

impl ChartPlacer for FailingPlacer {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn place(&self, _request: &PlacementRequest) -> Result<NatalChart, PlacementError> {
        Err(PlacementError("upstream service unavailable".to_string()))
    }
}
