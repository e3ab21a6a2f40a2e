//! Recorded upstream responses, replayed as calendar and placement backends.
//!
//! A snapshot file holds one placed chart and the calendar conversions
//! needed to reconcile its birth date:
//!
//! ```json
//! { "chart": { ...NatalChart... },
//!   "lunarCalendar": [ { "solar": "2025-01-29", "lunar": {...}, "yearGanZhi": "乙巳", ... } ] }
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use ziwei_base::{NatalChart, slot_name};
use ziwei_chart::{
    CalendarError, ChartPlacer, LunarCalendar, LunarDate, LunarDescription, PlacementError,
    PlacementRequest,
};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// One recorded solar/lunar conversion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CalendarRecord {
    pub solar: NaiveDate,
    #[serde(flatten)]
    pub description: LunarDescription,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub chart: NatalChart,
    #[serde(default)]
    pub lunar_calendar: Vec<CalendarRecord>,
}

impl Snapshot {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: Self = serde_json::from_str(&text).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            path = %path.display(),
            conversions = snapshot.lunar_calendar.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Solar date the chart was recorded for. The placement library writes
    /// dates without zero padding (`2025-1-29`).
    pub fn recorded_solar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.chart.solar_date.trim(), "%Y-%m-%d").ok()
    }
}

impl LunarCalendar for Snapshot {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn lunar_to_solar(&self, date: &LunarDate) -> Result<NaiveDate, CalendarError> {
        self.lunar_calendar
            .iter()
            .find(|r| r.description.lunar == *date)
            .map(|r| r.solar)
            .ok_or_else(|| {
                CalendarError::NoSuchDate(format!("lunar {date} is not in the snapshot"))
            })
    }

    fn describe_solar(&self, date: NaiveDate) -> Result<LunarDescription, CalendarError> {
        self.lunar_calendar
            .iter()
            .find(|r| r.solar == date)
            .map(|r| r.description.clone())
            .ok_or_else(|| {
                CalendarError::OutOfRange(format!("solar {date} is not in the snapshot"))
            })
    }
}

impl ChartPlacer for Snapshot {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn place(&self, request: &PlacementRequest) -> Result<NatalChart, PlacementError> {
        let recorded = self.recorded_solar_date().ok_or_else(|| {
            PlacementError(format!(
                "snapshot chart has unreadable solarDate `{}`",
                self.chart.solar_date
            ))
        })?;
        if recorded != request.solar_date {
            return Err(PlacementError(format!(
                "snapshot recorded for {recorded}, request is for {}",
                request.solar_date
            )));
        }
        if self.chart.gender != request.gender {
            return Err(PlacementError(format!(
                "snapshot recorded for gender {}, request is {}",
                self.chart.gender.glyph(),
                request.gender.glyph()
            )));
        }
        if !self.chart.time.is_empty() {
            if let Some(name) = slot_name(request.time_index) {
                if name != self.chart.time {
                    return Err(PlacementError(format!(
                        "snapshot recorded for {}, request is {name}",
                        self.chart.time
                    )));
                }
            }
        }
        Ok(self.chart.clone())
    }
}
