//! Star-placement backend seam.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ziwei_base::{Gender, NatalChart};

use crate::error::PlacementError;

/// Everything the placement backend needs to lay out a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRequest {
    pub solar_date: NaiveDate,
    pub time_index: u8,
    pub gender: Gender,
    /// Split a leap month at its 15th day when placing month-based stars.
    pub fix_leap: bool,
}

/// Produces the base natal chart.
pub trait ChartPlacer: Send + Sync {
    fn name(&self) -> &'static str;

    fn place(&self, request: &PlacementRequest) -> Result<NatalChart, PlacementError>;
}

impl<T: ChartPlacer + ?Sized> ChartPlacer for &T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn place(&self, request: &PlacementRequest) -> Result<NatalChart, PlacementError> {
        (**self).place(request)
    }
}
