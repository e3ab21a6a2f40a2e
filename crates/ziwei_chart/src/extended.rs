//! The extended chart: base chart plus request fields and derived views.

use serde::Serialize;
use ziwei_base::{
    AppliedCorrection, FlyingStarEntry, NatalChart, SanheGroup, SihuaBalance, SihuaDisplay,
};

use crate::normalize::BirthInput;
use crate::view::{ChartView, DerivedView};

/// A placed chart with every derived view attached.
///
/// Base-chart fields serialize at the top level, so consumers that only
/// read the base chart are unaffected by the additions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedChart {
    #[serde(flatten)]
    pub chart: NatalChart,
    pub chart_type: ChartView,
    /// Two-hour slot of the birth time.
    #[serde(rename = "birthTimeIndex")]
    pub time_index: u8,
    pub is_lunar_input: bool,
    pub original_input: BirthInput,
    pub sihua_display: SihuaDisplay,
    pub sihua_balance: SihuaBalance,
    pub sanhe_groups: Vec<SanheGroup>,
    pub flying_stars: Vec<FlyingStarEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub horoscope_corrections: Vec<AppliedCorrection>,
}

impl ExtendedChart {
    pub(crate) fn new(
        chart: NatalChart,
        chart_type: ChartView,
        time_index: u8,
        is_lunar_input: bool,
        original_input: BirthInput,
    ) -> Self {
        Self {
            chart,
            chart_type,
            time_index,
            is_lunar_input,
            original_input,
            sihua_display: SihuaDisplay::default(),
            sihua_balance: SihuaBalance::Empty,
            sanhe_groups: Vec::new(),
            flying_stars: Vec::new(),
            horoscope_corrections: Vec::new(),
        }
    }

    /// Store a derived view in its field.
    pub(crate) fn install(&mut self, view: DerivedView) {
        match view {
            DerivedView::Trine(groups) => self.sanhe_groups = groups,
            DerivedView::Flying(entries) => self.flying_stars = entries,
            DerivedView::Sihua(display) => {
                self.sihua_balance = display.balance();
                self.sihua_display = display;
            }
        }
    }

    /// The view selected by `chart_type`.
    pub fn primary_view(&self) -> DerivedView {
        self.view(self.chart_type)
    }

    pub fn view(&self, view: ChartView) -> DerivedView {
        match view {
            ChartView::Trine => DerivedView::Trine(self.sanhe_groups.clone()),
            ChartView::Flying => DerivedView::Flying(self.flying_stars.clone()),
            ChartView::Sihua => DerivedView::Sihua(self.sihua_display.clone()),
        }
    }
}
