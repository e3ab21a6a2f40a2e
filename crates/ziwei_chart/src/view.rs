//! Chart-type dispatch over the derived views.

use serde::{Deserialize, Serialize};
use ziwei_base::{
    FlyingStarEntry, NatalChart, SanheGroup, SihuaDisplay, flying_stars, sanhe_groups,
    sihua_display,
};

/// Which derived view a chart is presented as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChartView {
    /// Three-harmony groups (三方四正).
    #[default]
    #[serde(rename = "sanhe", alias = "trine")]
    Trine,
    /// Flying-star records (飞星).
    #[serde(rename = "flying")]
    Flying,
    /// Four-transformation buckets (四化).
    #[serde(rename = "sihua")]
    Sihua,
}

pub const ALL_CHART_VIEWS: [ChartView; 3] = [ChartView::Trine, ChartView::Flying, ChartView::Sihua];

impl ChartView {
    /// Wire tag.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Trine => "sanhe",
            Self::Flying => "flying",
            Self::Sihua => "sihua",
        }
    }

    /// Parse a wire tag; `trine` is accepted for the three-harmony view.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sanhe" | "trine" => Some(Self::Trine),
            "flying" => Some(Self::Flying),
            "sihua" => Some(Self::Sihua),
            _ => None,
        }
    }

    /// Build this view from a chart.
    pub fn derive(self, chart: &NatalChart, include_siblings: bool) -> DerivedView {
        match self {
            Self::Trine => DerivedView::Trine(sanhe_groups(chart, include_siblings)),
            Self::Flying => DerivedView::Flying(flying_stars(chart)),
            Self::Sihua => DerivedView::Sihua(sihua_display(chart)),
        }
    }
}

impl std::fmt::Display for ChartView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Output of one view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "chartType", content = "data")]
pub enum DerivedView {
    #[serde(rename = "sanhe")]
    Trine(Vec<SanheGroup>),
    #[serde(rename = "flying")]
    Flying(Vec<FlyingStarEntry>),
    #[serde(rename = "sihua")]
    Sihua(SihuaDisplay),
}

impl DerivedView {
    pub fn view(&self) -> ChartView {
        match self {
            Self::Trine(_) => ChartView::Trine,
            Self::Flying(_) => ChartView::Flying,
            Self::Sihua(_) => ChartView::Sihua,
        }
    }
}
