//! Flying-star (飞星) records.
//!
//! One record per mutagen-tagged star. The destination palace of a flight
//! is not computed: `to_palace` always equals `from_palace`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::NatalChart;
use crate::star::Mutagen;

/// Time layer a transformation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlyingLevel {
    /// Natal chart (本命).
    Life,
    /// Decadal period (大限).
    Decade,
    /// Year (流年).
    Year,
    /// Month (流月).
    Month,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlyingStarEntry {
    pub from_palace: u8,
    pub to_palace: u8,
    pub star_name: String,
    pub mutagen: Mutagen,
    pub level: FlyingLevel,
}

/// Natal-level flying-star records, in chart walk order.
pub fn flying_stars(chart: &NatalChart) -> Vec<FlyingStarEntry> {
    let entries: Vec<FlyingStarEntry> = chart
        .stars()
        .filter_map(|(palace, star)| {
            star.mutagen.map(|mutagen| FlyingStarEntry {
                from_palace: palace,
                // TODO: resolve the palace a transformation flies into once a
                // destination rule is chosen.
                to_palace: palace,
                star_name: star.name.clone(),
                mutagen,
                level: FlyingLevel::Life,
            })
        })
        .collect();
    debug!(count = entries.len(), "flying stars extracted");
    entries
}

/// Count of records per transformation, in 禄, 权, 科, 忌 order.
pub fn mutagen_counts(entries: &[FlyingStarEntry]) -> [usize; 4] {
    let mut counts = [0usize; 4];
    for e in entries {
        counts[e.mutagen.index()] += 1;
    }
    counts
}
