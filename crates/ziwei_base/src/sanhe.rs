//! Three-harmony (三方四正) palace groups.
//!
//! A palace's group is itself, its two trine partners four positions away
//! on either side, and the palace directly opposite.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::chart::{NatalChart, PALACE_COUNT};

/// Label for the soul-palace group.
pub const SOUL_GROUP_LABEL: &str = "命宫三方四正";
/// Label for the siblings-palace group.
pub const SIBLINGS_GROUP_LABEL: &str = "兄弟宫三方四正";
/// Palace name used to locate the siblings palace.
pub const SIBLINGS_PALACE_NAME: &str = "兄弟";

/// A reference palace and the four palaces it relates to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanheGroup {
    pub center_palace: u8,
    /// `[P, P+4, P+8, P+6]` modulo 12.
    pub related_palaces: [u8; 4],
    pub group_type: String,
}

/// Palace indices related to `center`: itself, both trines, the opposite.
pub const fn sanhe_palaces(center: u8) -> [u8; 4] {
    let n = PALACE_COUNT as u8;
    let p = center % n;
    [p, (p + 4) % n, (p + 8) % n, (p + 6) % n]
}

pub fn sanhe_group(center: u8, label: &str) -> SanheGroup {
    SanheGroup {
        center_palace: center % PALACE_COUNT as u8,
        related_palaces: sanhe_palaces(center),
        group_type: label.to_string(),
    }
}

/// Group centred on the soul palace, or None when the chart has no palace
/// on the soul branch.
pub fn soul_sanhe(chart: &NatalChart) -> Option<SanheGroup> {
    chart
        .soul_palace()
        .map(|p| sanhe_group(p.index, SOUL_GROUP_LABEL))
}

/// Soul-palace group, followed by the siblings-palace group when requested.
///
/// A missing siblings palace is logged and skipped; it never removes the
/// soul group.
pub fn sanhe_groups(chart: &NatalChart, include_siblings: bool) -> Vec<SanheGroup> {
    let mut groups = Vec::with_capacity(2);
    match soul_sanhe(chart) {
        Some(g) => groups.push(g),
        None => warn!(
            branch = %chart.earthly_branch_of_soul_palace,
            "no palace on soul branch, soul sanhe group skipped"
        ),
    }
    if include_siblings {
        match chart.palace_by_name(SIBLINGS_PALACE_NAME) {
            Some(p) => groups.push(sanhe_group(p.index, SIBLINGS_GROUP_LABEL)),
            None => warn!("no siblings palace in chart, siblings sanhe group skipped"),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_for_zero() {
        assert_eq!(sanhe_palaces(0), [0, 4, 8, 6]);
    }

    #[test]
    fn wraps_around() {
        assert_eq!(sanhe_palaces(9), [9, 1, 5, 3]);
        assert_eq!(sanhe_palaces(11), [11, 3, 7, 5]);
    }

    #[test]
    fn out_of_range_center_is_reduced() {
        assert_eq!(sanhe_palaces(12), sanhe_palaces(0));
        assert_eq!(sanhe_group(14, "x").center_palace, 2);
    }

    #[test]
    fn label_is_kept() {
        let g = sanhe_group(3, SOUL_GROUP_LABEL);
        assert_eq!(g.group_type, "命宫三方四正");
        assert_eq!(g.related_palaces[0], 3);
    }
}
