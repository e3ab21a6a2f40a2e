//! Auspicious (吉星) and malefic (煞星) auxiliary stars.

use serde::{Deserialize, Serialize};

use crate::chart::Palace;
use crate::star::Star;

/// The six auspicious auxiliaries.
pub const AUSPICIOUS_STARS: [&str; 6] = ["文昌", "文曲", "左辅", "右弼", "天魁", "天钺"];

/// The six malefic auxiliaries.
pub const MALEFIC_STARS: [&str; 6] = ["擎羊", "陀罗", "火星", "铃星", "地空", "地劫"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Auspice {
    Auspicious,
    Malefic,
    Neutral,
}

pub fn classify_auspice(name: &str) -> Auspice {
    let name = name.trim();
    if AUSPICIOUS_STARS.contains(&name) {
        Auspice::Auspicious
    } else if MALEFIC_STARS.contains(&name) {
        Auspice::Malefic
    } else {
        Auspice::Neutral
    }
}

/// Auspicious and malefic stars of one palace, in palace star order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PalaceAuspice<'a> {
    pub auspicious: Vec<&'a Star>,
    pub malefic: Vec<&'a Star>,
}

/// Group a palace's stars by [`classify_auspice`]. Neutral stars are left out.
pub fn palace_auspice(palace: &Palace) -> PalaceAuspice<'_> {
    let mut out = PalaceAuspice::default();
    for star in palace.stars() {
        match classify_auspice(&star.name) {
            Auspice::Auspicious => out.auspicious.push(star),
            Auspice::Malefic => out.malefic.push(star),
            Auspice::Neutral => {}
        }
    }
    out
}
