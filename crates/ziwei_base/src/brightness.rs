//! Positional brightness (庙旺利陷) lookup.
//!
//! Each rated star has exactly 12 entries, one per branch in branch order
//! (子 first). A `None` cell means the star can never sit on that branch
//! (擎羊 never occupies 寅申巳亥, 陀罗 never occupies 子午卯酉).
//!
//! The table is a fallback: a rating already carried by the placement
//! library always wins.

use tracing::debug;

use crate::branch::Branch;
use crate::chart::NatalChart;
use crate::star::Brightness;

const M: Option<Brightness> = Some(Brightness::Miao);
const W: Option<Brightness> = Some(Brightness::Wang);
const D: Option<Brightness> = Some(Brightness::De);
const L: Option<Brightness> = Some(Brightness::Li);
const P: Option<Brightness> = Some(Brightness::Ping);
const X: Option<Brightness> = Some(Brightness::Xian);
const B: Option<Brightness> = Some(Brightness::Bu);
const N: Option<Brightness> = None;

/// One row per rated star. Columns: 子 丑 寅 卯 辰 巳 午 未 申 酉 戌 亥.
pub static BRIGHTNESS_TABLE: [(&str, [Option<Brightness>; 12]); 20] = [
    // 14 major stars
    ("紫微", [P, M, W, W, D, W, M, M, W, W, D, W]),
    ("天机", [M, X, D, W, L, P, M, X, D, W, L, P]),
    ("太阳", [X, B, W, M, W, W, W, D, D, X, B, X]),
    ("武曲", [W, M, D, L, M, P, W, M, D, L, M, P]),
    ("天同", [W, B, L, P, P, M, X, B, W, P, P, M]),
    ("廉贞", [P, L, M, P, L, X, P, L, M, P, L, X]),
    ("天府", [M, M, M, D, M, D, W, M, D, W, M, D]),
    ("太阴", [M, M, W, X, X, X, B, B, L, B, W, M]),
    ("贪狼", [W, M, P, L, M, X, W, M, P, L, M, X]),
    ("巨门", [W, B, M, M, X, W, W, B, M, M, X, W]),
    ("天相", [M, M, M, X, D, D, M, D, M, X, D, D]),
    ("天梁", [M, W, M, M, M, X, M, W, X, D, M, X]),
    ("七杀", [W, M, M, W, M, P, W, M, M, M, M, P]),
    ("破军", [M, W, D, X, W, P, M, W, D, X, W, P]),
    // rated assistants
    ("文昌", [D, M, X, L, D, M, X, L, D, M, X, L]),
    ("文曲", [D, M, P, W, D, M, X, W, D, M, X, W]),
    ("火星", [X, D, M, L, X, D, M, L, X, D, M, L]),
    ("铃星", [X, D, M, L, X, D, M, L, X, D, M, L]),
    ("擎羊", [X, M, N, X, M, N, X, M, N, X, M, N]),
    ("陀罗", [N, M, X, N, M, X, N, M, X, N, M, X]),
];

/// Auxiliary stars that carry no positional rating.
pub const UNRATED_STARS: [&str; 16] = [
    "左辅", "右弼", "天魁", "天钺", "禄存", "天马", "地空", "地劫", "红鸾", "天喜", "天姚", "天刑",
    "解神", "天巫", "咸池", "截路",
];

/// Full 12-branch row for a rated star.
pub fn brightness_row(star_name: &str) -> Option<&'static [Option<Brightness>; 12]> {
    BRIGHTNESS_TABLE
        .iter()
        .find(|(name, _)| *name == star_name)
        .map(|(_, row)| row)
}

/// Whether the star has no entry in the brightness table.
pub fn is_unrated(star_name: &str) -> bool {
    brightness_row(star_name).is_none()
}

/// Brightness of `star_name` on `branch`, or None when the star is unrated
/// or cannot occupy that branch.
pub fn brightness(star_name: &str, branch: Branch) -> Option<Brightness> {
    brightness_row(star_name).and_then(|row| row[branch.index() as usize])
}

/// Glyph form of [`brightness`]; `""` when there is no rating.
pub fn brightness_label(star_name: &str, branch: Branch) -> &'static str {
    brightness(star_name, branch).map_or("", Brightness::glyph)
}

/// Copy of `chart` with every missing brightness filled from the table.
///
/// Ratings already present are kept as-is.
pub fn fill_missing_brightness(chart: &NatalChart) -> NatalChart {
    let mut out = chart.clone();
    let mut filled = 0usize;
    for palace in &mut out.palaces {
        let branch = palace.earthly_branch;
        for star in palace.stars_mut() {
            if star.brightness.is_none() {
                if let Some(b) = brightness(&star.name, branch) {
                    star.brightness = Some(b);
                    filled += 1;
                }
            }
        }
    }
    debug!(filled, "filled missing star brightness");
    out
}
