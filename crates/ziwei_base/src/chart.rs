//! Natal chart model: twelve palaces populated with stars.
//!
//! The chart is produced by an external placement library and consumed here
//! read-only. Field names follow the placement library's JSON so a chart can
//! be deserialized directly from its output.

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::error::ZiweiError;
use crate::horoscope::HoroscopeStarCategories;
use crate::star::Star;

/// Number of palaces in a chart.
pub const PALACE_COUNT: usize = 12;

/// Gender of the chart subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "男", alias = "male")]
    Male,
    #[serde(rename = "女", alias = "female")]
    Female,
}

impl Gender {
    /// Chinese glyph, as the placement library expects it.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Male => "男",
            Self::Female => "女",
        }
    }

    /// Request-parameter spelling.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Parse `male`/`female` (case-insensitive) or the Chinese glyph.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "男" => Some(Self::Male),
            "female" | "女" => Some(Self::Female),
            _ => None,
        }
    }
}

/// Decadal (大限) period assigned to a palace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decadal {
    /// Inclusive age range `[low, high]`.
    pub range: [u16; 2],
    #[serde(default)]
    pub heavenly_stem: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earthly_branch: Option<Branch>,
}

/// One of the twelve palaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palace {
    /// Position in the chart (0-11), unique across the chart.
    pub index: u8,
    pub name: String,
    #[serde(default)]
    pub is_body_palace: bool,
    #[serde(default)]
    pub is_original_palace: bool,
    pub heavenly_stem: String,
    pub earthly_branch: Branch,
    #[serde(default)]
    pub major_stars: Vec<Star>,
    #[serde(default)]
    pub minor_stars: Vec<Star>,
    #[serde(default)]
    pub adjective_stars: Vec<Star>,
    #[serde(default)]
    pub changsheng12: String,
    #[serde(default)]
    pub boshi12: String,
    #[serde(default)]
    pub jiangqian12: String,
    #[serde(default)]
    pub suiqian12: String,
    pub decadal: Decadal,
    #[serde(default)]
    pub ages: Vec<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horoscope_star_categories: Option<HoroscopeStarCategories>,
}

impl Palace {
    /// All stars in this palace: major, then minor, then adjective.
    pub fn stars(&self) -> impl Iterator<Item = &Star> {
        self.major_stars
            .iter()
            .chain(self.minor_stars.iter())
            .chain(self.adjective_stars.iter())
    }

    /// Mutable access to all stars, in the same order as [`Palace::stars`].
    pub fn stars_mut(&mut self) -> impl Iterator<Item = &mut Star> {
        self.major_stars
            .iter_mut()
            .chain(self.minor_stars.iter_mut())
            .chain(self.adjective_stars.iter_mut())
    }

    /// Whether the palace name matches `name`, ignoring a trailing `宫`.
    pub fn is_named(&self, name: &str) -> bool {
        let strip = |s: &str| s.trim().trim_end_matches('宫').to_string();
        strip(&self.name) == strip(name)
    }
}

/// A placed natal chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatalChart {
    pub gender: Gender,
    pub solar_date: String,
    pub lunar_date: String,
    /// Four-pillar (八字) text.
    pub chinese_date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub time_range: String,
    #[serde(default)]
    pub sign: String,
    #[serde(default)]
    pub zodiac: String,
    pub soul: String,
    pub body: String,
    pub five_elements_class: String,
    pub earthly_branch_of_soul_palace: Branch,
    pub earthly_branch_of_body_palace: Branch,
    pub palaces: Vec<Palace>,
}

impl NatalChart {
    /// Check the structural invariants every derivation relies on.
    ///
    /// - exactly 12 palaces with unique indices in 0..12
    /// - palace branches are a permutation of all 12 branches
    /// - decadal ranges are ordered
    pub fn validate(&self) -> Result<(), ZiweiError> {
        if self.palaces.len() != PALACE_COUNT {
            return Err(ZiweiError::InvalidChart(format!(
                "expected {PALACE_COUNT} palaces, got {}",
                self.palaces.len()
            )));
        }

        let mut seen_index = [false; PALACE_COUNT];
        let mut seen_branch = [false; PALACE_COUNT];
        for palace in &self.palaces {
            let i = palace.index as usize;
            if i >= PALACE_COUNT {
                return Err(ZiweiError::InvalidChart(format!(
                    "palace index {i} out of range"
                )));
            }
            if seen_index[i] {
                return Err(ZiweiError::InvalidChart(format!(
                    "duplicate palace index {i}"
                )));
            }
            seen_index[i] = true;

            let b = palace.earthly_branch.index() as usize;
            if seen_branch[b] {
                return Err(ZiweiError::InvalidChart(format!(
                    "branch {} assigned to more than one palace",
                    palace.earthly_branch
                )));
            }
            seen_branch[b] = true;

            let [low, high] = palace.decadal.range;
            if low > high {
                return Err(ZiweiError::InvalidChart(format!(
                    "palace {i} has decadal range {low}-{high}"
                )));
            }
        }
        // 12 distinct branches: every branch is present, so the soul and body
        // palaces each resolve to exactly one palace.
        Ok(())
    }

    /// Palace with the given index.
    pub fn palace(&self, index: u8) -> Option<&Palace> {
        self.palaces.iter().find(|p| p.index == index)
    }

    /// Palace sitting on the given branch.
    pub fn palace_by_branch(&self, branch: Branch) -> Option<&Palace> {
        self.palaces.iter().find(|p| p.earthly_branch == branch)
    }

    /// Palace with the given name (a trailing `宫` is ignored).
    pub fn palace_by_name(&self, name: &str) -> Option<&Palace> {
        self.palaces.iter().find(|p| p.is_named(name))
    }

    /// The soul palace (命宫).
    pub fn soul_palace(&self) -> Option<&Palace> {
        self.palace_by_branch(self.earthly_branch_of_soul_palace)
    }

    /// The body palace (身宫). May be the soul palace.
    pub fn body_palace(&self) -> Option<&Palace> {
        self.palace_by_branch(self.earthly_branch_of_body_palace)
    }

    /// Every star in the chart with the index of the palace holding it,
    /// walking palaces in chart order.
    pub fn stars(&self) -> impl Iterator<Item = (u8, &Star)> {
        self.palaces
            .iter()
            .flat_map(|p| p.stars().map(move |s| (p.index, s)))
    }
}
