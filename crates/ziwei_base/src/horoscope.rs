//! Horoscope overlay (运限) star classification.
//!
//! Decadal and yearly overlay stars are sorted per palace into three fixed
//! buckets by name membership. Manual corrections are applied afterwards by
//! [`crate::correction::CorrectionTable`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::PALACE_COUNT;
use crate::error::ZiweiError;

/// Year-opening spirits and the annual sha/tuo/kui/yue and unlock stars.
pub const SUIJIAN12_STARS: [&str; 22] = [
    "岁建", "晦气", "丧门", "贯索", "官符", "小耗", "大耗", "龙德", "白虎", "天德", "吊客", "病符",
    "流羊", "年羊", "流陀", "流魁", "流钺", "年解", "运羊", "运陀", "运魁", "运钺",
];

/// Romance, travelling-horse and scholar overlay stars.
pub const LUANXI_STARS: [&str; 10] = [
    "流鸾", "流喜", "运鸾", "运喜", "流马", "运马", "流昌", "流曲", "运昌", "运曲",
];

/// Bucket a horoscope star is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoroscopeCategory {
    Suijian12,
    Luanxi,
    Other,
}

pub const ALL_HOROSCOPE_CATEGORIES: [HoroscopeCategory; 3] = [
    HoroscopeCategory::Suijian12,
    HoroscopeCategory::Luanxi,
    HoroscopeCategory::Other,
];

impl HoroscopeCategory {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Suijian12 => "suijian12",
            Self::Luanxi => "luanxi",
            Self::Other => "other",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        ALL_HOROSCOPE_CATEGORIES
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
    }
}

/// Classify one overlay star by name.
pub fn classify_horoscope_star(name: &str) -> HoroscopeCategory {
    let name = name.trim();
    if SUIJIAN12_STARS.contains(&name) {
        HoroscopeCategory::Suijian12
    } else if LUANXI_STARS.contains(&name) {
        HoroscopeCategory::Luanxi
    } else {
        HoroscopeCategory::Other
    }
}

/// Overlay stars of one palace, by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoroscopeStarCategories {
    #[serde(default)]
    pub suijian12: Vec<String>,
    #[serde(default)]
    pub luanxi: Vec<String>,
    #[serde(default)]
    pub other: Vec<String>,
}

impl HoroscopeStarCategories {
    pub fn get(&self, category: HoroscopeCategory) -> &[String] {
        match category {
            HoroscopeCategory::Suijian12 => &self.suijian12,
            HoroscopeCategory::Luanxi => &self.luanxi,
            HoroscopeCategory::Other => &self.other,
        }
    }

    fn get_mut(&mut self, category: HoroscopeCategory) -> &mut Vec<String> {
        match category {
            HoroscopeCategory::Suijian12 => &mut self.suijian12,
            HoroscopeCategory::Luanxi => &mut self.luanxi,
            HoroscopeCategory::Other => &mut self.other,
        }
    }

    pub fn contains(&self, category: HoroscopeCategory, star: &str) -> bool {
        self.get(category).iter().any(|s| s == star)
    }

    /// Add `star` to `category`. Returns false if it was already there.
    pub fn insert(&mut self, category: HoroscopeCategory, star: &str) -> bool {
        if self.contains(category, star) {
            return false;
        }
        self.get_mut(category).push(star.to_string());
        true
    }

    /// Remove `star` from `category`. Returns false if it was not there.
    pub fn remove(&mut self, category: HoroscopeCategory, star: &str) -> bool {
        let bucket = self.get_mut(category);
        let before = bucket.len();
        bucket.retain(|s| s != star);
        bucket.len() != before
    }

    pub fn len(&self) -> usize {
        self.suijian12.len() + self.luanxi.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decadal and yearly overlay star names, one list per palace index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoroscopeOverlay {
    pub decadal: Vec<Vec<String>>,
    pub yearly: Vec<Vec<String>>,
}

impl HoroscopeOverlay {
    /// Both layers must cover exactly 12 palaces.
    pub fn validate(&self) -> Result<(), ZiweiError> {
        for (layer, lists) in [("decadal", &self.decadal), ("yearly", &self.yearly)] {
            if lists.len() != PALACE_COUNT {
                return Err(ZiweiError::InvalidOverlay(format!(
                    "{layer} layer has {} palaces, expected {PALACE_COUNT}",
                    lists.len()
                )));
            }
        }
        Ok(())
    }
}

/// Classify every overlay star, decadal before yearly, into per-palace
/// buckets indexed by palace index. A name repeated in one palace is kept
/// once.
pub fn categorize_overlay(
    overlay: &HoroscopeOverlay,
) -> Result<Vec<HoroscopeStarCategories>, ZiweiError> {
    overlay.validate()?;
    let mut out = vec![HoroscopeStarCategories::default(); PALACE_COUNT];
    for (palace, cats) in out.iter_mut().enumerate() {
        for name in overlay.decadal[palace].iter().chain(&overlay.yearly[palace]) {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            cats.insert(classify_horoscope_star(name), name);
        }
    }
    debug!(
        stars = out.iter().map(HoroscopeStarCategories::len).sum::<usize>(),
        "horoscope overlay categorized"
    );
    Ok(out)
}
