//! Zi Wei Dou Shu (紫微斗数) chart model and derived views.
//!
//! This crate provides:
//! - Earthly branches and two-hour birth time slots
//! - The natal chart model (palaces, stars, brightness, transformations)
//! - Positional brightness fallback table
//! - Four-transformation buckets and balance, three-harmony groups, flying-star records
//! - Auspicious and malefic auxiliary grouping
//! - Horoscope overlay classification with a declarative correction table
//!
//! Everything here is a pure function of an already-placed chart. Star
//! placement and calendar conversion are done elsewhere.

pub mod auspice;
pub mod branch;
pub mod brightness;
pub mod chart;
pub mod correction;
pub mod error;
pub mod flying;
pub mod horoscope;
pub mod sanhe;
pub mod sihua;
pub mod star;
pub mod time_slot;

pub use auspice::{
    AUSPICIOUS_STARS, Auspice, MALEFIC_STARS, PalaceAuspice, classify_auspice, palace_auspice,
};
pub use branch::{ALL_BRANCHES, Branch};
pub use brightness::{
    BRIGHTNESS_TABLE, UNRATED_STARS, brightness, brightness_label, brightness_row,
    fill_missing_brightness, is_unrated,
};
pub use chart::{Decadal, Gender, NatalChart, PALACE_COUNT, Palace};
pub use correction::{
    AppliedCorrection, CORRECTION_TABLE_VERSION, CorrectedCategories, CorrectionKey,
    CorrectionPatch, CorrectionRecord, CorrectionTable, PatchOp,
};
pub use error::ZiweiError;
pub use flying::{FlyingLevel, FlyingStarEntry, flying_stars, mutagen_counts};
pub use horoscope::{
    ALL_HOROSCOPE_CATEGORIES, HoroscopeCategory, HoroscopeOverlay, HoroscopeStarCategories,
    LUANXI_STARS, SUIJIAN12_STARS, categorize_overlay, classify_horoscope_star,
};
pub use sanhe::{
    SIBLINGS_GROUP_LABEL, SIBLINGS_PALACE_NAME, SOUL_GROUP_LABEL, SanheGroup, sanhe_group,
    sanhe_groups, sanhe_palaces, soul_sanhe,
};
pub use sihua::{SihuaBalance, SihuaDisplay, sihua_display};
pub use star::{ALL_BRIGHTNESS, ALL_MUTAGENS, Brightness, Mutagen, Star, StarType};
pub use time_slot::{
    TIME_SLOT_COUNT, slot_branch, slot_label, slot_name, slot_start_hour, time_slot_from_hour,
    time_slot_from_time,
};
