//! Declarative manual corrections for horoscope star categories.
//!
//! A correction record matches one exact birth key and carries a list of
//! add/remove patches. Records are data: the built-in table lives in
//! `data/horoscope_corrections.toml` and may be replaced by an external file
//! with the same layout.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::chart::{Gender, PALACE_COUNT};
use crate::error::ZiweiError;
use crate::horoscope::{HoroscopeCategory, HoroscopeStarCategories, classify_horoscope_star};
use crate::time_slot::TIME_SLOT_COUNT;

/// Table format version understood by this crate.
pub const CORRECTION_TABLE_VERSION: u32 = 1;

const BUILTIN_TABLE: &str = include_str!("../data/horoscope_corrections.toml");

/// Exact-match key of a correction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrectionKey {
    pub birth_date: NaiveDate,
    pub time_index: u8,
    pub gender: Gender,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Remove,
}

/// One star moved into or out of a palace bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorrectionPatch {
    pub palace: u8,
    pub op: PatchOp,
    pub star: String,
    pub category: HoroscopeCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorrectionRecord {
    pub id: String,
    #[serde(default)]
    pub note: String,
    pub birth_date: NaiveDate,
    pub time_index: u8,
    pub gender: Gender,
    pub patches: Vec<CorrectionPatch>,
}

impl CorrectionRecord {
    pub fn key(&self) -> CorrectionKey {
        CorrectionKey {
            birth_date: self.birth_date,
            time_index: self.time_index,
            gender: self.gender,
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> ZiweiError {
        ZiweiError::InvalidCorrection {
            id: self.id.clone(),
            reason: reason.into(),
        }
    }
}

/// A patch that changed the categories, tagged with its record id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedCorrection {
    pub record_id: String,
    pub palace: u8,
    pub op: PatchOp,
    pub star: String,
    pub category: HoroscopeCategory,
}

/// Categories after corrections, plus what was changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectedCategories {
    pub categories: Vec<HoroscopeStarCategories>,
    pub applied: Vec<AppliedCorrection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorrectionTable {
    pub version: u32,
    #[serde(default)]
    pub corrections: Vec<CorrectionRecord>,
}

impl CorrectionTable {
    /// A table with no records.
    pub fn empty() -> Self {
        Self {
            version: CORRECTION_TABLE_VERSION,
            corrections: Vec::new(),
        }
    }

    /// The table shipped with the crate.
    pub fn builtin() -> Result<Self, ZiweiError> {
        Self::from_toml_str(BUILTIN_TABLE)
    }

    /// Parse and validate a table from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, ZiweiError> {
        let table: Self = toml::from_str(s)?;
        table.validate()?;
        Ok(table)
    }

    /// Read, parse, and validate a table file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ZiweiError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Check every record for consistency.
    pub fn validate(&self) -> Result<(), ZiweiError> {
        if self.version != CORRECTION_TABLE_VERSION {
            return Err(ZiweiError::CorrectionParse(format!(
                "unsupported table version {}, expected {CORRECTION_TABLE_VERSION}",
                self.version
            )));
        }
        for (i, rec) in self.corrections.iter().enumerate() {
            if rec.id.trim().is_empty() {
                return Err(ZiweiError::InvalidCorrection {
                    id: format!("#{i}"),
                    reason: "empty id".to_string(),
                });
            }
            if self.corrections[..i].iter().any(|r| r.id == rec.id) {
                return Err(rec.invalid("duplicate id"));
            }
            if rec.time_index >= TIME_SLOT_COUNT {
                return Err(rec.invalid(format!("time_index {} out of range", rec.time_index)));
            }
            if rec.patches.is_empty() {
                return Err(rec.invalid("no patches"));
            }
            for patch in &rec.patches {
                if patch.palace as usize >= PALACE_COUNT {
                    return Err(rec.invalid(format!("palace {} out of range", patch.palace)));
                }
                if patch.star.trim().is_empty() {
                    return Err(rec.invalid("patch with empty star name"));
                }
                let expected = classify_horoscope_star(&patch.star);
                if patch.category != expected {
                    return Err(rec.invalid(format!(
                        "{} is filed under {}, not {}",
                        patch.star,
                        expected.name(),
                        patch.category.name()
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.corrections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty()
    }

    /// Records whose key equals `key` exactly.
    pub fn matching<'a>(
        &'a self,
        key: &'a CorrectionKey,
    ) -> impl Iterator<Item = &'a CorrectionRecord> + 'a {
        self.corrections.iter().filter(move |r| r.key() == *key)
    }

    /// Apply every matching record to a copy of `categories`.
    ///
    /// `categories` must hold one entry per palace. Adds of a star already
    /// present and removes of a missing star change nothing and are left
    /// out of the applied list.
    pub fn apply(
        &self,
        key: &CorrectionKey,
        categories: &[HoroscopeStarCategories],
    ) -> Result<CorrectedCategories, ZiweiError> {
        if categories.len() != PALACE_COUNT {
            return Err(ZiweiError::InvalidOverlay(format!(
                "{} palace categories, expected {PALACE_COUNT}",
                categories.len()
            )));
        }
        let mut out = categories.to_vec();
        let mut applied = Vec::new();
        for rec in self.matching(key) {
            for patch in &rec.patches {
                let cats = &mut out[patch.palace as usize];
                let changed = match patch.op {
                    PatchOp::Add => cats.insert(patch.category, &patch.star),
                    PatchOp::Remove => cats.remove(patch.category, &patch.star),
                };
                if !changed {
                    warn!(
                        record = %rec.id,
                        palace = patch.palace,
                        star = %patch.star,
                        "correction patch had no effect"
                    );
                    continue;
                }
                applied.push(AppliedCorrection {
                    record_id: rec.id.clone(),
                    palace: patch.palace,
                    op: patch.op,
                    star: patch.star.clone(),
                    category: patch.category,
                });
            }
            info!(record = %rec.id, note = %rec.note, "applied horoscope correction");
        }
        Ok(CorrectedCategories {
            categories: out,
            applied,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_RECORD: &str = r#"
version = 1

[[corrections]]
id = "r1"
birth_date = "2000-02-03"
time_index = 0
gender = "女"

[[corrections.patches]]
palace = 11
op = "add"
star = "流鸾"
category = "luanxi"
"#;

    fn key(date: &str, slot: u8, gender: Gender) -> CorrectionKey {
        CorrectionKey {
            birth_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            time_index: slot,
            gender,
        }
    }

    #[test]
    fn builtin_table_parses() {
        let t = CorrectionTable::builtin().unwrap();
        assert!(!t.is_empty());
        assert_eq!(t.version, CORRECTION_TABLE_VERSION);
    }

    #[test]
    fn parse_single_record() {
        let t = CorrectionTable::from_toml_str(ONE_RECORD).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.corrections[0].gender, Gender::Female);
        assert_eq!(t.corrections[0].patches[0].op, PatchOp::Add);
    }

    #[test]
    fn matching_is_exact() {
        let t = CorrectionTable::from_toml_str(ONE_RECORD).unwrap();
        assert_eq!(t.matching(&key("2000-02-03", 0, Gender::Female)).count(), 1);
        assert_eq!(t.matching(&key("2000-02-03", 1, Gender::Female)).count(), 0);
        assert_eq!(t.matching(&key("2000-02-03", 0, Gender::Male)).count(), 0);
        assert_eq!(t.matching(&key("2000-02-04", 0, Gender::Female)).count(), 0);
    }

    #[test]
    fn rejects_bad_version() {
        let text = ONE_RECORD.replace("version = 1", "version = 2");
        let err = CorrectionTable::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, ZiweiError::CorrectionParse(_)), "{err}");
    }

    #[test]
    fn rejects_palace_out_of_range() {
        let text = ONE_RECORD.replace("palace = 11", "palace = 12");
        let err = CorrectionTable::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, ZiweiError::InvalidCorrection { .. }), "{err}");
    }

    #[test]
    fn rejects_category_mismatch() {
        let text = ONE_RECORD.replace("category = \"luanxi\"", "category = \"suijian12\"");
        let err = CorrectionTable::from_toml_str(&text).unwrap_err();
        assert!(err.to_string().contains("流鸾"), "{err}");
        assert!(matches!(err, ZiweiError::InvalidCorrection { .. }), "{err}");

        let text = ONE_RECORD.replace("category = \"luanxi\"", "category = \"other\"");
        assert!(CorrectionTable::from_toml_str(&text).is_err());
    }

    #[test]
    fn rejects_unknown_op() {
        let text = ONE_RECORD.replace("op = \"add\"", "op = \"move\"");
        assert!(CorrectionTable::from_toml_str(&text).is_err());
    }

    #[test]
    fn rejects_unknown_field() {
        let text = ONE_RECORD.replace("time_index = 0", "time_index = 0\nhour = 3");
        assert!(CorrectionTable::from_toml_str(&text).is_err());
    }

    #[test]
    fn apply_needs_twelve_palaces() {
        let t = CorrectionTable::empty();
        let cats = vec![HoroscopeStarCategories::default(); 3];
        assert!(t.apply(&key("2000-02-03", 0, Gender::Female), &cats).is_err());
    }

    #[test]
    fn apply_leaves_input_untouched() {
        let t = CorrectionTable::from_toml_str(ONE_RECORD).unwrap();
        let cats = vec![HoroscopeStarCategories::default(); 12];
        let out = t.apply(&key("2000-02-03", 0, Gender::Female), &cats).unwrap();
        assert!(cats[11].is_empty());
        assert_eq!(out.categories[11].luanxi, ["流鸾"]);
        assert_eq!(out.applied.len(), 1);
        assert_eq!(out.applied[0].record_id, "r1");
    }
}
