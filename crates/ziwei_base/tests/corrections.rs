//! Horoscope categorization followed by manual corrections.

use std::io::Write;

use chrono::NaiveDate;
use ziwei_base::{
    CorrectionKey, CorrectionTable, Gender, HoroscopeCategory, HoroscopeOverlay, PatchOp,
    ZiweiError, categorize_overlay,
};

fn key(date: &str, slot: u8, gender: Gender) -> CorrectionKey {
    CorrectionKey {
        birth_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        time_index: slot,
        gender,
    }
}

fn overlay() -> HoroscopeOverlay {
    let mut o = HoroscopeOverlay {
        decadal: vec![Vec::new(); 12],
        yearly: vec![Vec::new(); 12],
    };
    o.decadal[4] = vec!["运禄".into(), "运鸾".into()];
    o.yearly[6] = vec!["年解".into(), "流喜".into()];
    o.yearly[10] = vec!["流羊".into()];
    o
}

#[test]
fn builtin_record_applies_on_exact_key() {
    let table = CorrectionTable::builtin().unwrap();
    let cats = categorize_overlay(&overlay()).unwrap();
    assert!(cats[6].contains(HoroscopeCategory::Suijian12, "年解"));

    let out = table.apply(&key("2025-01-29", 8, Gender::Male), &cats).unwrap();
    assert!(!out.categories[6].contains(HoroscopeCategory::Suijian12, "年解"));
    assert!(out.categories[5].contains(HoroscopeCategory::Suijian12, "年解"));
    assert!(out.categories[7].contains(HoroscopeCategory::Luanxi, "流昌"));
    assert_eq!(out.applied.len(), 3);
    assert_eq!(out.applied[0].op, PatchOp::Remove);
    assert!(out.applied.iter().all(|a| a.record_id == "2025-01-29-shen-male"));

    // untouched palaces are unchanged
    assert_eq!(out.categories[10], cats[10]);
    assert_eq!(out.categories[4], cats[4]);
}

#[test]
fn near_miss_keys_apply_nothing() {
    let table = CorrectionTable::builtin().unwrap();
    let cats = categorize_overlay(&overlay()).unwrap();
    for k in [
        key("2025-01-29", 7, Gender::Male),
        key("2025-01-29", 8, Gender::Female),
        key("2025-01-30", 8, Gender::Male),
    ] {
        let out = table.apply(&k, &cats).unwrap();
        assert!(out.applied.is_empty(), "{k:?}");
        assert_eq!(out.categories, cats);
    }
}

#[test]
fn no_op_patches_are_not_reported() {
    let table = CorrectionTable::builtin().unwrap();
    // 年解 is absent from palace 6, so the remove does nothing
    let empty = categorize_overlay(&HoroscopeOverlay {
        decadal: vec![Vec::new(); 12],
        yearly: vec![Vec::new(); 12],
    })
    .unwrap();
    let out = table.apply(&key("2025-01-29", 8, Gender::Male), &empty).unwrap();
    assert_eq!(out.applied.len(), 2);
    assert!(out.applied.iter().all(|a| a.op == PatchOp::Add));
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
version = 1

[[corrections]]
id = "local"
note = "site override"
birth_date = "1990-06-15"
time_index = 3
gender = "female"

[[corrections.patches]]
palace = 0
op = "add"
star = "流马"
category = "luanxi"
"#
    )
    .unwrap();

    let table = CorrectionTable::load(file.path()).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.matching(&key("1990-06-15", 3, Gender::Female)).count(), 1);
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CorrectionTable::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ZiweiError::Io(_)), "{err}");
}

#[test]
fn duplicate_ids_rejected() {
    let record = r#"
[[corrections]]
id = "dup"
birth_date = "2001-01-01"
time_index = 1
gender = "male"
[[corrections.patches]]
palace = 1
op = "remove"
star = "流陀"
category = "suijian12"
"#;
    let text = format!("version = 1\n{record}{record}");
    let err = CorrectionTable::from_toml_str(&text).unwrap_err();
    assert!(err.to_string().contains("duplicate id"), "{err}");
}
