//! Runs the `ziwei` binary against the recorded snapshot fixture.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/snapshot_2025_01_29_male.json")
}

fn ziwei(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ziwei"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run ziwei")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn derive_args<'a>(chart: &'a str, extra: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec![
        "derive", "--chart", chart, "--date", "2025-01-29", "--time", "16:00", "--gender", "male",
    ];
    args.extend_from_slice(extra);
    args
}

#[test]
fn slot_command() {
    let out = ziwei(&["slot", "16:00"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), "8 申时 15:00–17:00");

    let out = ziwei(&["slot", "23:10"]);
    assert_eq!(stdout(&out).trim(), "0 子时 23:00–01:00");
}

#[test]
fn slot_rejects_bad_time() {
    let out = ziwei(&["slot", "7pm"]);
    assert!(!out.status.success());
}

#[test]
fn brightness_command() {
    let out = ziwei(&["brightness", "紫微", "午"]);
    assert_eq!(stdout(&out).trim(), "庙");
    let out = ziwei(&["brightness", "擎羊", "yin"]);
    assert_eq!(stdout(&out).trim(), "-");
    let out = ziwei(&["brightness", "天魁"]);
    assert_eq!(stdout(&out).trim(), "天魁: unrated");
    let out = ziwei(&["brightness", "太阳"]);
    assert!(stdout(&out).starts_with("太阳: 子陷 丑不 寅旺"), "{}", stdout(&out));
}

#[test]
fn sanhe_command() {
    let out = ziwei(&["sanhe", "0"]);
    assert_eq!(stdout(&out).trim(), "0 4 8 6");
    let out = ziwei(&["sanhe", "12"]);
    assert!(!out.status.success());

    let chart = fixture();
    let out = ziwei(&["sanhe", "4", "--chart", chart.to_str().unwrap()]);
    let text = stdout(&out);
    assert!(text.starts_with("4 午命宫"), "{text}");
}

#[test]
fn corrections_command() {
    let out = ziwei(&["corrections"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("2025-01-29-shen-male"));

    let mut bad = tempfile::NamedTempFile::new().unwrap();
    writeln!(bad, "version = 9").unwrap();
    let out = ziwei(&["corrections", "--file", bad.path().to_str().unwrap()]);
    assert!(!out.status.success());
}

#[test]
fn derive_json() {
    let chart = fixture();
    let out = ziwei(&derive_args(chart.to_str().unwrap(), &[]));
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["birthTimeIndex"], 8);
    assert_eq!(v["chartType"], "sanhe");
    assert_eq!(v["solarDate"], "2025-01-29");
    assert_eq!(v["lunarDate"], "乙巳年正月初一");
    assert_eq!(v["sanheGroups"][0]["relatedPalaces"], serde_json::json!([4, 8, 0, 10]));
    assert_eq!(v["flyingStars"].as_array().unwrap().len(), 4);
    assert_eq!(v["sihuaBalance"], "balanced");
}

#[test]
fn derive_lunar_input() {
    let chart = fixture();
    let c = chart.to_str().unwrap();
    let out = ziwei(&[
        "derive", "--chart", c, "--date", "2025-01-01", "--time", "16:00", "--gender", "male",
        "--calendar", "lunar",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["isLunarInput"], true);
    assert_eq!(v["chineseDate"], "乙巳 丁丑 戊戌");
}

#[test]
fn derive_text_report() {
    let chart = fixture();
    let out = ziwei(&derive_args(
        chart.to_str().unwrap(),
        &["--format", "text", "--view", "sihua"],
    ));
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("五行局: 木三局"), "{text}");
    assert!(text.contains("化禄: 天机"), "{text}");
    assert!(text.contains("视图: sihua"), "{text}");
    assert!(text.contains("紫微(得)[科]"), "{text}");
    assert!(text.contains("评语: 四化分布均衡"), "{text}");
    assert!(text.contains("(balanced)"), "{text}");
    assert!(text.contains("吉星: 文昌(陷)  煞星: 陀罗(陷)"), "{text}");
    assert!(text.contains("吉星: 文曲(得) 天魁  煞星: -"), "{text}");
}

#[test]
fn derive_with_horoscope_overlay() {
    let chart = fixture();
    let mut overlay = tempfile::NamedTempFile::new().unwrap();
    let mut yearly = vec![Vec::<String>::new(); 12];
    yearly[6] = vec!["年解".into()];
    let body = serde_json::json!({ "decadal": vec![Vec::<String>::new(); 12], "yearly": yearly });
    write!(overlay, "{body}").unwrap();

    let out = ziwei(&derive_args(
        chart.to_str().unwrap(),
        &["--horoscope", overlay.path().to_str().unwrap()],
    ));
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["palaces"][5]["horoscopeStarCategories"]["suijian12"][0], "年解");
    assert_eq!(v["horoscopeCorrections"].as_array().unwrap().len(), 3);
}

#[test]
fn derive_mismatched_request_fails() {
    let chart = fixture();
    let c = chart.to_str().unwrap();
    let out = ziwei(&[
        "derive", "--chart", c, "--date", "2025-01-29", "--time", "10:00", "--gender", "male",
    ]);
    assert!(!out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["kind"], "upstream_computation");
}

#[test]
fn derive_invalid_gender_fails() {
    let chart = fixture();
    let c = chart.to_str().unwrap();
    let out = ziwei(&[
        "derive", "--chart", c, "--date", "2025-01-29", "--time", "16:00", "--gender", "x",
    ]);
    assert!(!out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["kind"], "validation");
}
