//! Plain-text chart report.

use std::fmt::Write;

use ziwei_base::{ALL_MUTAGENS, Palace, Star, palace_auspice};
use ziwei_chart::{DerivedView, ExtendedChart};

fn star_text(star: &Star) -> String {
    let mut s = star.name.clone();
    if let Some(b) = star.brightness {
        s.push('(');
        s.push_str(b.glyph());
        s.push(')');
    }
    if let Some(m) = star.mutagen {
        s.push('[');
        s.push_str(m.glyph());
        s.push(']');
    }
    s
}

fn star_list<'a>(stars: impl IntoIterator<Item = &'a Star>) -> String {
    let texts: Vec<String> = stars.into_iter().map(star_text).collect();
    if texts.is_empty() {
        "-".to_string()
    } else {
        texts.join(" ")
    }
}

fn palace_line(out: &mut String, p: &Palace) {
    let mut marks = String::new();
    if p.is_body_palace {
        marks.push_str(" 身");
    }
    let _ = writeln!(
        out,
        "  [{:>2}] {}{} {:<4}{}  {}-{}",
        p.index, p.heavenly_stem, p.earthly_branch, p.name, marks, p.decadal.range[0],
        p.decadal.range[1]
    );
    let _ = writeln!(out, "       主星: {}", star_list(&p.major_stars));
    let _ = writeln!(out, "       辅星: {}", star_list(&p.minor_stars));
    let _ = writeln!(out, "       杂曜: {}", star_list(&p.adjective_stars));
    let groups = palace_auspice(p);
    let _ = writeln!(
        out,
        "       吉星: {}  煞星: {}",
        star_list(groups.auspicious.iter().copied()),
        star_list(groups.malefic.iter().copied())
    );
    if let Some(h) = &p.horoscope_star_categories {
        let _ = writeln!(
            out,
            "       运限: 岁建[{}] 鸾喜[{}] 其他[{}]",
            h.suijian12.join(" "),
            h.luanxi.join(" "),
            h.other.join(" ")
        );
    }
}

/// Render basic info, every palace, the sihua summary, and the primary view.
pub fn render_text(ext: &ExtendedChart) -> String {
    let c = &ext.chart;
    let mut out = String::new();

    let _ = writeln!(out, "基本信息");
    let _ = writeln!(out, "  性别: {}", c.gender.glyph());
    let _ = writeln!(out, "  阳历: {}", c.solar_date);
    let _ = writeln!(out, "  农历: {}", c.lunar_date);
    let _ = writeln!(out, "  四柱: {}", c.chinese_date);
    let _ = writeln!(
        out,
        "  时辰: {} ({}), index {}",
        c.time, c.time_range, ext.time_index
    );
    let _ = writeln!(
        out,
        "  命主: {}  身主: {}  五行局: {}",
        c.soul, c.body, c.five_elements_class
    );
    let _ = writeln!(
        out,
        "  命宫: {}  身宫: {}",
        c.earthly_branch_of_soul_palace, c.earthly_branch_of_body_palace
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "十二宫");
    let mut palaces: Vec<&Palace> = c.palaces.iter().collect();
    palaces.sort_by_key(|p| p.index);
    for p in palaces {
        palace_line(&mut out, p);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "四化");
    for m in ALL_MUTAGENS {
        let names: Vec<&str> = ext
            .sihua_display
            .bucket(m)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        let list = if names.is_empty() {
            "-".to_string()
        } else {
            names.join(" ")
        };
        let _ = writeln!(out, "  化{}: {}", m.glyph(), list);
    }
    let _ = writeln!(out, "  评语: {}", ext.sihua_balance.comment());

    let _ = writeln!(out);
    let _ = writeln!(out, "视图: {}", ext.chart_type);
    match ext.primary_view() {
        DerivedView::Trine(groups) => {
            for g in groups {
                let related: Vec<String> =
                    g.related_palaces.iter().map(|i| i.to_string()).collect();
                let _ = writeln!(
                    out,
                    "  {} (center {}): {}",
                    g.group_type,
                    g.center_palace,
                    related.join(", ")
                );
            }
        }
        DerivedView::Flying(entries) => {
            for e in entries {
                let _ = writeln!(
                    out,
                    "  {} 化{}: {} -> {}",
                    e.star_name,
                    e.mutagen.glyph(),
                    e.from_palace,
                    e.to_palace
                );
            }
        }
        DerivedView::Sihua(s) => {
            let [lu, quan, ke, ji] = s.counts();
            let _ = writeln!(
                out,
                "  禄 {lu}  权 {quan}  科 {ke}  忌 {ji}  ({})",
                s.balance().name()
            );
        }
    }

    if !ext.horoscope_corrections.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "修正");
        for a in &ext.horoscope_corrections {
            let _ = writeln!(
                out,
                "  {}: palace {} {:?} {} ({})",
                a.record_id,
                a.palace,
                a.op,
                a.star,
                a.category.name()
            );
        }
    }
    out
}
