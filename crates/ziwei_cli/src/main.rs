mod report;
mod snapshot;

use std::path::PathBuf;

use chrono::NaiveTime;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use ziwei_base::{
    ALL_BRANCHES, Branch, CorrectionTable, HoroscopeOverlay, PALACE_COUNT, brightness_label,
    brightness_row, is_unrated, sanhe_palaces, slot_label, slot_name, time_slot_from_time,
};
use ziwei_chart::{BirthInput, ChartEngine, ChartView, EngineConfig};

use crate::report::render_text;
use crate::snapshot::Snapshot;

#[derive(Parser)]
#[command(name = "ziwei", about = "Zi Wei Dou Shu chart CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Two-hour time slot for a clock time
    Slot {
        /// Clock time, HH:mm
        time: String,
    },
    /// Positional brightness of a star
    Brightness {
        /// Star name, e.g. 紫微
        star: String,
        /// Branch glyph or pinyin; omit to print all 12
        branch: Option<String>,
    },
    /// Three-harmony group of a palace
    Sanhe {
        /// Palace index (0-11)
        palace: u8,
        /// Snapshot file to show palace names from
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// Validate and list a correction table
    Corrections {
        /// Table file; omit for the built-in table
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Compute an extended chart from a recorded upstream snapshot
    Derive {
        /// Snapshot file ({"chart": ..., "lunarCalendar": [...]})
        #[arg(long)]
        chart: PathBuf,
        /// Birth date, YYYY-MM-DD in the chosen calendar
        #[arg(long)]
        date: String,
        /// Birth time, HH:mm
        #[arg(long)]
        time: String,
        /// male or female
        #[arg(long)]
        gender: String,
        /// solar or lunar
        #[arg(long, default_value = "solar")]
        calendar: String,
        /// Lunar date is in the leap month
        #[arg(long)]
        leap: bool,
        /// Horoscope overlay file ({"decadal": [[...]; 12], "yearly": [[...]; 12]})
        #[arg(long)]
        horoscope: Option<PathBuf>,
        /// Correction table replacing the built-in one
        #[arg(long)]
        corrections: Option<PathBuf>,
        /// Engine config file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Primary view: sanhe, flying or sihua
        #[arg(long)]
        view: Option<String>,
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{msg}");
    std::process::exit(1);
}

fn parse_clock(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .unwrap_or_else(|_| fail(format!("Invalid time: {s} (expected HH:mm)")))
}

fn require_branch(s: &str) -> Branch {
    Branch::from_name(s).unwrap_or_else(|| {
        eprintln!("Invalid branch: {s}");
        eprintln!("Valid: 子 丑 寅 卯 辰 巳 午 未 申 酉 戌 亥 (or pinyin)");
        std::process::exit(1);
    })
}

fn require_palace(index: u8) -> u8 {
    if (index as usize) < PALACE_COUNT {
        index
    } else {
        fail(format!("Invalid palace index: {index} (0-11)"))
    }
}

fn parse_view(s: &str) -> ChartView {
    ChartView::parse(s).unwrap_or_else(|| {
        eprintln!("Invalid view: {s}");
        eprintln!("Valid: sanhe, flying, sihua");
        std::process::exit(1);
    })
}

fn load_snapshot(path: &PathBuf) -> Snapshot {
    Snapshot::load(path).unwrap_or_else(|e| fail(e))
}

fn load_overlay(path: &PathBuf) -> HoroscopeOverlay {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("Failed to read {}: {e}", path.display())));
    serde_json::from_str(&text)
        .unwrap_or_else(|e| fail(format!("Invalid overlay {}: {e}", path.display())))
}

fn load_config(path: Option<&PathBuf>, corrections: Option<PathBuf>) -> EngineConfig {
    let mut config = match path {
        Some(p) => EngineConfig::load(p).unwrap_or_else(|e| fail(e)),
        None => EngineConfig::default(),
    };
    if corrections.is_some() {
        config.corrections = corrections;
    }
    config
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => fail(format!("Failed to serialize output: {e}")),
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Slot { time } => {
            let slot = time_slot_from_time(parse_clock(&time));
            println!(
                "{slot} {} {}",
                slot_name(slot).unwrap_or_default(),
                slot_label(slot).unwrap_or_default()
            );
        }

        Commands::Brightness { star, branch } => match branch {
            Some(b) => {
                let label = brightness_label(&star, require_branch(&b));
                println!("{}", if label.is_empty() { "-" } else { label });
            }
            None => {
                if is_unrated(&star) {
                    println!("{star}: unrated");
                    return;
                }
                if let Some(row) = brightness_row(&star) {
                    let cells: Vec<String> = ALL_BRANCHES
                        .iter()
                        .zip(row.iter())
                        .map(|(b, r)| format!("{b}{}", r.map_or("-", |r| r.glyph())))
                        .collect();
                    println!("{star}: {}", cells.join(" "));
                }
            }
        },

        Commands::Sanhe { palace, chart } => {
            let group = sanhe_palaces(require_palace(palace));
            match chart {
                Some(path) => {
                    let snapshot = load_snapshot(&path);
                    for i in group {
                        let name = snapshot
                            .chart
                            .palace(i)
                            .map(|p| format!("{}{}", p.earthly_branch, p.name))
                            .unwrap_or_default();
                        println!("{i} {name}");
                    }
                }
                None => {
                    let list: Vec<String> = group.iter().map(|i| i.to_string()).collect();
                    println!("{}", list.join(" "));
                }
            }
        }

        Commands::Corrections { file } => {
            let table = match &file {
                Some(p) => CorrectionTable::load(p),
                None => CorrectionTable::builtin(),
            }
            .unwrap_or_else(|e| fail(e));
            println!(
                "version {}, {} record(s)",
                table.version,
                table.corrections.len()
            );
            for rec in &table.corrections {
                println!(
                    "{}  {} slot {} {}  {} patch(es)  {}",
                    rec.id,
                    rec.birth_date,
                    rec.time_index,
                    rec.gender.code(),
                    rec.patches.len(),
                    rec.note
                );
            }
        }

        Commands::Derive {
            chart,
            date,
            time,
            gender,
            calendar,
            leap,
            horoscope,
            corrections,
            config,
            view,
            format,
        } => {
            let snapshot = load_snapshot(&chart);
            let config = load_config(config.as_ref(), corrections);
            let view = view.as_deref().map_or(config.default_view, parse_view);
            let overlay = horoscope.as_ref().map(load_overlay);
            let engine =
                ChartEngine::new(&snapshot, &snapshot, config).unwrap_or_else(|e| fail(e));
            let input = BirthInput::new(date, time, gender, calendar).with_leap_month(leap);
            let ext = match engine.compute_as(&input, overlay.as_ref(), view) {
                Ok(ext) => ext,
                Err(e) => {
                    if matches!(format, OutputFormat::Json) {
                        print_json(&e.to_response());
                    }
                    fail(e)
                }
            };
            match format {
                OutputFormat::Json => print_json(&ext),
                OutputFormat::Text => print!("{}", render_text(&ext)),
            }
        }
    }
}
