//! Chart request pipeline.
//!
//! parse -> reconcile -> place -> validate -> date and text overrides ->
//! brightness fill -> derived views -> horoscope categories. A failure before the
//! derived views aborts the request; each view is built independently from
//! the same chart.

use tracing::{debug, info, info_span};
use ziwei_base::{
    CorrectionKey, CorrectionTable, HoroscopeOverlay, categorize_overlay,
    fill_missing_brightness, slot_label, slot_name,
};

use crate::calendar::LunarCalendar;
use crate::config::EngineConfig;
use crate::error::ChartError;
use crate::extended::ExtendedChart;
use crate::normalize::BirthInput;
use crate::placement::{ChartPlacer, PlacementRequest};
use crate::reconcile::reconcile;
use crate::view::{ALL_CHART_VIEWS, ChartView};

/// Computes extended charts from raw birth input.
pub struct ChartEngine<P, C> {
    placer: P,
    calendar: C,
    config: EngineConfig,
    corrections: CorrectionTable,
}

impl<P: ChartPlacer, C: LunarCalendar> ChartEngine<P, C> {
    /// Validate the config and load its correction table.
    pub fn new(placer: P, calendar: C, config: EngineConfig) -> Result<Self, ChartError> {
        config.validate()?;
        let corrections = config.correction_table()?;
        debug!(
            placer = placer.name(),
            calendar = calendar.name(),
            corrections = corrections.len(),
            "chart engine ready"
        );
        Ok(Self {
            placer,
            calendar,
            config,
            corrections,
        })
    }

    /// Replace the correction table.
    pub fn with_corrections(mut self, corrections: CorrectionTable) -> Self {
        self.corrections = corrections;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn corrections(&self) -> &CorrectionTable {
        &self.corrections
    }

    /// Compute an extended chart tagged with the configured default view.
    pub fn compute(
        &self,
        input: &BirthInput,
        overlay: Option<&HoroscopeOverlay>,
    ) -> Result<ExtendedChart, ChartError> {
        self.compute_as(input, overlay, self.config.default_view)
    }

    /// Compute an extended chart tagged with `view`. All views are built
    /// regardless of the tag.
    pub fn compute_as(
        &self,
        input: &BirthInput,
        overlay: Option<&HoroscopeOverlay>,
        view: ChartView,
    ) -> Result<ExtendedChart, ChartError> {
        let span = info_span!(
            "chart_request",
            birth_date = %input.birth_date,
            calendar = %input.calendar,
            view = view.name()
        );
        let _guard = span.enter();

        let params = input.parse()?;
        if let Some(overlay) = overlay {
            overlay.validate()?;
        }
        let birth = reconcile(&params, &self.calendar)?;

        let request = PlacementRequest {
            solar_date: birth.solar_date,
            time_index: params.time_index,
            gender: params.gender,
            fix_leap: self.config.fix_leap,
        };
        let mut chart = self.placer.place(&request)?;
        chart.validate()?;

        chart.solar_date = birth.solar_date.format("%Y-%m-%d").to_string();
        chart.lunar_date = birth.lunar_display();
        if let Some(pillars) = birth.pillars_override() {
            debug!(%pillars, "four-pillar text replaced for lunar input");
            chart.chinese_date = pillars;
        }
        if let Some(name) = slot_name(params.time_index) {
            chart.time = name;
        }
        if let Some(label) = slot_label(params.time_index) {
            chart.time_range = label;
        }
        if self.config.fill_missing_brightness {
            chart = fill_missing_brightness(&chart);
        }

        let mut out = ExtendedChart::new(
            chart,
            view,
            params.time_index,
            birth.is_lunar_input,
            input.clone(),
        );
        for v in ALL_CHART_VIEWS {
            let derived = v.derive(&out.chart, self.config.include_siblings_sanhe);
            out.install(derived);
        }

        if let Some(overlay) = overlay {
            let categories = categorize_overlay(overlay)?;
            let key = CorrectionKey {
                birth_date: birth.solar_date,
                time_index: params.time_index,
                gender: params.gender,
            };
            let corrected = self.corrections.apply(&key, &categories)?;
            for palace in &mut out.chart.palaces {
                palace.horoscope_star_categories =
                    corrected.categories.get(palace.index as usize).cloned();
            }
            out.horoscope_corrections = corrected.applied;
        }

        info!(
            time_index = out.time_index,
            sihua = out.sihua_display.total(),
            sanhe_groups = out.sanhe_groups.len(),
            flying_stars = out.flying_stars.len(),
            corrections = out.horoscope_corrections.len(),
            "chart computed"
        );
        Ok(out)
    }
}
