//! Chart request orchestration.
//!
//! Turns raw birth input into an [`ExtendedChart`]: the input is validated
//! and reconciled across calendars, a [`ChartPlacer`] lays out the base
//! chart, and the derived views from `ziwei_base` are attached.
//!
//! Calendar conversion and star placement are behind the [`LunarCalendar`]
//! and [`ChartPlacer`] traits.

pub mod calendar;
pub mod config;
pub mod engine;
pub mod error;
pub mod extended;
pub mod normalize;
pub mod placement;
pub mod reconcile;
pub mod view;

pub use calendar::{LunarCalendar, LunarDescription};
pub use config::EngineConfig;
pub use engine::ChartEngine;
pub use error::{CalendarError, ChartError, ErrorResponse, PlacementError};
pub use extended::ExtendedChart;
pub use normalize::{BirthDate, BirthInput, BirthParams, CalendarKind, LunarDate};
pub use placement::{ChartPlacer, PlacementRequest};
pub use reconcile::{ReconciledBirth, reconcile};
pub use view::{ALL_CHART_VIEWS, ChartView, DerivedView};
