//! Engine configuration (TOML).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use ziwei_base::CorrectionTable;

use crate::error::ChartError;
use crate::view::ChartView;

/// Options controlling which derived views are built and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Fill star brightness from the built-in table where the placement
    /// backend left it empty.
    pub fill_missing_brightness: bool,
    /// Also build the siblings-palace three-harmony group.
    pub include_siblings_sanhe: bool,
    /// Primary view tag on the extended chart.
    pub default_view: ChartView,
    /// External correction table. `None` uses the built-in table.
    pub corrections: Option<PathBuf>,
    /// Passed through to the placement backend.
    pub fix_leap: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fill_missing_brightness: true,
            include_siblings_sanhe: true,
            default_view: ChartView::Trine,
            corrections: None,
            fix_leap: true,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ChartError> {
        let config: Self =
            toml::from_str(s).map_err(|e| ChartError::Config(format!("engine config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ChartError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if let Some(path) = &self.corrections {
            if path.as_os_str().is_empty() {
                return Err(ChartError::Config(
                    "corrections path must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Load the configured correction table, or the built-in one.
    pub fn correction_table(&self) -> Result<CorrectionTable, ChartError> {
        let table = match &self.corrections {
            Some(path) => CorrectionTable::load(path),
            None => CorrectionTable::builtin(),
        };
        table.map_err(|e| ChartError::Config(e.to_string()))
    }
}
