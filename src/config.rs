use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::period::{PeriodCalendar, DEFAULT_BARE_MONTH_YEAR};
use crate::error::{AnalysisError, Result};
use crate::processing::outliers::DEFAULT_THRESHOLD;

/// Tunables for a single analysis run. Passed explicitly, never global.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of standard deviations a value must exceed to be flagged.
    pub outlier_threshold: f64,
    /// Year assigned to bare month labels such as `Jan` when ordering periods.
    pub bare_month_year: i32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            outlier_threshold: DEFAULT_THRESHOLD,
            bare_month_year: DEFAULT_BARE_MONTH_YEAR,
        }
    }
}

impl AnalysisConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AnalysisError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::info!(
            "Loaded config from {:?}: threshold={}, bare_month_year={}",
            path,
            config.outlier_threshold,
            config.bare_month_year
        );
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.outlier_threshold.is_finite() || self.outlier_threshold < 0.0 {
            return Err(AnalysisError::InvalidThreshold(self.outlier_threshold));
        }
        Ok(())
    }

    pub fn calendar(&self) -> PeriodCalendar {
        PeriodCalendar::new(self.bare_month_year)
    }
}
