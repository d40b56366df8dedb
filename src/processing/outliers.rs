use serde::Serialize;

use crate::data::coerce::{coerce_or_zero, parse_number};
use crate::data::table::{DatasetKind, Table};
use crate::error::{AnalysisError, Result};
use crate::processing::statistics::DatasetStats;

/// Number of standard deviations a value must exceed to be flagged.
pub const DEFAULT_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierEntry {
    pub source: String,
    pub month: String,
    pub value: f64,
}

/// Result of one outlier pass over a whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierReport {
    pub kind: DatasetKind,
    pub threshold: f64,
    /// Statistics over every cell, with non-numeric cells counted as `0`.
    pub stats: DatasetStats,
    /// Non-numeric cells left out of the comparison.
    pub excluded_cells: usize,
    /// Flagged cells in row-then-column order.
    pub entries: Vec<OutlierEntry>,
}

impl OutlierReport {
    pub fn mean(&self) -> f64 {
        self.stats.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.stats.std_dev
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One human-readable line per flagged cell.
    pub fn alert_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| {
                format!(
                    "{} outlier: {} - {}: {}",
                    self.kind.label(),
                    e.source,
                    e.month,
                    e.value
                )
            })
            .collect()
    }
}

/// Flag every cell whose distance from the dataset mean exceeds
/// `threshold` population standard deviations.
///
/// The mean and deviation cover every cell in the table regardless of any
/// chart selection, with unparsable cells counted as `0`. Those same cells are
/// never flagged themselves.
pub fn detect_outliers(table: &Table, threshold: f64) -> Result<OutlierReport> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(AnalysisError::InvalidThreshold(threshold));
    }

    let mut values = Vec::with_capacity(table.cell_count());
    let mut numeric_cells = 0usize;
    for row in &table.rows {
        for (_, cell) in row.iter() {
            let coerced = coerce_or_zero(cell);
            if !coerced.fell_back {
                numeric_cells += 1;
            }
            values.push(coerced.value);
        }
    }

    let insufficient = AnalysisError::InsufficientData {
        rows: table.len(),
        numeric_cells,
    };
    if numeric_cells == 0 {
        tracing::warn!("Cannot detect {} outliers: {}", table.kind, insufficient);
        return Err(insufficient);
    }
    let stats = DatasetStats::compute(&values).ok_or(insufficient)?;

    let mut entries = Vec::new();
    let mut excluded_cells = 0usize;
    for row in &table.rows {
        for (period, cell) in row.iter() {
            let Some(value) = parse_number(cell) else {
                excluded_cells += 1;
                continue;
            };
            if stats.deviates(value, threshold) {
                entries.push(OutlierEntry {
                    source: row.source.clone(),
                    month: period.to_string(),
                    value,
                });
            }
        }
    }

    tracing::info!(
        "{} outliers: {} of {} cells beyond {} std devs \
         (mean={:.3}, std_dev={:.3}, excluded={})",
        table.kind,
        entries.len(),
        stats.count,
        threshold,
        stats.mean,
        stats.std_dev,
        excluded_cells
    );

    Ok(OutlierReport {
        kind: table.kind,
        threshold,
        stats,
        excluded_cells,
        entries,
    })
}
