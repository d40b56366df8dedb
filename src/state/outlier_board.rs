use std::collections::BTreeMap;

use crate::data::table::DatasetKind;
use crate::processing::outliers::OutlierReport;

/// Latest outlier report per dataset, as shown in the alert panel.
#[derive(Debug, Clone, Default)]
pub struct OutlierBoard {
    reports: BTreeMap<DatasetKind, OutlierReport>,
}

impl OutlierBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a report, replacing any earlier one for the same dataset.
    pub fn record(&mut self, report: OutlierReport) -> Option<OutlierReport> {
        self.reports.insert(report.kind, report)
    }

    pub fn clear(&mut self, kind: DatasetKind) -> Option<OutlierReport> {
        self.reports.remove(&kind)
    }

    pub fn get(&self, kind: DatasetKind) -> Option<&OutlierReport> {
        self.reports.get(&kind)
    }

    pub fn has_outliers(&self) -> bool {
        self.reports.values().any(|r| !r.is_empty())
    }

    /// Alert lines for revenue first, then cost.
    pub fn alert_lines(&self) -> Vec<String> {
        self.reports.values().flat_map(OutlierReport::alert_lines).collect()
    }
}
