use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::data::period::PeriodCalendar;
use crate::data::table::{DatasetKind, Table};
use crate::error::Result;
use crate::processing::outliers::{detect_outliers, OutlierReport};
use crate::processing::reshape::{merge_and_sort, reshape, MergedRecord};
use crate::state::selection::Selections;

/// A plotted line: one selected label of one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesKey {
    pub kind: DatasetKind,
    pub label: String,
}

/// Everything the chart needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub records: Vec<MergedRecord>,
    pub series: Vec<SeriesKey>,
    pub coercion_fallbacks: usize,
}

impl ChartData {
    pub fn build(
        revenue: &Table,
        cost: &Table,
        selections: &Selections,
        calendar: &PeriodCalendar,
    ) -> Self {
        let (rev, cst) = rayon::join(
            || reshape(revenue, selections.for_kind(revenue.kind)),
            || reshape(cost, selections.for_kind(cost.kind)),
        );
        let coercion_fallbacks = rev.coercion_fallbacks + cst.coercion_fallbacks;

        let series = DatasetKind::ALL
            .into_iter()
            .flat_map(move |kind| {
                selections.for_kind(kind).iter().map(move |label| SeriesKey {
                    kind,
                    label: label.to_string(),
                })
            })
            .collect();

        Self {
            records: merge_and_sort(rev.records, cst.records, calendar),
            series,
            coercion_fallbacks,
        }
    }
}

/// Chart data plus an independent outlier result per dataset.
#[derive(Debug)]
pub struct Analysis {
    pub chart: ChartData,
    pub revenue_outliers: Result<OutlierReport>,
    pub cost_outliers: Result<OutlierReport>,
}

impl Analysis {
    pub fn outliers(&self, kind: DatasetKind) -> &Result<OutlierReport> {
        match kind {
            DatasetKind::Revenue => &self.revenue_outliers,
            DatasetKind::Cost => &self.cost_outliers,
        }
    }
}

/// Build the chart and both outlier reports concurrently.
///
/// Outlier detection always scans the full tables; the selections only
/// shape the chart.
pub fn run_analysis(
    revenue: &Table,
    cost: &Table,
    selections: &Selections,
    config: &AnalysisConfig,
) -> Analysis {
    let calendar = config.calendar();
    let threshold = config.outlier_threshold;

    let (chart, (revenue_outliers, cost_outliers)) = rayon::join(
        || ChartData::build(revenue, cost, selections, &calendar),
        || {
            rayon::join(
                || detect_outliers(revenue, threshold),
                || detect_outliers(cost, threshold),
            )
        },
    );

    tracing::info!(
        "Analysis done: {} chart records, {} series",
        chart.records.len(),
        chart.series.len()
    );

    Analysis {
        chart,
        revenue_outliers,
        cost_outliers,
    }
}
