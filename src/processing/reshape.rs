use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::data::coerce::coerce_or_zero;
use crate::data::period::PeriodCalendar;
use crate::data::table::{DatasetKind, Table};
use crate::state::selection::SourceSelection;

/// One chart point: a period plus one value per source seen for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedRecord {
    pub month: String,
    #[serde(rename = "type")]
    pub kind: DatasetKind,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl MergedRecord {
    pub fn new(month: impl Into<String>, kind: DatasetKind) -> Self {
        Self {
            month: month.into(),
            kind,
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, source: &str) -> Option<f64> {
        self.values.get(source).copied()
    }
}

/// Output of [`reshape`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reshaped {
    /// Records in first-seen period order.
    pub records: Vec<MergedRecord>,
    /// Cells that did not parse and were charted as `0`.
    pub coercion_fallbacks: usize,
}

/// Turn source-keyed rows into period-keyed records, keeping only the
/// selected columns. Rows for the same period fold into one record; a later
/// row overwrites an earlier one for the same source.
pub fn reshape(table: &Table, selection: &SourceSelection) -> Reshaped {
    let mut out = Reshaped::default();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for row in &table.rows {
        for (period, cell) in row.iter() {
            if !selection.contains(period) {
                continue;
            }

            let coerced = coerce_or_zero(cell);
            if coerced.fell_back {
                out.coercion_fallbacks += 1;
                tracing::debug!(
                    "Non-numeric {} cell charted as 0: source={:?} period={:?} raw={:?}",
                    table.kind,
                    row.source,
                    period,
                    cell.to_string()
                );
            }

            let slot = *index.entry(period).or_insert_with(|| {
                out.records.push(MergedRecord::new(period, table.kind));
                out.records.len() - 1
            });
            out.records[slot].values.insert(row.source.clone(), coerced.value);
        }
    }

    if out.coercion_fallbacks > 0 {
        tracing::info!(
            "{} {} cell(s) were not numeric and were charted as 0",
            out.coercion_fallbacks,
            table.kind
        );
    }

    out
}

/// Concatenate revenue then cost records and sort them by period date.
///
/// Records for the same period stay separate, one per dataset. The sort is
/// stable, so equal dates keep revenue first and first-seen order.
pub fn merge_and_sort(
    revenue: Vec<MergedRecord>,
    cost: Vec<MergedRecord>,
    calendar: &PeriodCalendar,
) -> Vec<MergedRecord> {
    let mut merged = revenue;
    merged.extend(cost);
    merged.sort_by_cached_key(|record| calendar.order_key(&record.month));
    merged
}
