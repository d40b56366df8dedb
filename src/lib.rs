//! Revenue/cost time-series reshaping and outlier detection.
//!
//! Tables arrive already parsed, one per dataset. [`processing::reshape`]
//! turns them into month-keyed chart records and [`processing::outliers`]
//! flags values far from each dataset's mean. Every operation is a pure
//! function of its inputs; callers own the selection and result state.

pub mod config;
pub mod data;
pub mod error;
pub mod processing;
pub mod state;

pub use config::AnalysisConfig;
pub use data::period::PeriodCalendar;
pub use data::table::{Cell, DatasetKind, Row, Table, SOURCE_KEY};
pub use error::{AnalysisError, Result};
pub use processing::analysis::{run_analysis, Analysis, ChartData, SeriesKey};
pub use processing::outliers::{detect_outliers, OutlierEntry, OutlierReport, DEFAULT_THRESHOLD};
pub use processing::reshape::{merge_and_sort, reshape, MergedRecord, Reshaped};
pub use state::outlier_board::OutlierBoard;
pub use state::selection::{Selections, SourceSelection};
