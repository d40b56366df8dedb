use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use finplot::{
    run_analysis, AnalysisConfig, AnalysisError, DatasetKind, MergedRecord, OutlierReport, Result,
    Row, SeriesKey, Selections, Table,
};

const USAGE: &str = "usage: finplot <request.json> [config.json]";

/// Parsed tables and selections, as handed over by the upload front end.
#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    revenue: Vec<Row>,
    #[serde(default)]
    cost: Vec<Row>,
    #[serde(default)]
    selection: Selections,
}

#[derive(Serialize)]
struct Output<'a> {
    chart: &'a [MergedRecord],
    series: &'a [SeriesKey],
    coercion_fallbacks: usize,
    outliers: BTreeMap<DatasetKind, OutlierOutcome<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum OutlierOutcome<'a> {
    Report(&'a OutlierReport),
    Failed { error: String },
}

impl<'a> From<&'a Result<OutlierReport>> for OutlierOutcome<'a> {
    fn from(result: &'a Result<OutlierReport>) -> Self {
        match result {
            Ok(report) => OutlierOutcome::Report(report),
            Err(e) => OutlierOutcome::Failed {
                error: e.to_string(),
            },
        }
    }
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let Some(request_path) = args.next() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };
    let config_path = args.next();

    match run(&request_path, config_path.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(request_path: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };

    let text = std::fs::read_to_string(request_path).map_err(|source| AnalysisError::Read {
        path: request_path.to_path_buf(),
        source,
    })?;
    let request: Request = serde_json::from_str(&text)?;
    let revenue = Table::new(DatasetKind::Revenue, request.revenue);
    let cost = Table::new(DatasetKind::Cost, request.cost);
    tracing::info!(
        "Loaded {:?}: {} revenue rows, {} cost rows",
        request_path,
        revenue.len(),
        cost.len()
    );

    let analysis = run_analysis(&revenue, &cost, &request.selection, &config);

    let mut outliers = BTreeMap::new();
    for kind in DatasetKind::ALL {
        let result = analysis.outliers(kind);
        match result {
            Ok(report) => {
                tracing::info!("{}", report.stats.report(kind.label()).trim_end());
                for line in report.alert_lines() {
                    tracing::warn!("{line}");
                }
            }
            Err(e) => tracing::warn!("{} outliers unavailable: {e}", kind.label()),
        }
        outliers.insert(kind, OutlierOutcome::from(result));
    }

    let output = Output {
        chart: &analysis.chart.records,
        series: &analysis.chart.series,
        coercion_fallbacks: analysis.chart.coercion_fallbacks,
        outliers,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &output)?;
    writeln!(out)?;
    Ok(())
}
