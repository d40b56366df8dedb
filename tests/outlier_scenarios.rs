use finplot::{
    detect_outliers, run_analysis, AnalysisConfig, AnalysisError, DatasetKind, OutlierBoard,
    OutlierEntry, Row, Selections, Table, DEFAULT_THRESHOLD,
};

fn monthly_row(source: &str, values: &[&str]) -> Row {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    values
        .iter()
        .zip(MONTHS)
        .fold(Row::new(source), |row, (value, month)| row.with(month, *value))
}

#[test]
fn one_spike_among_equal_values_is_the_only_outlier() {
    let table = Table::new(
        DatasetKind::Cost,
        vec![
            monthly_row("Rent", &["500", "500", "500", "500", "500", "500"]),
            monthly_row("Power", &["500", "500", "500", "2500", "500", "500"]),
        ],
    );
    let report = detect_outliers(&table, DEFAULT_THRESHOLD).unwrap();
    assert_eq!(
        report.entries,
        vec![OutlierEntry {
            source: "Power".into(),
            month: "Apr".into(),
            value: 2500.0,
        }]
    );
    assert_eq!(report.kind, DatasetKind::Cost);
    assert_eq!(report.stats.count, 12);
}

#[test]
fn entries_follow_row_then_column_order() {
    // Two highs and two lows well outside 1 std dev of the mean.
    let table = Table::new(
        DatasetKind::Revenue,
        vec![
            monthly_row("A", &["50", "50", "50", "90"]),
            monthly_row("B", &["10", "50", "50", "50"]),
        ],
    );
    let report = detect_outliers(&table, 1.0).unwrap();
    let flagged: Vec<(&str, &str)> = report
        .entries
        .iter()
        .map(|e| (e.source.as_str(), e.month.as_str()))
        .collect();
    assert_eq!(flagged, vec![("A", "Apr"), ("B", "Jan")]);
}

#[test]
fn uniform_dataset_reports_nothing() {
    let table = Table::new(
        DatasetKind::Revenue,
        vec![monthly_row("A", &["3", "3", "3"]), monthly_row("B", &["3", "3", "3"])],
    );
    let report = detect_outliers(&table, DEFAULT_THRESHOLD).unwrap();
    assert_eq!(report.std_dev(), 0.0);
    assert!(report.entries.is_empty());
}

#[test]
fn zero_rows_is_insufficient_data() {
    let err = detect_outliers(&Table::empty(DatasetKind::Revenue), DEFAULT_THRESHOLD).unwrap_err();
    assert!(matches!(err, AnalysisError::InsufficientData { rows: 0, .. }));
    assert!(err.to_string().starts_with("Insufficient data"));
}

#[test]
fn selection_does_not_narrow_outlier_scope() {
    let revenue = Table::new(
        DatasetKind::Revenue,
        vec![monthly_row("A", &["1", "1", "1", "1", "1", "1", "1", "1", "1", "90"])],
    );
    let cost = Table::new(DatasetKind::Cost, vec![monthly_row("R", &["5", "5"])]);
    let mut selections = Selections::default();
    selections.replace(DatasetKind::Revenue, ["Jan"]);

    let analysis = run_analysis(&revenue, &cost, &selections, &AnalysisConfig::default());
    assert_eq!(analysis.chart.records.len(), 1);

    let report = analysis.revenue_outliers.as_ref().unwrap();
    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].month, "Oct");

    let mut board = OutlierBoard::new();
    board.record(report.clone());
    board.record(analysis.cost_outliers.unwrap());
    assert_eq!(board.alert_lines(), vec!["Revenue outlier: A - Oct: 90"]);
}

#[test]
fn configured_threshold_is_used() {
    let revenue = Table::new(
        DatasetKind::Revenue,
        vec![monthly_row("A", &["1", "1", "1", "1", "1", "1", "1", "1", "1", "90"])],
    );
    let config = AnalysisConfig::from_json(r#"{"outlier_threshold": 3.5}"#).unwrap();
    let analysis = run_analysis(
        &revenue,
        &Table::empty(DatasetKind::Cost),
        &Selections::default(),
        &config,
    );
    let report = analysis.revenue_outliers.unwrap();
    assert_eq!(report.threshold, 3.5);
    assert!(report.entries.is_empty());
}
