use std::sync::Arc;
use table_advisor::rules::{datatype, index, naming, performance};
use table_advisor::{
    AdvisorError, Analyzer, Column, IndexEntry, KeyRole, ScoreBand, Severity, Snapshot,
    StaticProvider, TableStatus,
};

fn golden() -> Snapshot {
    Snapshot::new(
        "shop",
        "order_item",
        vec![
            Column::new("id", "INT(11)")
                .not_null()
                .key_role(KeyRole::Primary)
                .extra("auto_increment"),
            Column::new("product_id", "BIGINT(20)")
                .not_null()
                .key_role(KeyRole::Multi),
            Column::new("title", "VARCHAR(100)"),
            Column::new("sku", "VARCHAR(100)").not_null(),
        ],
    )
    .with_index(IndexEntry::primary(["id"]))
    .with_index(IndexEntry::new("idx_product_id", ["product_id"]))
    .with_status(TableStatus {
        engine: Some("InnoDB".to_string()),
        collation: Some("utf8mb4_general_ci".to_string()),
        row_count_estimate: Some(1200),
        data_length_bytes: Some(16 * 1024 * 1024),
        index_length_bytes: Some(2 * 1024 * 1024),
    })
}

fn analyzer_for(snapshot: Snapshot) -> Analyzer {
    Analyzer::builder(Arc::new(StaticProvider::new().with_snapshot(snapshot))).build()
}

async fn analyze(snapshot: Snapshot) -> table_advisor::Report {
    let (database, table) = (snapshot.database_name.clone(), snapshot.table_name.clone());
    analyzer_for(snapshot)
        .analyze(&database, &table)
        .await
        .expect("analysis should succeed")
}

#[tokio::test]
async fn golden_schema_has_no_findings() {
    let report = analyze(golden()).await;
    assert!(report.findings.is_empty(), "{:#?}", report.findings);
    assert_eq!(report.issue_count, 0);
    assert_eq!(report.score_band, ScoreBand::Excellent);
    assert_eq!(report.summary.column_count, 4);
    assert_eq!(report.summary.index_count, 2);
}

#[tokio::test]
async fn missing_primary_key_is_reported_by_index_and_performance_rules() {
    let mut snapshot = golden();
    snapshot.indexes.retain(|i| !i.is_primary());
    snapshot.columns[0].key_role = KeyRole::None;

    let report = analyze(snapshot).await;
    let codes: Vec<&str> = report.findings.iter().map(|f| f.code.as_str()).collect();
    assert_eq!(
        codes,
        vec![index::INDEX_MISSING_PRIMARY_KEY, performance::PERF_NO_PRIMARY_KEY]
    );
    assert!(report
        .findings
        .iter()
        .all(|f| f.severity == Severity::Critical));
    assert_eq!(report.issue_count, 2);
    assert_eq!(report.score_band, ScoreBand::Good);
}

#[tokio::test]
async fn camel_case_names_without_short_varchar() {
    let mut snapshot = golden();
    snapshot.table_name = "UserProfile".to_string();
    snapshot.columns.push(Column::new("userName", "VARCHAR(50)"));

    let report = analyze(snapshot).await;
    let table_case = report
        .findings
        .iter()
        .find(|f| f.code == naming::NAMING_TABLE_CASE)
        .expect("table case finding");
    assert_eq!(table_case.subject.as_deref(), Some("UserProfile"));

    let column_case = report
        .findings
        .iter()
        .find(|f| f.code == naming::NAMING_COLUMN_CASE)
        .expect("column case finding");
    assert_eq!(column_case.subject.as_deref(), Some("userName"));

    assert!(!report.has_code(datatype::DATATYPE_SHORT_VARCHAR));
}

#[tokio::test]
async fn identical_email_indexes_yield_one_duplicate() {
    let mut snapshot = golden();
    snapshot.columns.push(Column::new("email", "varchar(100)"));
    let snapshot = snapshot
        .with_index(IndexEntry::new("idx_a", ["email"]))
        .with_index(IndexEntry::new("idx_b", ["email"]));

    let report = analyze(snapshot).await;
    let duplicates: Vec<_> = report
        .findings
        .iter()
        .filter(|f| f.code == index::INDEX_DUPLICATE)
        .collect();
    assert_eq!(duplicates.len(), 1);
}

#[tokio::test]
async fn large_table_reports_size_in_mib() {
    let mut snapshot = golden();
    if let Some(status) = snapshot.status.as_mut() {
        status.data_length_bytes = Some(120 * 1024 * 1024);
    }

    let report = analyze(snapshot).await;
    let finding = report
        .findings
        .iter()
        .find(|f| f.code == performance::PERF_LARGE_TABLE)
        .expect("large table finding");
    assert!(finding.message.contains("120.0"));
    assert_eq!(finding.severity, Severity::Info);
}

#[tokio::test]
async fn analyzing_twice_is_byte_identical() {
    let mut snapshot = golden();
    snapshot.table_name = "Bad Table".to_string();
    snapshot.columns.push(Column::new("Select", "text").key_role(KeyRole::Multi));
    let snapshot = snapshot.with_index(IndexEntry::new("idx_select", ["Select"]));
    let analyzer = analyzer_for(snapshot);

    let first = analyzer.analyze("shop", "Bad Table").await.unwrap();
    let second = analyzer.analyze("shop", "Bad Table").await.unwrap();
    assert_eq!(first.to_json(false).unwrap(), second.to_json(false).unwrap());
    assert_eq!(first.to_string(), second.to_string());
}

#[tokio::test]
async fn unknown_table_is_not_found() {
    let err = analyzer_for(golden())
        .analyze("shop", "ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, AdvisorError::NotFound(_)));
}

#[tokio::test]
async fn index_on_unknown_column_is_invalid() {
    let snapshot = golden().with_index(IndexEntry::new("idx_ghost", ["ghost"]));
    let err = analyzer_for(snapshot)
        .analyze("shop", "order_item")
        .await
        .unwrap_err();
    assert!(matches!(err, AdvisorError::InvalidSnapshot(_)));
}

#[tokio::test]
async fn report_text_has_every_section() {
    let report = analyze(golden()).await;
    let text = report.to_string();
    for section in [
        "Table Design Report: shop.order_item",
        "Basic Info",
        "Naming Conventions",
        "Data Types",
        "Index Design",
        "Performance",
        "Overall Assessment",
        "Engine: InnoDB",
        "Collation: utf8mb4_general_ci",
    ] {
        assert!(text.contains(section), "missing '{}' in\n{}", section, text);
    }
}
