use crate::config::RuleConfig;
use crate::report::{Category, Finding, Severity};
use crate::table::Snapshot;

pub const PERF_NO_PRIMARY_KEY: &str = "PERF_NO_PRIMARY_KEY";
pub const PERF_WIDE_VARCHAR: &str = "PERF_WIDE_VARCHAR";
pub const PERF_INDEXED_LOB: &str = "PERF_INDEXED_LOB";
pub const PERF_TOO_MANY_INDEXES: &str = "PERF_TOO_MANY_INDEXES";
pub const PERF_LARGE_TABLE: &str = "PERF_LARGE_TABLE";
pub const PERF_INDEX_RATIO_HIGH: &str = "PERF_INDEX_RATIO_HIGH";

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Check the runtime risks of the table: replication without a primary key,
/// wide rows, indexed large objects, write amplification and storage size.
pub fn evaluate(snapshot: &Snapshot, config: &RuleConfig) -> Vec<Finding> {
    let mut findings = Vec::new();

    if !snapshot.has_primary_key() {
        findings.push(Finding::new(
            Category::Performance,
            Severity::Critical,
            PERF_NO_PRIMARY_KEY,
            "Table has no primary key, which seriously affects replication and performance",
        ));
    }

    for column in &snapshot.columns {
        if !column.is_varchar() {
            continue;
        }
        if let Some(length) = column.type_length() {
            if length > config.wide_varchar_length {
                findings.push(
                    warning(
                        PERF_WIDE_VARCHAR,
                        format!(
                            "Column '{}' is VARCHAR({}), wide columns increase memory usage",
                            column.name, length
                        ),
                    )
                    .with_subject(&column.name),
                );
            }
        }
    }

    for column in &snapshot.columns {
        if column.is_lob() && snapshot.is_indexed(&column.name) {
            findings.push(
                warning(
                    PERF_INDEXED_LOB,
                    format!(
                        "TEXT/BLOB column '{}' is indexed, which hurts performance",
                        column.name
                    ),
                )
                .with_subject(&column.name),
            );
        }
    }

    let index_count = snapshot.indexes.len();
    if index_count > config.max_total_indexes {
        findings.push(warning(
            PERF_TOO_MANY_INDEXES,
            format!(
                "Table has {} indexes, which may slow down writes",
                index_count
            ),
        ));
    }

    if let Some(status) = &snapshot.status {
        if let Some(data_length) = status.data_length_bytes {
            if data_length > config.large_table_bytes {
                findings.push(info(
                    PERF_LARGE_TABLE,
                    format!(
                        "Table data is large ({:.1}MB), consider partitioning or archiving",
                        data_length as f64 / BYTES_PER_MIB
                    ),
                ));
            }

            if let Some(index_length) = status.index_length_bytes {
                if data_length > 0 {
                    let ratio = index_length as f64 / data_length as f64;
                    if ratio > config.index_ratio_threshold {
                        findings.push(info(
                            PERF_INDEX_RATIO_HIGH,
                            format!(
                                "Index size is {:.1}% of data size, there may be too many indexes",
                                ratio * 100.0
                            ),
                        ));
                    }
                }
            }
        }
    }

    findings
}

fn warning(code: &str, message: String) -> Finding {
    Finding::new(Category::Performance, Severity::Warning, code, message)
}

fn info(code: &str, message: String) -> Finding {
    Finding::new(Category::Performance, Severity::Info, code, message)
}
