use crate::config::RuleConfig;
use crate::report::{Category, Finding, Severity};
use crate::table::{KeyRole, Snapshot};

pub const DATATYPE_INDEXED_LOB: &str = "DATATYPE_INDEXED_LOB";
pub const DATATYPE_LONG_VARCHAR: &str = "DATATYPE_LONG_VARCHAR";
pub const DATATYPE_SHORT_VARCHAR: &str = "DATATYPE_SHORT_VARCHAR";
pub const DATATYPE_MISSING_AUTOINCREMENT: &str = "DATATYPE_MISSING_AUTOINCREMENT";
pub const DATATYPE_TEMPORAL_MISMATCH: &str = "DATATYPE_TEMPORAL_MISMATCH";

/// Check each column's declared type against its name and key role.
pub fn evaluate(snapshot: &Snapshot, config: &RuleConfig) -> Vec<Finding> {
    let mut findings = Vec::new();

    for column in &snapshot.columns {
        let name = &column.name;
        let lower_name = name.to_lowercase();
        let base_type = column.base_type();

        if column.is_lob() && column.key_role != KeyRole::None {
            findings.push(
                Finding::new(
                    Category::DataType,
                    Severity::Warning,
                    DATATYPE_INDEXED_LOB,
                    format!(
                        "Column '{}' uses {} and is part of a key, which hurts performance",
                        name, base_type
                    ),
                )
                .with_subject(name),
            );
        }

        if column.is_varchar() {
            if let Some(length) = column.type_length() {
                if length > config.long_varchar_length {
                    findings.push(
                        info(
                            DATATYPE_LONG_VARCHAR,
                            format!(
                                "Column '{}' is VARCHAR({}), consider whether TEXT fits better",
                                name, length
                            ),
                        )
                        .with_subject(name),
                    );
                } else if length < config.short_varchar_length && !lower_name.contains("id") {
                    findings.push(
                        info(
                            DATATYPE_SHORT_VARCHAR,
                            format!(
                                "Column '{}' is a short VARCHAR({}), check that it is long enough",
                                name, length
                            ),
                        )
                        .with_subject(name),
                    );
                }
            }
        }

        if base_type.starts_with("int") && lower_name.contains("id") && !column.is_auto_increment()
        {
            findings.push(
                info(
                    DATATYPE_MISSING_AUTOINCREMENT,
                    format!(
                        "Column '{}' looks like an id column, consider AUTO_INCREMENT",
                        name
                    ),
                )
                .with_subject(name),
            );
        }

        if config.has_temporal_hint(&lower_name) && !config.is_temporal_type(&base_type) {
            findings.push(
                info(
                    DATATYPE_TEMPORAL_MISMATCH,
                    format!(
                        "Column '{}' looks like a time column but is {}, consider DATETIME or TIMESTAMP",
                        name, base_type
                    ),
                )
                .with_subject(name),
            );
        }
    }

    findings
}

fn info(code: &str, message: String) -> Finding {
    Finding::new(Category::DataType, Severity::Info, code, message)
}
