use crate::config::RuleConfig;
use crate::report::{Category, Finding, Severity};
use crate::table::Snapshot;

pub const NAMING_TABLE_CASE: &str = "NAMING_TABLE_CASE";
pub const NAMING_TABLE_WHITESPACE: &str = "NAMING_TABLE_WHITESPACE";
pub const NAMING_TABLE_CHARSET: &str = "NAMING_TABLE_CHARSET";
pub const NAMING_COLUMN_CASE: &str = "NAMING_COLUMN_CASE";
pub const NAMING_COLUMN_WHITESPACE: &str = "NAMING_COLUMN_WHITESPACE";
pub const NAMING_RESERVED_WORD: &str = "NAMING_RESERVED_WORD";

/// Check table and column names against lower snake_case conventions.
///
/// Table checks come first, then each column in physical order.
pub fn evaluate(snapshot: &Snapshot, config: &RuleConfig) -> Vec<Finding> {
    let mut findings = Vec::new();
    let table = &snapshot.table_name;

    if !is_lowercase(table) {
        findings.push(
            warning(
                NAMING_TABLE_CASE,
                format!("Table name '{}' should be lower-case", table),
            )
            .with_subject(table),
        );
    }
    if has_whitespace(table) {
        findings.push(
            warning(
                NAMING_TABLE_WHITESPACE,
                format!("Table name '{}' should not contain whitespace", table),
            )
            .with_subject(table),
        );
    }
    if !is_identifier_charset(table) {
        findings.push(
            warning(
                NAMING_TABLE_CHARSET,
                format!(
                    "Table name '{}' should only contain letters, digits and underscores",
                    table
                ),
            )
            .with_subject(table),
        );
    }

    for column in &snapshot.columns {
        let name = &column.name;
        if !is_lowercase(name) {
            findings.push(
                warning(
                    NAMING_COLUMN_CASE,
                    format!("Column '{}' should be lower-case", name),
                )
                .with_subject(name),
            );
        }
        if has_whitespace(name) {
            findings.push(
                warning(
                    NAMING_COLUMN_WHITESPACE,
                    format!("Column '{}' should not contain whitespace", name),
                )
                .with_subject(name),
            );
        }
        if config.is_reserved(name) {
            findings.push(
                Finding::new(
                    Category::Naming,
                    Severity::Info,
                    NAMING_RESERVED_WORD,
                    format!(
                        "Column '{}' is a MySQL reserved word, quote it with backticks or rename it",
                        name
                    ),
                )
                .with_subject(name),
            );
        }
    }

    findings
}

fn warning(code: &str, message: String) -> Finding {
    Finding::new(Category::Naming, Severity::Warning, code, message)
}

/// True when the name has at least one cased character and none are upper-case.
/// A name without letters does not count as lower-case.
fn is_lowercase(name: &str) -> bool {
    let mut cased = false;
    for c in name.chars() {
        if c.is_uppercase() {
            return false;
        }
        if c.is_lowercase() {
            cased = true;
        }
    }
    cased
}

fn has_whitespace(name: &str) -> bool {
    name.chars().any(char::is_whitespace)
}

fn is_identifier_charset(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
