use crate::config::RuleConfig;
use crate::report::{Category, Finding, Severity};
use crate::table::Snapshot;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

pub const INDEX_MISSING_PRIMARY_KEY: &str = "INDEX_MISSING_PRIMARY_KEY";
pub const INDEX_TOO_MANY: &str = "INDEX_TOO_MANY";
pub const INDEX_DUPLICATE: &str = "INDEX_DUPLICATE";
pub const INDEX_MISSING_FOREIGN_KEY_INDEX: &str = "INDEX_MISSING_FOREIGN_KEY_INDEX";

/// Check primary key presence, index count, duplicate indexes and
/// unindexed `*_id` columns.
pub fn evaluate(snapshot: &Snapshot, config: &RuleConfig) -> Vec<Finding> {
    let mut findings = Vec::new();

    if !snapshot.has_primary_key() {
        findings.push(Finding::new(
            Category::Index,
            Severity::Critical,
            INDEX_MISSING_PRIMARY_KEY,
            "Table has no primary key, adding one is strongly recommended",
        ));
    }

    let secondary_count = snapshot.secondary_indexes().count();
    if secondary_count > config.max_secondary_indexes {
        findings.push(Finding::new(
            Category::Index,
            Severity::Warning,
            INDEX_TOO_MANY,
            format!(
                "Table has {} non-primary indexes, too many indexes slow down writes",
                secondary_count
            ),
        ));
    }

    // column set -> (first index with that set, already reported)
    let mut seen: HashMap<Vec<String>, (&str, bool)> = HashMap::new();
    for index in snapshot.secondary_indexes() {
        match seen.entry(index.column_set()) {
            Entry::Occupied(mut entry) => {
                let (first, reported) = entry.get_mut();
                if !*reported {
                    *reported = true;
                    findings.push(
                        Finding::new(
                            Category::Index,
                            Severity::Warning,
                            INDEX_DUPLICATE,
                            format!(
                                "Index '{}' covers the same columns as '{}' and is likely redundant",
                                index.name, first
                            ),
                        )
                        .with_subject(&index.name),
                    );
                }
            }
            Entry::Vacant(entry) => {
                entry.insert((index.name.as_str(), false));
            }
        }
    }

    for column in &snapshot.columns {
        let name = &column.name;
        if name.ends_with("_id") && name != "id" && !snapshot.is_indexed(name) {
            findings.push(
                Finding::new(
                    Category::Index,
                    Severity::Info,
                    INDEX_MISSING_FOREIGN_KEY_INDEX,
                    format!(
                        "Foreign key column '{}' has no index, adding one speeds up joins",
                        name
                    ),
                )
                .with_subject(name),
            );
        }
    }

    findings
}
