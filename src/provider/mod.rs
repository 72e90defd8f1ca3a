//! Metadata providers.
//!
//! A provider turns a (database, table) pair into a [`Snapshot`]. The analyzer
//! only talks to the [`MetadataProvider`] trait, so any store can feed it.

pub mod mysql;

use crate::error::{AdvisorError, AdvisorResult};
use crate::table::{IndexEntry, Snapshot, TableRef};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

pub use mysql::MySqlProvider;

#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Capture the current structure of one table.
    ///
    /// # Errors
    ///
    /// * [`AdvisorError::NotFound`] if the table does not exist
    /// * [`AdvisorError::ConnectionError`] if the store cannot be reached
    async fn fetch_snapshot(&self, database: &str, table: &str) -> AdvisorResult<Snapshot>;
}

/// Serves fixed snapshots from memory.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    snapshots: HashMap<TableRef, Snapshot>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(mut self, snapshot: Snapshot) -> Self {
        self.insert(snapshot);
        self
    }

    /// Adds or replaces the snapshot for its table.
    pub fn insert(&mut self, snapshot: Snapshot) {
        self.snapshots.insert(snapshot.table_ref(), snapshot);
    }

    /// Load a single snapshot serialized as JSON.
    pub fn from_json_file(path: impl AsRef<Path>) -> AdvisorResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&contents)?;
        Ok(Self::new().with_snapshot(snapshot))
    }
}

#[async_trait]
impl MetadataProvider for StaticProvider {
    async fn fetch_snapshot(&self, database: &str, table: &str) -> AdvisorResult<Snapshot> {
        let key = TableRef::new(database, table);
        self.snapshots
            .get(&key)
            .cloned()
            .ok_or_else(|| AdvisorError::NotFound(key.to_string()))
    }
}

/// One (index, column) row as reported by `information_schema.STATISTICS`.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct IndexRow {
    pub index_name: String,
    pub non_unique: i64,
    /// `None` for functional key parts.
    pub column_name: Option<String>,
    pub index_type: String,
}

/// Group per-column index rows into logical indexes.
///
/// Rows must arrive ordered by key position within each index. Indexes keep
/// the order in which their names first appear; key parts without a column
/// are skipped and an index left without columns is dropped.
pub fn group_index_rows(rows: Vec<IndexRow>) -> Vec<IndexEntry> {
    let mut indexes: Vec<IndexEntry> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let Some(column_name) = row.column_name else {
            continue;
        };
        match positions.get(&row.index_name) {
            Some(&position) => indexes[position].columns.push(column_name),
            None => {
                positions.insert(row.index_name.clone(), indexes.len());
                indexes.push(IndexEntry {
                    name: row.index_name,
                    columns: vec![column_name],
                    unique: row.non_unique == 0,
                    index_type: row.index_type,
                });
            }
        }
    }

    indexes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn row(index: &str, non_unique: i64, column: Option<&str>) -> IndexRow {
        IndexRow {
            index_name: index.to_string(),
            non_unique,
            column_name: column.map(|c| c.to_string()),
            index_type: "BTREE".to_string(),
        }
    }

    #[test]
    fn test_group_preserves_key_order() {
        let indexes = group_index_rows(vec![
            row("PRIMARY", 0, Some("id")),
            row("idx_name", 1, Some("last_name")),
            row("idx_name", 1, Some("first_name")),
        ]);

        assert_eq!(indexes.len(), 2);
        assert_eq!(indexes[0].name, "PRIMARY");
        assert!(indexes[0].unique);
        assert_eq!(indexes[1].columns, vec!["last_name", "first_name"]);
        assert!(!indexes[1].unique);
    }

    #[test]
    fn test_group_keeps_first_appearance_order() {
        let indexes = group_index_rows(vec![
            row("uk_email", 0, Some("email")),
            row("PRIMARY", 0, Some("id")),
            row("idx_a", 1, Some("a")),
        ]);
        let names: Vec<&str> = indexes.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["uk_email", "PRIMARY", "idx_a"]);
    }

    #[test]
    fn test_group_handles_interleaved_rows() {
        let indexes = group_index_rows(vec![
            row("idx_a", 1, Some("a")),
            row("idx_b", 1, Some("b")),
            row("idx_a", 1, Some("c")),
        ]);
        assert_eq!(indexes[0].columns, vec!["a", "c"]);
        assert_eq!(indexes[1].columns, vec!["b"]);
    }

    #[test]
    fn test_group_skips_functional_key_parts() {
        let indexes = group_index_rows(vec![
            row("idx_expr", 1, None),
            row("idx_mixed", 1, Some("a")),
            row("idx_mixed", 1, None),
        ]);
        assert_eq!(indexes.len(), 1);
        assert_eq!(indexes[0].name, "idx_mixed");
        assert_eq!(indexes[0].columns, vec!["a"]);
    }

    #[test]
    fn test_group_empty() {
        assert!(group_index_rows(Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn test_static_provider_returns_snapshot() {
        let snapshot = Snapshot::new("shop", "users", vec![Column::new("id", "int")]);
        let provider = StaticProvider::new().with_snapshot(snapshot.clone());

        let fetched = provider.fetch_snapshot("shop", "users").await.unwrap();
        assert_eq!(fetched, snapshot);
    }

    #[tokio::test]
    async fn test_static_provider_not_found() {
        let provider = StaticProvider::new();
        let err = provider.fetch_snapshot("shop", "nope").await.unwrap_err();
        assert!(matches!(err, AdvisorError::NotFound(ref t) if t == "shop.nope"));
    }

    #[test]
    fn test_from_json_file() {
        let path = std::env::temp_dir().join(format!(
            "table-advisor-snapshot-{}.json",
            std::process::id()
        ));
        let snapshot = Snapshot::new("shop", "users", vec![Column::new("id", "int")]);
        std::fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();

        let provider = StaticProvider::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(provider.snapshots.len(), 1);
        assert!(provider.snapshots.contains_key(&TableRef::new("shop", "users")));
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = StaticProvider::from_json_file("/nonexistent/snapshot.json").unwrap_err();
        assert!(matches!(err, AdvisorError::Io(_)));
    }
}
