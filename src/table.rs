use crate::error::{AdvisorError, AdvisorResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Name MySQL gives the primary key index.
pub const PRIMARY_INDEX_NAME: &str = "PRIMARY";

/// Role a column plays in the table's keys, as reported by `COLUMN_KEY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyRole {
    #[default]
    None,
    Primary,
    Unique,
    Index,
    Multi,
}

impl KeyRole {
    /// Map an `information_schema.COLUMNS.COLUMN_KEY` value.
    pub fn from_column_key(key: &str) -> Self {
        match key.trim().to_ascii_uppercase().as_str() {
            "" => KeyRole::None,
            "PRI" => KeyRole::Primary,
            "UNI" => KeyRole::Unique,
            "MUL" => KeyRole::Multi,
            _ => KeyRole::Index,
        }
    }

    pub fn as_column_key(&self) -> &'static str {
        match self {
            KeyRole::None => "",
            KeyRole::Primary => "PRI",
            KeyRole::Unique => "UNI",
            KeyRole::Index => "IDX",
            KeyRole::Multi => "MUL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub sql_type: String,
    pub nullable: bool,
    #[serde(default)]
    pub key_role: KeyRole,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub extra: String,
}

impl Column {
    /// Create a nullable, unkeyed column. The type string is lower-cased.
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into().to_ascii_lowercase(),
            nullable: true,
            key_role: KeyRole::None,
            default_value: None,
            extra: String::new(),
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn key_role(mut self, key_role: KeyRole) -> Self {
        self.key_role = key_role;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }

    /// Lower-cased type name without length or modifiers:
    /// `"INT(11) UNSIGNED"` gives `"int"`.
    pub fn base_type(&self) -> String {
        self.sql_type
            .trim()
            .split(|c: char| c == '(' || c.is_whitespace())
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase()
    }

    /// First integer inside the parentheses of the type, if any.
    /// `"decimal(10,2)"` gives `Some(10)`, `"text"` gives `None`.
    pub fn type_length(&self) -> Option<u64> {
        let open = self.sql_type.find('(')?;
        let rest = &self.sql_type[open + 1..];
        let inner = match rest.find(')') {
            Some(close) => &rest[..close],
            None => rest,
        };
        inner
            .split(|c: char| !c.is_ascii_digit())
            .find(|digits| !digits.is_empty())
            .and_then(|digits| digits.parse().ok())
    }

    /// Whether the column is a `text` or `blob` family type.
    pub fn is_lob(&self) -> bool {
        let base = self.base_type();
        base.ends_with("text") || base.ends_with("blob")
    }

    pub fn is_varchar(&self) -> bool {
        self.base_type() == "varchar"
    }

    pub fn is_auto_increment(&self) -> bool {
        self.extra.to_ascii_lowercase().contains("auto_increment")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    /// Column names in key order.
    pub columns: Vec<String>,
    pub unique: bool,
    #[serde(default = "default_index_type")]
    pub index_type: String,
}

fn default_index_type() -> String {
    "BTREE".to_string()
}

impl IndexEntry {
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            unique: false,
            index_type: default_index_type(),
        }
    }

    /// Primary key over the given columns.
    pub fn primary<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(PRIMARY_INDEX_NAME, columns).unique()
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn index_type(mut self, index_type: impl Into<String>) -> Self {
        self.index_type = index_type.into();
        self
    }

    pub fn is_primary(&self) -> bool {
        self.name == PRIMARY_INDEX_NAME
    }

    /// Whether the column appears anywhere in the key.
    pub fn covers(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Column names sorted, for order-independent comparison.
    pub fn column_set(&self) -> Vec<String> {
        let mut set = self.columns.clone();
        set.sort();
        set
    }
}

/// Storage statistics. Providers leave fields they cannot supply as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStatus {
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub collation: Option<String>,
    #[serde(default)]
    pub row_count_estimate: Option<u64>,
    #[serde(default)]
    pub data_length_bytes: Option<u64>,
    #[serde(default)]
    pub index_length_bytes: Option<u64>,
}

/// Database and table name pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef {
    pub database: String,
    pub table: String,
}

impl TableRef {
    pub fn new(database: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
        }
    }
}

impl Display for TableRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}.{}", self.database, self.table)
    }
}

/// Point-in-time capture of one table's structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub database_name: String,
    pub table_name: String,
    /// Physical column order.
    pub columns: Vec<Column>,
    /// One logical index per name.
    #[serde(default)]
    pub indexes: Vec<IndexEntry>,
    #[serde(default)]
    pub status: Option<TableStatus>,
    #[serde(default)]
    pub create_table_sql: Option<String>,
}

impl Snapshot {
    pub fn new(
        database_name: impl Into<String>,
        table_name: impl Into<String>,
        columns: Vec<Column>,
    ) -> Self {
        Self {
            database_name: database_name.into(),
            table_name: table_name.into(),
            columns,
            indexes: Vec::new(),
            status: None,
            create_table_sql: None,
        }
    }

    pub fn with_index(mut self, index: IndexEntry) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn with_status(mut self, status: TableStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_create_table_sql(mut self, sql: impl Into<String>) -> Self {
        self.create_table_sql = Some(sql.into());
        self
    }

    pub fn table_ref(&self) -> TableRef {
        TableRef::new(&self.database_name, &self.table_name)
    }

    pub fn primary_key(&self) -> Option<&IndexEntry> {
        self.indexes.iter().find(|index| index.is_primary())
    }

    pub fn has_primary_key(&self) -> bool {
        self.primary_key().is_some()
    }

    /// Every index except `PRIMARY`, in snapshot order.
    pub fn secondary_indexes(&self) -> impl Iterator<Item = &IndexEntry> {
        self.indexes.iter().filter(|index| !index.is_primary())
    }

    /// Whether any index, primary included, covers the column.
    pub fn is_indexed(&self, column: &str) -> bool {
        self.indexes.iter().any(|index| index.covers(column))
    }

    /// Reject snapshots the rule evaluators cannot work on.
    pub fn validate(&self) -> AdvisorResult<()> {
        let table_ref = self.table_ref();
        if self.table_name.is_empty() {
            return Err(AdvisorError::InvalidSnapshot(
                "table name is empty".to_string(),
            ));
        }
        if self.columns.is_empty() {
            return Err(AdvisorError::InvalidSnapshot(format!(
                "{} has no columns",
                table_ref
            )));
        }

        let mut column_names = HashSet::new();
        for column in &self.columns {
            if column.name.is_empty() {
                return Err(AdvisorError::InvalidSnapshot(format!(
                    "{} has a column with an empty name",
                    table_ref
                )));
            }
            if column.sql_type.trim().is_empty() {
                return Err(AdvisorError::InvalidSnapshot(format!(
                    "column '{}' of {} has no type",
                    column.name, table_ref
                )));
            }
            column_names.insert(column.name.as_str());
        }

        let mut index_names = HashSet::new();
        for index in &self.indexes {
            if !index_names.insert(index.name.as_str()) {
                return Err(AdvisorError::InvalidSnapshot(format!(
                    "index '{}' of {} appears more than once",
                    index.name, table_ref
                )));
            }
            if index.columns.is_empty() {
                return Err(AdvisorError::InvalidSnapshot(format!(
                    "index '{}' of {} has no columns",
                    index.name, table_ref
                )));
            }
            if let Some(missing) = index
                .columns
                .iter()
                .find(|c| !column_names.contains(c.as_str()))
            {
                return Err(AdvisorError::InvalidSnapshot(format!(
                    "index '{}' of {} references unknown column '{}'",
                    index.name, table_ref, missing
                )));
            }
        }

        Ok(())
    }
}

/// Table structure view: columns, indexes, status and DDL.
impl Display for Snapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "{}", "━".repeat(60))?;
        writeln!(f, " Table Structure: {}", self.table_ref())?;
        writeln!(f, "{}", "━".repeat(60))?;

        writeln!(f, "\n Columns ({}):", self.columns.len())?;
        for column in &self.columns {
            write!(
                f,
                "   • {}: {} {}",
                column.name,
                column.sql_type,
                if column.nullable { "NULL" } else { "NOT NULL" }
            )?;
            if column.key_role != KeyRole::None {
                write!(f, " [{}]", column.key_role.as_column_key())?;
            }
            if let Some(default) = &column.default_value {
                write!(f, " DEFAULT: {}", default)?;
            }
            if !column.extra.is_empty() {
                write!(f, " {}", column.extra)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "\n Indexes ({}):", self.indexes.len())?;
        for index in &self.indexes {
            writeln!(
                f,
                "   • {}: ({}) - {} {}",
                index.name,
                index.columns.join(", "),
                if index.unique { "UNIQUE" } else { "NON-UNIQUE" },
                index.index_type
            )?;
        }

        if let Some(status) = &self.status {
            let unknown = || "Unknown".to_string();
            writeln!(f, "\n Status:")?;
            writeln!(
                f,
                "   • Engine: {}",
                status.engine.clone().unwrap_or_else(unknown)
            )?;
            writeln!(
                f,
                "   • Collation: {}",
                status.collation.clone().unwrap_or_else(unknown)
            )?;
            writeln!(
                f,
                "   • Rows: {}",
                status
                    .row_count_estimate
                    .map(|v| v.to_string())
                    .unwrap_or_else(unknown)
            )?;
            writeln!(
                f,
                "   • Data length: {} bytes",
                status
                    .data_length_bytes
                    .map(|v| v.to_string())
                    .unwrap_or_else(unknown)
            )?;
            writeln!(
                f,
                "   • Index length: {} bytes",
                status
                    .index_length_bytes
                    .map(|v| v.to_string())
                    .unwrap_or_else(unknown)
            )?;
        }

        if let Some(sql) = &self.create_table_sql {
            writeln!(f, "\n DDL:")?;
            writeln!(f, "{}", sql)?;
        }

        Ok(())
    }
}
