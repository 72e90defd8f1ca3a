//! Thresholds and word lists used by the rule evaluators.
//!
//! The defaults reproduce the reference rule set. Every rule reads its limits
//! from a [`RuleConfig`] so that rules can be tuned or tested in isolation.

use serde::{Deserialize, Serialize};

/// Column names that collide with MySQL keywords.
pub const DEFAULT_RESERVED_WORDS: [&str; 8] = [
    "order", "group", "select", "from", "where", "insert", "update", "delete",
];

/// VARCHAR lengths above this suggest TEXT instead.
pub const LONG_VARCHAR_LENGTH: u64 = 255;

/// VARCHAR lengths below this are unusually short for non-id columns.
pub const SHORT_VARCHAR_LENGTH: u64 = 10;

/// VARCHAR lengths above this inflate in-memory row buffers.
pub const WIDE_VARCHAR_LENGTH: u64 = 500;

/// Secondary (non-primary) indexes allowed before writes are considered at risk.
pub const MAX_SECONDARY_INDEXES: usize = 5;

/// Total indexes, primary included, allowed before writes are considered at risk.
pub const MAX_TOTAL_INDEXES: usize = 6;

/// Data length above which a table is considered large.
/// Default: 100 MiB
pub const LARGE_TABLE_BYTES: u64 = 100 * 1024 * 1024;

/// Index length / data length ratio above which indexes are considered excessive.
pub const INDEX_RATIO_THRESHOLD: f64 = 0.5;

/// Name fragments that mark a column as holding a date or time.
pub const TEMPORAL_NAME_HINTS: [&str; 4] = ["time", "date", "created", "updated"];

/// Base types accepted for temporal columns.
pub const TEMPORAL_TYPES: [&str; 4] = ["datetime", "timestamp", "date", "time"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Lower-case reserved words; matched case-insensitively.
    pub reserved_words: Vec<String>,
    /// Lower-case name fragments that mark a temporal column.
    pub temporal_name_hints: Vec<String>,
    /// Base types a temporal column may use.
    pub temporal_types: Vec<String>,
    pub long_varchar_length: u64,
    pub short_varchar_length: u64,
    pub wide_varchar_length: u64,
    pub max_secondary_indexes: usize,
    pub max_total_indexes: usize,
    pub large_table_bytes: u64,
    pub index_ratio_threshold: f64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            reserved_words: DEFAULT_RESERVED_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
            temporal_name_hints: TEMPORAL_NAME_HINTS.iter().map(|h| h.to_string()).collect(),
            temporal_types: TEMPORAL_TYPES.iter().map(|t| t.to_string()).collect(),
            long_varchar_length: LONG_VARCHAR_LENGTH,
            short_varchar_length: SHORT_VARCHAR_LENGTH,
            wide_varchar_length: WIDE_VARCHAR_LENGTH,
            max_secondary_indexes: MAX_SECONDARY_INDEXES,
            max_total_indexes: MAX_TOTAL_INDEXES,
            large_table_bytes: LARGE_TABLE_BYTES,
            index_ratio_threshold: INDEX_RATIO_THRESHOLD,
        }
    }
}

impl RuleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a word to the reserved set.
    pub fn with_reserved_word(mut self, word: impl Into<String>) -> Self {
        let word = word.into().to_ascii_lowercase();
        if !self.reserved_words.contains(&word) {
            self.reserved_words.push(word);
        }
        self
    }

    pub fn with_temporal_name_hint(mut self, hint: impl Into<String>) -> Self {
        let hint = hint.into().to_lowercase();
        if !self.temporal_name_hints.contains(&hint) {
            self.temporal_name_hints.push(hint);
        }
        self
    }

    pub fn with_temporal_type(mut self, sql_type: impl Into<String>) -> Self {
        let sql_type = sql_type.into().to_ascii_lowercase();
        if !self.temporal_types.contains(&sql_type) {
            self.temporal_types.push(sql_type);
        }
        self
    }

    pub fn with_long_varchar_length(mut self, length: u64) -> Self {
        self.long_varchar_length = length;
        self
    }

    pub fn with_short_varchar_length(mut self, length: u64) -> Self {
        self.short_varchar_length = length;
        self
    }

    pub fn with_wide_varchar_length(mut self, length: u64) -> Self {
        self.wide_varchar_length = length;
        self
    }

    pub fn with_max_secondary_indexes(mut self, max: usize) -> Self {
        self.max_secondary_indexes = max;
        self
    }

    pub fn with_max_total_indexes(mut self, max: usize) -> Self {
        self.max_total_indexes = max;
        self
    }

    pub fn with_large_table_bytes(mut self, bytes: u64) -> Self {
        self.large_table_bytes = bytes;
        self
    }

    pub fn with_index_ratio_threshold(mut self, ratio: f64) -> Self {
        self.index_ratio_threshold = ratio;
        self
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words
            .iter()
            .any(|word| word.eq_ignore_ascii_case(name))
    }

    /// True when a lower-cased column name carries a temporal hint.
    pub fn has_temporal_hint(&self, lower_name: &str) -> bool {
        self.temporal_name_hints
            .iter()
            .any(|hint| lower_name.contains(hint.as_str()))
    }

    pub fn is_temporal_type(&self, base_type: &str) -> bool {
        self.temporal_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(base_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = RuleConfig::default();
        assert_eq!(config.long_varchar_length, 255);
        assert_eq!(config.wide_varchar_length, 500);
        assert_eq!(config.max_secondary_indexes, 5);
        assert_eq!(config.max_total_indexes, 6);
        assert_eq!(config.large_table_bytes, 104_857_600);
        assert!((config.index_ratio_threshold - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reserved_words_case_insensitive() {
        let config = RuleConfig::default();
        assert!(config.is_reserved("order"));
        assert!(config.is_reserved("ORDER"));
        assert!(config.is_reserved("Select"));
        assert!(!config.is_reserved("orders"));
    }

    #[test]
    fn test_with_reserved_word_extends_set() {
        let config = RuleConfig::default().with_reserved_word("KEY");
        assert!(config.is_reserved("key"));
        assert_eq!(config.reserved_words.len(), DEFAULT_RESERVED_WORDS.len() + 1);

        let config = config.with_reserved_word("key");
        assert_eq!(config.reserved_words.len(), DEFAULT_RESERVED_WORDS.len() + 1);
    }

    #[test]
    fn test_temporal_lists() {
        let config = RuleConfig::default();
        assert!(config.has_temporal_hint("created_at"));
        assert!(!config.has_temporal_hint("title"));
        assert!(config.is_temporal_type("DATETIME"));
        assert!(!config.is_temporal_type("year"));

        let config = config
            .with_temporal_name_hint("Expires")
            .with_temporal_type("YEAR");
        assert!(config.has_temporal_hint("expires_on"));
        assert!(config.is_temporal_type("year"));
        assert_eq!(config.temporal_types.len(), TEMPORAL_TYPES.len() + 1);
    }

    #[test]
    fn test_threshold_overrides() {
        let config = RuleConfig::new()
            .with_long_varchar_length(100)
            .with_short_varchar_length(4)
            .with_wide_varchar_length(300)
            .with_max_secondary_indexes(2)
            .with_max_total_indexes(3);
        assert_eq!(config.long_varchar_length, 100);
        assert_eq!(config.short_varchar_length, 4);
        assert_eq!(config.wide_varchar_length, 300);
        assert_eq!(config.max_secondary_indexes, 2);
        assert_eq!(config.max_total_indexes, 3);
    }
}
