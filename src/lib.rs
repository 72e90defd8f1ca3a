//! # Table Advisor
//!
//! Reviews the design of a single MySQL/MariaDB table and reports naming,
//! data type, index and performance issues together with an overall rating.
//!
//! A [`MetadataProvider`] captures the table's structure as a [`Snapshot`];
//! four independent rule families turn the snapshot into [`Finding`]s, which
//! are merged into a [`Report`] in a fixed category order.
//!
//! ```no_run
//! use std::sync::Arc;
//! use table_advisor::{Analyzer, StaticProvider, Snapshot};
//!
//! # async fn example(snapshot: Snapshot) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let provider = StaticProvider::new().with_snapshot(snapshot);
//! let analyzer = Analyzer::builder(Arc::new(provider)).build();
//!
//! let report = analyzer.analyze("shop", "users").await?;
//! println!("{}", report);
//! println!("{}", report.to_json(true)?);
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod provider;
pub mod report;
pub mod rules;
pub mod table;

pub use analyzer::{evaluate, Analyzer, AnalyzerBuilder};
pub use config::RuleConfig;
pub use error::{AdvisorError, AdvisorResult};
pub use provider::{MetadataProvider, MySqlProvider, StaticProvider};
pub use report::{Category, Finding, Report, ScoreBand, Severity, TableSummary};
pub use table::{Column, IndexEntry, KeyRole, Snapshot, TableRef, TableStatus};
