use crate::error::AdvisorResult;
use crate::table::{Snapshot, TableRef};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Highest issue count still rated `Good`.
pub const GOOD_MAX_ISSUES: usize = 3;

/// Highest issue count still rated `Fair`.
pub const FAIR_MAX_ISSUES: usize = 6;

/// Rule family a finding belongs to. Declaration order is report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Naming,
    DataType,
    Index,
    Performance,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Naming,
        Category::DataType,
        Category::Index,
        Category::Performance,
    ];

    fn section_title(&self) -> &'static str {
        match self {
            Category::Naming => "Naming Conventions",
            Category::DataType => "Data Types",
            Category::Index => "Index Design",
            Category::Performance => "Performance",
        }
    }

    fn all_clear(&self) -> &'static str {
        match self {
            Category::Naming => "Naming follows conventions",
            Category::DataType => "Data types look appropriate",
            Category::Index => "Index design looks good",
            Category::Performance => "No obvious performance problems",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            Category::Naming => "naming",
            Category::DataType => "datatype",
            Category::Index => "index",
            Category::Performance => "performance",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let label = match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Critical => "CRIT",
        };
        write!(f, "{}", label)
    }
}

/// One reported issue or suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Finding {
    pub category: Category,
    pub severity: Severity,
    pub code: String,
    pub message: String,
    pub subject: Option<String>,
}

impl Finding {
    pub fn new(
        category: Category,
        severity: Severity,
        code: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            severity,
            code: code.to_string(),
            message: message.into(),
            subject: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

impl Display for Finding {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[{}] {} ({})", self.severity, self.message, self.code)
    }
}

/// Coarse quality rating derived from the number of findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl ScoreBand {
    /// Every finding counts the same regardless of severity.
    pub fn from_issue_count(issue_count: usize) -> Self {
        match issue_count {
            0 => ScoreBand::Excellent,
            n if n <= GOOD_MAX_ISSUES => ScoreBand::Good,
            n if n <= FAIR_MAX_ISSUES => ScoreBand::Fair,
            _ => ScoreBand::NeedsImprovement,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "The table design is clean, no obvious problems found",
            ScoreBand::Good => "The table design is mostly sound, with a little room to optimize",
            ScoreBand::Fair => "The table design has several issues worth fixing",
            ScoreBand::NeedsImprovement => {
                "The table design has many issues, a redesign is strongly recommended"
            }
        }
    }
}

impl Display for ScoreBand {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let label = match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::NeedsImprovement => "Needs improvement",
        };
        write!(f, "{}", label)
    }
}

/// Basic facts about the analyzed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    pub column_count: usize,
    pub index_count: usize,
    pub engine: Option<String>,
    pub collation: Option<String>,
}

impl From<&Snapshot> for TableSummary {
    fn from(snapshot: &Snapshot) -> Self {
        let status = snapshot.status.as_ref();
        Self {
            column_count: snapshot.columns.len(),
            index_count: snapshot.indexes.len(),
            engine: status.and_then(|s| s.engine.clone()),
            collation: status.and_then(|s| s.collation.clone()),
        }
    }
}

/// General advice printed after any performance finding.
pub const PERFORMANCE_TIPS: [&str; 5] = [
    "Make sure every table has a primary key",
    "Avoid indexing TEXT/BLOB columns",
    "Keep VARCHAR lengths no larger than the data needs",
    "Review index usage periodically and drop unused indexes",
    "Consider partitioning or archiving for large tables",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub table_ref: TableRef,
    pub summary: TableSummary,
    pub findings: Vec<Finding>,
    pub issue_count: usize,
    pub score_band: ScoreBand,
}

impl Report {
    /// Merge per-category finding batches into one report.
    ///
    /// Batches may arrive in any order; they are re-sequenced into
    /// [`Category::ALL`] order while each batch keeps its own order.
    pub fn aggregate(
        table_ref: TableRef,
        summary: TableSummary,
        mut batches: Vec<(Category, Vec<Finding>)>,
    ) -> Self {
        batches.sort_by_key(|(category, _)| *category);
        let findings: Vec<Finding> = batches
            .into_iter()
            .flat_map(|(_, findings)| findings)
            .collect();
        let issue_count = findings.len();

        Self {
            table_ref,
            summary,
            findings,
            issue_count,
            score_band: ScoreBand::from_issue_count(issue_count),
        }
    }

    pub fn findings_in(&self, category: Category) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.category == category)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.findings.iter().any(|f| f.code == code)
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    pub fn to_json(&self, pretty: bool) -> AdvisorResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "{}", "━".repeat(60))?;
        writeln!(f, " Table Design Report: {}", self.table_ref)?;
        writeln!(f, "{}", "━".repeat(60))?;

        writeln!(f, "\n Basic Info")?;
        writeln!(f, "   • Columns: {}", self.summary.column_count)?;
        writeln!(f, "   • Indexes: {}", self.summary.index_count)?;
        if let Some(engine) = &self.summary.engine {
            writeln!(f, "   • Engine: {}", engine)?;
        }
        if let Some(collation) = &self.summary.collation {
            writeln!(f, "   • Collation: {}", collation)?;
        }

        for category in Category::ALL {
            writeln!(f, "\n {}", category.section_title())?;
            let mut any = false;
            for finding in self.findings_in(category) {
                any = true;
                writeln!(f, "   {}", finding)?;
            }
            if !any {
                writeln!(f, "   ✓ {}", category.all_clear())?;
            } else if category == Category::Performance {
                writeln!(f, "\n   Suggestions:")?;
                for tip in PERFORMANCE_TIPS {
                    writeln!(f, "   • {}", tip)?;
                }
            }
        }

        writeln!(f, "\n Overall Assessment")?;
        writeln!(
            f,
            "   {}: {}",
            self.score_band,
            self.score_band.description()
        )?;
        writeln!(f, "   • Findings: {}", self.issue_count)?;
        write!(f, "{}", "━".repeat(60))
    }
}
