//! Rule evaluators.
//!
//! Each rule family is a pure function from a [`Snapshot`] to the findings of
//! one [`Category`]. [`Rule`] is the closed set of families; callers iterate
//! [`Rule::ALL`] and hand the batches to [`crate::report::Report::aggregate`].

pub mod datatype;
pub mod index;
pub mod naming;
pub mod performance;

use crate::config::RuleConfig;
use crate::report::{Category, Finding};
use crate::table::Snapshot;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Naming,
    DataType,
    Index,
    Performance,
}

impl Rule {
    /// Every rule, in report order.
    pub const ALL: [Rule; 4] = [Rule::Naming, Rule::DataType, Rule::Index, Rule::Performance];

    pub fn category(self) -> Category {
        match self {
            Rule::Naming => Category::Naming,
            Rule::DataType => Category::DataType,
            Rule::Index => Category::Index,
            Rule::Performance => Category::Performance,
        }
    }

    /// Run the rule. Expects a snapshot that passed [`Snapshot::validate`].
    pub fn evaluate(self, snapshot: &Snapshot, config: &RuleConfig) -> Vec<Finding> {
        match self {
            Rule::Naming => naming::evaluate(snapshot, config),
            Rule::DataType => datatype::evaluate(snapshot, config),
            Rule::Index => index::evaluate(snapshot, config),
            Rule::Performance => performance::evaluate(snapshot, config),
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.category())
    }
}
