//! Core types for the query system

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Boolean operator joining the clauses of a query node
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// All clauses must match (default)
    #[default]
    And,
    /// At least one clause must match
    Or,
    /// Negation of the clause list
    Not,
}

impl Operator {
    /// Rendered symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
        }
    }

    /// Unary operators prefix their operands instead of joining them
    pub fn is_unary(&self) -> bool {
        matches!(self, Operator::Not)
    }

    /// Look up an operator code, case-insensitively
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "and" => Some(Operator::And),
            "or" => Some(Operator::Or),
            "not" => Some(Operator::Not),
            _ => None,
        }
    }

    /// Resolve an optional operator code, falling back to AND
    pub fn resolve(code: Option<&str>) -> Self {
        match code {
            None => Operator::default(),
            Some(code) => Self::from_code(code).unwrap_or_else(|| {
                warn!("Unknown operator '{}', using 'and'", code);
                Operator::default()
            }),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
