//! Query composition
//!
//! Walks a `QueryNode` tree and joins the rendered clauses with each node's
//! operator. Nested AND/OR nodes are grouped in parentheses; a nested NOT is
//! spliced in as-is since its prefix already binds it.

use tracing::{debug, trace};

use super::ast::{Operand, QueryNode};
use super::terms::{extract_terms, extract_text};
use super::types::Operator;
use crate::config::ConvertOptions;
use crate::error::QuerygenError;
use crate::Result;

/// Renders query nodes against a fixed set of options
#[derive(Clone, Copy, Debug)]
pub struct QueryComposer<'a> {
    options: &'a ConvertOptions,
}

impl<'a> QueryComposer<'a> {
    pub fn new(options: &'a ConvertOptions) -> Self {
        Self { options }
    }

    /// Render a query node; an empty query renders as an empty string
    pub fn compose(&self, node: &QueryNode) -> Result<String> {
        self.compose_at(node, 1)
    }

    fn compose_at(&self, node: &QueryNode, depth: usize) -> Result<String> {
        if depth > self.options.max_depth {
            return Err(QuerygenError::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }

        let clauses = self.extract_operands(&node.operands, depth)?;
        debug!(
            operator = %node.operator,
            clauses = clauses.len(),
            depth,
            "composed query node"
        );

        Ok(join_clauses(node.operator, clauses))
    }

    /// Render each operand, flattening term groups into the clause list
    fn extract_operands(&self, operands: &[Operand], depth: usize) -> Result<Vec<String>> {
        let mut clauses = Vec::with_capacity(operands.len());

        for operand in operands {
            match operand {
                Operand::Terms(group) => {
                    clauses.extend(extract_terms(group, &self.options.schema)?);
                }
                Operand::Text(text) => clauses.extend(extract_text(text)),
                Operand::Query(nested) => {
                    let rendered = self.compose_at(nested, depth + 1)?;
                    if rendered.is_empty() {
                        trace!(depth, "skipping empty nested query");
                    } else if nested.operator.is_unary() {
                        clauses.push(rendered);
                    } else {
                        clauses.push(format!("({})", rendered));
                    }
                }
            }
        }

        Ok(clauses)
    }
}

/// Join clauses with the operator's symbol
///
/// NOT prefixes the clause list once; several clauses are AND-joined and
/// grouped first so the prefix covers all of them.
pub fn join_clauses(operator: Operator, mut clauses: Vec<String>) -> String {
    match (operator, clauses.len()) {
        (_, 0) => String::new(),
        (Operator::Not, 1) => format!("NOT {}", clauses.remove(0)),
        (Operator::Not, _) => format!("NOT ({})", clauses.join(" AND ")),
        (_, 1) => clauses.remove(0),
        (operator, _) => clauses.join(&format!(" {} ", operator.symbol())),
    }
}
