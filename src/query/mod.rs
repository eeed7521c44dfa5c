//! Query string generation
//!
//! Converts a structured query description into a Lucene-style query string:
//! - `field:value` clauses with type suffixes (`age<int>:55`)
//! - Quoted, escaped string literals (`name:"gareth"`)
//! - "Any of" shorthand (`name:("gareth" OR "milan")`)
//! - Inclusive ranges (`age<int>:[55 TO 63]`)
//! - Boolean operators (AND, OR, NOT) with grouped sub-queries
//!
//! # Example
//!
//! ```json
//! {
//!   "$operands": [
//!     { "name": "gareth" },
//!     { "$operator": "or", "$operands": [{ "job": "geek" }, { "job": "musician" }] }
//!   ]
//! }
//! ```
//!
//! renders as `name:"gareth" AND (job:"geek" OR job:"musician")`.

pub mod ast;
pub mod composer;
pub mod escape;
pub mod formatter;
pub mod parser;
pub mod terms;
pub mod types;

pub use ast::{FieldValue, Operand, QueryNode, Range, Scalar, TermGroup};
pub use composer::QueryComposer;
pub use escape::{escape, quote};
pub use formatter::ValueFormatter;
pub use parser::QueryParser;
pub use types::Operator;
