//! The tagged filter tree compiled into a WHERE-clause predicate.

use crate::{operator::FilterOp, predicate::CompiledPredicate};
use model::Value;
use serde::{Deserialize, Serialize};

/// How sibling predicates are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    And,
    Or,
}

impl Combinator {
    pub fn sql(&self) -> &'static str {
        match self {
            Combinator::And => "AND",
            Combinator::Or => "OR",
        }
    }
}

/// One entry of a filter list.
///
/// A loose input object carrying an `and` list, an `or` list, and leaf field
/// entries at the same time normalizes into one node per entry: the `and`
/// group, then the `or` group, then the leaves in encounter order (see
/// `parse`).
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    /// A nested sub-group. Its children are joined by `op`, and the group
    /// itself attaches to the parent with `op` as well, regardless of the
    /// combinator the parent was compiled with.
    Group {
        op: Combinator,
        children: Vec<FilterNode>,
    },

    /// A single field/operator/value constraint, joined to its siblings by
    /// the combinator of the enclosing compile call.
    Clause(Clause),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Clause {
    pub fn new(field: &str, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.to_string(),
            op,
            value: value.into(),
        }
    }
}

/// What the compiler accepts at its boundary.
///
/// `Prebuilt` carries an already-rendered predicate (a test fixture or a
/// pre-validated expression) and passes through compilation untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterInput {
    Tree(Vec<FilterNode>),
    Prebuilt(CompiledPredicate),
}

impl FilterInput {
    /// An empty tree: compiles to a predicate that imposes no constraint.
    pub fn empty() -> Self {
        FilterInput::Tree(Vec::new())
    }
}

impl From<Vec<FilterNode>> for FilterInput {
    fn from(nodes: Vec<FilterNode>) -> Self {
        FilterInput::Tree(nodes)
    }
}

impl From<CompiledPredicate> for FilterInput {
    fn from(predicate: CompiledPredicate) -> Self {
        FilterInput::Prebuilt(predicate)
    }
}
