//! The recursive filter compiler.

use crate::{
    error::Result,
    namer::ParamNamer,
    node::{Combinator, FilterInput, FilterNode},
    operator,
    predicate::{CompiledPredicate, Group},
    resolver,
};
use model::FieldMap;
use tracing::debug;

/// Per-compile configuration: the ambient combinator for root-level clauses,
/// field resolution metadata, and an optional table alias.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub combinator: Combinator,
    pub fields: FieldMap,
    pub alias: Option<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            combinator: Combinator::And,
            fields: FieldMap::new(),
            alias: None,
        }
    }
}

impl CompileOptions {
    pub fn combinator(mut self, op: Combinator) -> Self {
        self.combinator = op;
        self
    }

    pub fn fields(mut self, fields: FieldMap) -> Self {
        self.fields = fields;
        self
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }
}

/// Compiles a filter into one grouped, parameterized predicate.
///
/// A prebuilt predicate passes through untouched. An empty tree yields the
/// trivial predicate (no constraint). Compilation either fully succeeds or
/// fully fails; no partial predicate is ever returned.
pub fn compile(input: &FilterInput, options: &CompileOptions) -> Result<CompiledPredicate> {
    let nodes = match input {
        FilterInput::Prebuilt(predicate) => return Ok(predicate.clone()),
        FilterInput::Tree(nodes) => nodes,
    };

    let mut namer = ParamNamer::new();
    let group = compile_list(
        nodes,
        options.combinator,
        &options.fields,
        options.alias.as_deref(),
        &mut namer,
    )?;
    let predicate = group.into_predicate();
    debug!(
        nodes = nodes.len(),
        bindings = predicate.bindings().len(),
        "compiled filter predicate"
    );
    Ok(predicate)
}

/// Compiles sibling nodes joined by `op` into one parenthesized group.
///
/// Sub-groups attach with their own combinator regardless of `op`; leaf
/// clauses attach with `op` itself. Parameter names come from the single
/// namer owned by the top-level call, so uniqueness holds tree-wide.
fn compile_list(
    nodes: &[FilterNode],
    op: Combinator,
    fields: &FieldMap,
    alias: Option<&str>,
    namer: &mut ParamNamer,
) -> Result<Group> {
    let mut group = Group::new();
    for node in nodes {
        match node {
            FilterNode::Group { op: inner, children } => {
                let compiled = compile_list(children, *inner, fields, alias, namer)?;
                group.push_group(*inner, compiled);
            }
            FilterNode::Clause(clause) => {
                let expr = resolver::resolve(&clause.field, fields, alias)?;
                let fragment = operator::translate(clause.op, &expr, &clause.value, namer)?;
                group.push_fragment(op, fragment);
            }
        }
    }
    Ok(group)
}
