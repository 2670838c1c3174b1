//! Normalization of loosely-shaped JSON filters into the tagged tree.
//!
//! The wire shape is a list of objects, each of which may carry an `and`
//! list, an `or` list, and leaf field entries side by side:
//!
//! ```json
//! [{ "and": [{ "or": [{ "a": { "eq": 1 } }, { "a": { "eq": 2 } }] },
//!            { "b": { "eq": 3 } }] }]
//! ```
//!
//! All shape validation happens here, once, so the compiler proper only ever
//! sees well-formed nodes.

use crate::{
    error::{FilterError, Result},
    node::{Clause, Combinator, FilterNode},
    operator::FilterOp,
};
use model::Value;
use serde_json::Value as Json;

/// Parses a JSON filter into a list of tagged nodes. A bare object is
/// accepted as a one-element list.
pub fn filter_from_json(json: &Json) -> Result<Vec<FilterNode>> {
    match json {
        Json::Null => Ok(Vec::new()),
        Json::Array(entries) => {
            let mut nodes = Vec::new();
            for entry in entries {
                parse_entry(entry, &mut nodes)?;
            }
            Ok(nodes)
        }
        Json::Object(_) => {
            let mut nodes = Vec::new();
            parse_entry(json, &mut nodes)?;
            Ok(nodes)
        }
        other => Err(FilterError::MalformedInput(format!(
            "expected an array of filter objects, got {other}"
        ))),
    }
}

fn parse_entry(entry: &Json, nodes: &mut Vec<FilterNode>) -> Result<()> {
    let Json::Object(map) = entry else {
        return Err(FilterError::MalformedInput(format!(
            "expected a filter object, got {entry}"
        )));
    };

    // Within one entry, sub-groups come before leaf fields, `and` before
    // `or`, wherever the keys sit in the object. Leaf fields keep their
    // encounter order among themselves.
    if let Some(value) = map.get("and") {
        nodes.push(group(Combinator::And, value)?);
    }
    if let Some(value) = map.get("or") {
        nodes.push(group(Combinator::Or, value)?);
    }
    for (key, value) in map {
        match key.as_str() {
            "and" | "or" => {}
            field => nodes.push(FilterNode::Clause(clause(field, value)?)),
        }
    }
    Ok(())
}

fn group(op: Combinator, value: &Json) -> Result<FilterNode> {
    if !value.is_array() {
        return Err(FilterError::MalformedInput(format!(
            "'{}' must hold an array of filter objects",
            match op {
                Combinator::And => "and",
                Combinator::Or => "or",
            }
        )));
    }
    Ok(FilterNode::Group {
        op,
        children: filter_from_json(value)?,
    })
}

fn clause(field: &str, value: &Json) -> Result<Clause> {
    let Json::Object(operators) = value else {
        return Err(FilterError::MalformedInput(format!(
            "field '{field}' must hold an operator object"
        )));
    };
    let mut entries = operators.iter();
    let (op_key, operand) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        _ => {
            return Err(FilterError::OperatorCount {
                field: field.to_string(),
                count: operators.len(),
            });
        }
    };
    let op = FilterOp::parse(op_key)?;
    let value = Value::from_json(operand).ok_or_else(|| {
        FilterError::MalformedInput(format!(
            "operand of '{op_key}' on field '{field}' is not a bindable value"
        ))
    })?;
    Ok(Clause {
        field: field.to_string(),
        op,
        value,
    })
}
