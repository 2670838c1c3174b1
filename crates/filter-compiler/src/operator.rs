//! Filter operators and their translation into SQL fragments.

use crate::{
    error::{FilterError, Result},
    namer::ParamNamer,
    predicate::Fragment,
};
use model::Value;

/// Prefix an operator key may carry on the wire (e.g. when operator names
/// would otherwise collide with reserved words in the producing schema).
/// Stripped before matching; bare keys are accepted equally.
pub const OPERATOR_PREFIX: &str = "op_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    NotLike,
    Between,
    NotBetween,
    In,
    NotIn,
    Any,
    Null,
}

impl FilterOp {
    /// Parses an operator key, stripping the recognized prefix first.
    /// Unknown keys are a hard error: a filter clause that silently
    /// constrains nothing must never reach the database.
    pub fn parse(key: &str) -> Result<Self> {
        let key = key.strip_prefix(OPERATOR_PREFIX).unwrap_or(key);
        match key {
            "eq" => Ok(FilterOp::Eq),
            "neq" => Ok(FilterOp::Neq),
            "lt" => Ok(FilterOp::Lt),
            "lte" => Ok(FilterOp::Lte),
            "gt" => Ok(FilterOp::Gt),
            "gte" => Ok(FilterOp::Gte),
            "like" => Ok(FilterOp::Like),
            "notlike" => Ok(FilterOp::NotLike),
            "between" => Ok(FilterOp::Between),
            "notbetween" => Ok(FilterOp::NotBetween),
            "in" => Ok(FilterOp::In),
            "notin" => Ok(FilterOp::NotIn),
            "any" => Ok(FilterOp::Any),
            "null" => Ok(FilterOp::Null),
            _ => Err(FilterError::UnknownOperator(key.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Neq => "neq",
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Like => "like",
            FilterOp::NotLike => "notlike",
            FilterOp::Between => "between",
            FilterOp::NotBetween => "notbetween",
            FilterOp::In => "in",
            FilterOp::NotIn => "notin",
            FilterOp::Any => "any",
            FilterOp::Null => "null",
        }
    }
}

/// Translates one clause into a primitive predicate fragment, drawing fresh
/// parameter names from the compile call's namer.
pub fn translate(
    op: FilterOp,
    field: &str,
    value: &Value,
    namer: &mut ParamNamer,
) -> Result<Fragment> {
    match op {
        FilterOp::Eq => {
            if value.is_null_like() {
                Ok(Fragment::bare(format!("{field} is null")))
            } else {
                Ok(comparison(field, "=", value, namer))
            }
        }
        FilterOp::Neq => {
            if value.is_null_like() {
                Ok(Fragment::bare(format!("{field} is not null")))
            } else {
                Ok(comparison(field, "!=", value, namer))
            }
        }
        FilterOp::Lt => Ok(comparison(field, "<", value, namer)),
        FilterOp::Lte => Ok(comparison(field, "<=", value, namer)),
        FilterOp::Gt => Ok(comparison(field, ">", value, namer)),
        FilterOp::Gte => Ok(comparison(field, ">=", value, namer)),
        FilterOp::Like => Ok(ilike(field, value, false, namer)),
        FilterOp::NotLike => Ok(ilike(field, value, true, namer)),
        FilterOp::Between => between(op, field, value, false, namer),
        FilterOp::NotBetween => between(op, field, value, true, namer),
        FilterOp::In => in_list(op, field, value, false, namer),
        FilterOp::NotIn => in_list(op, field, value, true, namer),
        FilterOp::Any => any(op, field, value, namer),
        FilterOp::Null => null_check(op, field, value),
    }
}

fn comparison(field: &str, sql_op: &str, value: &Value, namer: &mut ParamNamer) -> Fragment {
    let name = namer.next(field);
    Fragment {
        sql: format!("{field} {sql_op} :{name}"),
        bindings: vec![(name, value.clone())],
    }
}

fn ilike(field: &str, value: &Value, negated: bool, namer: &mut ParamNamer) -> Fragment {
    let name = namer.next(field);
    let not = if negated { "not " } else { "" };
    // The varchar casts make the match usable on non-text columns.
    Fragment {
        sql: format!("{field}::varchar {not}ilike :{name}::varchar"),
        bindings: vec![(name, value.clone())],
    }
}

fn between(
    op: FilterOp,
    field: &str,
    value: &Value,
    negated: bool,
    namer: &mut ParamNamer,
) -> Result<Fragment> {
    let items = scalar_list(op, value, "a 2-element array of scalars")?;
    if items.len() != 2 {
        return Err(FilterError::InvalidOperand {
            op: op.name(),
            expected: "a 2-element array of scalars",
            actual: format!("array of {} elements", items.len()),
        });
    }
    let lo = namer.next(field);
    let hi = namer.next(field);
    let not = if negated { "not " } else { "" };
    Ok(Fragment {
        sql: format!("{field} {not}between :{lo} and :{hi}"),
        bindings: vec![(lo, items[0].clone()), (hi, items[1].clone())],
    })
}

fn in_list(
    op: FilterOp,
    field: &str,
    value: &Value,
    negated: bool,
    namer: &mut ParamNamer,
) -> Result<Fragment> {
    let items = scalar_list(op, value, "a non-empty array of scalars")?;
    if items.is_empty() {
        return Err(FilterError::InvalidOperand {
            op: op.name(),
            expected: "a non-empty array of scalars",
            actual: "empty array".to_string(),
        });
    }
    let mut placeholders = Vec::with_capacity(items.len());
    let mut bindings = Vec::with_capacity(items.len());
    for item in items {
        let name = namer.next(field);
        placeholders.push(format!(":{name}"));
        bindings.push((name, item.clone()));
    }
    let not = if negated { "not " } else { "" };
    Ok(Fragment {
        sql: format!("{field} {not}in ({})", placeholders.join(", ")),
        bindings,
    })
}

fn any(op: FilterOp, field: &str, value: &Value, namer: &mut ParamNamer) -> Result<Fragment> {
    scalar_list(op, value, "an array of scalars")?;
    let name = namer.next(field);
    Ok(Fragment {
        sql: format!("{field} = any (:{name})"),
        bindings: vec![(name, value.clone())],
    })
}

fn null_check(op: FilterOp, field: &str, value: &Value) -> Result<Fragment> {
    let wants_null = value
        .as_bool()
        .ok_or_else(|| FilterError::InvalidOperand {
            op: op.name(),
            expected: "a boolean",
            actual: value.type_name().to_string(),
        })?;
    if wants_null {
        Ok(Fragment::bare(format!("{field} is null")))
    } else {
        Ok(Fragment::bare(format!("{field} is not null")))
    }
}

fn scalar_list<'a>(
    op: FilterOp,
    value: &'a Value,
    expected: &'static str,
) -> Result<&'a [Value]> {
    let Value::Array(items) = value else {
        return Err(FilterError::InvalidOperand {
            op: op.name(),
            expected,
            actual: value.type_name().to_string(),
        });
    };
    if items.iter().any(|item| matches!(item, Value::Array(_))) {
        return Err(FilterError::InvalidOperand {
            op: op.name(),
            expected,
            actual: "array with nested arrays".to_string(),
        });
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(op: FilterOp, value: Value) -> Result<Fragment> {
        let mut namer = ParamNamer::new();
        translate(op, "a", &value, &mut namer)
    }

    #[test]
    fn test_parse_strips_prefix() {
        assert_eq!(FilterOp::parse("eq").unwrap(), FilterOp::Eq);
        assert_eq!(FilterOp::parse("op_eq").unwrap(), FilterOp::Eq);
        assert_eq!(FilterOp::parse("op_notbetween").unwrap(), FilterOp::NotBetween);
    }

    #[test]
    fn test_parse_unknown_operator_is_error() {
        let err = FilterOp::parse("startswith").unwrap_err();
        assert!(matches!(err, FilterError::UnknownOperator(key) if key == "startswith"));
    }

    #[test]
    fn test_eq_null_renders_is_null() {
        let frag = run(FilterOp::Eq, Value::Null).unwrap();
        assert_eq!(frag.sql, "a is null");
        assert!(frag.bindings.is_empty());

        let frag = run(FilterOp::Eq, Value::String("null".to_string())).unwrap();
        assert_eq!(frag.sql, "a is null");
    }

    #[test]
    fn test_neq_null_renders_is_not_null() {
        let frag = run(FilterOp::Neq, Value::Null).unwrap();
        assert_eq!(frag.sql, "a is not null");
        assert!(frag.bindings.is_empty());
    }

    #[test]
    fn test_neq_value_renders_inequality() {
        let frag = run(FilterOp::Neq, Value::Int(5)).unwrap();
        assert_eq!(frag.sql, "a != :arg_a_1");
        assert_eq!(frag.bindings, vec![("arg_a_1".to_string(), Value::Int(5))]);
    }

    #[test]
    fn test_ordering_operators() {
        for (op, sym) in [
            (FilterOp::Lt, "<"),
            (FilterOp::Lte, "<="),
            (FilterOp::Gt, ">"),
            (FilterOp::Gte, ">="),
        ] {
            let frag = run(op, Value::Int(3)).unwrap();
            assert_eq!(frag.sql, format!("a {sym} :arg_a_1"));
        }
    }

    #[test]
    fn test_like_casts_both_sides() {
        let frag = run(FilterOp::Like, Value::String("%bob%".to_string())).unwrap();
        assert_eq!(frag.sql, "a::varchar ilike :arg_a_1::varchar");

        let frag = run(FilterOp::NotLike, Value::String("%bob%".to_string())).unwrap();
        assert_eq!(frag.sql, "a::varchar not ilike :arg_a_1::varchar");
    }

    #[test]
    fn test_between_binds_pair_in_order() {
        let frag = run(
            FilterOp::Between,
            Value::Array(vec![Value::Int(1), Value::Int(10)]),
        )
        .unwrap();
        assert_eq!(frag.sql, "a between :arg_a_1 and :arg_a_2");
        assert_eq!(
            frag.bindings,
            vec![
                ("arg_a_1".to_string(), Value::Int(1)),
                ("arg_a_2".to_string(), Value::Int(10)),
            ]
        );
    }

    #[test]
    fn test_between_requires_exactly_two_elements() {
        let err = run(FilterOp::Between, Value::Array(vec![Value::Int(1)])).unwrap_err();
        assert!(matches!(err, FilterError::InvalidOperand { op: "between", .. }));

        let err = run(FilterOp::NotBetween, Value::Int(1)).unwrap_err();
        assert!(matches!(err, FilterError::InvalidOperand { op: "notbetween", .. }));
    }

    #[test]
    fn test_in_expands_one_placeholder_per_element() {
        let frag = run(
            FilterOp::In,
            Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
        )
        .unwrap();
        assert_eq!(frag.sql, "a in (:arg_a_1, :arg_a_2, :arg_a_3)");
        assert_eq!(frag.bindings.len(), 3);

        let frag = run(FilterOp::NotIn, Value::Array(vec![Value::Int(1)])).unwrap();
        assert_eq!(frag.sql, "a not in (:arg_a_1)");
    }

    #[test]
    fn test_in_rejects_empty_and_non_array() {
        let err = run(FilterOp::In, Value::Array(vec![])).unwrap_err();
        assert!(matches!(err, FilterError::InvalidOperand { op: "in", .. }));

        let err = run(FilterOp::In, Value::Int(1)).unwrap_err();
        assert!(matches!(err, FilterError::InvalidOperand { op: "in", .. }));
    }

    #[test]
    fn test_any_binds_whole_array_once() {
        let values = Value::Array(vec![Value::Int(1), Value::Int(2)]);
        let frag = run(FilterOp::Any, values.clone()).unwrap();
        assert_eq!(frag.sql, "a = any (:arg_a_1)");
        assert_eq!(frag.bindings, vec![("arg_a_1".to_string(), values)]);
    }

    #[test]
    fn test_null_operator_truthiness() {
        let frag = run(FilterOp::Null, Value::Boolean(true)).unwrap();
        assert_eq!(frag.sql, "a is null");

        let frag = run(FilterOp::Null, Value::String("false".to_string())).unwrap();
        assert_eq!(frag.sql, "a is not null");

        let err = run(FilterOp::Null, Value::String("maybe".to_string())).unwrap_err();
        assert!(matches!(err, FilterError::InvalidOperand { op: "null", .. }));
    }
}
