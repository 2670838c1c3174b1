//! Logical field name -> physical SQL expression.

use crate::error::{FilterError, Result};
use model::FieldMap;

/// Resolves a logical filter field to the right-hand SQL expression.
///
/// Resolution order: a metadata `sql_expr` override wins and ignores the
/// alias; a metadata column is alias-qualified; an unmapped name is used
/// directly but must look like a plain identifier, since it lands in SQL
/// text as-is.
pub fn resolve(field: &str, fields: &FieldMap, alias: Option<&str>) -> Result<String> {
    if let Some(meta) = fields.get(field) {
        if let Some(expr) = &meta.sql_expr {
            return Ok(expr.clone());
        }
        return Ok(qualify(&meta.column, alias));
    }

    if !is_identifier(field) {
        return Err(FilterError::InvalidFieldName(field.to_string()));
    }
    Ok(qualify(field, alias))
}

fn qualify(column: &str, alias: Option<&str>) -> String {
    match alias {
        Some(alias) => format!("{alias}.{column}"),
        None => column.to_string(),
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{FieldMap, FieldMetadata};

    fn fields() -> FieldMap {
        let mut map = FieldMap::new();
        map.insert("name".to_string(), FieldMetadata::sql_expr("LOWER(t.name)"));
        map.insert("createdAt".to_string(), FieldMetadata::column("created_at"));
        map
    }

    #[test]
    fn test_sql_expr_wins_and_ignores_alias() {
        let expr = resolve("name", &fields(), Some("t")).unwrap();
        assert_eq!(expr, "LOWER(t.name)");
    }

    #[test]
    fn test_column_is_alias_qualified() {
        assert_eq!(
            resolve("createdAt", &fields(), Some("t")).unwrap(),
            "t.created_at"
        );
        assert_eq!(resolve("createdAt", &fields(), None).unwrap(), "created_at");
    }

    #[test]
    fn test_unmapped_field_used_directly() {
        assert_eq!(resolve("id", &fields(), Some("t")).unwrap(), "t.id");
        assert_eq!(resolve("id", &fields(), None).unwrap(), "id");
    }

    #[test]
    fn test_unmapped_field_must_be_identifier() {
        let err = resolve("id; drop table users", &FieldMap::new(), None).unwrap_err();
        assert!(matches!(err, FilterError::InvalidFieldName(_)));

        let err = resolve("1id", &FieldMap::new(), None).unwrap_err();
        assert!(matches!(err, FilterError::InvalidFieldName(_)));
    }
}
