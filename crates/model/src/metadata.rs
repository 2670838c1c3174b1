use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-field resolution metadata, keyed by logical filter field name.
pub type FieldMap = HashMap<String, FieldMetadata>;

/// Maps a logical filter field to its physical representation.
///
/// `sql_expr`, when present, wins over `column` and is emitted verbatim,
/// bypassing any table alias. The caller owns the safety of that SQL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldMetadata {
    /// Physical column name, qualified by the table alias when one is set.
    pub column: String,

    /// Raw SQL expression override, e.g. `LOWER(t.name)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_expr: Option<String>,
}

impl FieldMetadata {
    pub fn column(name: &str) -> Self {
        Self {
            column: name.to_string(),
            sql_expr: None,
        }
    }

    pub fn sql_expr(expr: &str) -> Self {
        Self {
            column: String::new(),
            sql_expr: Some(expr.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_constructors() {
        let col = FieldMetadata::column("created_at");
        assert_eq!(col.column, "created_at");
        assert!(col.sql_expr.is_none());

        let expr = FieldMetadata::sql_expr("LOWER(t.name)");
        assert_eq!(expr.sql_expr.as_deref(), Some("LOWER(t.name)"));
    }

    #[test]
    fn test_metadata_deserializes_without_sql_expr() {
        let meta: FieldMetadata = serde_json::from_str(r#"{"column": "id"}"#).unwrap();
        assert_eq!(meta, FieldMetadata::column("id"));
    }
}
