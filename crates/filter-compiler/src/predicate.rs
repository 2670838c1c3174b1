//! Predicate assembly: fragments, groups, and the rendered output.

use crate::node::Combinator;
use model::Value;

/// One primitive predicate: SQL text with its named parameter bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub sql: String,
    pub bindings: Vec<(String, Value)>,
}

impl Fragment {
    pub fn bare(sql: String) -> Self {
        Self {
            sql,
            bindings: Vec::new(),
        }
    }
}

/// A parenthesized boolean group under construction.
///
/// Each attached piece carries the combinator that joins it to the pieces
/// before it; the first piece renders bare. This mirrors how a query
/// builder's `andWhere`/`orWhere` chain composes conditions linearly.
#[derive(Debug, Default)]
pub struct Group {
    items: Vec<(Combinator, Piece)>,
}

#[derive(Debug)]
enum Piece {
    Group(Group),
    Fragment(Fragment),
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push_group(&mut self, op: Combinator, group: Group) {
        if !group.is_empty() {
            self.items.push((op, Piece::Group(group)));
        }
    }

    pub fn push_fragment(&mut self, op: Combinator, fragment: Fragment) {
        self.items.push((op, Piece::Fragment(fragment)));
    }

    /// Renders the group into its final form. An empty group becomes the
    /// trivial predicate.
    pub fn into_predicate(self) -> CompiledPredicate {
        let mut sql = String::new();
        let mut bindings = Vec::new();
        self.render_into(&mut sql, &mut bindings);
        CompiledPredicate { sql, bindings }
    }

    fn render_into(&self, sql: &mut String, bindings: &mut Vec<(String, Value)>) {
        if self.items.is_empty() {
            return;
        }
        sql.push('(');
        for (i, (op, piece)) in self.items.iter().enumerate() {
            if i > 0 {
                sql.push(' ');
                sql.push_str(op.sql());
                sql.push(' ');
            }
            match piece {
                Piece::Group(group) => group.render_into(sql, bindings),
                Piece::Fragment(fragment) => {
                    sql.push_str(&fragment.sql);
                    bindings.extend(fragment.bindings.iter().cloned());
                }
            }
        }
        sql.push(')');
    }
}

/// A fully rendered predicate: one parenthesized boolean expression with
/// `:name` placeholders, plus its bindings in placeholder order.
///
/// A trivial predicate (empty SQL) imposes no constraint; callers omit the
/// WHERE clause for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPredicate {
    sql: String,
    bindings: Vec<(String, Value)>,
}

impl CompiledPredicate {
    /// Wraps an already-rendered expression, bypassing compilation.
    pub fn raw(sql: impl Into<String>, bindings: Vec<(String, Value)>) -> Self {
        Self {
            sql: sql.into(),
            bindings,
        }
    }

    pub fn trivial() -> Self {
        Self {
            sql: String::new(),
            bindings: Vec::new(),
        }
    }

    pub fn is_trivial(&self) -> bool {
        self.sql.is_empty()
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn bindings(&self) -> &[(String, Value)] {
        &self.bindings
    }
}
