#[macro_export]
macro_rules! clause {
    ($field:expr, $op:ident, $value:expr) => {
        $crate::node::FilterNode::Clause($crate::node::Clause::new(
            $field,
            $crate::operator::FilterOp::$op,
            $value,
        ))
    };
}

#[macro_export]
macro_rules! group {
    ($op:ident, [$($node:expr),* $(,)?]) => {
        $crate::node::FilterNode::Group {
            op: $crate::node::Combinator::$op,
            children: vec![$($node),*],
        }
    };
}
