pub mod compile;
pub mod error;
pub mod macros;
pub mod namer;
pub mod node;
pub mod operator;
pub mod parse;
pub mod predicate;
pub mod resolver;

pub use compile::{CompileOptions, compile};
pub use error::{FilterError, Result};
pub use node::{Clause, Combinator, FilterInput, FilterNode};
pub use operator::FilterOp;
pub use parse::filter_from_json;
pub use predicate::CompiledPredicate;
