pub mod metadata;
pub mod value;

pub use metadata::{FieldMap, FieldMetadata};
pub use value::Value;
