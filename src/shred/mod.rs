//! Document shredding - flatten a nested tree into named attributes
//!
//! Every scalar leaf nested anywhere in a document becomes one attribute
//! whose name is the path of field names and array indices leading to it,
//! joined with a separator (`_` by default).

pub mod encoder;
pub mod error;
pub mod path;
pub mod types;
pub mod walker;
pub mod writer;

pub use encoder::encode_leaf;
pub use error::ShredError;
pub use path::FieldPath;
pub use types::{ArrayPolicy, Attributes, NullPolicy, ShredConfig};
pub use walker::Shredder;
pub use writer::AttributeWriter;
