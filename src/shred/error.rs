//! Structural errors raised while walking a document tree.

use thiserror::Error;

/// Errors that make a document impossible to shred.
///
/// Any of these is fatal to the current call: no partial mapping is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShredError {
    /// The document root is not an object.
    #[error("Document root must be an object, found {found}")]
    RootNotObject {
        /// Kind of the node found at the root
        found: &'static str,
    },

    /// An array element is not an object while only objects are accepted.
    #[error("Array element at {path} must be an object, found {found}")]
    NonObjectElement {
        /// FQN of the offending element
        path: String,
        /// Kind of the offending element
        found: &'static str,
    },
}

impl ShredError {
    /// Check if the error is caused by the shape of the document root
    pub fn is_root_error(&self) -> bool {
        matches!(self, ShredError::RootNotObject { .. })
    }
}
