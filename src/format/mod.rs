//! Document formats - turn raw input bytes into a document tree
//!
//! JSON is parsed directly; XML is normalized into the equivalent JSON shape
//! under an implicit root object with one field per top-level element.

pub mod json;
pub mod xml;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Errors raised when input bytes cannot be parsed as the selected format
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input is not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Input is not well-formed XML
    #[error("Invalid XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML ended or closed in a way the reader did not reject itself
    #[error("Malformed XML: {reason}")]
    MalformedXml { reason: String },
}

/// Expected format of an input document
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Json,
    Xml,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse raw input bytes into a document tree
pub fn parse_document(bytes: &[u8], format: DocumentFormat) -> Result<Value, ParseError> {
    match format {
        DocumentFormat::Json => json::parse_json(bytes),
        DocumentFormat::Xml => xml::parse_xml(bytes),
    }
}
