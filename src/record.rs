//! Record processing - parse, shred and route a single record
//!
//! A record carries raw content bytes and a set of attributes. Processing
//! parses the content in the configured format, shreds the resulting tree and
//! merges the produced attributes into the record. Records that cannot be
//! parsed or shredded are routed to failure unchanged.

use crate::format::{parse_document, DocumentFormat, ParseError};
use crate::shred::{Attributes, ShredConfig, ShredError, Shredder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, instrument};

/// A unit of work: content bytes plus named attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub content: Vec<u8>,
    pub attributes: Attributes,
}

impl Record {
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Record {
            content: content.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// Destination of a processed record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Success,
    Failure,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Success => "SUCCESS",
            Route::Failure => "FAIL",
        }
    }
}

/// Reasons a record is routed to failure
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Shred(#[from] ShredError),
}

/// Result of processing one record
#[derive(Debug)]
pub enum Outcome {
    /// Record with the shredded attributes merged in
    Success(Record),
    /// Original record along with the reason it failed
    Failure { record: Record, error: ProcessError },
}

impl Outcome {
    pub fn route(&self) -> Route {
        match self {
            Outcome::Success(_) => Route::Success,
            Outcome::Failure { .. } => Route::Failure,
        }
    }

    pub fn record(&self) -> &Record {
        match self {
            Outcome::Success(record) => record,
            Outcome::Failure { record, .. } => record,
        }
    }
}

/// Configuration for a record processor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShredderConfig {
    /// Expected format of record content
    pub format: DocumentFormat,

    /// Options passed to the shredder
    pub shred: ShredConfig,
}

/// Parses and shreds records, merging the result into their attributes
#[derive(Debug, Clone, Default)]
pub struct ShredProcessor {
    format: DocumentFormat,
    shredder: Shredder,
}

impl ShredProcessor {
    pub fn new(config: ShredderConfig) -> Self {
        ShredProcessor {
            format: config.format,
            shredder: Shredder::new(config.shred),
        }
    }

    /// Parse and shred the record content without touching the record
    pub fn shred_content(&self, content: &[u8]) -> Result<Attributes, ProcessError> {
        let tree = parse_document(content, self.format)?;
        let attributes = self.shredder.shred(&tree)?;
        Ok(attributes)
    }

    /// Process one record and decide where it is routed
    #[instrument(skip_all, fields(format = %self.format, len = record.content.len()))]
    pub fn process(&self, mut record: Record) -> Outcome {
        match self.shred_content(&record.content) {
            Ok(attributes) => {
                debug!(count = attributes.len(), "shredded record");
                // Shredded attributes overwrite existing ones with the same name
                record.attributes.extend(attributes);
                Outcome::Success(record)
            }
            Err(error) => {
                error!(%error, "failed to shred record; routing to failure");
                Outcome::Failure { record, error }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processor(format: DocumentFormat) -> ShredProcessor {
        ShredProcessor::new(ShredderConfig {
            format,
            ..ShredderConfig::default()
        })
    }

    #[test]
    fn test_json_record_success() {
        let record = Record::new(r#"{"a": [{"b": 1}, {"b": 2}], "c": "x"}"#);

        let outcome = processor(DocumentFormat::Json).process(record);

        assert_eq!(outcome.route(), Route::Success);
        let attrs = &outcome.record().attributes;
        assert_eq!(attrs.get("a_0_b").unwrap(), "1");
        assert_eq!(attrs.get("a_1_b").unwrap(), "2");
        assert_eq!(attrs.get("c").unwrap(), "x");
    }

    #[test]
    fn test_xml_record_success() {
        let record = Record::new(
            r#"<order id="9"><line><sku>A</sku></line><line><sku>B</sku></line></order>"#,
        );

        let outcome = processor(DocumentFormat::Xml).process(record);

        assert_eq!(outcome.route(), Route::Success);
        let attrs = &outcome.record().attributes;
        assert_eq!(attrs.get("order_id").unwrap(), "9");
        assert_eq!(attrs.get("order_line_0_sku").unwrap(), "A");
        assert_eq!(attrs.get("order_line_1_sku").unwrap(), "B");
    }

    #[test]
    fn test_merge_overwrites_existing_attributes() {
        let record = Record::new(r#"{"filename": "from-content", "n": 1}"#)
            .with_attribute("filename", "original")
            .with_attribute("uuid", "1234");

        let outcome = processor(DocumentFormat::Json).process(record);

        let attrs = &outcome.record().attributes;
        assert_eq!(attrs.get("filename").unwrap(), "from-content");
        assert_eq!(attrs.get("uuid").unwrap(), "1234");
        assert_eq!(attrs.get("n").unwrap(), "1");
    }

    #[test]
    fn test_parse_failure_routes_unchanged() {
        let record = Record::new("{not json").with_attribute("uuid", "1");

        let outcome = processor(DocumentFormat::Json).process(record.clone());

        assert_eq!(outcome.route(), Route::Failure);
        match outcome {
            Outcome::Failure { record: failed, error } => {
                assert_eq!(failed, record);
                assert!(matches!(error, ProcessError::Parse(_)));
            }
            Outcome::Success(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn test_non_object_root_routes_to_failure() {
        let outcome = processor(DocumentFormat::Json).process(Record::new("[1, 2, 3]"));

        assert_eq!(outcome.route(), Route::Failure);
        assert!(outcome.record().attributes.is_empty());
        assert!(matches!(
            outcome,
            Outcome::Failure {
                error: ProcessError::Shred(ShredError::RootNotObject { found: "array" }),
                ..
            }
        ));
    }

    #[test]
    fn test_route_names() {
        assert_eq!(Route::Success.name(), "SUCCESS");
        assert_eq!(Route::Failure.name(), "FAIL");
    }
}
