use crate::shred::encoder::encode_leaf;
use crate::shred::error::ShredError;
use crate::shred::path::FieldPath;
use crate::shred::types::{node_kind, ArrayPolicy, Attributes, ShredConfig};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// The core shredder that flattens a document tree into attributes.
///
/// Holds configuration only; the path and output mapping belong to a single
/// `shred` call, so one shredder can be reused or shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Shredder {
    config: ShredConfig,
}

impl Shredder {
    pub fn new(config: ShredConfig) -> Self {
        Shredder { config }
    }

    pub fn config(&self) -> &ShredConfig {
        &self.config
    }

    /// Shred a document into a flat attribute mapping
    pub fn shred(&self, root: &Value) -> Result<Attributes, ShredError> {
        let obj = match root {
            Value::Object(obj) => obj,
            other => {
                return Err(ShredError::RootNotObject {
                    found: node_kind(other),
                })
            }
        };

        let mut attributes = Attributes::new();
        self.shred_object(obj, &FieldPath::Root, &mut attributes)?;
        Ok(attributes)
    }

    /// Visit every member of an object in stored order
    fn shred_object(
        &self,
        obj: &Map<String, Value>,
        path: &FieldPath<'_>,
        attributes: &mut Attributes,
    ) -> Result<(), ShredError> {
        for (name, value) in obj {
            self.shred_member(name, value, path, attributes)?;
        }
        Ok(())
    }

    /// Dispatch a single named node on its kind
    fn shred_member(
        &self,
        name: &str,
        value: &Value,
        path: &FieldPath<'_>,
        attributes: &mut Attributes,
    ) -> Result<(), ShredError> {
        match value {
            Value::Object(obj) => {
                debug!(field = %path.render(name, &self.config.separator), "descending into object");
                self.shred_object(obj, &path.child(name), attributes)
            }
            Value::Array(arr) => {
                debug!(
                    field = %path.render(name, &self.config.separator),
                    len = arr.len(),
                    "descending into array"
                );
                self.shred_array(arr, &path.child(name), attributes)
            }
            leaf => {
                self.record_leaf(name, leaf, path, attributes);
                Ok(())
            }
        }
    }

    /// Visit array elements, each under its decimal index segment
    fn shred_array(
        &self,
        arr: &[Value],
        path: &FieldPath<'_>,
        attributes: &mut Attributes,
    ) -> Result<(), ShredError> {
        for (idx, element) in arr.iter().enumerate() {
            let index = idx.to_string();

            match (self.config.array_policy, element) {
                (_, Value::Object(obj)) => {
                    self.shred_object(obj, &path.child(&index), attributes)?;
                }
                (ArrayPolicy::ObjectsOnly, other) => {
                    return Err(ShredError::NonObjectElement {
                        path: path.render(&index, &self.config.separator).into_owned(),
                        found: node_kind(other),
                    });
                }
                (ArrayPolicy::Dispatch, other) => {
                    self.shred_member(&index, other, path, attributes)?;
                }
            }
        }
        Ok(())
    }

    fn record_leaf(&self, name: &str, leaf: &Value, path: &FieldPath<'_>, attributes: &mut Attributes) {
        let fqn = path.render(name, &self.config.separator).into_owned();

        match encode_leaf(leaf, self.config.null_policy) {
            Some(text) => {
                trace!(field = %fqn, value = %text, kind = node_kind(leaf), "leaf");
                // Identical FQNs from distinct paths: last write wins
                attributes.insert(fqn, text);
            }
            None => {
                trace!(field = %fqn, kind = node_kind(leaf), "leaf omitted");
            }
        }
    }
}
