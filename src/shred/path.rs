//! Fully-qualified name construction
//!
//! A `FieldPath` is an immutable chain of segments borrowed from the
//! traversal's call stack. Descending into a child creates a new link that
//! points at its parent; returning from the child simply drops it, so sibling
//! nodes always observe the same prefix.

use std::borrow::Cow;

/// Path from the document root to the node currently being visited
#[derive(Debug, Clone, Copy)]
pub enum FieldPath<'a> {
    /// No segments: directly under the root object
    Root,
    /// A segment appended to a parent path
    Segment {
        parent: &'a FieldPath<'a>,
        name: &'a str,
    },
}

impl<'a> FieldPath<'a> {
    /// Extend this path by one segment
    pub fn child(&'a self, name: &'a str) -> FieldPath<'a> {
        FieldPath::Segment { parent: self, name }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, FieldPath::Root)
    }

    /// Number of segments in this path
    pub fn depth(&self) -> usize {
        match self {
            FieldPath::Root => 0,
            FieldPath::Segment { parent, .. } => parent.depth() + 1,
        }
    }

    /// Segments ordered outermost first
    pub fn segments(&self) -> Vec<&'a str> {
        let mut segments = Vec::with_capacity(self.depth());
        let mut current = *self;
        while let FieldPath::Segment { parent, name } = current {
            segments.push(name);
            current = *parent;
        }
        segments.reverse();
        segments
    }

    /// Render the FQN of a leaf named `leaf` located at this path.
    ///
    /// Returns `leaf` unchanged at the root; otherwise every segment followed
    /// by `leaf`, joined with `separator`.
    pub fn render<'b>(&self, leaf: &'b str, separator: &str) -> Cow<'b, str> {
        if self.is_root() {
            return Cow::Borrowed(leaf);
        }

        let mut fqn = self.segments().join(separator);
        fqn.push_str(separator);
        fqn.push_str(leaf);
        Cow::Owned(fqn)
    }
}
