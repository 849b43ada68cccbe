//! Request-scoped propagation handle.
//!
//! A [`Context`] is threaded through call chains by the application and
//! handed to the context-aware logging entry points. The facade never looks
//! inside it; loggers may read its key/value pairs to decorate records with
//! trace or request identifiers.

use std::fmt;
use std::sync::Arc;

/// Well-known key for a distributed trace identifier.
pub const TRACE_ID: &str = "trace_id";

/// Well-known key for a request identifier.
pub const REQUEST_ID: &str = "request_id";

#[derive(Debug)]
struct Node {
    key: String,
    value: String,
    parent: Option<Arc<Node>>,
}

/// Immutable chain of key/value pairs.
///
/// Deriving a context with [`Context::with_value`] never mutates the parent;
/// the child shares the parent's chain. Cloning is a reference count bump.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

impl Context {
    /// The empty root context.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a child context carrying `key = value`.
    ///
    /// A later value for the same key shadows the earlier one.
    pub fn with_value(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            head: Some(Arc::new(Node {
                key: key.into(),
                value: value.into(),
                parent: self.head.clone(),
            })),
        }
    }

    /// Derive a child context carrying a trace identifier.
    pub fn with_trace_id(&self, id: impl Into<String>) -> Self {
        self.with_value(TRACE_ID, id)
    }

    /// Derive a child context carrying a request identifier.
    pub fn with_request_id(&self, id: impl Into<String>) -> Self {
        self.with_value(REQUEST_ID, id)
    }

    /// Look up the innermost value stored under `key`.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.nodes().find(|node| node.key == key).map(|node| node.value.as_str())
    }

    /// The trace identifier, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.value(TRACE_ID)
    }

    /// The request identifier, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.value(REQUEST_ID)
    }

    /// Visible key/value pairs, outermost first, shadowed keys removed.
    pub fn fields(&self) -> Vec<(&str, &str)> {
        let mut fields: Vec<(&str, &str)> = Vec::new();
        for node in self.nodes() {
            if !fields.iter().any(|(k, _)| *k == node.key) {
                fields.push((&node.key, &node.value));
            }
        }
        fields.reverse();
        fields
    }

    /// Whether no values have been attached.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Whether two handles are the same context (not merely equal contents).
    pub fn ptr_eq(a: &Context, b: &Context) -> bool {
        match (&a.head, &b.head) {
            (Some(x), Some(y)) => Arc::ptr_eq(x, y),
            (None, None) => true,
            _ => false,
        }
    }

    fn nodes(&self) -> impl Iterator<Item = &Node> {
        std::iter::successors(self.head.as_deref(), |node| node.parent.as_deref())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields()).finish()
    }
}

impl fmt::Display for Context {
    /// Renders `key=value` pairs separated by spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.fields().into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}
