//! Selector identifying the observed collection.

use std::fmt;

/// Identifies a collection of namespaced objects by namespace plus label
/// and field selectors.
///
/// Fixed at construction. A `None` namespace means all namespaces; empty
/// selector strings match everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Namespace to observe, `None` for all namespaces.
    pub namespace: Option<String>,
    /// Label selector in Kubernetes list syntax, empty matches all.
    pub label_selector: String,
    /// Field selector in Kubernetes list syntax, empty matches all.
    pub field_selector: String,
}

impl Selector {
    /// Selects every object of the watched kind in every namespace.
    pub fn everything() -> Self {
        Self {
            namespace: None,
            label_selector: String::new(),
            field_selector: String::new(),
        }
    }

    /// Selects every object of the watched kind in one namespace.
    pub fn namespaced(namespace: String) -> Self {
        Self {
            namespace: Some(namespace),
            label_selector: String::new(),
            field_selector: String::new(),
        }
    }

    /// Creates a selector from all three parts.
    pub fn new(namespace: Option<String>, label_selector: String, field_selector: String) -> Self {
        Self {
            namespace,
            label_selector,
            field_selector,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(namespace) = self.namespace.as_deref() {
            parts.push(format!("namespace({})", namespace));
        }
        if !self.label_selector.is_empty() {
            parts.push(format!("labelSelector({})", self.label_selector));
        }
        if !self.field_selector.is_empty() {
            parts.push(format!("fieldSelector({})", self.field_selector));
        }
        if parts.is_empty() {
            write!(f, "everything")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}
