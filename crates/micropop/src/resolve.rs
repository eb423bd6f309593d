//! Identifier resolution
//!
//! Split into a pure resolution step (no document mutation) and an explicit
//! commit step that stamps the assigned identifier onto the element, so
//! derivation stays testable without touching the document.

use micropop_dom::{Document, NodeId};

/// A reference to a popup: either its identifier or its display element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupRef {
    /// An identifier string, returned unchanged by resolution
    Id(String),
    /// A live element in the document
    Element(NodeId),
}

impl From<&str> for PopupRef {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for PopupRef {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<NodeId> for PopupRef {
    fn from(node: NodeId) -> Self {
        Self::Element(node)
    }
}

/// Outcome of pure resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The reference already names an identifier
    Known(String),
    /// The element carries no identifier; one must be synthesized and
    /// committed onto it
    Fresh(NodeId),
}

/// Resolve a reference to an identifier without side effects.
///
/// A string reference is returned unchanged. An element reference prefers
/// the stamped identifier attribute, then its native `id`. A reference to
/// a node that is not a live element yields `None`.
pub fn resolve(doc: &Document, popup_ref: &PopupRef, id_attribute: &str) -> Option<Resolution> {
    match popup_ref {
        PopupRef::Id(id) => Some(Resolution::Known(id.clone())),
        PopupRef::Element(node) => {
            if !doc.is_element(*node) {
                return None;
            }
            if let Some(id) = doc.attribute(*node, id_attribute) {
                return Some(Resolution::Known(id.to_string()));
            }
            if let Some(id) = doc.attribute(*node, "id") {
                return Some(Resolution::Known(id.to_string()));
            }
            Some(Resolution::Fresh(*node))
        }
    }
}

/// Stamp an assigned identifier onto an element for future lookups
pub fn commit(doc: &mut Document, node: NodeId, id: &str, id_attribute: &str) {
    doc.set_attribute(node, id_attribute, id);
}
