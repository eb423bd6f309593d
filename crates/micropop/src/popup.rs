//! Popup instance
//!
//! One display element, one-or-more triggers, and a two-state visibility
//! machine. Visibility is derived solely from the display element's
//! `aria-hidden` attribute; there is no shadow boolean, so the attribute and
//! the open class can never drift apart across calls.

use micropop_dom::{Document, NodeId};

use crate::Role;

const ARIA_HIDDEN: &str = "aria-hidden";
const ARIA_EXPANDED: &str = "aria-expanded";
const ARIA_HASPOPUP: &str = "aria-haspopup";

/// A registered popup
#[derive(Debug)]
pub struct Popup {
    id: String,
    element: NodeId,
    triggers: Vec<NodeId>,
    role: Role,
    open_class: String,
}

impl Popup {
    /// Construct a popup and stamp the initial accessibility attributes
    /// onto its display element: has-popup, not expanded, hidden.
    pub(crate) fn mount(
        doc: &mut Document,
        id: String,
        element: NodeId,
        triggers: Vec<NodeId>,
        role: Role,
        open_class: String,
    ) -> Self {
        doc.set_attribute(element, ARIA_HASPOPUP, "true");
        doc.set_attribute(element, ARIA_EXPANDED, "false");
        doc.set_attribute(element, ARIA_HIDDEN, "true");

        tracing::debug!(id = %id, ?role, "popup mounted");
        Self {
            id,
            element,
            triggers,
            role,
            open_class,
        }
    }

    /// The identifier this popup is registered under
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The display element
    pub fn element(&self) -> NodeId {
        self.element
    }

    /// The trigger elements, in declaration order
    pub fn triggers(&self) -> &[NodeId] {
        &self.triggers
    }

    /// The role this popup was constructed with
    pub fn role(&self) -> Role {
        self.role
    }

    /// The class applied to the display element while visible
    pub fn open_class(&self) -> &str {
        &self.open_class
    }

    /// Current visibility, read from the display element
    pub fn is_visible(&self, doc: &Document) -> bool {
        doc.attribute(self.element, ARIA_HIDDEN) == Some("false")
    }

    /// Make the popup visible; no-op when already visible.
    ///
    /// Attribute mutation happens before the class-list mutation.
    pub fn show(&self, doc: &mut Document) {
        if self.is_visible(doc) {
            return;
        }
        doc.set_attribute(self.element, ARIA_HIDDEN, "false");
        if let Some(&trigger) = self.triggers.first() {
            doc.set_attribute(trigger, ARIA_EXPANDED, "true");
        }
        doc.add_class(self.element, &self.open_class);
    }

    /// Hide the popup; no-op when already hidden
    pub fn hide(&self, doc: &mut Document) {
        if !self.is_visible(doc) {
            return;
        }
        doc.set_attribute(self.element, ARIA_HIDDEN, "true");
        if let Some(&trigger) = self.triggers.first() {
            doc.set_attribute(trigger, ARIA_EXPANDED, "false");
        }
        doc.remove_class(self.element, &self.open_class);
    }

    /// Flip visibility based on the current hidden state
    pub fn toggle(&self, doc: &mut Document) {
        if self.is_visible(doc) {
            self.hide(doc);
        } else {
            self.show(doc);
        }
    }
}
