//! Document - High-level document API
//!
//! Wraps the arena tree with the surface the popup engine needs: lookup by
//! identifier, attribute and class-list access, and listener registration.

use std::collections::HashMap;

use crate::{DomTree, EventType, ListenerId, NodeId};

/// Host document
#[derive(Debug, Default)]
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Registered listeners per (element, event type)
    listeners: HashMap<(NodeId, EventType), Vec<ListenerId>>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self {
            tree: DomTree::new(),
            listeners: HashMap::new(),
        }
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Check whether an id refers to a live element
    pub fn is_element(&self, id: NodeId) -> bool {
        self.tree.get(id).is_some_and(|n| n.is_element())
    }

    /// Get element by native `id` attribute
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_by_attribute("id", id)
    }

    /// Find the first element carrying `name="value"`, in document order
    pub fn find_by_attribute(&self, name: &str, value: &str) -> Option<NodeId> {
        self.tree.iter().find_map(|(id, node)| {
            let elem = node.as_element()?;
            (elem.attr(name) == Some(value)).then_some(id)
        })
    }

    /// All elements carrying an attribute, in document order
    pub fn elements_with_attribute(&self, name: &str) -> Vec<NodeId> {
        self.tree
            .iter()
            .filter_map(|(id, node)| {
                let elem = node.as_element()?;
                elem.has_attr(name).then_some(id)
            })
            .collect()
    }

    /// Get an attribute value on an element
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.tree.get(id)?.as_element()?.attr(name)
    }

    /// Check whether an element carries an attribute
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Set an attribute on an element; non-elements are ignored
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(elem) = self.tree.get_mut(id).and_then(|n| n.as_element_mut()) {
            elem.set_attr(name, value);
        }
    }

    /// Remove an attribute from an element
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.tree.get_mut(id)?.as_element_mut()?.remove_attr(name)
    }

    /// Check class-list membership
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.tree
            .get(id)
            .and_then(|n| n.as_element())
            .is_some_and(|e| e.has_class(class))
    }

    /// Add a class to an element
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(elem) = self.tree.get_mut(id).and_then(|n| n.as_element_mut()) {
            elem.add_class(class);
        }
    }

    /// Remove a class from an element
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(elem) = self.tree.get_mut(id).and_then(|n| n.as_element_mut()) {
            elem.remove_class(class);
        }
    }

    /// Register a listener for an event type on an element
    pub fn add_event_listener(&mut self, id: NodeId, event_type: EventType, listener: ListenerId) {
        tracing::trace!(?id, ?event_type, ?listener, "add event listener");
        self.listeners.entry((id, event_type)).or_default().push(listener);
    }

    /// Listeners registered for an event type on an element
    pub fn event_listeners(&self, id: NodeId, event_type: EventType) -> Vec<ListenerId> {
        self.listeners
            .get(&(id, event_type))
            .cloned()
            .unwrap_or_default()
    }

    /// Total listeners registered on an element, across event types
    pub fn listener_count(&self, id: NodeId) -> usize {
        self.listeners
            .iter()
            .filter(|((node, _), _)| *node == id)
            .map(|(_, v)| v.len())
            .sum()
    }
}
