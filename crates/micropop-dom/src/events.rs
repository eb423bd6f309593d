//! Input Events
//!
//! User-interaction events and the listener-registration primitive.
//! Listeners are opaque ids; the embedder decides what an id does when the
//! event is dispatched.

use crate::NodeId;

/// Interaction event types the document can deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    MouseEnter,
    MouseLeave,
    Focus,
    Blur,
}

/// Opaque listener identifier, allocated by the embedder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

/// Input event
#[derive(Debug, Clone)]
pub struct InputEvent {
    pub event_type: EventType,
    pub target: NodeId,
    pub cancelable: bool,
    default_prevented: bool,
}

impl InputEvent {
    /// Create a click event (cancelable)
    pub fn click(target: NodeId) -> Self {
        Self {
            event_type: EventType::Click,
            target,
            cancelable: true,
            default_prevented: false,
        }
    }

    /// Create a mouse-enter event
    pub fn mouse_enter(target: NodeId) -> Self {
        Self::non_cancelable(EventType::MouseEnter, target)
    }

    /// Create a mouse-leave event
    pub fn mouse_leave(target: NodeId) -> Self {
        Self::non_cancelable(EventType::MouseLeave, target)
    }

    /// Create a focus event
    pub fn focus(target: NodeId) -> Self {
        Self::non_cancelable(EventType::Focus, target)
    }

    /// Create a blur event
    pub fn blur(target: NodeId) -> Self {
        Self::non_cancelable(EventType::Blur, target)
    }

    fn non_cancelable(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            cancelable: false,
            default_prevented: false,
        }
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}
