//! Popup roles
//!
//! The role decides which interactions a trigger listens for:
//! tooltip = hover/focus, dialog = click, none = manual control only.

/// Role classifier for a popup's triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// No listeners; show/hide/toggle are driven through the API
    #[default]
    None,
    /// Shown on hover/focus, hidden on leave/blur
    Tooltip,
    /// Toggled on click, with default-action suppression
    Dialog,
}

impl Role {
    /// Parse a markup role token; unknown tokens map to `None`
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "tooltip" => Self::Tooltip,
            "dialog" => Self::Dialog,
            _ => Self::None,
        }
    }
}
