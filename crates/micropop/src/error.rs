//! Popup construction errors
//!
//! Construction is the only fallible phase. Show/hide/toggle never fail;
//! an unresolved identifier there degrades to a diagnostic warning.

/// Error constructing a popup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PopupError {
    /// No display element was supplied and none could be derived from the
    /// first trigger's declaration attributes
    #[error("invalid popup configuration: {0}")]
    Configuration(String),

    /// An explicit identifier does not resolve to a live element
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// A reference does not point at a live element
    #[error("reference does not resolve to a live element")]
    InvalidReference,
}
