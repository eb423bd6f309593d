//! Engine configuration
//!
//! All attribute names hang off a single namespace. The defaults match the
//! documented markup contract: `data-micropop-trigger` declares roles,
//! `data-micropop-<role>` names the target, `data-micropop-id` is stamped
//! back for stable re-lookup.

/// Default attribute namespace
pub const DEFAULT_NAMESPACE: &str = "data-micropop";

/// Default CSS class applied while a popup is visible
pub const DEFAULT_OPEN_CLASS: &str = "is-open";

/// Process-wide configuration, owned by the [`Micropop`](crate::Micropop) context
#[derive(Debug, Clone)]
pub struct Config {
    /// Attribute namespace, e.g. `data-micropop`
    pub namespace: String,
    /// Trigger-declaration attribute: whitespace-separated role tokens
    pub trigger_attribute: String,
    /// Assigned-identifier attribute, stamped onto display elements
    pub id_attribute: String,
    /// CSS class applied while visible
    pub open_class: String,
    /// Emit diagnostics on duplicate initialization
    pub debug: bool,
}

impl Config {
    /// Configuration with all defaults
    pub fn new() -> Self {
        Self::with_namespace(DEFAULT_NAMESPACE)
    }

    /// Configuration with a custom attribute namespace; the trigger and
    /// identifier attribute names are derived from it
    pub fn with_namespace(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            trigger_attribute: format!("{namespace}-trigger"),
            id_attribute: format!("{namespace}-id"),
            open_class: DEFAULT_OPEN_CLASS.to_string(),
            debug: false,
        }
    }

    /// Per-role target attribute for a role token, e.g. `data-micropop-tooltip`
    pub fn role_attribute(&self, token: &str) -> String {
        format!("{}-{}", self.namespace, token)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
