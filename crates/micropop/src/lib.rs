//! Micropop - Minimal popup visibility engine
//!
//! Toggles visibility of popup elements (tooltips, dialogs) anchored to
//! trigger elements, keeping the accessibility attributes and the open
//! class on the display element in lock-step.
//!
//! The engine is an explicit [`Micropop`] context: a registry mapping
//! identifiers to [`Popup`] instances, plus an auto-discovery pass that
//! scans markup for `data-micropop-trigger` declarations and wires the
//! triggers up by role (tooltip = hover/focus, dialog = click).
//!
//! ```
//! use micropop::{Micropop, PopupConfig};
//!
//! let mut doc = micropop_html::parse(r#"
//!     <button data-micropop-trigger="tooltip" data-micropop-tooltip="tip1">?</button>
//!     <div id="tip1">More details</div>
//! "#);
//!
//! let mut engine = Micropop::new();
//! engine.discover(&mut doc);
//!
//! engine.show(&mut doc, "tip1");
//! let tip = doc.get_element_by_id("tip1").unwrap();
//! assert_eq!(doc.attribute(tip, "aria-hidden"), Some("false"));
//! assert!(doc.has_class(tip, "is-open"));
//! ```

mod config;
mod error;
mod popup;
mod registry;
mod resolve;
mod role;

pub use config::{Config, DEFAULT_NAMESPACE, DEFAULT_OPEN_CLASS};
pub use error::PopupError;
pub use popup::Popup;
pub use registry::{Micropop, PopupConfig};
pub use resolve::{commit, resolve, PopupRef, Resolution};
pub use role::Role;

pub use micropop_dom::{Document, EventType, InputEvent, NodeId};
