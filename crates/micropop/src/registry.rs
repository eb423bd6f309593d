//! Registry & auto-discovery
//!
//! The `Micropop` context owns the configuration, the identifier registry,
//! and the listener-action table. It is an explicit object threaded through
//! every call; there is no process-wide state.

use std::collections::HashMap;

use micropop_dom::{Document, EventType, InputEvent, ListenerId, NodeId};

use crate::resolve::{commit, resolve, PopupRef, Resolution};
use crate::{Config, Popup, PopupError, Role};

/// Configuration for a single popup
#[derive(Debug, Clone, Default)]
pub struct PopupConfig {
    /// Display element, by identifier or element reference. When absent it
    /// is derived from the first trigger's role-declaration attributes.
    pub target: Option<PopupRef>,
    /// Trigger elements, in order
    pub triggers: Vec<NodeId>,
    /// Role; when absent, the derived role token decides (or `Role::None`)
    pub role: Option<Role>,
    /// Open class override; defaults to the context-wide class
    pub open_class: Option<String>,
}

/// What a registered listener does when its event fires
#[derive(Debug, Clone)]
enum TriggerAction {
    Show(String),
    Hide(String),
    Toggle(String),
}

/// The popup engine context: registry, discovery, and event dispatch
#[derive(Debug)]
pub struct Micropop {
    config: Config,
    popups: HashMap<String, Popup>,
    actions: HashMap<ListenerId, TriggerAction>,
    next_generated: u32,
    next_listener: u32,
}

impl Micropop {
    /// Create a context with default configuration
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a context with the given configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            popups: HashMap::new(),
            actions: HashMap::new(),
            next_generated: 0,
            next_listener: 0,
        }
    }

    /// The context configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Look up a registered popup by identifier
    pub fn get(&self, id: &str) -> Option<&Popup> {
        self.popups.get(id)
    }

    /// Number of registered popups
    pub fn len(&self) -> usize {
        self.popups.len()
    }

    /// Check if no popup has been registered yet
    pub fn is_empty(&self) -> bool {
        self.popups.is_empty()
    }

    /// Resolve a reference to an identifier.
    ///
    /// String references come back unchanged. Elements without any
    /// identifier get a fresh `micropop-<n>` synthesized and stamped onto
    /// them, so a second resolution returns the same id. References to
    /// dead nodes yield `None`.
    pub fn resolve_id(&mut self, doc: &mut Document, popup_ref: &PopupRef) -> Option<String> {
        match resolve(doc, popup_ref, &self.config.id_attribute)? {
            Resolution::Known(id) => Some(id),
            Resolution::Fresh(node) => {
                let id = self.generate_id();
                commit(doc, node, &id, &self.config.id_attribute);
                Some(id)
            }
        }
    }

    fn generate_id(&mut self) -> String {
        self.next_generated += 1;
        format!("micropop-{}", self.next_generated)
    }

    /// Initialize a popup.
    ///
    /// Duplicate initialization under an already-used identifier returns
    /// the existing instance unchanged and attaches nothing. Construction
    /// errors leave the registry and the document untouched.
    pub fn init_popup(
        &mut self,
        doc: &mut Document,
        popup_config: PopupConfig,
    ) -> Result<&Popup, PopupError> {
        let PopupConfig {
            target,
            triggers,
            role,
            open_class,
        } = popup_config;

        // Derive the target (and role) from the first trigger when none
        // was supplied.
        let (target, role) = match target {
            Some(target) => (target, role.unwrap_or_default()),
            None => {
                let (derived, derived_role) = self.derive_target(doc, &triggers)?;
                (derived, role.unwrap_or(derived_role))
            }
        };

        // Resolve identifier and display element before touching anything,
        // so a failed construction never partially registers.
        let (id, element) = match &target {
            PopupRef::Id(id) => {
                if self.popups.contains_key(id) {
                    self.warn_duplicate(id);
                    return self.registered(id.clone());
                }
                let element = self
                    .lookup_element(doc, id)
                    .ok_or_else(|| PopupError::ElementNotFound(id.clone()))?;
                (id.clone(), element)
            }
            PopupRef::Element(node) => {
                let resolution = resolve(doc, &target, &self.config.id_attribute)
                    .ok_or(PopupError::InvalidReference)?;
                let id = match resolution {
                    Resolution::Known(id) => id,
                    Resolution::Fresh(_) => self.generate_id(),
                };
                if self.popups.contains_key(&id) {
                    self.warn_duplicate(&id);
                    return self.registered(id);
                }
                (id, *node)
            }
        };

        let popup = Popup::mount(
            doc,
            id.clone(),
            element,
            triggers,
            role,
            open_class.unwrap_or_else(|| self.config.open_class.clone()),
        );

        // Stamp the resolved identifier back for stable re-lookup
        commit(doc, element, &id, &self.config.id_attribute);
        self.attach_listeners(doc, &popup);
        self.popups.insert(id.clone(), popup);
        self.registered(id)
    }

    /// Auto-discovery: scan the document for trigger declarations and
    /// initialize one popup per (trigger, role token) pair.
    ///
    /// Tokens without a target attribute are skipped; a declaration whose
    /// construction fails is warned about and skipped, never fatal.
    /// Returns the number of popups created.
    pub fn discover(&mut self, doc: &mut Document) -> usize {
        let trigger_attribute = self.config.trigger_attribute.clone();
        let mut created = 0;

        for trigger in doc.elements_with_attribute(&trigger_attribute) {
            let Some(declaration) = doc.attribute(trigger, &trigger_attribute) else {
                continue;
            };
            let tokens: Vec<String> = declaration.split_whitespace().map(String::from).collect();

            for token in tokens {
                let role_attribute = self.config.role_attribute(&token);
                let Some(target) = doc.attribute(trigger, &role_attribute).map(String::from) else {
                    continue;
                };

                let before = self.popups.len();
                let popup_config = PopupConfig {
                    target: Some(PopupRef::Id(target.clone())),
                    triggers: vec![trigger],
                    role: Some(Role::from_token(&token)),
                    open_class: None,
                };
                match self.init_popup(doc, popup_config) {
                    Ok(_) => {
                        if self.popups.len() > before {
                            created += 1;
                        }
                    }
                    Err(err) => {
                        tracing::warn!(%err, target = %target, "skipping popup declaration");
                    }
                }
            }
        }

        tracing::debug!(created, "discovery complete");
        created
    }

    /// Show a popup by reference; never raises
    pub fn show(&mut self, doc: &mut Document, popup_ref: impl Into<PopupRef>) {
        if let Some(popup) = self.lookup(doc, popup_ref.into()) {
            popup.show(doc);
        }
    }

    /// Hide a popup by reference; never raises
    pub fn hide(&mut self, doc: &mut Document, popup_ref: impl Into<PopupRef>) {
        if let Some(popup) = self.lookup(doc, popup_ref.into()) {
            popup.hide(doc);
        }
    }

    /// Toggle a popup by reference; never raises
    pub fn toggle(&mut self, doc: &mut Document, popup_ref: impl Into<PopupRef>) {
        if let Some(popup) = self.lookup(doc, popup_ref.into()) {
            popup.toggle(doc);
        }
    }

    /// Dispatch an input event to the listeners registered on its target.
    ///
    /// A toggle fired from an event suppresses the event's default action
    /// first; show/hide do not touch it.
    pub fn handle_event(&mut self, doc: &mut Document, event: &mut InputEvent) {
        for listener in doc.event_listeners(event.target, event.event_type) {
            let Some(action) = self.actions.get(&listener).cloned() else {
                continue;
            };
            match action {
                TriggerAction::Show(id) => self.run(doc, &id, Popup::show),
                TriggerAction::Hide(id) => self.run(doc, &id, Popup::hide),
                TriggerAction::Toggle(id) => {
                    event.prevent_default();
                    self.run(doc, &id, Popup::toggle);
                }
            }
        }
    }

    fn run(&self, doc: &mut Document, id: &str, op: fn(&Popup, &mut Document)) {
        if let Some(popup) = self.popups.get(id) {
            op(popup, doc);
        }
    }

    /// Resolve and look up, warning (not failing) on a missing instance
    fn lookup(&mut self, doc: &mut Document, popup_ref: PopupRef) -> Option<&Popup> {
        let id = self.resolve_id(doc, &popup_ref)?;
        if !self.popups.contains_key(&id) {
            tracing::warn!(id = %id, "popup not initialized");
            return None;
        }
        self.popups.get(&id)
    }

    fn registered(&self, id: String) -> Result<&Popup, PopupError> {
        self.popups
            .get(&id)
            .ok_or(PopupError::ElementNotFound(id))
    }

    fn warn_duplicate(&self, id: &str) {
        if self.config.debug {
            tracing::warn!(id = %id, "duplicate popup initialization ignored");
        }
    }

    /// Find the display element for an identifier: native `id` first, then
    /// the stamped identifier attribute
    fn lookup_element(&self, doc: &Document, id: &str) -> Option<NodeId> {
        doc.get_element_by_id(id)
            .or_else(|| doc.find_by_attribute(&self.config.id_attribute, id))
    }

    /// Derive (target, role) from the first trigger's declaration
    fn derive_target(
        &self,
        doc: &Document,
        triggers: &[NodeId],
    ) -> Result<(PopupRef, Role), PopupError> {
        let first = triggers.first().copied().ok_or_else(|| {
            PopupError::Configuration("no display element and no triggers to derive one from".into())
        })?;
        let declaration = doc
            .attribute(first, &self.config.trigger_attribute)
            .ok_or_else(|| {
                PopupError::Configuration("first trigger carries no role declaration".into())
            })?;
        let token = declaration.split_whitespace().next().ok_or_else(|| {
            PopupError::Configuration("role declaration attribute is empty".into())
        })?;
        let target = doc
            .attribute(first, &self.config.role_attribute(token))
            .ok_or_else(|| {
                PopupError::Configuration(format!("no target declared for role '{token}'"))
            })?;
        Ok((PopupRef::Id(target.to_string()), Role::from_token(token)))
    }

    fn attach_listeners(&mut self, doc: &mut Document, popup: &Popup) {
        let id = popup.id().to_string();
        match popup.role() {
            Role::None => {}
            Role::Tooltip => {
                for &trigger in popup.triggers() {
                    self.subscribe(doc, trigger, EventType::MouseEnter, TriggerAction::Show(id.clone()));
                    self.subscribe(doc, trigger, EventType::MouseLeave, TriggerAction::Hide(id.clone()));
                    self.subscribe(doc, trigger, EventType::Focus, TriggerAction::Show(id.clone()));
                    self.subscribe(doc, trigger, EventType::Blur, TriggerAction::Hide(id.clone()));
                }
            }
            Role::Dialog => {
                for &trigger in popup.triggers() {
                    self.subscribe(doc, trigger, EventType::Click, TriggerAction::Toggle(id.clone()));
                }
            }
        }
    }

    fn subscribe(
        &mut self,
        doc: &mut Document,
        trigger: NodeId,
        event_type: EventType,
        action: TriggerAction,
    ) {
        let listener = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.actions.insert(listener, action);
        doc.add_event_listener(trigger, event_type, listener);
    }
}

impl Default for Micropop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_popup_markup() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.tree().root();
        let trigger = doc.tree_mut().create_element("button");
        let popup = doc.tree_mut().create_element("div");
        doc.tree_mut().append_child(root, trigger);
        doc.tree_mut().append_child(root, popup);
        doc.set_attribute(trigger, "data-micropop-trigger", "tooltip");
        doc.set_attribute(trigger, "data-micropop-tooltip", "tip1");
        doc.set_attribute(popup, "id", "tip1");
        (doc, trigger, popup)
    }

    #[test]
    fn test_init_popup_with_string_target() {
        let (mut doc, trigger, element) = doc_with_popup_markup();
        let mut engine = Micropop::new();

        let popup = engine
            .init_popup(
                &mut doc,
                PopupConfig {
                    target: Some("tip1".into()),
                    triggers: vec![trigger],
                    role: Some(Role::Tooltip),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(popup.id(), "tip1");
        assert_eq!(popup.element(), element);
        assert_eq!(doc.attribute(element, "aria-hidden"), Some("true"));
        assert_eq!(doc.attribute(element, "data-micropop-id"), Some("tip1"));
    }

    #[test]
    fn test_init_popup_derives_target_from_trigger() {
        let (mut doc, trigger, element) = doc_with_popup_markup();
        let mut engine = Micropop::new();

        let popup = engine
            .init_popup(
                &mut doc,
                PopupConfig {
                    triggers: vec![trigger],
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(popup.id(), "tip1");
        assert_eq!(popup.element(), element);
        assert_eq!(popup.role(), Role::Tooltip);
    }

    #[test]
    fn test_init_popup_without_derivable_target_fails() {
        let mut doc = Document::new();
        let root = doc.tree().root();
        let trigger = doc.tree_mut().create_element("button");
        doc.tree_mut().append_child(root, trigger);
        let mut engine = Micropop::new();

        let err = engine
            .init_popup(&mut doc, PopupConfig { triggers: vec![trigger], ..Default::default() })
            .unwrap_err();
        assert!(matches!(err, PopupError::Configuration(_)));

        let err = engine
            .init_popup(&mut doc, PopupConfig::default())
            .unwrap_err();
        assert!(matches!(err, PopupError::Configuration(_)));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_unresolved_string_target_fails() {
        let mut doc = Document::new();
        let mut engine = Micropop::new();

        let err = engine
            .init_popup(
                &mut doc,
                PopupConfig { target: Some("ghost".into()), ..Default::default() },
            )
            .unwrap_err();
        assert_eq!(err, PopupError::ElementNotFound("ghost".to_string()));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_dead_element_target_fails() {
        let mut doc = Document::new();
        let mut engine = Micropop::new();

        let err = engine
            .init_popup(
                &mut doc,
                PopupConfig { target: Some(PopupRef::Element(NodeId::NONE)), ..Default::default() },
            )
            .unwrap_err();
        assert_eq!(err, PopupError::InvalidReference);
    }

    #[test]
    fn test_duplicate_init_returns_existing_without_new_listeners() {
        let (mut doc, trigger, element) = doc_with_popup_markup();
        let mut engine = Micropop::new();

        let config = PopupConfig {
            target: Some("tip1".into()),
            triggers: vec![trigger],
            role: Some(Role::Tooltip),
            ..Default::default()
        };
        let first = engine.init_popup(&mut doc, config.clone()).unwrap().element();
        assert_eq!(first, element);
        let count = doc.listener_count(trigger);

        let second = engine.init_popup(&mut doc, config).unwrap().element();
        assert_eq!(first, second);
        assert_eq!(engine.len(), 1);
        assert_eq!(doc.listener_count(trigger), count);
    }

    #[test]
    fn test_duplicate_init_by_element_reference() {
        let mut doc = Document::new();
        let root = doc.tree().root();
        let panel = doc.tree_mut().create_element("div");
        doc.tree_mut().append_child(root, panel);
        let mut engine = Micropop::new();

        let config = PopupConfig {
            target: Some(PopupRef::Element(panel)),
            ..Default::default()
        };
        let first = engine.init_popup(&mut doc, config.clone()).unwrap().id().to_string();
        let second = engine.init_popup(&mut doc, config).unwrap().id().to_string();

        // The stamped id makes the second init resolve to the same instance
        assert_eq!(first, "micropop-1");
        assert_eq!(first, second);
        assert_eq!(engine.len(), 1);

        // An unregistered element reference stays harmless
        let stray = doc.tree_mut().create_element("span");
        doc.tree_mut().append_child(root, stray);
        engine.show(&mut doc, PopupRef::Element(stray));
        assert!(!doc.has_attribute(stray, "aria-hidden"));
        assert!(!doc.has_class(stray, "is-open"));
    }

    #[test]
    fn test_resolve_id_synthesizes_stable_id() {
        let mut doc = Document::new();
        let root = doc.tree().root();
        let div = doc.tree_mut().create_element("div");
        doc.tree_mut().append_child(root, div);
        let mut engine = Micropop::new();

        let first = engine.resolve_id(&mut doc, &PopupRef::Element(div)).unwrap();
        let second = engine.resolve_id(&mut doc, &PopupRef::Element(div)).unwrap();

        assert_eq!(first, "micropop-1");
        assert_eq!(first, second);
        assert_eq!(doc.attribute(div, "data-micropop-id"), Some("micropop-1"));
    }

    #[test]
    fn test_resolve_id_passes_strings_through() {
        let mut doc = Document::new();
        let mut engine = Micropop::new();

        assert_eq!(engine.resolve_id(&mut doc, &"tip1".into()), Some("tip1".to_string()));
        assert_eq!(engine.resolve_id(&mut doc, &PopupRef::Element(NodeId::NONE)), None);
    }

    #[test]
    fn test_show_on_unregistered_id_is_a_no_op() {
        let (mut doc, trigger, element) = doc_with_popup_markup();
        let mut engine = Micropop::new();

        engine.show(&mut doc, "ghost");
        engine.hide(&mut doc, "ghost");
        engine.toggle(&mut doc, "ghost");

        // No element was touched
        assert!(!doc.has_attribute(element, "aria-hidden"));
        assert!(!doc.has_class(element, "is-open"));
        assert!(!doc.has_attribute(trigger, "aria-expanded"));
    }

    #[test]
    fn test_show_and_hide_by_id() {
        let (mut doc, trigger, element) = doc_with_popup_markup();
        let mut engine = Micropop::new();
        engine.discover(&mut doc);

        engine.show(&mut doc, "tip1");
        assert_eq!(doc.attribute(element, "aria-hidden"), Some("false"));
        assert_eq!(doc.attribute(trigger, "aria-expanded"), Some("true"));
        assert!(doc.has_class(element, "is-open"));

        engine.hide(&mut doc, "tip1");
        assert_eq!(doc.attribute(element, "aria-hidden"), Some("true"));
        assert!(!doc.has_class(element, "is-open"));
    }

    #[test]
    fn test_discovery_multi_role_trigger() {
        let mut doc = Document::new();
        let root = doc.tree().root();
        let trigger = doc.tree_mut().create_element("button");
        let tip = doc.tree_mut().create_element("div");
        let dialog = doc.tree_mut().create_element("div");
        doc.tree_mut().append_child(root, trigger);
        doc.tree_mut().append_child(root, tip);
        doc.tree_mut().append_child(root, dialog);
        doc.set_attribute(trigger, "data-micropop-trigger", "tooltip dialog");
        doc.set_attribute(trigger, "data-micropop-tooltip", "tip1");
        doc.set_attribute(trigger, "data-micropop-dialog", "dlg1");
        doc.set_attribute(tip, "id", "tip1");
        doc.set_attribute(dialog, "id", "dlg1");

        let mut engine = Micropop::new();
        let created = engine.discover(&mut doc);

        assert_eq!(created, 2);
        let tip_popup = engine.get("tip1").unwrap();
        let dlg_popup = engine.get("dlg1").unwrap();
        assert_eq!(tip_popup.role(), Role::Tooltip);
        assert_eq!(dlg_popup.role(), Role::Dialog);
        assert_eq!(tip_popup.triggers(), dlg_popup.triggers());
        assert_ne!(tip_popup.element(), dlg_popup.element());
    }

    #[test]
    fn test_discovery_skips_tokens_without_target() {
        let mut doc = Document::new();
        let root = doc.tree().root();
        let trigger = doc.tree_mut().create_element("button");
        doc.tree_mut().append_child(root, trigger);
        doc.set_attribute(trigger, "data-micropop-trigger", "tooltip");

        let mut engine = Micropop::new();
        assert_eq!(engine.discover(&mut doc), 0);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_discovery_skips_unresolvable_target() {
        let mut doc = Document::new();
        let root = doc.tree().root();
        let trigger = doc.tree_mut().create_element("button");
        doc.tree_mut().append_child(root, trigger);
        doc.set_attribute(trigger, "data-micropop-trigger", "tooltip");
        doc.set_attribute(trigger, "data-micropop-tooltip", "missing");

        let mut engine = Micropop::new();
        assert_eq!(engine.discover(&mut doc), 0);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_tooltip_events() {
        let (mut doc, trigger, element) = doc_with_popup_markup();
        let mut engine = Micropop::new();
        engine.discover(&mut doc);

        let mut enter = InputEvent::mouse_enter(trigger);
        engine.handle_event(&mut doc, &mut enter);
        assert_eq!(doc.attribute(element, "aria-hidden"), Some("false"));
        assert!(!enter.is_default_prevented());

        let mut leave = InputEvent::mouse_leave(trigger);
        engine.handle_event(&mut doc, &mut leave);
        assert_eq!(doc.attribute(element, "aria-hidden"), Some("true"));

        let mut focus = InputEvent::focus(trigger);
        engine.handle_event(&mut doc, &mut focus);
        assert!(doc.has_class(element, "is-open"));

        let mut blur = InputEvent::blur(trigger);
        engine.handle_event(&mut doc, &mut blur);
        assert!(!doc.has_class(element, "is-open"));
    }

    #[test]
    fn test_dialog_click_toggles_and_prevents_default() {
        let mut doc = Document::new();
        let root = doc.tree().root();
        let trigger = doc.tree_mut().create_element("a");
        let dialog = doc.tree_mut().create_element("div");
        doc.tree_mut().append_child(root, trigger);
        doc.tree_mut().append_child(root, dialog);
        doc.set_attribute(trigger, "data-micropop-trigger", "dialog");
        doc.set_attribute(trigger, "data-micropop-dialog", "dlg1");
        doc.set_attribute(dialog, "id", "dlg1");

        let mut engine = Micropop::new();
        engine.discover(&mut doc);

        let mut click = InputEvent::click(trigger);
        engine.handle_event(&mut doc, &mut click);
        assert!(click.is_default_prevented());
        assert_eq!(doc.attribute(dialog, "aria-hidden"), Some("false"));

        let mut click = InputEvent::click(trigger);
        engine.handle_event(&mut doc, &mut click);
        assert_eq!(doc.attribute(dialog, "aria-hidden"), Some("true"));
    }

    #[test]
    fn test_role_none_attaches_no_listeners() {
        let (mut doc, trigger, _) = doc_with_popup_markup();
        let mut engine = Micropop::new();

        engine
            .init_popup(
                &mut doc,
                PopupConfig {
                    target: Some("tip1".into()),
                    triggers: vec![trigger],
                    role: Some(Role::None),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(doc.listener_count(trigger), 0);
    }

    #[test]
    fn test_event_on_unknown_target_is_a_no_op() {
        let (mut doc, _, element) = doc_with_popup_markup();
        let mut engine = Micropop::new();
        engine.discover(&mut doc);

        let mut click = InputEvent::click(element);
        engine.handle_event(&mut doc, &mut click);
        assert_eq!(doc.attribute(element, "aria-hidden"), Some("true"));
    }
}
