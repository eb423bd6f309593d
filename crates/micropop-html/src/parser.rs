//! HTML5 Parser implementation
//!
//! Uses html5ever's built-in RcDom and converts to the micropop DOM format.
//! This is simpler and more reliable than implementing TreeSink directly.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use micropop_dom::{Document, DomTree, NodeId};

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Document {
        // Parse using RcDom
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .expect("reading from a byte slice cannot fail");

        // Convert RcDom to our DOM
        let mut document = Document::new();
        let root = document.tree().root();
        convert_node(&dom.document, document.tree_mut(), root);

        tracing::debug!("parsed {} nodes", document.tree().len());
        document
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert an RcDom node into the arena tree
fn convert_node(handle: &Handle, tree: &mut DomTree, parent: NodeId) {
    match &handle.data {
        RcNodeData::Document => {
            for child in handle.children.borrow().iter() {
                convert_node(child, tree, parent);
            }
        }
        RcNodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            if !text.trim().is_empty() {
                let id = tree.create_text(&text);
                tree.append_child(parent, id);
            }
        }
        RcNodeData::Comment { contents } => {
            let id = tree.create_comment(&contents.to_string());
            tree.append_child(parent, id);
        }
        RcNodeData::Element { name, attrs, .. } => {
            let id = tree.create_element(&name.local);

            if let Some(elem) = tree.get_mut(id).and_then(|n| n.as_element_mut()) {
                for attr in attrs.borrow().iter() {
                    let attr_name = attr.name.local.as_ref();
                    let value = attr.value.to_string();

                    // The class attribute also seeds the class list
                    if attr_name == "class" {
                        for class in value.split_whitespace() {
                            elem.add_class(class);
                        }
                    }
                    elem.set_attr(attr_name, &value);
                }
            }
            tree.append_child(parent, id);

            for child in handle.children.borrow().iter() {
                convert_node(child, tree, id);
            }
        }
        // Doctypes and processing instructions are irrelevant here
        RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => {}
    }
}
