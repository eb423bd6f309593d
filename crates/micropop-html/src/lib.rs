//! Micropop HTML loader
//!
//! Parses HTML5 markup into a `micropop-dom` document so auto-discovery can
//! run over real markup strings.

mod parser;

pub use parser::HtmlParser;

use micropop_dom::Document;

/// Parse an HTML string into a document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}
