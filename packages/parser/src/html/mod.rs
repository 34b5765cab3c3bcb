//! Parsed HTML pages and element lookup.

mod locate;
mod query;

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node};

pub use locate::{attribute, find_all, find_next, find_tag, find_tags, flat_text, locate, Located};
pub use query::{AttrFilter, AttrValue, TagQuery};

/// A parsed HTML page.
pub struct PageDocument {
    html: Html,
}

impl PageDocument {
    pub fn parse(text: &str) -> Self {
        Self {
            html: Html::parse_document(text),
        }
    }
}

/// Anything an element search can start from: a whole document or an
/// element inside one.
pub trait Scope<'a> {
    fn node(&self) -> NodeRef<'a, Node>;
}

impl<'a> Scope<'a> for &'a PageDocument {
    fn node(&self) -> NodeRef<'a, Node> {
        self.html.tree.root()
    }
}

impl<'a> Scope<'a> for ElementRef<'a> {
    fn node(&self) -> NodeRef<'a, Node> {
        **self
    }
}
