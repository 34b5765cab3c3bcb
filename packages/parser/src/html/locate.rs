//! Element lookup that fails loudly instead of returning nothing.

use std::iter;

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

use super::query::TagQuery;
use super::Scope;
use crate::error::{ParserError, Result};

/// Outcome of [`locate`]: one element or all of them, depending on
/// [`TagQuery::multiple`].
#[derive(Debug)]
pub enum Located<'a> {
    One(ElementRef<'a>),
    Many(Vec<ElementRef<'a>>),
}

fn not_found(query: &TagQuery) -> ParserError {
    tracing::error!(query = %query, "Tag not found");
    ParserError::TagNotFound {
        query: query.to_string(),
    }
}

/// Descendants of `scope` matching `query`, in document order.
fn matching<'a, 'q>(
    root: NodeRef<'a, Node>,
    query: &'q TagQuery,
) -> impl Iterator<Item = ElementRef<'a>> + 'q
where
    'a: 'q,
{
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |element| query.matches(element))
}

/// Look up the element(s) described by `query` below `scope`.
///
/// Fails with [`ParserError::TagNotFound`] when nothing matches, in both
/// single and multiple mode.
pub fn locate<'a>(scope: impl Scope<'a>, query: &TagQuery) -> Result<Located<'a>> {
    if query.multiple {
        find_tags(scope, query).map(Located::Many)
    } else {
        find_tag(scope, query).map(Located::One)
    }
}

/// First element below `scope` matching `query`.
pub fn find_tag<'a>(scope: impl Scope<'a>, query: &TagQuery) -> Result<ElementRef<'a>> {
    matching(scope.node(), query).next().ok_or_else(|| not_found(query))
}

/// Every element below `scope` matching `query`; never empty.
pub fn find_tags<'a>(scope: impl Scope<'a>, query: &TagQuery) -> Result<Vec<ElementRef<'a>>> {
    let found: Vec<_> = matching(scope.node(), query).collect();
    if found.is_empty() {
        return Err(not_found(query));
    }
    Ok(found)
}

/// Every element below `scope` matching `query`, possibly none.
pub fn find_all<'a>(scope: impl Scope<'a>, query: &TagQuery) -> Vec<ElementRef<'a>> {
    matching(scope.node(), query).collect()
}

/// First element after `from` in document order that matches `query`,
/// starting with `from`'s own descendants.
pub fn find_next<'a>(from: ElementRef<'a>, query: &TagQuery) -> Result<ElementRef<'a>> {
    let inside = from.descendants().skip(1);
    let after = iter::once(*from)
        .chain(from.ancestors())
        .flat_map(|node| node.next_siblings())
        .flat_map(|sibling| sibling.descendants());

    inside
        .chain(after)
        .filter_map(ElementRef::wrap)
        .find(|element| query.matches(element))
        .ok_or_else(|| not_found(query))
}

/// Value of a required attribute.
pub fn attribute<'a>(element: ElementRef<'a>, name: &str) -> Result<&'a str> {
    element.value().attr(name).ok_or_else(|| {
        tracing::error!(tag = element.value().name(), attribute = name, "Missing attribute");
        ParserError::MissingAttribute {
            tag: element.value().name().to_string(),
            attribute: name.to_string(),
        }
    })
}

/// All text below `element`, concatenated in document order.
pub fn flat_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
