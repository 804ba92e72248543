//! Navigation helpers over the parsed markup tree.
//!
//! Everything here is service-agnostic: lookups by id, class and tag name,
//! attribute and text reads. Required lookups return `NodeError::NotFound`,
//! optional ones return `Option`.

use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html};
use url::Url;

use crate::error::NodeError;

pub fn find_by_id<'a>(document: &'a Html, id: &str) -> Result<ElementRef<'a>, NodeError> {
    elements(document.root_element().descendants())
        .find(|el| el.value().id() == Some(id))
        .ok_or_else(|| NodeError::NotFound(format!("#{id}")))
}

/// Depth-first search for the first descendant carrying `class`. The node
/// itself is not considered.
pub fn find_first_by_class<'a>(
    node: ElementRef<'a>,
    class: &str,
) -> Result<ElementRef<'a>, NodeError> {
    descendant_elements(node)
        .find(|el| has_class(*el, class))
        .ok_or_else(|| NodeError::NotFound(format!(".{class}")))
}

/// All descendants carrying `class`, lazily and in document order.
pub fn find_all_by_class<'a>(
    node: ElementRef<'a>,
    class: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    descendant_elements(node).filter(move |el| has_class(*el, class))
}

pub fn has_class(node: ElementRef<'_>, class: &str) -> bool {
    node.value().classes().any(|c| c == class)
}

pub fn find_by_tag<'a>(node: ElementRef<'a>, tag: &str) -> Result<ElementRef<'a>, NodeError> {
    descendant_elements(node)
        .find(|el| el.value().name().eq_ignore_ascii_case(tag))
        .ok_or_else(|| NodeError::NotFound(format!("<{tag}>")))
}

/// First direct child carrying `class`, if any.
pub fn match_class_among_children<'a>(node: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    child_elements(node).find(|el| has_class(*el, class))
}

pub fn child_elements<'a>(node: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    elements(node.children())
}

/// First child that is an element; text and comment nodes are skipped.
pub fn first_element_child(node: ElementRef<'_>) -> Result<ElementRef<'_>, NodeError> {
    child_elements(node).next().ok_or_else(|| {
        NodeError::NotFound(format!("child element of <{}>", node.value().name()))
    })
}

pub fn attr<'a>(node: ElementRef<'a>, name: &str) -> Result<&'a str, NodeError> {
    node.value()
        .attr(name)
        .ok_or_else(|| NodeError::NotFound(format!("<{} {name}>", node.value().name())))
}

/// Concatenated text of the node and its descendants, untrimmed.
pub fn inner_text(node: ElementRef<'_>) -> String {
    node.text().collect()
}

pub fn read_uint_text(node: ElementRef<'_>) -> Result<u32, NodeError> {
    let text = inner_text(node);
    text.trim()
        .parse()
        .map_err(|_| NodeError::Parse(text.trim().to_string()))
}

/// Source of the first `<img>` below `node`, as an absolute URI.
pub fn read_image_source_uri(node: ElementRef<'_>) -> Result<Url, NodeError> {
    let image = find_by_tag(node, "img")?;
    let src = attr(image, "src")?.trim();
    Url::parse(src).map_err(|_| NodeError::InvalidUri(src.to_string()))
}

fn descendant_elements<'a>(node: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    elements(node.descendants().skip(1))
}

fn elements<'a>(
    nodes: impl Iterator<Item = NodeRef<'a, Node>> + 'a,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    nodes.filter_map(ElementRef::wrap)
}
