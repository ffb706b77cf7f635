// ABOUTME: Tree-walk helpers over scraper's node tree: tag-and-content removal and text with subtrees skipped.
// ABOUTME: Skip sets of node IDs stand in for destructive edits, so parsed documents stay immutable.

use std::collections::HashSet;

use ego_tree::{NodeId, NodeRef};
use scraper::{ElementRef, Html, Node, Selector};

/// Removes every `tag` element together with everything inside it.
///
/// The markup is parsed as a fragment, so nested elements of the same tag and
/// sibling content between two of them are handled correctly. The result is
/// re-serialized; attribute order and quoting may differ from the input.
pub fn remove_tags_and_content(html: &str, tag: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let tag = tag.to_ascii_lowercase();
    let skip: HashSet<NodeId> = fragment
        .tree
        .nodes()
        .filter(|node| matches!(node.value(), Node::Element(el) if el.name() == tag))
        .map(|node| node.id())
        .collect();
    serialize_fragment(&fragment, &skip)
}

/// Visible text of a markup fragment, entities decoded.
pub fn fragment_text(html: &str) -> String {
    Html::parse_fragment(html)
        .root_element()
        .text()
        .collect()
}

/// Text of `el` with the subtrees of every descendant matching `skip` left out.
pub fn text_without(el: ElementRef<'_>, skip: &Selector) -> String {
    let skip: HashSet<NodeId> = el.select(skip).map(|e| e.id()).collect();
    let mut out = String::new();
    for child in el.children() {
        collect_text(child, &skip, &mut out);
    }
    out
}

fn collect_text(node: NodeRef<'_, Node>, skip: &HashSet<NodeId>, out: &mut String) {
    if skip.contains(&node.id()) {
        return;
    }
    match node.value() {
        Node::Text(t) => out.push_str(&**t),
        Node::Element(_) => {
            for child in node.children() {
                collect_text(child, skip, out);
            }
        }
        _ => {}
    }
}

/// First element sibling after `el`, skipping text and comments.
pub fn next_element_sibling(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

fn serialize_fragment(fragment: &Html, skip: &HashSet<NodeId>) -> String {
    let mut out = String::new();
    for child in fragment.root_element().children() {
        serialize_node(child, skip, &mut out);
    }
    out
}

fn serialize_node(node: NodeRef<'_, Node>, skip: &HashSet<NodeId>, out: &mut String) {
    if skip.contains(&node.id()) {
        return;
    }
    match node.value() {
        Node::Text(t) => out.push_str(&escape_text(t)),
        Node::Element(el) => {
            let name = el.name();
            out.push('<');
            out.push_str(name);
            for (k, v) in el.attrs() {
                out.push(' ');
                out.push_str(k);
                out.push_str("=\"");
                out.push_str(&escape_attr(v));
                out.push('"');
            }

            if is_void_element(name) {
                out.push_str(" />");
                return;
            }

            out.push('>');
            for child in node.children() {
                serialize_node(child, skip, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Node::Comment(c) => {
            out.push_str("<!--");
            out.push_str(&**c);
            out.push_str("-->");
        }
        _ => {}
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}
