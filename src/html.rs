//! Page-level glue: find navigation containers, reshape them in place.
//!
//! This is the only layer that touches markup. It parses a rendered page,
//! pulls each `ul.nav-list` container's entries out as owned [`NavEntry`]
//! values, runs the pure reshape pass, and grafts the rendered replacement
//! back over the container's children.

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use log::debug;

use crate::dom::{Dom, DomSink, NodeId, serialize_children, serialize_node};
use crate::error::Result;
use crate::nav::{NAV_LIST_CLASS, NavEntry};
use crate::render::render_items;
use crate::reshape::reshape;

/// Parse an HTML page into a [`Dom`].
pub fn parse_page(html: &str) -> Dom {
    let sink = DomSink::new();
    parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}

/// Reshape every navigation container on a page.
///
/// Finds each `<ul class="nav-list">` (a page typically has two, one for the
/// desktop layout and one for mobile) and rebuilds its children as
/// collapsible chapter groups. Containers are independent; they are processed
/// in document order. A page with no containers round-trips unchanged apart
/// from parser normalization.
///
/// # Examples
///
/// ```
/// let page = r#"<ul class="nav-list">
///     <li class="level1"><a href="ch1.html">Chapter 1</a></li>
///     <li class="active"><a href="ch1/intro.html">Introduction</a></li>
/// </ul>"#;
///
/// let out = tocfold::reshape_page(page).unwrap();
/// assert!(out.contains("<details open=\"true\">"));
/// ```
pub fn reshape_page(html: &str) -> Result<String> {
    let mut dom = parse_page(html);

    let containers = dom.find_all(|dom, id| {
        dom.element_name(id).is_some_and(|n| n.as_ref() == "ul")
            && dom.has_class(id, NAV_LIST_CLASS)
    });
    debug!("reshaping {} navigation container(s)", containers.len());

    for container in containers {
        reshape_container(&mut dom, container)?;
    }

    serialize_children(&dom, dom.document())
}

/// Reshape a single navigation container in place.
///
/// The container is an explicit parameter; nothing is looked up from ambient
/// page state. An empty container (no element children) is a no-op.
pub fn reshape_container(dom: &mut Dom, container: NodeId) -> Result<()> {
    let entries = extract_entries(dom, container)?;
    if entries.is_empty() {
        return Ok(());
    }
    debug!("container holds {} entries", entries.len());

    let items = reshape(entries)?;
    graft(dom, container, &render_items(&items))
}

/// Pull the container's entries out as owned values.
///
/// Each element child becomes one entry: its class list verbatim, its title
/// markup from its element children (the link), read-only. Text nodes between
/// items are generator indentation, not entries, and are skipped.
fn extract_entries(dom: &Dom, container: NodeId) -> Result<Vec<NavEntry>> {
    let mut entries = Vec::new();

    for child in dom.children(container) {
        if !dom.is_element(child) {
            continue;
        }

        let mut title_html = String::new();
        for grandchild in dom.children(child) {
            if dom.is_element(grandchild) {
                title_html.push_str(&serialize_node(dom, grandchild)?);
            }
        }

        entries.push(NavEntry {
            title_html,
            classes: dom.element_classes(child).to_vec(),
        });
    }

    Ok(entries)
}

/// Replace the container's children with the rendered replacement markup.
fn graft(dom: &mut Dom, container: NodeId, markup: &str) -> Result<()> {
    let fragment = parse_page(&format!("<ul>{markup}</ul>"));
    let list = fragment
        .find_by_tag("ul")
        .expect("fragment always contains the wrapper list");

    let new_children: Vec<NodeId> = fragment
        .children(list)
        .filter_map(|child| dom.import(&fragment, child))
        .collect();

    dom.replace_children(container, new_children);
    Ok(())
}
