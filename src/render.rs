//! Rendering of rebuilt chapter items back to HTML.
//!
//! Pure string rendering; no page tree involved. The HTML glue layer parses
//! this output and grafts it into the live container.

use crate::nav::NavEntry;
use crate::reshape::ChapterItem;

/// Render rebuilt items as replacement markup for a navigation container.
///
/// Leaves become `<li><h5>…</h5></li>`; groups become a `<details>` widget
/// with the title as its `<summary>` and the members as a nested `<ul>`.
/// Class lists carry over verbatim; title markup passes through untouched.
pub fn render_items(items: &[ChapterItem]) -> String {
    let mut out = String::new();
    for item in items {
        render_item(&mut out, item);
    }
    out
}

fn render_item(out: &mut String, item: &ChapterItem) {
    match item {
        ChapterItem::Leaf {
            title_html,
            classes,
        } => {
            out.push_str(&format!(
                "<li class=\"{}\"><h5>{}</h5></li>",
                escape_attr(&classes.join(" ")),
                title_html
            ));
        }
        ChapterItem::Group {
            title_html,
            classes,
            open,
            members,
        } => {
            out.push_str(&format!(
                "<li class=\"{}\"><details{}><summary><h5>{}</h5></summary><ul>",
                escape_attr(&classes.join(" ")),
                if *open { " open=\"true\"" } else { "" },
                title_html
            ));
            for member in members {
                render_entry(out, member);
            }
            out.push_str("</ul></details></li>");
        }
    }
}

/// Render one member entry as a list item, classes intact.
fn render_entry(out: &mut String, entry: &NavEntry) {
    if entry.classes.is_empty() {
        out.push_str(&format!("<li>{}</li>", entry.title_html));
    } else {
        out.push_str(&format!(
            "<li class=\"{}\">{}</li>",
            escape_attr(&entry.class_attr()),
            entry.title_html
        ));
    }
}

/// Escape a string for use inside a double-quoted attribute value.
///
/// # Examples
///
/// ```
/// use tocfold::render::escape_attr;
///
/// assert_eq!(escape_attr("a \"b\" & c"), "a &quot;b&quot; &amp; c");
/// ```
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
