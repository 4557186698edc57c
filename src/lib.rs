//! # tocfold
//!
//! Reshapes a documentation site's auto-generated table of contents into a
//! nested, collapsible tree.
//!
//! Page generators emit navigation as one flat list: chapter titles and
//! their sub-entries are all siblings, told apart only by CSS classes
//! (`level1` starts a chapter, `nav-leaf` marks a chapter with no
//! sub-entries, `active` marks the current page). This crate groups those
//! siblings into chapters and rebuilds each one as either a plain item or a
//! `<details>` disclosure widget, expanded when it contains the current
//! page's entry.
//!
//! ## Quick Start
//!
//! ```
//! let page = r#"<ul class="nav-list">
//!     <li class="level1 nav-leaf"><a href="intro.html">Introduction</a></li>
//!     <li class="level1"><a href="ch1.html">Chapter 1</a></li>
//!     <li class="active"><a href="ch1/setup.html">Setup</a></li>
//! </ul>"#;
//!
//! let out = tocfold::reshape_page(page).unwrap();
//!
//! // The leaf chapter is a plain item; the other becomes an open group
//! // because the current page is inside it.
//! assert!(out.contains("<li class=\"level1 nav-leaf\"><h5>"));
//! assert!(out.contains("<details open=\"true\">"));
//! ```
//!
//! ## Working without a page
//!
//! The reshape pass itself is pure and needs no markup:
//!
//! ```
//! use tocfold::{ChapterItem, NavEntry, reshape};
//!
//! let entries = vec![
//!     NavEntry::new("<a href=\"ch1.html\">Chapter 1</a>").with_class("level1"),
//!     NavEntry::new("<a href=\"ch1/a.html\">Section A</a>"),
//! ];
//!
//! let items = reshape(entries).unwrap();
//! assert!(matches!(items[0], ChapterItem::Group { open: false, .. }));
//! ```

pub mod dom;
pub mod error;
pub mod html;
pub mod nav;
pub mod render;
pub mod reshape;

pub use error::{Error, Result};
pub use html::{parse_page, reshape_container, reshape_page};
pub use nav::{Cluster, NavEntry};
pub use reshape::{ChapterItem, group_chapters, reshape};
