//! Navigation entry model.
//!
//! A rendered page presents each table of contents as a flat list of entries
//! classified by fixed CSS classes. This module holds the owned, DOM-free
//! representation of those entries that the reshape pass operates on.

/// Class naming a navigation container (`<ul class="nav-list">`).
pub const NAV_LIST_CLASS: &str = "nav-list";

/// Class marking an entry that begins a new top-level chapter.
pub const CHAPTER_CLASS: &str = "level1";

/// Class marking a chapter with no sub-entries.
pub const LEAF_CLASS: &str = "nav-leaf";

/// Class marking the entry for the currently displayed page.
pub const ACTIVE_CLASS: &str = "active";

/// A single navigation entry, detached from the page it came from.
///
/// `title_html` is the entry's inner markup (typically a single link) carried
/// verbatim; `classes` is the entry's full class list, re-emitted unchanged on
/// the rebuilt item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub title_html: String,
    pub classes: Vec<String>,
}

impl NavEntry {
    pub fn new(title_html: impl Into<String>) -> Self {
        Self {
            title_html: title_html.into(),
            classes: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Whether this entry begins a new chapter.
    pub fn is_chapter_start(&self) -> bool {
        self.has_class(CHAPTER_CLASS)
    }

    /// Whether this entry is a chapter with no sub-entries.
    pub fn is_leaf(&self) -> bool {
        self.has_class(LEAF_CLASS)
    }

    /// Whether this entry corresponds to the current page.
    pub fn is_active(&self) -> bool {
        self.has_class(ACTIVE_CLASS)
    }

    /// The class list joined back into a `class` attribute value.
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }
}

/// One chapter-start entry plus its member entries, in source order.
///
/// The head is always a chapter-start entry; the type makes the non-empty
/// invariant structural. Clusters partition the source sequence contiguously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub head: NavEntry,
    pub members: Vec<NavEntry>,
}

impl Cluster {
    pub fn new(head: NavEntry) -> Self {
        Self {
            head,
            members: Vec::new(),
        }
    }

    /// Whether the head or any member is the current page's entry.
    pub fn is_active(&self) -> bool {
        self.head.is_active() || self.members.iter().any(NavEntry::is_active)
    }
}
