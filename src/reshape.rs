//! Core reshape pass: flat entry sequence → per-chapter items.
//!
//! Transforms the flat entry list a page generator emits (where chapter
//! titles are siblings of their sub-entries) into one item per chapter, each
//! either a plain leaf or a collapsible group. The pass is pure: it consumes
//! owned entries and returns fresh output values, so it can be tested without
//! any page markup in sight.

use crate::error::{Error, Result};
use crate::nav::{Cluster, NavEntry};

/// A rebuilt top-level table of contents item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterItem {
    /// A chapter with no sub-entries: a plain item holding only the title.
    Leaf {
        title_html: String,
        classes: Vec<String>,
    },
    /// A chapter with sub-entries: a disclosure group holding the title as
    /// its summary and the members as a nested list.
    Group {
        title_html: String,
        classes: Vec<String>,
        /// Whether the group starts expanded (the current page is inside it).
        open: bool,
        members: Vec<NavEntry>,
    },
}

/// Group a flat entry sequence into contiguous per-chapter clusters.
///
/// A chapter-start entry flushes the cluster being accumulated and begins a
/// new one; every other entry joins the cluster in progress. Order is
/// preserved exactly. An empty sequence yields no clusters.
///
/// Returns [`Error::OrphanEntry`] if an entry appears before any
/// chapter-start entry; well-formed navigation always leads with one.
pub fn group_chapters(entries: Vec<NavEntry>) -> Result<Vec<Cluster>> {
    let mut clusters = Vec::new();
    let mut current: Option<Cluster> = None;

    for (index, entry) in entries.into_iter().enumerate() {
        if entry.is_chapter_start() {
            if let Some(done) = current.take() {
                clusters.push(done);
            }
            current = Some(Cluster::new(entry));
        } else {
            match current.as_mut() {
                Some(cluster) => cluster.members.push(entry),
                None => return Err(Error::OrphanEntry { index }),
            }
        }
    }

    if let Some(done) = current {
        clusters.push(done);
    }

    Ok(clusters)
}

/// Reshape a flat entry sequence into one [`ChapterItem`] per chapter.
///
/// Leaf chapters become plain items; anything else becomes a disclosure
/// group, marked open when the cluster contains the active entry. The head's
/// class list carries over to the rebuilt item verbatim.
///
/// Not idempotent: the output items no longer have the input's shape, so the
/// pass is meant to run once per freshly rendered page.
pub fn reshape(entries: Vec<NavEntry>) -> Result<Vec<ChapterItem>> {
    let clusters = group_chapters(entries)?;
    Ok(clusters.into_iter().map(build_item).collect())
}

/// Rebuild one cluster as a top-level item.
///
/// Leaf chapters have no members by contract; any that slip through are
/// dropped along with the disclosure widget, matching the leaf rule.
fn build_item(cluster: Cluster) -> ChapterItem {
    let open = cluster.is_active();
    let Cluster { head, members } = cluster;

    if head.is_leaf() {
        ChapterItem::Leaf {
            title_html: head.title_html,
            classes: head.classes,
        }
    } else {
        ChapterItem::Group {
            title_html: head.title_html,
            classes: head.classes,
            open,
            members,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::nav::{ACTIVE_CLASS, CHAPTER_CLASS, LEAF_CLASS};

    fn chapter(title: &str) -> NavEntry {
        NavEntry::new(format!("<a href=\"#\">{title}</a>")).with_class(CHAPTER_CLASS)
    }

    fn member(title: &str) -> NavEntry {
        NavEntry::new(format!("<a href=\"#\">{title}</a>"))
    }

    #[test]
    fn test_empty_input() {
        assert!(group_chapters(Vec::new()).unwrap().is_empty());
        assert!(reshape(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_grouping_partitions_contiguously() {
        let entries = vec![
            chapter("One"),
            member("1.1"),
            member("1.2"),
            chapter("Two"),
            member("2.1"),
        ];

        let clusters = group_chapters(entries).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].members.len(), 2);
        assert_eq!(clusters[1].members.len(), 1);
        assert!(clusters[0].head.title_html.contains("One"));
        assert!(clusters[1].members[0].title_html.contains("2.1"));
    }

    #[test]
    fn test_orphan_entry_fails() {
        let entries = vec![member("stray"), chapter("One")];
        match group_chapters(entries) {
            Err(Error::OrphanEntry { index }) => assert_eq!(index, 0),
            other => panic!("expected OrphanEntry, got {other:?}"),
        }
    }

    #[test]
    fn test_leaf_chapter_yields_plain_item() {
        let entries = vec![chapter("Intro").with_class(LEAF_CLASS)];
        let items = reshape(entries).unwrap();
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], ChapterItem::Leaf { .. }));
    }

    #[test]
    fn test_leaf_rule_wins_over_members() {
        // By contract leaf chapters have no members; if one does, the leaf
        // rule still applies and no disclosure group is built.
        let entries = vec![chapter("Intro").with_class(LEAF_CLASS), member("stray")];
        let items = reshape(entries).unwrap();
        assert!(matches!(items[0], ChapterItem::Leaf { .. }));
    }

    #[test]
    fn test_open_when_member_active() {
        let entries = vec![chapter("One"), member("1.1").with_class(ACTIVE_CLASS)];
        let items = reshape(entries).unwrap();
        match &items[0] {
            ChapterItem::Group { open, .. } => assert!(open),
            other => panic!("expected Group, got {other:?}"),
        }
    }

    #[test]
    fn test_collapsed_when_nothing_active() {
        let entries = vec![chapter("One"), member("1.1")];
        let items = reshape(entries).unwrap();
        match &items[0] {
            ChapterItem::Group { open, .. } => assert!(!open),
            other => panic!("expected Group, got {other:?}"),
        }
    }

    #[test]
    fn test_open_when_head_active() {
        let entries = vec![chapter("One").with_class(ACTIVE_CLASS), member("1.1")];
        let items = reshape(entries).unwrap();
        match &items[0] {
            ChapterItem::Group { open, .. } => assert!(open),
            other => panic!("expected Group, got {other:?}"),
        }
    }

    #[test]
    fn test_classes_pass_through_verbatim() {
        let entries = vec![chapter("One").with_class("custom").with_class("wide")];
        let items = reshape(entries).unwrap();
        match &items[0] {
            ChapterItem::Group { classes, .. } => {
                assert_eq!(classes, &["level1", "custom", "wide"]);
            }
            other => panic!("expected Group, got {other:?}"),
        }
    }

    #[test]
    fn test_spec_example() {
        // [A(chapter, leaf), B(chapter), C(member of B, active)]
        let entries = vec![
            chapter("A").with_class(LEAF_CLASS),
            chapter("B"),
            member("C").with_class(ACTIVE_CLASS),
        ];
        let items = reshape(entries).unwrap();
        assert_eq!(items.len(), 2);

        match &items[0] {
            ChapterItem::Leaf { title_html, .. } => assert!(title_html.contains("A")),
            other => panic!("expected Leaf, got {other:?}"),
        }
        match &items[1] {
            ChapterItem::Group {
                title_html,
                open,
                members,
                ..
            } => {
                assert!(title_html.contains("B"));
                assert!(open);
                assert_eq!(members.len(), 1);
                assert!(members[0].title_html.contains("C"));
            }
            other => panic!("expected Group, got {other:?}"),
        }
    }

    /// Build a well-formed entry list from cluster shapes. Each entry gets a
    /// unique label so order can be checked on the output.
    fn entries_from_shapes(shapes: &[(bool, bool, Vec<bool>)]) -> Vec<NavEntry> {
        let mut entries = Vec::new();
        for (i, (leaf, head_active, member_actives)) in shapes.iter().enumerate() {
            let mut head = chapter(&format!("c{i}."));
            if *leaf {
                head = head.with_class(LEAF_CLASS);
            }
            if *head_active {
                head = head.with_class(ACTIVE_CLASS);
            }
            entries.push(head);

            if !*leaf {
                for (j, active) in member_actives.iter().enumerate() {
                    let mut m = member(&format!("c{i}m{j}."));
                    if *active {
                        m = m.with_class(ACTIVE_CLASS);
                    }
                    entries.push(m);
                }
            }
        }
        entries
    }

    fn arb_shapes() -> impl Strategy<Value = Vec<(bool, bool, Vec<bool>)>> {
        prop::collection::vec(
            (
                any::<bool>(),
                any::<bool>(),
                prop::collection::vec(any::<bool>(), 0..5),
            ),
            0..12,
        )
    }

    proptest! {
        #[test]
        fn prop_item_count_equals_chapter_count(shapes in arb_shapes()) {
            let entries = entries_from_shapes(&shapes);
            let starts = entries.iter().filter(|e| e.is_chapter_start()).count();
            let items = reshape(entries).unwrap();
            prop_assert_eq!(items.len(), starts);
        }

        #[test]
        fn prop_order_is_preserved(shapes in arb_shapes()) {
            let entries = entries_from_shapes(&shapes);
            let items = reshape(entries).unwrap();

            for (i, item) in items.iter().enumerate() {
                match item {
                    ChapterItem::Leaf { title_html, .. } => {
                        let marker = format!("c{i}.");
                        prop_assert!(title_html.contains(&marker));
                    }
                    ChapterItem::Group { title_html, members, .. } => {
                        let marker = format!("c{i}.");
                        prop_assert!(title_html.contains(&marker));
                        for (j, m) in members.iter().enumerate() {
                            let marker = format!("c{i}m{j}.");
                            prop_assert!(m.title_html.contains(&marker));
                        }
                    }
                }
            }
        }

        #[test]
        fn prop_open_iff_cluster_active(shapes in arb_shapes()) {
            let entries = entries_from_shapes(&shapes);
            let items = reshape(entries).unwrap();

            for (item, (leaf, head_active, member_actives)) in items.iter().zip(&shapes) {
                match item {
                    ChapterItem::Leaf { .. } => prop_assert!(leaf),
                    ChapterItem::Group { open, .. } => {
                        let any_active = *head_active || member_actives.iter().any(|a| *a);
                        prop_assert_eq!(*open, any_active);
                    }
                }
            }
        }
    }
}
