//! Incremental outline tree construction.
//!
//! Candidates arrive one at a time in strict document order. The only
//! context for placing each one is the most recently inserted node (the
//! cursor): strictly descending or same-level headings attach without any
//! ancestor bookkeeping, and the ancestor chain is walked only when the
//! font size grows, which signals a return to a shallower level.

use log::debug;

use super::options::OutlineOptions;
use super::select::HeadingCandidate;
use crate::model::{NodeId, OutlineTree};

/// Builds an [`OutlineTree`] from a stream of heading candidates.
///
/// Candidates that cannot be placed consistently are silently dropped; that
/// is expected heuristic behavior, not an error.
#[derive(Debug)]
pub struct OutlineTreeBuilder {
    tree: OutlineTree,
    cursor: NodeId,
    max_depth: u8,
}

impl OutlineTreeBuilder {
    /// Create a builder whose synthetic root carries `label`.
    pub fn new(label: impl Into<String>, max_depth: u8) -> Self {
        let tree = OutlineTree::with_root(label);
        Self {
            tree,
            cursor: NodeId::ROOT,
            max_depth,
        }
    }

    /// Create a builder configured from options.
    pub fn with_options(label: impl Into<String>, options: &OutlineOptions) -> Self {
        Self::new(label, options.max_depth)
    }

    /// Place one candidate, mutating the tree and cursor.
    ///
    /// Must be called in document order; each decision depends only on the
    /// cursor left by the previous call.
    pub fn add(&mut self, candidate: HeadingCandidate) {
        let last = self.tree.node(self.cursor);

        if candidate.signature.is_empty() {
            if !candidate.centered {
                // No style feature and not centered: body text that slipped
                // through the size filter.
                debug!("drop uncentered plain candidate: {}", candidate.text);
                return;
            }
            if last.signature.is_empty() {
                self.insert_sibling_of(self.cursor, candidate);
            } else {
                self.insert_child_of(self.cursor, candidate);
            }
            return;
        }

        if candidate.size < last.size {
            // Smaller type: one level deeper.
            self.insert_child_of(self.cursor, candidate);
            return;
        }
        if candidate.signature == last.signature {
            // Same style: same level.
            self.insert_sibling_of(self.cursor, candidate);
            return;
        }
        if candidate.size == last.size {
            let Some(parent_id) = last.parent else {
                debug!("drop candidate at root level: {}", candidate.text);
                return;
            };
            let parent = self.tree.node(parent_id);
            if candidate.size == parent.size || candidate.signature == parent.signature {
                // A same-size restart at the shallower level.
                self.insert_sibling_of(parent_id, candidate);
            } else {
                self.insert_child_of(self.cursor, candidate);
            }
            return;
        }

        // Larger type: walk up until an ancestor is big enough or shares
        // the candidate's style.
        let mut cur = last.parent;
        while let Some(id) = cur {
            let node = self.tree.node(id);
            if candidate.size > node.size && candidate.signature != node.signature {
                cur = node.parent;
            } else {
                break;
            }
        }
        let Some(found) = cur else {
            debug!("drop candidate, no consistent level: {}", candidate.text);
            return;
        };
        let node = self.tree.node(found);
        if candidate.signature == node.signature {
            self.insert_sibling_of(found, candidate);
        } else if candidate.size <= node.size {
            self.insert_child_of(found, candidate);
        } else {
            debug!("drop candidate, no consistent level: {}", candidate.text);
        }
    }

    /// Finish the pass and return the completed tree.
    pub fn finish(self) -> OutlineTree {
        self.tree
    }

    fn insert_sibling_of(&mut self, id: NodeId, candidate: HeadingCandidate) {
        match self.tree.node(id).parent {
            Some(parent) => self.attach(parent, candidate),
            None => debug!("drop candidate, sibling of root: {}", candidate.text),
        }
    }

    fn insert_child_of(&mut self, id: NodeId, candidate: HeadingCandidate) {
        self.attach(id, candidate);
    }

    fn attach(&mut self, parent: NodeId, candidate: HeadingCandidate) {
        let level = self.tree.node(parent).level + 1;
        if level > self.max_depth {
            debug!("drop candidate beyond max depth: {}", candidate.text);
            return;
        }
        self.cursor = self.tree.push_child(
            parent,
            candidate.text,
            candidate.size,
            candidate.signature,
            candidate.page,
            candidate.top,
            candidate.bottom,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{classify, TitleSignature};

    fn candidate(size: f32, text: &str, centered: bool, page: u32) -> HeadingCandidate {
        HeadingCandidate {
            size,
            text: text.to_string(),
            signature: classify(text).unwrap(),
            centered,
            page,
            top: 80.0,
            bottom: 100.0,
        }
    }

    fn assert_levels_consistent(tree: &OutlineTree) {
        for id in tree.ids() {
            let node = tree.node(id);
            let parent = tree.node(node.parent.unwrap());
            assert_eq!(node.level, parent.level + 1);
        }
    }

    #[test]
    fn test_equal_signature_siblings() {
        // Scenario: two "第X节" headings at the same size become siblings
        // at level 1.
        let mut builder = OutlineTreeBuilder::new("Report", 3);
        builder.add(candidate(16.0, "第一节 重要提示", true, 2));
        builder.add(candidate(16.0, "第二节 公司简介", true, 3));
        let tree = builder.finish();

        let root = tree.node(tree.root());
        assert_eq!(root.children.len(), 2);
        for &id in &root.children {
            assert_eq!(tree.node(id).level, 1);
        }
        assert_levels_consistent(&tree);
    }

    #[test]
    fn test_smaller_size_descends() {
        let mut builder = OutlineTreeBuilder::new("Report", 3);
        builder.add(candidate(16.0, "第一节 重要提示", true, 2));
        builder.add(candidate(12.0, "（一）主营业务", false, 2));
        let tree = builder.finish();

        let root = tree.node(tree.root());
        assert_eq!(root.children.len(), 1);
        let section = tree.node(root.children[0]);
        assert_eq!(section.children.len(), 1);
        let sub = tree.node(section.children[0]);
        assert_eq!(sub.level, 2);
        assert_eq!(sub.text, "（一）主营业务");
        assert_levels_consistent(&tree);
    }

    #[test]
    fn test_uncentered_plain_dropped() {
        let mut builder = OutlineTreeBuilder::new("Report", 3);
        builder.add(candidate(16.0, "第一节 重要提示", true, 2));
        builder.add(candidate(12.0, "普通正文内容", false, 2));
        let tree = builder.finish();
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_centered_plain_nests_under_styled() {
        let mut builder = OutlineTreeBuilder::new("Report", 3);
        builder.add(candidate(16.0, "第一节 重要提示", true, 2));
        builder.add(candidate(14.0, "经营情况讨论", true, 2));
        builder.add(candidate(14.0, "未来展望", true, 2));
        let tree = builder.finish();

        // First plain heading descends; second is its sibling.
        let section = tree.node(tree.node(tree.root()).children[0]);
        assert_eq!(section.children.len(), 2);
        assert_levels_consistent(&tree);
    }

    #[test]
    fn test_larger_size_ascends_to_matching_ancestor() {
        let mut builder = OutlineTreeBuilder::new("Report", 3);
        builder.add(candidate(16.0, "第一节 重要提示", true, 2));
        builder.add(candidate(12.0, "（一）主营业务", false, 2));
        builder.add(candidate(10.5, "1、概述", false, 2));
        // Back to a "第X节" heading: larger than the cursor, same signature
        // as the level-1 ancestor.
        builder.add(candidate(16.0, "第二节 公司简介", true, 3));
        let tree = builder.finish();

        let root = tree.node(tree.root());
        assert_eq!(root.children.len(), 2);
        assert_eq!(tree.node(root.children[1]).text, "第二节 公司简介");
        assert_eq!(tree.node(root.children[1]).level, 1);
        assert_levels_consistent(&tree);
    }

    #[test]
    fn test_same_size_restart_at_parent_level() {
        let mut builder = OutlineTreeBuilder::new("Report", 3);
        builder.add(candidate(16.0, "第一节 重要提示", true, 2));
        builder.add(candidate(12.0, "一、概述", false, 2));
        // Same size as the cursor, different signature from both cursor and
        // its parent: treated as one level deeper.
        builder.add(candidate(12.0, "（一）细分", false, 2));
        let tree = builder.finish();

        let section = tree.node(tree.node(tree.root()).children[0]);
        let sub = tree.node(section.children[0]);
        assert_eq!(sub.children.len(), 1);
        assert_eq!(tree.node(sub.children[0]).level, 3);
        assert_levels_consistent(&tree);
    }

    #[test]
    fn test_same_size_same_parent_signature_ascends() {
        let mut builder = OutlineTreeBuilder::new("Report", 3);
        builder.add(candidate(16.0, "第一节 重要提示", true, 2));
        builder.add(candidate(12.0, "一、概述", false, 2));
        builder.add(candidate(12.0, "（一）细分", false, 2));
        // Same size as cursor, same signature as cursor's parent ("一、"):
        // restart at the parent's level.
        builder.add(candidate(12.0, "二、治理", false, 2));
        let tree = builder.finish();

        let section = tree.node(tree.node(tree.root()).children[0]);
        assert_eq!(section.children.len(), 2);
        assert_eq!(tree.node(section.children[1]).text, "二、治理");
        assert_levels_consistent(&tree);
    }

    #[test]
    fn test_max_depth_drops() {
        let mut builder = OutlineTreeBuilder::new("Report", 2);
        builder.add(candidate(16.0, "第一节 重要提示", true, 2));
        builder.add(candidate(14.0, "一、概述", false, 2));
        // Level 3 exceeds max depth 2: dropped, cursor unchanged.
        builder.add(candidate(12.0, "（一）细分", false, 2));
        builder.add(candidate(14.0, "二、治理", false, 2));
        let tree = builder.finish();

        assert_eq!(tree.len(), 4); // root + three kept nodes
        for id in tree.ids() {
            assert!(tree.node(id).level <= 2);
        }
        assert_levels_consistent(&tree);
    }

    #[test]
    fn test_larger_unmatched_candidate_restarts_under_root() {
        let mut builder = OutlineTreeBuilder::new("Report", 3);
        builder.add(candidate(12.0, "一、概述", false, 2));
        // Larger than the cursor with a signature matching no ancestor: the
        // walk stops at the infinite-size root and attaches there.
        builder.add(candidate(16.0, "（一）另一种", false, 2));
        let tree = builder.finish();

        let root = tree.node(tree.root());
        assert_eq!(root.children.len(), 2);
        assert_eq!(tree.node(root.children[1]).level, 1);
    }

    #[test]
    fn test_first_candidate_attaches_under_root() {
        // The root's sentinel signature never equals a candidate's, so even
        // a centered featureless first heading descends below root.
        let mut builder = OutlineTreeBuilder::new("Report", 3);
        let mut plain = candidate(16.0, "公司年度报告", true, 2);
        plain.signature = TitleSignature::EMPTY;
        builder.add(plain);
        let tree = builder.finish();

        assert_eq!(tree.node(tree.root()).children.len(), 1);
        assert_levels_consistent(&tree);
    }
}
