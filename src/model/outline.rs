//! The inferred outline tree.
//!
//! Nodes live in an arena owned by [`OutlineTree`]; parent and child links
//! are plain indices, so traversal is allocation-free and there is no shared
//! ownership between nodes. Arena order is insertion order, which for a
//! single forward build pass is document order.

use serde::Serialize;

use super::range::{ContentRange, Position};
use crate::signature::TitleSignature;

/// Stable handle to a node in an [`OutlineTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The synthetic root node.
    pub const ROOT: NodeId = NodeId(0);

    /// Arena index of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One confirmed heading in the outline.
#[derive(Debug, Clone, Serialize)]
pub struct OutlineNode {
    /// Heading display text
    pub text: String,

    /// Heading font size in points (infinite for the synthetic root)
    pub size: f32,

    /// Style signature of the heading prefix
    pub signature: TitleSignature,

    /// Depth level; 0 is the root
    pub level: u8,

    /// Parent node, `None` only for the root
    pub parent: Option<NodeId>,

    /// Index of this node among its parent's children
    pub position: usize,

    /// Child nodes in document order
    pub children: Vec<NodeId>,

    /// Page the heading appears on (1-based; 0 for the root)
    pub page: u32,

    /// Top y of the heading's block
    pub heading_top: f32,

    /// Bottom y of the heading's block; the node's content starts here
    pub heading_bottom: f32,
}

impl OutlineNode {
    /// The position where this node's content begins.
    pub fn content_start(&self) -> Position {
        Position::new(self.page, self.heading_bottom)
    }
}

/// An inferred section outline, immutable once the build pass completes.
#[derive(Debug, Clone, Serialize)]
pub struct OutlineTree {
    nodes: Vec<OutlineNode>,
}

impl OutlineTree {
    /// Create a tree holding only the synthetic root.
    ///
    /// The root does not correspond to a real heading: its size is infinite
    /// so every real heading compares smaller, and its signature is the
    /// sentinel that equals nothing.
    pub(crate) fn with_root(label: impl Into<String>) -> Self {
        Self {
            nodes: vec![OutlineNode {
                text: label.into(),
                size: f32::INFINITY,
                signature: TitleSignature::sentinel(),
                level: 0,
                parent: None,
                position: 0,
                children: Vec::new(),
                page: 0,
                heading_top: 0.0,
                heading_bottom: 0.0,
            }],
        }
    }

    /// The root node's id.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> &OutlineNode {
        &self.nodes[id.0]
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds only the synthetic root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Ids of all real nodes (root excluded) in document order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (1..self.nodes.len()).map(NodeId)
    }

    /// Append a child under `parent`; the child's level and position are
    /// derived from the parent.
    pub(crate) fn push_child(
        &mut self,
        parent: NodeId,
        text: String,
        size: f32,
        signature: TitleSignature,
        page: u32,
        heading_top: f32,
        heading_bottom: f32,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent_node = &mut self.nodes[parent.0];
        let level = parent_node.level + 1;
        let position = parent_node.children.len();
        parent_node.children.push(id);
        self.nodes.push(OutlineNode {
            text,
            size,
            signature,
            level,
            parent: Some(parent),
            position,
            children: Vec::new(),
            page,
            heading_top,
            heading_bottom,
        });
        id
    }

    /// The next sibling of a node, if any.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id);
        let parent = self.node(node.parent?);
        parent.children.get(node.position + 1).copied()
    }

    /// Display texts on the path from the root's child down to `id`
    /// (root excluded).
    pub fn path_texts(&self, id: NodeId) -> Vec<&str> {
        let mut texts = Vec::new();
        let mut cur = id;
        while let Some(parent) = self.node(cur).parent {
            texts.push(self.node(cur).text.as_str());
            cur = parent;
        }
        texts.reverse();
        texts
    }

    /// The content range attributed to a node.
    ///
    /// Starts just below the node's heading. Ends at the top of the next
    /// sibling's heading; for a last child, at the top of the parent's next
    /// sibling's heading; when the parent is also a last child, the range is
    /// open-ended.
    pub fn content_range(&self, id: NodeId) -> ContentRange {
        let node = self.node(id);
        let start = node.content_start();

        let boundary = self
            .next_sibling(id)
            .or_else(|| node.parent.and_then(|p| self.next_sibling(p)));

        match boundary {
            Some(next) => {
                let next_node = self.node(next);
                ContentRange::new(start, Position::new(next_node.page, next_node.heading_top))
            }
            None => ContentRange::to_document_end(start),
        }
    }

    /// Indented textual dump, one line per node, for debugging and
    /// snapshot tests.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(NodeId::ROOT, 0, &mut out);
        out
    }

    fn dump_node(&self, id: NodeId, indent: usize, out: &mut String) {
        let node = self.node(id);
        out.push_str(&" ".repeat(indent));
        out.push_str(&format!("[L{}] {}\n", node.level, node.text));
        for &child in &node.children {
            self.dump_node(child, indent + 2, out);
        }
    }
}
