//! Target section schemas.
//!
//! A schema describes the sections a caller wants to locate, independently
//! of any particular document. It is loaded once, validated eagerly, and
//! shared immutably across concurrent per-document matches.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One node of the expected-section tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetNode {
    /// Canonical section name
    pub name: String,

    /// Alternative names considered equivalent
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Subsections, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TargetNode>,
}

impl TargetNode {
    /// Create a leaf node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Add a child node.
    pub fn with_child(mut self, child: TargetNode) -> Self {
        self.children.push(child);
        self
    }

    /// Whether a heading text matches this node's name or any alias.
    pub fn matches(&self, text: &str) -> bool {
        self.name == text || self.aliases.iter().any(|a| a == text)
    }

    /// Whether this node has no subsections.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn validate(&self, path: &mut Vec<String>) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidSchema(format!(
                "node with empty name under \"{}\"",
                path.join(" / ")
            )));
        }
        path.push(self.name.clone());
        for child in &self.children {
            child.validate(path)?;
        }
        path.pop();
        Ok(())
    }
}

/// A validated forest of target sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetSchema {
    roots: Vec<TargetNode>,
}

impl TargetSchema {
    /// Create a schema from root nodes, validating eagerly.
    ///
    /// Fails with [`Error::InvalidSchema`] if any node's name is empty.
    pub fn new(roots: Vec<TargetNode>) -> Result<Self> {
        let mut path = Vec::new();
        for root in &roots {
            root.validate(&mut path)?;
        }
        Ok(Self { roots })
    }

    /// Parse and validate a schema from a JSON array of nodes.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let roots: Vec<TargetNode> = serde_json::from_str(json)?;
        Self::new(roots)
    }

    /// Load and validate a schema from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The root nodes, in declaration order.
    pub fn roots(&self) -> &[TargetNode] {
        &self.roots
    }

    /// Root-to-leaf node paths, in declaration order.
    pub(crate) fn leaf_paths(&self) -> Vec<Vec<&TargetNode>> {
        let mut paths = Vec::new();
        let mut stack = Vec::new();
        for root in &self.roots {
            collect_leaf_paths(root, &mut stack, &mut paths);
        }
        paths
    }
}

fn collect_leaf_paths<'a>(
    node: &'a TargetNode,
    stack: &mut Vec<&'a TargetNode>,
    paths: &mut Vec<Vec<&'a TargetNode>>,
) {
    stack.push(node);
    if node.is_leaf() {
        paths.push(stack.clone());
    } else {
        for child in &node.children {
            collect_leaf_paths(child, stack, paths);
        }
    }
    stack.pop();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let json = r#"[
            {
                "name": "第三节",
                "aliases": ["第三节 管理层讨论与分析"],
                "children": [
                    {"name": "主营业务"}
                ]
            },
            {"name": "第四节"}
        ]"#;
        let schema = TargetSchema::from_json_str(json).unwrap();
        assert_eq!(schema.roots().len(), 2);
        assert!(schema.roots()[0].matches("第三节 管理层讨论与分析"));
        assert!(schema.roots()[1].is_leaf());
    }

    #[test]
    fn test_empty_name_rejected() {
        let schema = TargetSchema::new(vec![
            TargetNode::new("第一节").with_child(TargetNode::new("  "))
        ]);
        match schema {
            Err(Error::InvalidSchema(msg)) => assert!(msg.contains("第一节")),
            other => panic!("expected InvalidSchema, got {other:?}"),
        }
    }

    #[test]
    fn test_leaf_paths_declaration_order() {
        let schema = TargetSchema::new(vec![
            TargetNode::new("a")
                .with_child(TargetNode::new("b"))
                .with_child(TargetNode::new("c")),
            TargetNode::new("d"),
        ])
        .unwrap();

        let paths: Vec<Vec<&str>> = schema
            .leaf_paths()
            .iter()
            .map(|p| p.iter().map(|n| n.name.as_str()).collect())
            .collect();
        assert_eq!(paths, vec![vec!["a", "b"], vec!["a", "c"], vec!["d"]]);
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "第一节"}}]"#).unwrap();

        let schema = TargetSchema::load(file.path()).unwrap();
        assert_eq!(schema.roots().len(), 1);
    }
}
