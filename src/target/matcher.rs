//! Resolving target schemas against an inferred outline.

use log::debug;

use super::schema::{TargetNode, TargetSchema};
use crate::model::{ContentRange, OutlineTree};

/// The result of looking one target up in an outline.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// The target section was located.
    Found(ContentRange),
    /// No outline node matched the target's path.
    NotFound,
}

impl MatchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, MatchOutcome::Found(_))
    }

    /// The located range, if any.
    pub fn range(&self) -> Option<&ContentRange> {
        match self {
            MatchOutcome::Found(range) => Some(range),
            MatchOutcome::NotFound => None,
        }
    }
}

/// One resolved target: the schema path and what was found there.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetMatch {
    /// Names along the schema path, root to leaf.
    pub path: Vec<String>,
    pub outcome: MatchOutcome,
}

/// Resolve every leaf of `schema` against `tree`.
///
/// Results come back in schema declaration order, one per leaf, whether or
/// not the section was found. A leaf matches the first outline node (in
/// document order) whose depth equals the path length and whose ancestor
/// texts match the path nodes name-or-alias, elementwise.
pub fn resolve(schema: &TargetSchema, tree: &OutlineTree) -> Vec<TargetMatch> {
    schema
        .leaf_paths()
        .into_iter()
        .map(|spath| {
            let path: Vec<String> = spath.iter().map(|n| n.name.clone()).collect();
            let outcome = match find_node(&spath, tree) {
                Some(range) => MatchOutcome::Found(range),
                None => {
                    debug!("target not found: {}", path.join(" / "));
                    MatchOutcome::NotFound
                }
            };
            TargetMatch { path, outcome }
        })
        .collect()
}

fn find_node(spath: &[&TargetNode], tree: &OutlineTree) -> Option<ContentRange> {
    for id in tree.ids() {
        let node = tree.node(id);
        if node.level as usize != spath.len() {
            continue;
        }
        let texts = tree.path_texts(id);
        if texts
            .iter()
            .zip(spath)
            .all(|(text, target)| target.matches(text))
        {
            return Some(tree.content_range(id));
        }
    }
    None
}
