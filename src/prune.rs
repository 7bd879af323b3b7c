//! In-place removal of node kinds (comments, by default).
//!
//! Deletion is record-then-apply: one walk collects the path of every
//! matching node, then the paths are applied deepest-first and, under a
//! shared parent list, highest index first. Removing a list element shifts
//! its later siblings, and this order guarantees no unapplied path has
//! been shifted yet.

use crate::ast::{Node, NodeKind, NodePath};
use crate::errors::StructuralError;
use crate::walk::{walk, Flow, Visitor};
use tracing::{debug, trace};

/// Kinds removed before structural comparison.
pub const COMMENT_KINDS: &[NodeKind] = &[
    NodeKind::Comment,
    NodeKind::LineComment,
    NodeKind::BlockComment,
];

struct PathCollector<'k> {
    kinds: &'k [NodeKind],
    paths: Vec<NodePath>,
}

impl<'ast> Visitor<'ast> for PathCollector<'_> {
    fn enter(&mut self, node: &'ast Node, path: &NodePath) -> Flow {
        if self.kinds.contains(&node.kind) {
            trace!(kind = %node.kind, path = %path, "marking node for removal");
            self.paths.push(path.clone());
            return Flow::Skip;
        }
        Flow::Continue
    }
}

/// Paths of every node whose kind is in `kinds`, in pre-order.
///
/// Matching subtrees are not descended, so no returned path is a prefix of
/// another.
pub fn collect_paths(root: &Node, kinds: &[NodeKind]) -> Vec<NodePath> {
    let mut collector = PathCollector {
        kinds,
        paths: Vec::new(),
    };
    walk(root, &mut collector);
    collector.paths
}

/// Remove every node whose kind is in `kinds`, at any depth. Returns how
/// many nodes were removed.
///
/// Running it twice with the same kinds is a no-op the second time.
pub fn prune(root: &mut Node, kinds: &[NodeKind]) -> Result<usize, StructuralError> {
    let mut paths = collect_paths(root, kinds);
    if paths.iter().any(NodePath::is_root) {
        return Err(StructuralError::RootRemoval);
    }

    paths.sort_unstable_by(|a, b| b.cmp(a));
    for path in &paths {
        root.remove_at(path)?;
    }

    debug!(removed = paths.len(), "pruned tree");
    Ok(paths.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{PathSegment, Value};

    fn comment(text: &str) -> Node {
        Node::new(NodeKind::LineComment).with_field("text", text)
    }

    fn stmt(name: &str) -> Node {
        Node::new(NodeKind::Other("ExpressionStatement".into())).with_field("name", name)
    }

    fn commented() -> Node {
        Node::new(NodeKind::SourceUnit).with_field(
            "children",
            vec![
                comment("// header"),
                Node::new(NodeKind::ContractDefinition)
                    .with_field("name", "Foo")
                    .with_field(
                        "subNodes",
                        vec![comment("// a"), stmt("x"), comment("// b"), comment("// c"), stmt("y")],
                    )
                    .with_field("doc", Node::new(NodeKind::BlockComment)),
                comment("// trailer"),
            ],
        )
    }

    fn clean() -> Node {
        Node::new(NodeKind::SourceUnit).with_field(
            "children",
            vec![Node::new(NodeKind::ContractDefinition)
                .with_field("name", "Foo")
                .with_field("subNodes", vec![stmt("x"), stmt("y")])],
        )
    }

    #[test]
    fn collects_paths_in_pre_order() {
        let paths = collect_paths(&commented(), COMMENT_KINDS);
        let rendered: Vec<String> = paths.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            [
                "children.0",
                "children.1.subNodes.0",
                "children.1.subNodes.2",
                "children.1.subNodes.3",
                "children.1.doc",
                "children.2",
            ]
        );
    }

    #[test]
    fn removes_adjacent_and_nested_comments() {
        let mut tree = commented();
        assert_eq!(prune(&mut tree, COMMENT_KINDS).unwrap(), 6);
        assert_eq!(tree, clean());
    }

    #[test]
    fn idempotent_for_same_kinds() {
        let mut tree = commented();
        prune(&mut tree, COMMENT_KINDS).unwrap();
        let once = tree.clone();
        assert_eq!(prune(&mut tree, COMMENT_KINDS).unwrap(), 0);
        assert_eq!(tree, once);
    }

    #[test]
    fn only_listed_kinds_are_removed() {
        let mut tree = commented();
        assert_eq!(prune(&mut tree, &[NodeKind::BlockComment]).unwrap(), 1);
        let contract = tree
            .at(&NodePath::from(vec![
                PathSegment::Field("children".into()),
                PathSegment::Index(1),
            ]))
            .unwrap();
        assert!(contract.field("doc").is_none());
        assert_eq!(
            contract.field("subNodes").and_then(Value::as_list).map(<[Value]>::len),
            Some(5)
        );
    }

    #[test]
    fn matching_root_is_a_structural_error() {
        let mut tree = comment("// only");
        assert!(matches!(
            prune(&mut tree, COMMENT_KINDS),
            Err(StructuralError::RootRemoval)
        ));
    }
}
