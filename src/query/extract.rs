use crate::ast::{Node, NodeKind, NodePath};
use crate::walk::{walk, Flow, Visitor};

struct ContractFinder<'n, 'ast> {
    name: &'n str,
    found: Option<&'ast Node>,
}

impl<'ast> Visitor<'ast> for ContractFinder<'_, 'ast> {
    fn enter(&mut self, node: &'ast Node, _path: &NodePath) -> Flow {
        match node.kind {
            NodeKind::ContractDefinition if node.name() == Some(self.name) => {
                self.found = Some(node);
                Flow::Stop
            }
            _ => Flow::Continue,
        }
    }
}

/// First contract definition named `name`, in pre-order.
pub fn find_contract<'ast>(tree: &'ast Node, name: &str) -> Option<&'ast Node> {
    let mut finder = ContractFinder { name, found: None };
    walk(tree, &mut finder);
    finder.found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(name: &str, marker: &str) -> Node {
        Node::new(NodeKind::ContractDefinition)
            .with_field("name", name)
            .with_field("marker", marker)
    }

    #[test]
    fn returns_first_match() {
        let tree = Node::new(NodeKind::SourceUnit).with_field(
            "children",
            vec![contract("A", "1"), contract("B", "2"), contract("B", "3")],
        );
        let found = find_contract(&tree, "B").unwrap();
        assert_eq!(found.field("marker").and_then(|v| v.as_str()), Some("2"));
    }

    #[test]
    fn absent_contract() {
        let tree = Node::new(NodeKind::SourceUnit).with_field("children", vec![contract("A", "1")]);
        assert!(find_contract(&tree, "Missing").is_none());
    }
}
