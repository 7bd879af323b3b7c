use crate::ast::{Node, NodeKind, NodePath};
use crate::walk::{walk, Flow, Visitor};

struct FunctionLister<'n> {
    contract: &'n str,
    depth: usize,
    names: Vec<Option<String>>,
}

impl<'ast> Visitor<'ast> for FunctionLister<'_> {
    fn enter(&mut self, node: &'ast Node, _path: &NodePath) -> Flow {
        match node.kind {
            NodeKind::ContractDefinition => {
                if node.name() == Some(self.contract) {
                    self.depth += 1;
                    Flow::Continue
                } else {
                    Flow::Skip
                }
            }
            NodeKind::FunctionDefinition => {
                if self.depth > 0 {
                    self.names.push(node.name().map(str::to_string));
                }
                Flow::Skip
            }
            _ => Flow::Continue,
        }
    }

    fn exit(&mut self, node: &'ast Node, _path: &NodePath) {
        if node.kind == NodeKind::ContractDefinition {
            self.depth -= 1;
        }
    }
}

/// Names of the functions defined directly in contract `contract`, in
/// pre-order. Constructors and other unnamed functions yield `None`.
///
/// Returns an empty list when no such contract exists.
pub fn list_functions(tree: &Node, contract: &str) -> Vec<Option<String>> {
    let mut lister = FunctionLister {
        contract,
        depth: 0,
        names: Vec::new(),
    };
    walk(tree, &mut lister);
    lister.names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function(name: Option<&str>) -> Node {
        Node::new(NodeKind::FunctionDefinition).with_field("name", name)
    }

    fn contract(name: &str, functions: Vec<Node>) -> Node {
        Node::new(NodeKind::ContractDefinition)
            .with_field("name", name)
            .with_field("subNodes", functions)
    }

    fn tree() -> Node {
        Node::new(NodeKind::SourceUnit).with_field(
            "children",
            vec![
                function(Some("free")),
                contract("Foo", vec![function(None), function(Some("bar")), function(Some("baz"))]),
                contract("Other", vec![function(Some("nope"))]),
            ],
        )
    }

    #[test]
    fn lists_functions_of_target_contract() {
        assert_eq!(
            list_functions(&tree(), "Foo"),
            [None, Some("bar".to_string()), Some("baz".to_string())]
        );
        assert_eq!(list_functions(&tree(), "Other"), [Some("nope".to_string())]);
    }

    #[test]
    fn unknown_contract_yields_empty_list() {
        assert!(list_functions(&tree(), "Missing").is_empty());
    }
}
