use crate::ast::{ranges_intersect, Location, Node, NodeKind, NodePath, Span};
use crate::errors::StructuralError;
use crate::walk::{walk, Flow, Visitor};
use tracing::{trace, warn};

/// Placeholder for unnamed functions in a qualified name.
const ANONYMOUS: &str = "null";

struct LocationVisitor<'r> {
    ranges: &'r [Span],
    contract: Option<String>,
    matches: Vec<String>,
    violation: Option<StructuralError>,
}

impl LocationVisitor<'_> {
    fn in_scope(&self, node: &Node) -> bool {
        match &node.span {
            Some(span) => self.ranges.iter().any(|range| ranges_intersect(range, span)),
            None => {
                warn!(kind = %node.kind, "node has no location; treating it as out of scope");
                false
            }
        }
    }
}

impl<'ast> Visitor<'ast> for LocationVisitor<'_> {
    fn enter(&mut self, node: &'ast Node, _path: &NodePath) -> Flow {
        match node.kind {
            NodeKind::ContractDefinition => {
                if self.in_scope(node) {
                    self.contract = Some(node.name().unwrap_or(ANONYMOUS).to_string());
                    Flow::Continue
                } else {
                    Flow::Skip
                }
            }
            NodeKind::FunctionDefinition => {
                let function = node.name().unwrap_or(ANONYMOUS);
                let Some(contract) = &self.contract else {
                    self.violation = Some(StructuralError::FunctionOutsideContract {
                        function: function.to_string(),
                    });
                    return Flow::Stop;
                };
                if self.in_scope(node) {
                    let qualified = format!("{contract}.{function}");
                    trace!(function = %qualified, "function covered by location");
                    self.matches.push(qualified);
                }
                Flow::Skip
            }
            _ => Flow::Continue,
        }
    }

    fn exit(&mut self, node: &'ast Node, _path: &NodePath) {
        if node.kind == NodeKind::ContractDefinition {
            self.contract = None;
        }
    }
}

/// Qualified `Contract.function` names of every function whose span
/// overlaps any of `locations`, in pre-order. Unnamed functions such as
/// constructors are written `Contract.null`.
///
/// Overlap is enough: a location only partially covering a function still
/// selects it. Contracts whose span misses every location are not entered.
///
/// The tree must have been parsed with locations tracked. A function found
/// outside any contract is a [`StructuralError::FunctionOutsideContract`].
pub fn functions_at_locations(
    tree: &Node,
    locations: &[Location],
) -> Result<Vec<String>, StructuralError> {
    let ranges: Vec<Span> = locations.iter().map(Location::to_span).collect();
    let mut visitor = LocationVisitor {
        ranges: &ranges,
        contract: None,
        matches: Vec::new(),
        violation: None,
    };
    walk(tree, &mut visitor);

    match visitor.violation {
        Some(error) => Err(error),
        None => Ok(visitor.matches),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Point;

    fn function(name: Option<&str>, first: usize, last: usize) -> Node {
        Node::new(NodeKind::FunctionDefinition)
            .with_field("name", name)
            .with_span(Span::new(Point::new(first, 4), Point::new(last, 4)))
    }

    fn tree() -> Node {
        Node::new(NodeKind::SourceUnit)
            .with_span(Span::new(Point::new(1, 0), Point::new(30, 0)))
            .with_field(
                "children",
                vec![
                    Node::new(NodeKind::ContractDefinition)
                        .with_field("name", "Foo")
                        .with_span(Span::new(Point::new(1, 0), Point::new(20, 0)))
                        .with_field(
                            "subNodes",
                            vec![
                                function(None, 2, 2),
                                function(Some("early"), 3, 8),
                                function(Some("bar"), 10, 15),
                            ],
                        ),
                    Node::new(NodeKind::ContractDefinition)
                        .with_field("name", "Baz")
                        .with_span(Span::new(Point::new(22, 0), Point::new(30, 0)))
                        .with_field("subNodes", vec![function(Some("qux"), 23, 29)]),
                ],
            )
    }

    #[test]
    fn whole_line_point_selects_constructor() {
        let found = functions_at_locations(&tree(), &[Location::Range(Span::lines(2, 2))]).unwrap();
        assert_eq!(found, ["Foo.null"]);
    }

    #[test]
    fn partial_overlap_is_enough() {
        let found = functions_at_locations(&tree(), &[Location::Range(Span::lines(5, 12))]).unwrap();
        assert_eq!(found, ["Foo.early", "Foo.bar"]);
    }

    #[test]
    fn multiple_locations_across_contracts() {
        let locations = [
            Location::Point(Point::new(12, 0)),
            Location::Point(Point::whole_line(25)),
        ];
        let found = functions_at_locations(&tree(), &locations).unwrap();
        assert_eq!(found, ["Foo.bar", "Baz.qux"]);
    }

    #[test]
    fn location_between_functions_matches_nothing() {
        let found = functions_at_locations(&tree(), &[Location::Point(Point::whole_line(9))]).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn function_outside_contract_is_structural_error() {
        let tree = Node::new(NodeKind::SourceUnit)
            .with_field("children", vec![function(Some("free"), 1, 3)]);
        let result = functions_at_locations(&tree, &[Location::Range(Span::lines(1, 3))]);
        assert!(matches!(
            result,
            Err(StructuralError::FunctionOutsideContract { function }) if function == "free"
        ));
    }
}
