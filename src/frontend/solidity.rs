use crate::ast::{Fields, Node, NodeKind, Point, Scalar, Span, Value};
use crate::frontend::errors::FrontendError;
use tree_sitter::{Parser, Tree};

/// Tokens whose presence is implied by the tree shape.
const DELIMITERS: &[&str] = &[";", ",", "(", ")", "{", "}", "[", "]"];

/// Tree-sitter parser for Solidity source, producing [`Node`] trees.
///
/// Every node carries a span. Locations use 1-based lines and 0-based
/// columns, and the end column is the last character of the node.
pub struct SolidityParser {
    parser: Parser,
}

impl SolidityParser {
    pub fn new() -> Result<Self, FrontendError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_solidity::LANGUAGE.into())
            .map_err(|_| FrontendError::LanguageSet)?;
        Ok(Self { parser })
    }

    /// Parse into the raw tree-sitter tree.
    pub fn parse_tree(&mut self, source: &str) -> Result<Tree, FrontendError> {
        self.parser
            .parse(source, None)
            .ok_or(FrontendError::ParseFailed)
    }

    /// Parse `source`, rejecting it if the tree contains ERROR or MISSING nodes.
    pub fn parse(&mut self, source: &str) -> Result<Node, FrontendError> {
        let tree = self.parse_tree(source)?;
        let root = tree.root_node();
        check_syntax(root)?;
        Ok(convert(root, source))
    }
}

fn check_syntax(root: tree_sitter::Node<'_>) -> Result<(), FrontendError> {
    if !root.has_error() {
        return Ok(());
    }

    let mut errors = Vec::new();
    collect_error_nodes(root, &mut errors);
    let Some(first) = errors.first() else {
        return Err(FrontendError::ParseFailed);
    };
    let (line, column) = (first.row + 1, first.column);
    match errors.len() {
        1 => Err(FrontendError::SyntaxError { line, column }),
        count => Err(FrontendError::MultipleSyntaxErrors {
            count,
            line,
            column,
        }),
    }
}

fn collect_error_nodes(node: tree_sitter::Node<'_>, errors: &mut Vec<tree_sitter::Point>) {
    if node.is_error() || node.is_missing() {
        errors.push(node.start_position());
        return;
    }
    if !node.has_error() {
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_error_nodes(child, errors);
    }
}

fn node_text<'s>(node: tree_sitter::Node<'_>, source: &'s str) -> &'s str {
    &source[node.byte_range()]
}

fn span_of(node: tree_sitter::Node<'_>) -> Span {
    let start = node.start_position();
    let end = node.end_position();
    let non_empty = (end.row, end.column) > (start.row, start.column);
    let end_column = if non_empty && end.column > 0 {
        end.column - 1
    } else {
        end.column
    };
    Span::new(
        Point::new(start.row + 1, start.column),
        Point::new(end.row + 1, end_column),
    )
}

fn map_kind(node: tree_sitter::Node<'_>, source: &str) -> NodeKind {
    match node.kind() {
        "source_file" => NodeKind::SourceUnit,
        "contract_declaration" | "interface_declaration" | "library_declaration" => {
            NodeKind::ContractDefinition
        }
        "function_definition" | "constructor_definition" | "fallback_receive_definition" => {
            NodeKind::FunctionDefinition
        }
        "comment" if node_text(node, source).starts_with("/*") => NodeKind::BlockComment,
        "comment" => NodeKind::LineComment,
        other => NodeKind::Other(other.to_string()),
    }
}

/// Value stored under a field. `name` fields and bare tokens become strings.
fn field_value(child: tree_sitter::Node<'_>, field: &str, source: &str) -> Value {
    if child.child_count() == 0 && (field == "name" || !child.is_named()) {
        Value::from(node_text(child, source))
    } else {
        Value::from(convert(child, source))
    }
}

/// A field seen more than once becomes a list of its values.
fn insert_field(fields: &mut Fields, name: &str, value: Value) {
    match fields.get_mut(name) {
        None => fields.insert(name, value),
        Some(Value::List(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::replace(existing, Value::List(Vec::new()));
            *existing = Value::List(vec![first, value]);
        }
    }
}

fn convert(node: tree_sitter::Node<'_>, source: &str) -> Node {
    let mut out = Node::new(map_kind(node, source)).with_span(span_of(node));

    if node.child_count() == 0 {
        out.fields.insert("text", node_text(node, source));
        return out;
    }

    let mut children = Vec::new();
    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            match cursor.field_name() {
                Some(field) => insert_field(&mut out.fields, field, field_value(child, field, source)),
                None if child.is_named() => children.push(Value::from(convert(child, source))),
                None if !DELIMITERS.contains(&child.kind()) => {
                    children.push(Value::from(node_text(child, source)))
                }
                None => {}
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
    out.fields.insert("children", Value::List(children));

    match node.kind() {
        "contract_declaration" => out.fields.insert("kind", "contract"),
        "interface_declaration" => out.fields.insert("kind", "interface"),
        "library_declaration" => out.fields.insert("kind", "library"),
        "constructor_definition" => {
            out.fields.insert("name", Value::Scalar(Scalar::Null));
            out.fields.insert("isConstructor", true);
        }
        "function_definition" | "fallback_receive_definition" if out.name().is_none() => {
            out.fields.insert("name", Value::Scalar(Scalar::Null));
        }
        _ => {}
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodePath;
    use crate::prune::collect_paths;

    const SOURCE: &str = r#"pragma solidity ^0.8.0;

contract Foo {
    // counter
    uint256 public count = 1;

    constructor() {}

    function bar() public {
        count += 1;
    }
}
"#;

    fn parse(source: &str) -> Node {
        SolidityParser::new().unwrap().parse(source).unwrap()
    }

    #[test]
    fn maps_core_kinds() {
        let root = parse(SOURCE);
        assert_eq!(root.kind, NodeKind::SourceUnit);

        let contract = crate::query::find_contract(&root, "Foo").unwrap();
        assert_eq!(contract.field("kind").and_then(Value::as_str), Some("contract"));
        assert_eq!(
            crate::query::list_functions(&root, "Foo"),
            [None, Some("bar".to_string())]
        );
    }

    #[test]
    fn spans_are_one_based_and_inclusive() {
        let root = parse("contract A {}\n");
        let contract = crate::query::find_contract(&root, "A").unwrap();
        let span = contract.span.unwrap();
        assert_eq!(span.start, Point::new(1, 0));
        assert_eq!(span.end, Point::new(1, 12));
    }

    #[test]
    fn comments_become_comment_nodes() {
        let root = parse("/* head */\ncontract A {\n    // inner\n}\n");
        let kinds: Vec<NodeKind> = collect_paths(&root, crate::prune::COMMENT_KINDS)
            .iter()
            .filter_map(|p: &NodePath| root.at(p))
            .map(|n| n.kind.clone())
            .collect();
        assert_eq!(kinds, [NodeKind::BlockComment, NodeKind::LineComment]);
    }

    #[test]
    fn rejects_malformed_source() {
        let result = SolidityParser::new().unwrap().parse("contract A { function ( }");
        assert!(matches!(
            result,
            Err(FrontendError::SyntaxError { .. } | FrontendError::MultipleSyntaxErrors { .. })
        ));
    }

    #[test]
    fn repeated_fields_collect_into_lists() {
        let mut fields = Fields::new();
        insert_field(&mut fields, "x", Value::from("a"));
        insert_field(&mut fields, "x", Value::from("b"));
        insert_field(&mut fields, "x", Value::from("c"));
        assert_eq!(fields.get("x").and_then(Value::as_list).map(<[Value]>::len), Some(3));
    }
}
