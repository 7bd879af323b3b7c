//! Comment- and formatting-insensitive structural comparison.

use crate::ast::{Node, NodeKind};
use crate::errors::{InputError, QueryError};
use crate::prune::prune;
use crate::query::find_contract;
use tracing::debug;

/// Pick the comparison subject: the whole tree, or the first contract named
/// `target`.
fn extract<'a>(tree: &'a Node, target: Option<&str>) -> Option<&'a Node> {
    match target {
        Some(name) => find_contract(tree, name),
        None => Some(tree),
    }
}

/// Copy the subject and strip `kinds` from the copy.
fn cleaned(subject: Option<&Node>, kinds: &[NodeKind]) -> Result<Option<Node>, QueryError> {
    subject
        .map(|node| -> Result<Node, QueryError> {
            let mut copy = node.clone();
            prune(&mut copy, kinds)?;
            Ok(copy)
        })
        .transpose()
}

/// Compare two trees after removing every node of `kinds` from each.
///
/// With `target`, only the first contract of that name in each tree is
/// compared; a contract present on one side only makes the trees unequal,
/// and one missing on both sides is [`InputError::ContractMissing`].
///
/// Spans never take part in the comparison. The inputs are left untouched.
pub fn compare_asts(
    a: &Node,
    b: &Node,
    target: Option<&str>,
    kinds: &[NodeKind],
) -> Result<bool, QueryError> {
    let left = cleaned(extract(a, target), kinds)?;
    let right = cleaned(extract(b, target), kinds)?;

    let equal = match (left, right) {
        (Some(left), Some(right)) => left == right,
        (None, None) => {
            return Err(InputError::ContractMissing {
                name: target.unwrap_or_default().to_string(),
            }
            .into())
        }
        _ => false,
    };

    debug!(target = target.unwrap_or("<all>"), equal, "compared trees");
    Ok(equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Point, Span};
    use crate::prune::COMMENT_KINDS;

    fn literal(value: &str) -> Node {
        Node::new(NodeKind::Other("NumberLiteral".into())).with_field("number", value)
    }

    fn contract(name: &str, value: &str, comments: bool, line: usize) -> Node {
        let mut body = Vec::new();
        if comments {
            body.push(Node::new(NodeKind::LineComment).with_field("text", "// note"));
        }
        body.push(
            Node::new(NodeKind::FunctionDefinition)
                .with_field("name", "f")
                .with_field("body", literal(value))
                .with_span(Span::lines(line, line + 2)),
        );
        Node::new(NodeKind::ContractDefinition)
            .with_field("name", name)
            .with_field("subNodes", body)
            .with_span(Span::new(Point::new(line, 0), Point::new(line + 4, 0)))
    }

    fn unit(contracts: Vec<Node>) -> Node {
        Node::new(NodeKind::SourceUnit).with_field("children", contracts)
    }

    #[test]
    fn comments_and_positions_do_not_matter() {
        let a = unit(vec![contract("Foo", "1", false, 1)]);
        let b = unit(vec![contract("Foo", "1", true, 9)]);
        assert!(compare_asts(&a, &b, None, COMMENT_KINDS).unwrap());
    }

    #[test]
    fn changed_literal_matters() {
        let a = unit(vec![contract("Foo", "1", false, 1)]);
        let b = unit(vec![contract("Foo", "2", true, 1)]);
        assert!(!compare_asts(&a, &b, None, COMMENT_KINDS).unwrap());
    }

    #[test]
    fn target_restricts_comparison() {
        let a = unit(vec![contract("Foo", "1", false, 1), contract("Bar", "1", false, 6)]);
        let b = unit(vec![contract("Foo", "1", true, 1), contract("Bar", "7", false, 6)]);
        assert!(compare_asts(&a, &b, Some("Foo"), COMMENT_KINDS).unwrap());
        assert!(!compare_asts(&a, &b, Some("Bar"), COMMENT_KINDS).unwrap());
        assert!(!compare_asts(&a, &b, None, COMMENT_KINDS).unwrap());
    }

    #[test]
    fn one_sided_target_is_unequal() {
        let a = unit(vec![contract("Foo", "1", false, 1)]);
        let b = unit(vec![contract("Bar", "1", false, 1)]);
        assert!(!compare_asts(&a, &b, Some("Foo"), COMMENT_KINDS).unwrap());
    }

    #[test]
    fn target_missing_from_both_is_input_error() {
        let a = unit(vec![contract("Foo", "1", false, 1)]);
        let result = compare_asts(&a, &a, Some("Missing"), COMMENT_KINDS);
        assert!(matches!(
            result,
            Err(QueryError::Input(InputError::ContractMissing { name })) if name == "Missing"
        ));
    }

    #[test]
    fn inputs_are_not_mutated() {
        let b = unit(vec![contract("Foo", "1", true, 1)]);
        let before = format!("{b:?}");
        compare_asts(&b, &b, None, COMMENT_KINDS).unwrap();
        assert_eq!(format!("{b:?}"), before);
    }
}
