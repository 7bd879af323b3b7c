//! Loader for JSON syntax trees in the `solidity-parser-antlr` shape.
//!
//! Objects carrying a string `type` are nodes; `loc` becomes the node span
//! and `range` (byte offsets) is dropped. Arrays become lists and any other
//! object a plain map.

use crate::ast::{Fields, Node, NodeKind, Scalar, Span, Value};
use crate::frontend::errors::FrontendError;

const TYPE_KEY: &str = "type";
const LOC_KEY: &str = "loc";
const RANGE_KEY: &str = "range";

/// Parse a JSON document whose root is a node object.
pub fn parse_json_ast(input: &str) -> Result<Node, FrontendError> {
    let document: serde_json::Value = serde_json::from_str(input)?;
    match convert_value(&document)? {
        Value::Node(root) => Ok(*root),
        other => Err(FrontendError::InvalidAst {
            message: format!("root must be an object with a `type`, found a {}", other.describe()),
        }),
    }
}

fn convert_value(value: &serde_json::Value) -> Result<Value, FrontendError> {
    Ok(match value {
        serde_json::Value::Null => Value::Scalar(Scalar::Null),
        serde_json::Value::Bool(b) => Value::Scalar(Scalar::Bool(*b)),
        serde_json::Value::Number(n) => Value::Scalar(Scalar::Number(n.clone())),
        serde_json::Value::String(s) => Value::Scalar(Scalar::String(s.clone())),
        serde_json::Value::Array(items) => Value::List(
            items
                .iter()
                .map(convert_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        serde_json::Value::Object(object) => match object.get(TYPE_KEY) {
            Some(serde_json::Value::String(kind)) => Value::from(convert_node(kind, object)?),
            Some(other) => {
                return Err(FrontendError::InvalidAst {
                    message: format!("`type` must be a string, found `{other}`"),
                })
            }
            None => Value::Map(convert_fields(object, &[])?),
        },
    })
}

fn convert_fields(
    object: &serde_json::Map<String, serde_json::Value>,
    skip: &[&str],
) -> Result<Fields, FrontendError> {
    object
        .iter()
        .filter(|(key, _)| !skip.contains(&key.as_str()))
        .map(|(key, value)| -> Result<(String, Value), FrontendError> {
            Ok((key.clone(), convert_value(value)?))
        })
        .collect()
}

fn convert_node(
    kind: &str,
    object: &serde_json::Map<String, serde_json::Value>,
) -> Result<Node, FrontendError> {
    let span = match object.get(LOC_KEY) {
        None | Some(serde_json::Value::Null) => None,
        Some(loc) => Some(serde_json::from_value::<Span>(loc.clone()).map_err(|e| {
            FrontendError::InvalidAst {
                message: format!("invalid `loc` on {kind}: {e}"),
            }
        })?),
    };

    Ok(Node {
        kind: NodeKind::from_type_name(kind),
        span,
        fields: convert_fields(object, &[TYPE_KEY, LOC_KEY, RANGE_KEY])?,
    })
}
