use crate::ast::location::Span;
use std::fmt;

/// Discriminant of a syntax node.
///
/// Only the kinds the queries and the pruner dispatch on get their own
/// variant; every other grammar construct is carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    SourceUnit,
    ContractDefinition,
    FunctionDefinition,
    Comment,
    LineComment,
    BlockComment,
    Other(String),
}

impl NodeKind {
    /// Map a type name as written in a JSON AST (`"ContractDefinition"`, ...).
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "SourceUnit" => NodeKind::SourceUnit,
            "ContractDefinition" => NodeKind::ContractDefinition,
            "FunctionDefinition" => NodeKind::FunctionDefinition,
            "Comment" => NodeKind::Comment,
            "LineComment" => NodeKind::LineComment,
            "BlockComment" => NodeKind::BlockComment,
            other => NodeKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::SourceUnit => "SourceUnit",
            NodeKind::ContractDefinition => "ContractDefinition",
            NodeKind::FunctionDefinition => "FunctionDefinition",
            NodeKind::Comment => "Comment",
            NodeKind::LineComment => "LineComment",
            NodeKind::BlockComment => "BlockComment",
            NodeKind::Other(name) => name,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(
            self,
            NodeKind::Comment | NodeKind::LineComment | NodeKind::BlockComment
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leaf values stored in node fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

/// The value of a named field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Node(Box<Node>),
    List(Vec<Value>),
    /// A plain keyed object that is not itself a node. Never walked into.
    Map(Fields),
    Scalar(Scalar),
}

impl Value {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Value::Node(_) => "node",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Scalar(_) => "scalar",
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(Box::new(node))
    }
}

impl From<Vec<Node>> for Value {
    fn from(nodes: Vec<Node>) -> Self {
        Value::List(nodes.into_iter().map(Value::from).collect())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(Scalar::String(s))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(Scalar::Bool(b))
    }
}

impl From<Option<&str>> for Value {
    fn from(s: Option<&str>) -> Self {
        match s {
            Some(s) => Value::from(s),
            None => Value::Scalar(Scalar::Null),
        }
    }
}

/// Insertion-ordered named fields.
///
/// Order drives traversal; equality ignores it (same keys, equal values).
#[derive(Debug, Clone, Default)]
pub struct Fields(Vec<(String, Value)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.0.iter_mut().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Set `name`, replacing an existing value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.get_mut(&name) {
            Some(slot) => *slot = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.0.iter().position(|(k, _)| k == name)?;
        Some(self.0.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for Fields {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl FromIterator<(String, Value)> for Fields {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

/// One syntax construct.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Present only when locations were tracked by the parser.
    pub span: Option<Span>,
    pub fields: Fields,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            span: None,
            fields: Fields::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name, value);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// The `name` field, if it holds a string. Constructors have none.
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Drop every span in the subtree.
    pub fn strip_spans(&mut self) {
        self.span = None;
        for (_, value) in self.fields.0.iter_mut() {
            strip_value_spans(value);
        }
    }
}

fn strip_value_spans(value: &mut Value) {
    match value {
        Value::Node(node) => node.strip_spans(),
        Value::List(items) => items.iter_mut().for_each(strip_value_spans),
        Value::Map(fields) => fields.0.iter_mut().for_each(|(_, v)| strip_value_spans(v)),
        Value::Scalar(_) => {}
    }
}

/// Structural equality: kind and fields. Spans never participate.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.fields == other.fields
    }
}
