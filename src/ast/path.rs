//! Child-selector paths and path-addressed removal.

use crate::ast::node::{Node, Value};
use crate::errors::StructuralError;
use std::cmp::Ordering;
use std::fmt;

/// One step from a container to a child: a field name or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl Ord for PathSegment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (PathSegment::Index(a), PathSegment::Index(b)) => a.cmp(b),
            (PathSegment::Field(a), PathSegment::Field(b)) => a.cmp(b),
            (PathSegment::Field(_), PathSegment::Index(_)) => Ordering::Less,
            (PathSegment::Index(_), PathSegment::Field(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for PathSegment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Location of a node relative to the walk root.
///
/// Paths are recomputed on every walk. Ordering is lexicographic with
/// numeric indices, so a descending sort puts deeper paths before their
/// prefixes and later siblings before earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<PathSegment>);

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }

    pub fn child(&self, segment: PathSegment) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }
}

impl From<Vec<PathSegment>> for NodePath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

enum Container<'a> {
    Node(&'a mut Node),
    List(&'a mut Vec<Value>),
}

fn descend<'a>(value: &'a mut Value, path: &NodePath) -> Result<Container<'a>, StructuralError> {
    match value {
        Value::Node(node) => Ok(Container::Node(node)),
        Value::List(items) => Ok(Container::List(items)),
        other => Err(StructuralError::UnexpectedContainer {
            path: path.to_string(),
            found: other.describe(),
        }),
    }
}

impl Node {
    /// Resolve `path` to the node it addresses.
    pub fn at(&self, path: &NodePath) -> Option<&Node> {
        let mut segments = path.segments().iter();
        let mut current = match segments.next() {
            None => return Some(self),
            Some(PathSegment::Field(name)) => self.fields.get(name)?,
            Some(PathSegment::Index(_)) => return None,
        };
        for segment in segments {
            current = match (current, segment) {
                (Value::Node(node), PathSegment::Field(name)) => node.fields.get(name)?,
                (Value::List(items), PathSegment::Index(i)) => items.get(*i)?,
                _ => return None,
            };
        }
        current.as_node()
    }

    /// Remove the entity addressed by `path` and return it.
    ///
    /// A field segment at the end removes the whole field; an index removes
    /// the list element, shifting later siblings down.
    pub fn remove_at(&mut self, path: &NodePath) -> Result<Value, StructuralError> {
        let (last, parents) = path
            .segments()
            .split_last()
            .ok_or(StructuralError::RootRemoval)?;

        let mut container = Container::Node(self);
        let mut walked = NodePath::root();
        for segment in parents {
            walked.push(segment.clone());
            let next = match (container, segment) {
                (Container::Node(node), PathSegment::Field(name)) => node.fields.get_mut(name),
                (Container::List(items), PathSegment::Index(i)) => items.get_mut(*i),
                _ => None,
            };
            let value = next.ok_or_else(|| StructuralError::MissingContainer {
                path: walked.to_string(),
            })?;
            container = descend(value, &walked)?;
        }

        let removed = match (container, last) {
            (Container::Node(node), PathSegment::Field(name)) => node.fields.remove(name),
            (Container::List(items), PathSegment::Index(i)) if *i < items.len() => {
                Some(items.remove(*i))
            }
            _ => None,
        };
        removed.ok_or_else(|| StructuralError::MissingContainer {
            path: path.to_string(),
        })
    }
}
