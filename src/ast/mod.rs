//! Syntax tree model shared by every front end and query.
//!
//! A tree is a rooted, ordered, acyclic structure of [`Node`]s. Each node has
//! a [`NodeKind`], insertion-ordered named [`Fields`] and, when the parser was
//! asked to track locations, a [`Span`]. Paths ([`NodePath`]) address nodes
//! relative to a walk root and are never stored on the nodes themselves.

pub mod location;
pub mod node;
pub mod path;

pub use location::{compare_points, parse_locations, ranges_intersect, Location, Point, Span};
pub use node::{Fields, Node, NodeKind, Scalar, Value};
pub use path::{NodePath, PathSegment};
