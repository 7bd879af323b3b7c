//! Depth-first, pre-order tree walker.
//!
//! A [`Visitor`] sees every node through [`Visitor::enter`] and decides how
//! the walk proceeds with a [`Flow`]:
//!
//! - [`Flow::Continue`] descends into all children, then calls
//!   [`Visitor::exit`] for the node.
//! - [`Flow::Skip`] leaves the children unvisited. `exit` is not called.
//! - [`Flow::Stop`] ends the whole walk at once. No further `enter` or `exit`
//!   call is made and [`walk`] returns [`WalkOutcome::Stopped`].
//!
//! Children are visited in field order. Lists are walked element by element
//! with the index appended to the path; plain maps and scalars are not
//! descended. The walker only borrows the tree, so visitors cannot mutate
//! it while it is being walked; see [`crate::prune`] for deletion.

use crate::ast::{Node, NodePath, PathSegment, Value};
use std::ops::ControlFlow;

/// What the walker should do after [`Visitor::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    Skip,
    Stop,
}

/// Whether a walk ran to completion or was stopped by the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    Completed,
    Stopped,
}

impl WalkOutcome {
    pub fn is_stopped(self) -> bool {
        self == WalkOutcome::Stopped
    }
}

/// Callbacks invoked by [`walk`]. Both default to doing nothing.
///
/// Implementations dispatch on `node.kind`; kinds with no arm fall through
/// to plain descent.
pub trait Visitor<'ast> {
    fn enter(&mut self, _node: &'ast Node, _path: &NodePath) -> Flow {
        Flow::Continue
    }

    fn exit(&mut self, _node: &'ast Node, _path: &NodePath) {}
}

/// Walk `root` with `visitor`.
pub fn walk<'ast, V>(root: &'ast Node, visitor: &mut V) -> WalkOutcome
where
    V: Visitor<'ast> + ?Sized,
{
    let mut path = NodePath::root();
    match walk_node(root, visitor, &mut path) {
        ControlFlow::Continue(()) => WalkOutcome::Completed,
        ControlFlow::Break(()) => WalkOutcome::Stopped,
    }
}

fn walk_node<'ast, V>(node: &'ast Node, visitor: &mut V, path: &mut NodePath) -> ControlFlow<()>
where
    V: Visitor<'ast> + ?Sized,
{
    match visitor.enter(node, path) {
        Flow::Stop => return ControlFlow::Break(()),
        Flow::Skip => return ControlFlow::Continue(()),
        Flow::Continue => {}
    }

    for (name, value) in node.fields.iter() {
        path.push(PathSegment::Field(name.to_string()));
        let flow = walk_value(value, visitor, path);
        path.pop();
        flow?;
    }

    visitor.exit(node, path);
    ControlFlow::Continue(())
}

fn walk_value<'ast, V>(value: &'ast Value, visitor: &mut V, path: &mut NodePath) -> ControlFlow<()>
where
    V: Visitor<'ast> + ?Sized,
{
    match value {
        Value::Node(node) => walk_node(node, visitor, path),
        Value::List(items) => {
            for (index, item) in items.iter().enumerate() {
                path.push(PathSegment::Index(index));
                let flow = walk_value(item, visitor, path);
                path.pop();
                flow?;
            }
            ControlFlow::Continue(())
        }
        Value::Map(_) | Value::Scalar(_) => ControlFlow::Continue(()),
    }
}
