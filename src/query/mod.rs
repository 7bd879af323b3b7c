//! Read-only queries built on the walker.
//!
//! Each query is a small [`Visitor`](crate::walk::Visitor) plus a function
//! that runs it:
//!
//! - [`list_functions`]: function names of one contract.
//! - [`functions_at_locations`]: qualified names of functions overlapping
//!   source locations.
//! - [`find_contract`]: the first contract with a given name.
//! - [`are_equivalent`]: comment-insensitive comparison of two trees.

pub mod extract;
pub mod functions;
pub mod locations;

pub use extract::find_contract;
pub use functions::list_functions;
pub use locations::functions_at_locations;

use crate::ast::Node;
use crate::compare::compare_asts;
use crate::errors::QueryError;
use crate::prune::COMMENT_KINDS;

/// Whether two trees are syntactically identical once comments are
/// discounted, optionally restricted to contract `target`.
pub fn are_equivalent(a: &Node, b: &Node, target: Option<&str>) -> Result<bool, QueryError> {
    compare_asts(a, b, target, COMMENT_KINDS)
}
