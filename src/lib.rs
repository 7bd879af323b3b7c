//! Solq: structural queries over Solidity syntax trees
//!
//! Three queries answer questions about already-parsed source files:
//!
//! - [`list_functions`]: every function defined in a named contract.
//! - [`functions_at_locations`]: the `Contract.function` names whose body
//!   overlaps a set of source locations.
//! - [`are_equivalent`]: whether two files are syntactically identical once
//!   comments and formatting are discounted, optionally restricted to one
//!   contract.
//!
//! # Architecture
//!
//! Every query is a [`Visitor`] driven by one depth-first [`walk`]er. A
//! visitor steers the walk per node with a [`Flow`]: descend, skip the
//! subtree, or stop the whole walk. The walker only borrows the tree;
//! removal ([`prune`]) records paths during a walk and applies them
//! afterwards, deepest and last-in-parent first.
//!
//! Trees come from a front end: Solidity source through tree-sitter, or a
//! JSON syntax tree in the `solidity-parser-antlr` shape.
//!
//! # Example
//!
//! ```no_run
//! use solq::frontend::{parse_source, InputFormat, ParseOptions};
//! use solq::list_functions;
//!
//! let tree = parse_source(
//!     "contract Foo { function bar() public {} function baz() public {} }",
//!     InputFormat::Solidity,
//!     ParseOptions::default(),
//! )?;
//! assert_eq!(
//!     list_functions(&tree, "Foo"),
//!     [Some("bar".to_string()), Some("baz".to_string())]
//! );
//! # Ok::<(), solq::frontend::FrontendError>(())
//! ```

pub mod ast;
pub mod compare;
pub mod config;
pub mod errors;
pub mod frontend;
pub mod pool;
pub mod prune;
pub mod query;
pub mod walk;

// Re-exports
pub use ast::{Location, Node, NodeKind, NodePath, PathSegment, Point, Span, Value};
pub use compare::compare_asts;
pub use config::{ConfigError, SolqConfig};
pub use errors::{InputError, QueryError, StructuralError};
pub use frontend::{FrontendError, InputFormat, ParseOptions, SolidityParser};
pub use prune::{prune, COMMENT_KINDS};
pub use query::{are_equivalent, find_contract, functions_at_locations, list_functions};
pub use walk::{walk, Flow, Visitor, WalkOutcome};
