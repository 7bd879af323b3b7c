use crate::frontend::FrontendError;
use thiserror::Error;

/// Caller-supplied arguments violate a precondition.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("target contract `{name}` doesn't exist in either source")]
    ContractMissing { name: String },

    #[error("malformed location object: {message}")]
    MalformedLocation { message: String },

    #[error("locations must be a JSON array of location objects")]
    LocationsNotArray,
}

/// An internal invariant about paths or node kinds does not hold.
///
/// These indicate a bug in the tree model or a front end, never bad user input.
#[derive(Error, Debug)]
pub enum StructuralError {
    #[error("the walk root cannot be removed from itself")]
    RootRemoval,

    #[error("path `{path}` does not resolve to a container")]
    MissingContainer { path: String },

    #[error("path `{path}` addresses a {found}, expected a node or list")]
    UnexpectedContainer { path: String, found: &'static str },

    #[error("function definition `{function}` found outside of any contract")]
    FunctionOutsideContract { function: String },
}

/// Any failure of a query, from parsing through to the result.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    Frontend(#[from] FrontendError),
}
