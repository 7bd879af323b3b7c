//! Thread-local parser pooling.
//!
//! Creating a tree-sitter parser and loading the Solidity grammar is done
//! once per thread; later parses on the same thread reuse that instance.

use crate::frontend::{FrontendError, SolidityParser};
use std::cell::RefCell;

thread_local! {
    static SOLIDITY_PARSER: RefCell<Option<SolidityParser>> = const { RefCell::new(None) };
}

/// Execute `f` with the pooled parser for this thread.
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use solq::pool::with_parser;
///
/// let tree = with_parser(|parser| parser.parse("contract A {}"))??;
/// # Ok(())
/// # }
/// ```
pub fn with_parser<F, R>(f: F) -> Result<R, FrontendError>
where
    F: FnOnce(&mut SolidityParser) -> R,
{
    SOLIDITY_PARSER.with(|cell| {
        let mut slot = cell.borrow_mut();
        let parser = match slot.take() {
            Some(parser) => parser,
            None => SolidityParser::new()?,
        };
        Ok(f(slot.insert(parser)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuses_parser_across_calls() {
        let first = with_parser(|parser| parser.parse("contract A {}").is_ok()).unwrap();
        let second = with_parser(|parser| parser.parse("contract B {}").is_ok()).unwrap();
        assert!(first && second);
    }
}
