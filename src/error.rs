use thiserror::Error;

use crate::element::LookupError;
use crate::parser::ParseError;

/// Errors that can occur while computing the molar mass of a formula.
#[derive(Debug, Error)]
pub enum Error {
    /// The formula is syntactically malformed.
    #[error("invalid formula: {0}")]
    Parse(#[from] ParseError),

    /// The element data source could not be queried.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The formula names symbols the element data source does not know.
    #[error("unknown element symbol(s): {}", .symbols.join(", "))]
    UnknownElements {
        /// Symbols with no element record, in composition order.
        symbols: Vec<String>,
    },
}
