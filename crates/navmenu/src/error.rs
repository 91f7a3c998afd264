//! Menu error types.

use thiserror::Error;

/// Errors raised while normalizing or rendering a menu.
///
/// Malformed optional fields never produce an error; they fall back to
/// their defaults. Only structural problems with the tree or the options
/// are reported.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("malformed menu tree: nesting exceeds {max_depth} levels")]
    TooDeep { max_depth: usize },

    #[error("invalid menu options: {0}")]
    InvalidOptions(String),
}

/// Result type alias using MenuError.
pub type MenuResult<T> = Result<T, MenuError>;
