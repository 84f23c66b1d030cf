use thiserror::Error;

/// A graph was given an inconsistent top.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("top `{0}` is not a source of any triple in the graph")]
    InvalidTop(String),
}

/// Malformed alignment text such as `~e.x`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("invalid alignment: {0:?}")]
    InvalidAlignment(String),
}

/// A raw literal that cannot be a PENMAN constant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstantError {
    #[error("unterminated string constant: {0}")]
    UnterminatedString(String),
    #[error("empty constant")]
    Empty,
}
