use std::path::PathBuf;
use thiserror::Error;

/// A syntax error, positioned at the offending token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}:{line}:{column}: {message}\n    {text}\n    {}^", show_path(.path), pad(.column))]
pub struct DecodeError {
    pub message: String,
    pub path: Option<PathBuf>,
    /// 1-based.
    pub line: usize,
    /// 0-based, in characters.
    pub column: usize,
    /// The source line containing the error.
    pub text: String,
}

fn show_path(path: &Option<PathBuf>) -> String {
    match path {
        | Some(path) => path.display().to_string(),
        | None => "<string>".to_string(),
    }
}

fn pad(column: &usize) -> String {
    " ".repeat(*column)
}

pub type Result<T> = std::result::Result<T, DecodeError>;
