use penman_model::ModelError;
use penman_syntax::{GraphError, SurfaceError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("top is not a variable: {0}")]
    InvalidTop(String),
    #[error("possibly disconnected graph")]
    Disconnected,
    #[error("incomplete configuration; unplaced triples: {}", .0.join(", "))]
    Incomplete(Vec<String>),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
