use penman_layout::LayoutError;
use penman_model::ModelError;
use penman_surface::DecodeError;
use penman_syntax::{ConstantError, GraphError, SurfaceError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PenmanError {
    #[error("{0}")]
    Decode(#[from] DecodeError),
    #[error("{0}")]
    Graph(#[from] GraphError),
    #[error("{0}")]
    Surface(#[from] SurfaceError),
    #[error("{0}")]
    Constant(#[from] ConstantError),
    #[error("{0}")]
    Model(#[from] ModelError),
    #[error("{0}")]
    Layout(#[from] LayoutError),
    #[error("File not found: `{}`", .0.display())]
    FileNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PenmanError>;
