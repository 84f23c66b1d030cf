use penman_syntax::Triple;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("invalid role pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("invalid model configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),
    #[error("cannot read model {0}: {1}")]
    ConfigNotFound(PathBuf, std::io::Error),
    #[error("cannot invert {0}: the target is missing")]
    NotInvertible(Triple),
    #[error("'{0}' cannot be reified")]
    NotReifiable(String),
    #[error("'{0}' cannot be dereified")]
    NotDereifiable(String),
    #[error("cannot dereify: {0}")]
    InvalidDereification(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
