#![allow(clippy::style)]

//! Role models: which roles exist, how they invert, normalize and reify.

pub mod config;
pub use config::*;
pub mod model;
pub use model::*;
pub mod err;
pub use err::*;
