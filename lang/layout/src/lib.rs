#![allow(clippy::style)]

//! Moving between trees and graphs, and rewriting graphs with a role model.

pub mod layout {
    /// Tree to graph, recording the nesting as epigraph markers.
    pub mod interpret;
    pub use interpret::*;
    /// Graph to tree, following the markers where they make sense.
    pub mod configure;
    pub use configure::*;
    /// Which node context each triple was written in.
    pub mod context;
    pub use context::*;
    /// Branch and triple reordering.
    pub mod rearrange;
    pub use rearrange::*;
}
pub use layout::*;

pub mod transform;
pub use transform::*;

pub mod err;
pub use err::*;
