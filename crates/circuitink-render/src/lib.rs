//! CircuitInk Render Library
//!
//! Turns graph snapshots into drawable scenes and defines the renderer
//! abstraction backends implement.

mod renderer;
mod scene;

pub use renderer::{ListingRenderer, Renderer};
pub use scene::{GateVisual, Scene, WireVisual, gate_fill, grid_lines};
