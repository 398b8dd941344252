//! # Rendering Module
//!
//! Plain-text views of a run for line-oriented front ends.
//!
//! Nothing here mutates the engine. The map view draws every tile by its
//! symbol and the player as `P` on top of whatever it is standing on.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
