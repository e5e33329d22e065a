//! Looping logo strip: positional arithmetic and mount lifecycle

mod engine;
mod geometry;
mod surface;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::{SliderEngine, SliderPhase};
pub use geometry::{plan_slide, wrap_index, Direction, ScrollGeometry, ScrollMove};
pub use surface::{doubled_strip, NavButton, StripEntry, StripLayout, Surface, Viewport};
