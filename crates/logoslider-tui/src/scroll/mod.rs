//! Horizontal smooth scrolling for the logo viewport
//!
//! - `easing` - pure easing curves
//! - `timing` - progress, interpolation and frame interval helpers
//! - `animation` - the animator the terminal viewport drives every frame
//!
//! ```ignore
//! let mut animator = ScrollAnimator::new(config.ui.scroll.clone());
//! animator.animate_to(24, max_scroll);
//!
//! // every frame
//! let left = animator.update(max_scroll);
//! ```

pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::ScrollAnimator;
pub use logoslider_core::ScrollConfig;
pub use timing::frame_interval;
pub use easing::{EasingType, EasingTypeExt};
