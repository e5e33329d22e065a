use std::time::{Duration, Instant};

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp_cells, progress};
use super::ScrollConfig;

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: u32,
    to: u32,
    duration: Duration,
    easing: EasingType,
}

/// Horizontal scroll position of the logo viewport, in cells
///
/// `animate_to` starts an eased animation from the currently visible offset;
/// `snap_to` jumps and cancels any animation in flight. Call `update()` every
/// frame to advance.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    /// `None` when smooth scrolling is off or has no duration
    duration: Option<Duration>,
    easing: EasingType,
    current: u32,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        let duration = (config.smooth_enabled && config.animation_duration_ms > 0)
            .then(|| Duration::from_millis(config.animation_duration_ms));
        Self {
            animation: None,
            duration,
            easing: config.easing,
            current: 0,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Where the viewport will rest once the animation finishes
    pub fn target(&self) -> u32 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current)
    }

    /// Offset visible right now
    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Jump without animation
    pub fn snap_to(&mut self, offset: u32, max_scroll: u32) {
        self.animation = None;
        self.current = offset.min(max_scroll);
    }

    /// Animate from the visible offset to `target`
    ///
    /// Falls back to a jump when smooth scrolling is disabled.
    pub fn animate_to(&mut self, target: u32, max_scroll: u32) {
        let target = target.min(max_scroll);

        let Some(duration) = self.duration else {
            self.snap_to(target, max_scroll);
            return;
        };

        if self.current == target {
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: Instant::now(),
            from: self.current,
            to: target,
            duration,
            easing: self.easing,
        });
    }

    /// Advance the animation and return the visible offset
    pub fn update(&mut self, max_scroll: u32) -> u32 {
        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, anim.duration) {
                self.current = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                let t = anim.easing.apply(progress(anim.start, anim.duration));
                self.current = lerp_cells(anim.from, anim.to, t).min(max_scroll);
            }
        } else {
            self.current = self.current.min(max_scroll);
        }

        self.current
    }

    pub fn reset(&mut self) {
        self.animation = None;
        self.current = 0;
    }
}
