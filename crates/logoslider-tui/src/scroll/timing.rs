use std::time::{Duration, Instant};

/// Animation progress in [0.0, 1.0] since `start`
#[inline]
pub fn progress(start: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let ratio = start.elapsed().as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

#[inline]
pub fn is_complete(start: Instant, duration: Duration) -> bool {
    start.elapsed() >= duration
}

#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Interpolate a column offset, rounding to the nearest cell
#[inline]
pub fn lerp_cells(from: u32, to: u32, t: f64) -> u32 {
    lerp(from as f64, to as f64, t).round() as u32
}

/// Poll interval that renders `fps` frames per second; 0 falls back to ~60fps
pub fn frame_interval(fps: u32) -> Duration {
    if fps == 0 {
        Duration::from_millis(16)
    } else {
        Duration::from_millis((1000 / fps as u64).max(1))
    }
}
