//! Scroll arithmetic for the looping strip
//!
//! Everything here is pure: the engine reads live geometry from the viewport,
//! asks [`plan_slide`] what to do, and applies the returned [`ScrollMove`].

/// Direction of a navigation command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// -1 for previous, +1 for next
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Scroll geometry of the viewport at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollGeometry {
    /// Visible width of the viewport
    pub container_width: i32,
    /// Current horizontal scroll offset
    pub scroll_left: i32,
    /// Total scrollable width of the strip
    pub scroll_width: i32,
}

/// How the viewport should reach its next offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMove {
    /// Jump without animation (loop boundary)
    Snap(i32),
    /// Animate with easing
    Smooth(i32),
}

impl ScrollMove {
    pub fn target(self) -> i32 {
        match self {
            ScrollMove::Snap(left) | ScrollMove::Smooth(left) => left,
        }
    }
}

/// Logical index after one step, wrapping in `[0, len)`
///
/// Returns `current` unchanged for an empty strip.
#[inline]
pub fn wrap_index(current: usize, direction: Direction, len: usize) -> usize {
    if len == 0 {
        return current;
    }
    match direction {
        Direction::Next => (current + 1) % len,
        Direction::Previous => (current + len - 1) % len,
    }
}

/// Decide the next scroll offset for a step of `logo_width` in `direction`
///
/// Reaching the end moving forward snaps back to the start; reaching the
/// start moving backward snaps to the last full page. Both jumps are instant
/// so the duplicated half of the strip hides the rewind. Every other step
/// animates.
pub fn plan_slide(direction: Direction, logo_width: i32, geometry: ScrollGeometry) -> ScrollMove {
    let ScrollGeometry {
        container_width,
        scroll_left,
        scroll_width,
    } = geometry;
    let new_position = scroll_left + direction.sign() * logo_width;

    match direction {
        Direction::Next if new_position + container_width >= scroll_width => ScrollMove::Snap(0),
        Direction::Previous if new_position <= 0 => {
            // Offsets below zero are not reachable on a real viewport
            ScrollMove::Snap((scroll_width - container_width).max(0))
        }
        _ => ScrollMove::Smooth(new_position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(container_width: i32, scroll_left: i32, scroll_width: i32) -> ScrollGeometry {
        ScrollGeometry {
            container_width,
            scroll_left,
            scroll_width,
        }
    }

    #[test]
    fn test_forward_past_end_snaps_to_start() {
        let mv = plan_slide(Direction::Next, 100, geometry(300, 750, 1000));
        assert_eq!(mv, ScrollMove::Snap(0));
    }

    #[test]
    fn test_forward_exactly_at_end_snaps() {
        // 600 + 300 == 900: boundary is inclusive
        let mv = plan_slide(Direction::Next, 100, geometry(300, 500, 900));
        assert_eq!(mv, ScrollMove::Snap(0));
    }

    #[test]
    fn test_backward_past_start_snaps_to_end() {
        let mv = plan_slide(Direction::Previous, 100, geometry(300, 50, 1000));
        assert_eq!(mv, ScrollMove::Snap(700));
    }

    #[test]
    fn test_backward_exactly_at_start_snaps() {
        let mv = plan_slide(Direction::Previous, 100, geometry(300, 100, 1000));
        assert_eq!(mv, ScrollMove::Snap(700));
    }

    #[test]
    fn test_interior_steps_animate() {
        let g = geometry(300, 200, 1000);
        assert_eq!(plan_slide(Direction::Next, 100, g), ScrollMove::Smooth(300));
        assert_eq!(plan_slide(Direction::Previous, 100, g), ScrollMove::Smooth(100));
    }

    #[test]
    fn test_zero_logo_width_is_zero_offset() {
        let g = geometry(300, 200, 1000);
        assert_eq!(plan_slide(Direction::Next, 0, g).target(), 200);

        // Nothing rendered at all
        let empty = ScrollGeometry::default();
        assert_eq!(plan_slide(Direction::Next, 0, empty), ScrollMove::Snap(0));
        assert_eq!(plan_slide(Direction::Previous, 0, empty), ScrollMove::Snap(0));
    }

    #[test]
    fn test_backward_snap_clamps_when_strip_is_narrow() {
        let mv = plan_slide(Direction::Previous, 10, geometry(300, 0, 120));
        assert_eq!(mv, ScrollMove::Snap(0));
    }

    #[test]
    fn test_wrap_index_cycles() {
        let mut index = 0;
        let mut seen = Vec::new();
        for _ in 0..3 {
            index = wrap_index(index, Direction::Next, 3);
            seen.push(index);
        }
        assert_eq!(seen, vec![1, 2, 0]);

        assert_eq!(wrap_index(0, Direction::Previous, 3), 2);
        assert_eq!(wrap_index(4, Direction::Next, 0), 4);
    }
}
