//! Terminal implementation of the slider's rendering surface
//!
//! Geometry is measured in terminal cells. Each strip entry occupies a
//! fixed-width tile followed by the configured gap, so the engine's step
//! (first tile width + gap) always lands on a tile boundary.

use logoslider_core::config::AppConfig;
use logoslider_core::slider::{
    Direction, NavButton, ScrollGeometry, StripEntry, StripLayout, Surface, Viewport,
};
use ratatui::layout::Rect;

use crate::scroll::{ScrollAnimator, ScrollConfig};

/// What a mouse click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Button(Direction),
    /// Index into the doubled strip
    Entry(usize),
}

pub struct TerminalSurface {
    tile_width: u16,
    tile_height: u16,
    gap: u16,
    scroll: ScrollConfig,
    mounts: usize,
}

impl TerminalSurface {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            tile_width: config.slider.tile_width.max(1),
            tile_height: config.slider.tile_height.max(1),
            gap: config.slider.logo_gap.clamp(0, u16::MAX as i32) as u16,
            scroll: config.ui.scroll.clone(),
            mounts: 0,
        }
    }

    /// How many times a slider was appended to this surface
    pub fn mounts(&self) -> usize {
        self.mounts
    }
}

impl Surface for TerminalSurface {
    type Viewport = TerminalViewport;

    fn mount(&mut self, layout: &StripLayout) -> TerminalViewport {
        self.mounts += 1;
        tracing::debug!(
            "Appending slider: wrapper={} viewport={} entries={}",
            layout.wrapper_hook,
            layout.viewport_hook,
            layout.entries.len()
        );
        TerminalViewport {
            wrapper_hook: layout.wrapper_hook.clone(),
            viewport_hook: layout.viewport_hook.clone(),
            prev: layout.prev.clone(),
            next: layout.next.clone(),
            entries: layout.entries.clone(),
            tile_width: self.tile_width,
            tile_height: self.tile_height,
            gap: self.gap,
            animator: ScrollAnimator::new(self.scroll.clone()),
            area: Rect::default(),
            prev_area: Rect::default(),
            next_area: Rect::default(),
        }
    }
}

/// Scrollable strip of logo tiles
pub struct TerminalViewport {
    wrapper_hook: String,
    viewport_hook: String,
    prev: NavButton,
    next: NavButton,
    entries: Vec<StripEntry>,
    tile_width: u16,
    tile_height: u16,
    gap: u16,
    animator: ScrollAnimator,
    /// Strip area at the last draw; zero-sized until first drawn
    area: Rect,
    prev_area: Rect,
    next_area: Rect,
}

impl TerminalViewport {
    pub fn wrapper_hook(&self) -> &str {
        &self.wrapper_hook
    }

    pub fn viewport_hook(&self) -> &str {
        &self.viewport_hook
    }

    pub fn prev_button(&self) -> &NavButton {
        &self.prev
    }

    pub fn next_button(&self) -> &NavButton {
        &self.next
    }

    pub fn entries(&self) -> &[StripEntry] {
        &self.entries
    }

    pub fn tile_width(&self) -> u16 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u16 {
        self.tile_height
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Tile width plus gap
    pub fn pitch(&self) -> u16 {
        self.tile_width.saturating_add(self.gap)
    }

    /// Strip width in cells, capped where the engine's geometry stops
    pub fn scroll_width(&self) -> u32 {
        let width = self.entries.len() as u64 * self.pitch() as u64;
        width.min(i32::MAX as u64) as u32
    }

    pub fn max_scroll(&self) -> u32 {
        self.scroll_width().saturating_sub(self.area.width as u32)
    }

    pub fn scroll_left(&self) -> u32 {
        self.animator.current()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Record where the widget drew the strip and the two buttons
    pub fn set_layout(&mut self, area: Rect, prev_area: Rect, next_area: Rect) {
        self.area = area;
        self.prev_area = prev_area;
        self.next_area = next_area;
    }

    /// Advance the scroll animation; returns the visible offset
    pub fn tick(&mut self) -> u32 {
        let max = self.max_scroll();
        self.animator.update(max)
    }

    /// Entries overlapping the visible window, with their x offset relative
    /// to the strip area's left edge (negative when partly scrolled out)
    pub fn visible_tiles(&self) -> Vec<(usize, i32)> {
        let pitch = self.pitch() as i64;
        if pitch == 0 || self.area.width == 0 {
            return Vec::new();
        }
        let left = self.scroll_left() as i64;
        let right = left + self.area.width as i64;

        let first = ((left - self.tile_width as i64).max(0) / pitch) as usize;
        (first..self.entries.len())
            .map(|index| (index, index as i64 * pitch))
            .take_while(|&(_, start)| start < right)
            .filter(|&(_, start)| start + self.tile_width as i64 > left)
            .map(|(index, start)| (index, (start - left) as i32))
            .collect()
    }

    /// First tile whose left edge is inside the window
    pub fn first_visible_entry(&self) -> Option<usize> {
        let pitch = self.pitch() as usize;
        if pitch == 0 {
            return None;
        }
        let index = (self.scroll_left() as usize).div_ceil(pitch);
        (index < self.entries.len()).then_some(index)
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<Hit> {
        let inside = |rect: Rect| {
            column >= rect.x
                && column < rect.x.saturating_add(rect.width)
                && row >= rect.y
                && row < rect.y.saturating_add(rect.height)
        };

        if inside(self.prev_area) {
            return Some(Hit::Button(self.prev.direction));
        }
        if inside(self.next_area) {
            return Some(Hit::Button(self.next.direction));
        }
        if !inside(self.area) {
            return None;
        }

        let offset = self.scroll_left() as usize + (column - self.area.x) as usize;
        let pitch = self.pitch() as usize;
        if pitch == 0 {
            return None;
        }
        let index = offset / pitch;
        let within_tile = offset % pitch < self.tile_width as usize;
        (within_tile && index < self.entries.len()).then_some(Hit::Entry(index))
    }

    fn clamp_offset(left: i32) -> u32 {
        left.max(0) as u32
    }
}

impl Viewport for TerminalViewport {
    fn geometry(&self) -> ScrollGeometry {
        ScrollGeometry {
            container_width: self.area.width as i32,
            scroll_left: self.scroll_left() as i32,
            scroll_width: self.scroll_width() as i32,
        }
    }

    fn first_logo_width(&self) -> Option<i32> {
        (!self.entries.is_empty() && self.area.width > 0).then_some(self.tile_width as i32)
    }

    fn snap_to(&mut self, left: i32) {
        let max = self.max_scroll();
        self.animator.snap_to(Self::clamp_offset(left), max);
    }

    fn smooth_scroll_to(&mut self, left: i32) {
        let max = self.max_scroll();
        self.animator.animate_to(Self::clamp_offset(left), max);
    }

    fn replace_entries(&mut self, entries: Vec<StripEntry>) {
        self.entries = entries;
        self.animator.reset();
    }
}
