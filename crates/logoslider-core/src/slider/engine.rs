use super::geometry::{plan_slide, wrap_index, Direction, ScrollMove};
use super::surface::{doubled_strip, StripLayout, Surface, Viewport};
use crate::config::{SliderConfig, StyleHooks};
use crate::source::LogoItem;

/// Mount state of the slider
#[derive(Debug)]
pub enum SliderPhase<V> {
    /// Nothing appended to the surface yet
    Unmounted,
    /// Startup fetches in flight; renders are ignored
    Loading,
    /// Viewport built; it lives as long as the engine
    Mounted(V),
}

impl<V> SliderPhase<V> {
    pub fn name(&self) -> &'static str {
        match self {
            SliderPhase::Unmounted => "unmounted",
            SliderPhase::Loading => "loading",
            SliderPhase::Mounted(_) => "mounted",
        }
    }
}

/// Owns the viewport and answers navigation commands
///
/// Scroll position is derived from live viewport geometry only.
/// `current_index` is logical bookkeeping for display and never feeds the
/// offset computation.
pub struct SliderEngine<S: Surface> {
    surface: S,
    hooks: StyleHooks,
    logo_gap: i32,
    items: Vec<LogoItem>,
    current_index: usize,
    phase: SliderPhase<S::Viewport>,
}

impl<S: Surface> SliderEngine<S> {
    pub fn new(surface: S, config: &SliderConfig) -> Self {
        Self {
            surface,
            hooks: config.hooks.clone(),
            logo_gap: config.logo_gap,
            items: Vec::new(),
            current_index: 0,
            phase: SliderPhase::Unmounted,
        }
    }

    pub fn items(&self) -> &[LogoItem] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn phase(&self) -> &SliderPhase<S::Viewport> {
        &self.phase
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self.phase, SliderPhase::Mounted(_))
    }

    /// Mounted with at least one logo to scroll through
    ///
    /// A mounted viewport whose list was reloaded to nothing stays mounted
    /// but has no strip.
    pub fn has_strip(&self) -> bool {
        self.is_mounted() && !self.items.is_empty()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn viewport(&self) -> Option<&S::Viewport> {
        match &self.phase {
            SliderPhase::Mounted(viewport) => Some(viewport),
            _ => None,
        }
    }

    pub fn viewport_mut(&mut self) -> Option<&mut S::Viewport> {
        match &mut self.phase {
            SliderPhase::Mounted(viewport) => Some(viewport),
            _ => None,
        }
    }

    /// Enter `Loading` unless already mounted
    pub fn begin_loading(&mut self) {
        if matches!(self.phase, SliderPhase::Unmounted) {
            self.phase = SliderPhase::Loading;
        }
    }

    /// Leave `Loading` with the loader's current items
    ///
    /// A mounted viewport keeps its identity; when the item set changed its
    /// strip is rebuilt and scrolled back to the start.
    pub fn finish_loading(&mut self, items: &[LogoItem]) {
        if matches!(self.phase, SliderPhase::Loading) {
            self.phase = SliderPhase::Unmounted;
        }

        if self.items.as_slice() == items {
            return;
        }
        self.items = items.to_vec();
        self.current_index = 0;

        if let SliderPhase::Mounted(viewport) = &mut self.phase {
            tracing::debug!("Repopulating mounted strip with {} logos", self.items.len());
            viewport.replace_entries(doubled_strip(&self.items));
            viewport.snap_to(0);
        }
    }

    /// Mount the strip if there is something to show and nothing mounted yet
    ///
    /// Returns `true` only for the call that performed the mount.
    pub fn render(&mut self) -> bool {
        match self.phase {
            SliderPhase::Unmounted if !self.items.is_empty() => {
                let layout = StripLayout::new(&self.items, &self.hooks);
                tracing::debug!(
                    "Mounting slider with {} entries ({} logos)",
                    layout.entries.len(),
                    self.items.len()
                );
                let viewport = self.surface.mount(&layout);
                self.phase = SliderPhase::Mounted(viewport);
                true
            }
            _ => false,
        }
    }

    /// Step width: first rendered image plus the configured gap, 0 before layout
    pub fn logo_width(&self) -> i32 {
        self.viewport()
            .and_then(|viewport| viewport.first_logo_width())
            .map(|width| width + self.logo_gap)
            .unwrap_or(0)
    }

    /// Move one logo in `direction`, wrapping at either end
    ///
    /// Returns the move applied to the viewport, `None` when nothing is
    /// mounted or the strip is empty.
    pub fn slide(&mut self, direction: Direction) -> Option<ScrollMove> {
        if self.items.is_empty() {
            return None;
        }
        self.current_index = wrap_index(self.current_index, direction, self.items.len());

        let logo_width = self.logo_width();
        let SliderPhase::Mounted(viewport) = &mut self.phase else {
            return None;
        };

        let mv = plan_slide(direction, logo_width, viewport.geometry());
        match mv {
            ScrollMove::Snap(left) => viewport.snap_to(left),
            ScrollMove::Smooth(left) => viewport.smooth_scroll_to(left),
        }
        Some(mv)
    }
}
