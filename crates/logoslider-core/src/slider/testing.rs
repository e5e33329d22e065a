//! Recording surface for engine and component tests

use super::geometry::ScrollGeometry;
use super::surface::{StripEntry, StripLayout, Surface, Viewport};
use crate::source::LogoItem;

pub(crate) fn items(count: usize) -> Vec<LogoItem> {
    (0..count)
        .map(|i| LogoItem {
            title: format!("logo-{}", i),
            link_url: format!("https://logo-{}.example", i),
            logo_image_url: format!("https://cdn.example/logo-{}.png", i),
        })
        .collect()
}

#[derive(Debug, Default)]
pub(crate) struct FakeSurface {
    pub mounts: usize,
    pub hooks_seen: Vec<String>,
}

impl Surface for FakeSurface {
    type Viewport = FakeViewport;

    fn mount(&mut self, layout: &StripLayout) -> FakeViewport {
        self.mounts += 1;
        self.hooks_seen.extend([
            layout.wrapper_hook.clone(),
            layout.viewport_hook.clone(),
            layout.prev.hook.clone(),
            layout.next.hook.clone(),
        ]);
        FakeViewport {
            entries: layout.entries.clone(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeViewport {
    pub entries: Vec<StripEntry>,
    pub geometry: ScrollGeometry,
    pub logo_width: Option<i32>,
    pub snap_calls: Vec<i32>,
    pub smooth_calls: Vec<i32>,
}

impl Viewport for FakeViewport {
    fn geometry(&self) -> ScrollGeometry {
        self.geometry
    }

    fn first_logo_width(&self) -> Option<i32> {
        self.logo_width
    }

    fn snap_to(&mut self, left: i32) {
        self.snap_calls.push(left);
        self.geometry.scroll_left = left;
    }

    fn smooth_scroll_to(&mut self, left: i32) {
        self.smooth_calls.push(left);
        self.geometry.scroll_left = left;
    }

    fn replace_entries(&mut self, entries: Vec<StripEntry>) {
        self.entries = entries;
    }
}
