//! Seams between the engine and whatever draws the strip

use super::geometry::{Direction, ScrollGeometry};
use crate::config::StyleHooks;
use crate::source::LogoItem;

/// One rendered image of the strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripEntry {
    pub src: String,
    pub alt: String,
    /// Opened in the current context when the image is activated
    pub href: String,
}

impl From<&LogoItem> for StripEntry {
    fn from(item: &LogoItem) -> Self {
        Self {
            src: item.logo_image_url.clone(),
            alt: item.title.clone(),
            href: item.link_url.clone(),
        }
    }
}

/// Items followed by themselves, so scrolling past the last real logo lands
/// on a copy of the first
pub fn doubled_strip(items: &[LogoItem]) -> Vec<StripEntry> {
    items.iter().chain(items).map(StripEntry::from).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    pub label: &'static str,
    pub direction: Direction,
    pub hook: String,
}

/// Everything a surface needs to build the wrapper, viewport and buttons
#[derive(Debug, Clone)]
pub struct StripLayout {
    pub wrapper_hook: String,
    pub viewport_hook: String,
    pub prev: NavButton,
    pub next: NavButton,
    pub entries: Vec<StripEntry>,
}

impl StripLayout {
    pub fn new(items: &[LogoItem], hooks: &StyleHooks) -> Self {
        Self {
            wrapper_hook: hooks.wrapper.clone(),
            viewport_hook: hooks.viewport.clone(),
            prev: NavButton {
                label: "<",
                direction: Direction::Previous,
                hook: hooks.prev_button.clone(),
            },
            next: NavButton {
                label: ">",
                direction: Direction::Next,
                hook: hooks.next_button.clone(),
            },
            entries: doubled_strip(items),
        }
    }
}

/// Container the slider is appended to
pub trait Surface {
    type Viewport: Viewport;

    /// Append the wrapper, the viewport and both buttons, populated with
    /// `layout.entries`. The engine calls this at most once per component.
    fn mount(&mut self, layout: &StripLayout) -> Self::Viewport;
}

/// Scrollable element holding the strip
pub trait Viewport {
    /// Live scroll geometry; never cached by the engine
    fn geometry(&self) -> ScrollGeometry;

    /// Rendered width of the first image, `None` before anything is laid out
    fn first_logo_width(&self) -> Option<i32>;

    /// Jump to `left` without animation
    fn snap_to(&mut self, left: i32);

    /// Animate to `left`
    fn smooth_scroll_to(&mut self, left: i32);

    /// Swap the rendered entries after a reload
    fn replace_entries(&mut self, entries: Vec<StripEntry>);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str) -> LogoItem {
        LogoItem {
            title: title.to_string(),
            link_url: format!("https://{}.example", title),
            logo_image_url: format!("https://cdn.example/{}.png", title),
        }
    }

    #[test]
    fn test_doubled_strip_order() {
        let items = vec![item("a"), item("b"), item("c")];
        let strip = doubled_strip(&items);

        assert_eq!(strip.len(), 6);
        let alts: Vec<_> = strip.iter().map(|e| e.alt.as_str()).collect();
        assert_eq!(alts, vec!["a", "b", "c", "a", "b", "c"]);
        assert_eq!(strip[4].href, "https://b.example");
        assert_eq!(strip[5].src, "https://cdn.example/c.png");
    }

    #[test]
    fn test_layout_buttons() {
        let layout = StripLayout::new(&[item("a")], &StyleHooks::default());
        assert_eq!(layout.prev.direction, Direction::Previous);
        assert_eq!(layout.prev.hook, "arrowleft");
        assert_eq!(layout.next.direction, Direction::Next);
        assert_eq!(layout.next.label, ">");
        assert_eq!(layout.wrapper_hook, "sliderParentDiv");
    }
}
