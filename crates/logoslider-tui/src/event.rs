use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use image::DynamicImage;

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    /// Poll interval while a scroll animation runs
    animation_tick: Duration,
}

/// Result of an async logo download
pub enum LogoLoadResult {
    Success { url: String, image: DynamicImage },
    Failure { url: String, error: String },
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64, animation_tick: Duration) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_tick: animation_tick.min(Duration::from_millis(tick_rate_ms)),
        }
    }

    /// Poll for the next event; `animating` shortens the wait to one frame
    pub fn next(&self, animating: bool) -> Result<Option<AppEvent>> {
        let timeout = if animating {
            self.animation_tick
        } else {
            self.tick_rate
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}
