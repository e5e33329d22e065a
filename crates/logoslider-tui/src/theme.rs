use ratatui::style::{Color, Modifier, Style};

/// Colors used by the slider widgets (Gruvbox dark)
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,
    pub yellow: Color,
    pub green: Color,
    pub accent: Color,
    pub selection: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            yellow: Color::Rgb(0xd8, 0xa6, 0x57),
            green: Color::Rgb(0xa9, 0xb6, 0x65),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            selection: Color::Rgb(0x45, 0x40, 0x3d),
        }
    }
}

impl Theme {
    /// Style for a slider style hook
    ///
    /// Known hook names get their dedicated look; anything else falls back
    /// to plain text on the base background.
    pub fn hook_style(&self, hook: &str) -> Style {
        match hook {
            "sliderParentDiv" => Style::default().fg(self.grey0).bg(self.bg0),
            "clientSlider" => Style::default().fg(self.fg0).bg(self.bg0),
            "arrowleft" | "arrowright" => Style::default()
                .fg(self.accent)
                .bg(self.bg1)
                .add_modifier(Modifier::BOLD),
            _ => Style::default().fg(self.fg0).bg(self.bg0),
        }
    }

    /// RGB of the base background, used to flatten transparent logo pixels
    pub fn backdrop_rgb(&self) -> [u8; 3] {
        match self.bg0 {
            Color::Rgb(r, g, b) => [r, g, b],
            _ => [0, 0, 0],
        }
    }
}
