use logoslider_core::slider::{NavButton, SliderPhase, StripEntry};
use logoslider_core::source::DataSource;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::app::App;
use crate::logo::{LogoCache, LogoState};
use crate::surface::TerminalViewport;
use crate::theme::Theme;

const BUTTON_WIDTH: u16 = 3;
const EMPTY_HINT: &str = "No logos to show. Press s to choose a list";

pub struct SliderWidget;

impl SliderWidget {
    /// Rows the widget needs: bordered tiles plus one caption row
    pub fn height(tile_height: u16) -> u16 {
        tile_height + 3
    }

    pub fn render<D: DataSource>(frame: &mut Frame, area: Rect, app: &mut App<D>) {
        let title = match app.slider.selected_source() {
            Some(name) => format!(" {} ", name),
            None => " Logo Slider ".to_string(),
        };
        let App {
            slider,
            config,
            logos,
            theme,
            is_loading,
            ..
        } = app;

        let wrapper_hook = slider
            .engine()
            .viewport()
            .map_or(config.slider.hooks.wrapper.as_str(), |v| v.wrapper_hook());
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(theme.hook_style(wrapper_hook))
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match slider.phase() {
            // Reloaded into a list with no logos: nothing to scroll or click
            SliderPhase::Mounted(_) if !slider.engine().has_strip() => {
                let message = if *is_loading { "Loading logos..." } else { EMPTY_HINT };
                Self::render_message(frame, inner, message, theme);
                return;
            }
            SliderPhase::Mounted(_) => {}
            SliderPhase::Loading => {
                Self::render_message(frame, inner, "Loading logos...", theme);
                return;
            }
            SliderPhase::Unmounted => {
                let message = if *is_loading {
                    "Loading logos..."
                } else {
                    EMPTY_HINT
                };
                Self::render_message(frame, inner, message, theme);
                return;
            }
        }

        let Some(viewport) = slider.engine_mut().viewport_mut() else {
            return;
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(BUTTON_WIDTH),
                Constraint::Min(1),
                Constraint::Length(BUTTON_WIDTH),
            ])
            .split(inner);
        let (prev_area, strip_area, next_area) = (columns[0], columns[1], columns[2]);

        viewport.set_layout(strip_area, prev_area, next_area);

        let buf = frame.buffer_mut();
        Self::render_button(buf, prev_area, viewport.prev_button(), theme);
        Self::render_button(buf, next_area, viewport.next_button(), theme);
        Self::render_strip(buf, strip_area, viewport, logos, theme);
    }

    fn render_message(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
        let y = area.y + area.height.saturating_sub(1) / 2;
        let line_area = Rect::new(area.x, y, area.width, area.height.min(1));
        let paragraph = Paragraph::new(Line::from(message))
            .style(Style::default().fg(theme.grey1))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, line_area);
    }

    fn render_button(buf: &mut Buffer, area: Rect, button: &NavButton, theme: &Theme) {
        let style = theme.hook_style(&button.hook);
        buf.set_style(area, style);
        if area.width == 0 || area.height == 0 {
            return;
        }
        let x = area.x + area.width / 2;
        let y = area.y + area.height.saturating_sub(1) / 2;
        buf.set_string(x, y, button.label, style);
    }

    fn render_strip(
        buf: &mut Buffer,
        area: Rect,
        viewport: &TerminalViewport,
        logos: &LogoCache,
        theme: &Theme,
    ) {
        let base = theme.hook_style(viewport.viewport_hook());
        buf.set_style(area, base);

        let tile_width = viewport.tile_width();
        let tile_height = viewport.tile_height().min(area.height.saturating_sub(1));
        let caption_row = area.y + tile_height;

        for (index, x_offset) in viewport.visible_tiles() {
            let Some(entry) = viewport.entries().get(index) else {
                continue;
            };
            for tx in 0..tile_width {
                let col = x_offset + tx as i32;
                if col < 0 || col >= area.width as i32 {
                    continue;
                }
                let x = area.x + col as u16;
                for ty in 0..tile_height {
                    let (symbol, style) = tile_cell(entry, logos, tx, ty, tile_width, tile_height, theme);
                    if let Some(cell) = buf.cell_mut((x, area.y + ty)) {
                        cell.set_char(symbol).set_style(style);
                    }
                }
            }

            if caption_row < area.y + area.height {
                draw_caption(buf, area, caption_row, x_offset, tile_width, &entry.alt, theme);
            }
        }
    }
}

/// Symbol and style of one cell of a logo tile
fn tile_cell(
    entry: &StripEntry,
    logos: &LogoCache,
    tx: u16,
    ty: u16,
    width: u16,
    height: u16,
    theme: &Theme,
) -> (char, Style) {
    match logos.get(&entry.src) {
        Some(LogoState::Ready(grid)) => match grid.cell(tx, ty) {
            Some(cell) => (cell.symbol, Style::default().fg(cell.fg).bg(cell.bg)),
            None => (' ', Style::default().bg(theme.bg0)),
        },
        Some(LogoState::Loading) => {
            let style = Style::default().fg(theme.grey0).bg(theme.bg1);
            if tx == width / 2 && ty == height / 2 {
                ('…', style)
            } else {
                (' ', style)
            }
        }
        // Broken, or previews disabled: frame with alt text
        Some(LogoState::Broken(_)) | None => {
            let style = Style::default().fg(theme.grey1).bg(theme.bg0);
            (frame_symbol(&entry.alt, tx, ty, width, height), style)
        }
    }
}

fn frame_symbol(alt: &str, tx: u16, ty: u16, width: u16, height: u16) -> char {
    let last_x = width.saturating_sub(1);
    let last_y = height.saturating_sub(1);
    match (tx, ty) {
        (0, 0) => '┌',
        (x, 0) if x == last_x => '┐',
        (0, y) if y == last_y => '└',
        (x, y) if x == last_x && y == last_y => '┘',
        (_, 0) => '─',
        (_, y) if y == last_y => '─',
        (0, _) => '│',
        (x, _) if x == last_x => '│',
        (x, y) if y == height / 2 => {
            // Alt text centred inside the frame, narrow chars only
            let inner = width.saturating_sub(2) as usize;
            let text: Vec<char> = alt
                .chars()
                .filter(|c| c.width() == Some(1))
                .take(inner)
                .collect();
            let start = (inner - text.len()) / 2 + 1;
            (x as usize)
                .checked_sub(start)
                .and_then(|i| text.get(i).copied())
                .unwrap_or(' ')
        }
        _ => ' ',
    }
}

/// Logo title under its tile, clipped to the tile and the strip
fn draw_caption(
    buf: &mut Buffer,
    area: Rect,
    row: u16,
    x_offset: i32,
    tile_width: u16,
    text: &str,
    theme: &Theme,
) {
    let style = Style::default()
        .fg(theme.fg1)
        .bg(theme.bg0)
        .add_modifier(Modifier::ITALIC);
    let mut col = x_offset;
    let end = x_offset + tile_width as i32;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0) as i32;
        if w == 0 {
            continue;
        }
        if col + w > end {
            break;
        }
        if col >= 0 && col + w <= area.width as i32 {
            if let Some(cell) = buf.cell_mut((area.x + col as u16, row)) {
                cell.set_char(ch).set_style(style);
            }
        }
        col += w;
    }
}
