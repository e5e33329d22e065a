use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::source_picker::centered_rect;
use crate::theme::Theme;

const BINDINGS: &[(&str, &str)] = &[
    ("h / Left", "previous logo"),
    ("l / Right", "next logo"),
    ("click < >", "slide"),
    ("Enter / o", "open first visible logo link"),
    ("click logo", "open its link"),
    ("s", "choose logo list"),
    ("r", "reload"),
    ("q / Ctrl-c", "quit"),
];

pub struct HelpWidget;

impl HelpWidget {
    pub fn render(frame: &mut Frame, theme: &Theme) {
        let area = frame.area();
        let height = (BINDINGS.len() as u16 + 2).min(area.height);
        let width = 46u16.min(area.width);
        let popup_area = centered_rect(width, height, area);

        frame.render_widget(Clear, popup_area);

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(keys, description)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:<12}", keys),
                        Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*description, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .title(" Help ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent))
                .style(Style::default().bg(theme.bg1)),
        );
        frame.render_widget(paragraph, popup_area);
    }
}
