use logoslider_core::component::{PropertyField, PropertyPane};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::theme::Theme;

/// Property pane rendered as a popup dropdown
pub struct SourcePickerWidget;

impl SourcePickerWidget {
    pub fn render(frame: &mut Frame, pane: &PropertyPane, cursor: usize, theme: &Theme) {
        let Some(group) = pane.groups.first() else {
            return;
        };
        let Some(PropertyField::Dropdown {
            label,
            options,
            selected,
            ..
        }) = group.fields.first()
        else {
            return;
        };

        let area = frame.area();
        let width = 48u16.min(area.width.saturating_sub(4));
        let height = (options.len().max(1) as u16 + 6).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(width, height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" {} ", pane.header))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Group
                Constraint::Length(1), // Label
                Constraint::Min(1),    // Options
                Constraint::Length(1), // Hint
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new(Span::styled(
                group.name.as_str(),
                Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD),
            )),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(label.as_str(), Style::default().fg(theme.fg0))),
            chunks[1],
        );

        if options.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  No lists available",
                    Style::default().fg(theme.grey1),
                )),
                chunks[2],
            );
        } else {
            let items: Vec<ListItem> = options
                .iter()
                .map(|option| {
                    let marker = if selected.as_deref() == Some(option.key.as_str()) {
                        "● "
                    } else {
                        "  "
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(marker, Style::default().fg(theme.green)),
                        Span::styled(option.text.as_str(), Style::default().fg(theme.fg1)),
                    ]))
                })
                .collect();
            let list = List::new(items).highlight_style(
                Style::default()
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD),
            );
            let mut state = ListState::default().with_selected(Some(cursor));
            frame.render_stateful_widget(list, chunks[2], &mut state);
        }

        frame.render_widget(
            Paragraph::new(Span::styled(
                "j/k:move  Enter:select  Esc:cancel",
                Style::default().fg(theme.grey1),
            ))
            .alignment(Alignment::Center),
            chunks[3],
        );
    }
}

pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
