use logoslider_core::source::DataSource;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render<D: DataSource>(frame: &mut Frame, area: Rect, app: &App<D>) {
        let theme = &app.theme;
        let status_text = match &app.status_message {
            Some(msg) => format!(" {}", msg),
            None => Self::summary(app),
        };

        let help_hint = match app.mode {
            Mode::Normal => " q:quit h/l:slide Enter:open s:list r:reload ?:help ",
            Mode::SourcePicker { .. } => " j/k:move Enter:select Esc:cancel ",
            Mode::Help => " any key:close ",
        };
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    /// Phase, list, logical position and the last load outcome
    fn summary<D: DataSource>(app: &App<D>) -> String {
        let mode = match app.mode {
            Mode::Normal => "NORMAL",
            Mode::SourcePicker { .. } => "LIST",
            Mode::Help => "HELP",
        };
        let source = app.slider.selected_source().unwrap_or("no list");
        let total = app.slider.items().len();
        let position = if total == 0 {
            "0/0".to_string()
        } else {
            format!("{}/{}", app.slider.current_index() + 1, total)
        };

        let mut text = format!(" {} | {} | {} | {}", mode, source, app.phase_name(), position);
        if app.is_loading {
            text.push_str(" | loading...");
        } else if let Some(report) = &app.last_report {
            text.push_str(&format!(" | {}", report));
            if let Some(at) = app.last_loaded_at {
                text.push_str(&format!(" @ {}", at.format("%H:%M:%S")));
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::app;
    use logoslider_core::slider::Direction;

    #[tokio::test]
    async fn test_summary_tracks_index_and_report() {
        let mut app = app(Some("Partners"), false);
        assert_eq!(
            StatusBarWidget::summary(&app),
            " NORMAL | Partners | unmounted | 0/0"
        );

        app.reload().await;
        app.slider.slide(Direction::Previous);
        let summary = StatusBarWidget::summary(&app);
        assert!(summary.starts_with(" NORMAL | Partners | mounted | 3/3 | 3 sources, 3 logos @ "));
    }
}
