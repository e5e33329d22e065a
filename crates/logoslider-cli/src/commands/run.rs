use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use tokio::sync::mpsc;

use logoslider_core::{source::DataSource, source::SharePointClient, AppConfig};
use logoslider_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler, LogoLoadResult},
    input::{handle_key_event, handle_mouse_event, Action},
    logo::fetch_logo,
    scroll::frame_interval,
    surface::Hit,
    widgets::{HelpWidget, SliderWidget, SourcePickerWidget, StatusBarWidget},
    Theme,
};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(config: AppConfig, config_path: PathBuf) -> Result<()> {
    let client = SharePointClient::new(&config.source).map_err(|e| {
        anyhow!(
            "{}\nSet source.site_url in {} or pass --site <URL>.",
            e,
            config_path.display()
        )
    })?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Logo Slider"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(client, config, Some(config_path), Theme::default());
    let result = run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<D: DataSource>(terminal: &mut Tui, mut app: App<D>) -> Result<()> {
    let event_handler = EventHandler::new(
        app.config.ui.tick_rate_ms,
        frame_interval(app.config.ui.scroll.animation_fps),
    );

    // Channel for async logo downloads
    let (logo_tx, mut logo_rx) = mpsc::unbounded_channel::<LogoLoadResult>();

    reload(terminal, &mut app, None).await?;
    spawn_logo_loads(&mut app, &logo_tx);

    loop {
        while let Ok(result) = logo_rx.try_recv() {
            app.logos.apply(result);
        }

        app.tick();
        terminal.draw(|frame| draw(frame, &mut app))?;

        let action = match event_handler.next(app.is_animating())? {
            Some(AppEvent::Key(key)) => handle_key_event(key, app.mode),
            Some(AppEvent::Mouse(mouse)) => handle_mouse_event(mouse, app.mode),
            Some(AppEvent::Resize(_, _)) | Some(AppEvent::Tick) | None => Action::None,
        };
        handle_action(terminal, &mut app, action).await?;
        spawn_logo_loads(&mut app, &logo_tx);

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

async fn handle_action<D: DataSource>(
    terminal: &mut Tui,
    app: &mut App<D>,
    action: Action,
) -> Result<()> {
    match action {
        Action::Quit => app.should_quit = true,
        Action::Slide(direction) => {
            app.slide(direction);
        }
        Action::OpenFirstVisible => match app.first_visible_link() {
            Some(href) => app.open_link(&href),
            None => app.set_status("No logo in view"),
        },
        Action::Click { column, row } => match app.hit_test(column, row) {
            Some(Hit::Button(direction)) => {
                app.slide(direction);
            }
            Some(Hit::Entry(index)) => {
                if let Some(href) = app.link_at(index) {
                    app.open_link(&href);
                }
            }
            None => {}
        },
        Action::OpenSourcePicker => app.open_source_picker(),
        Action::Reload => {
            app.clear_status();
            reload(terminal, app, None).await?;
        }
        Action::ShowHelp => app.mode = Mode::Help,
        Action::PickerUp => app.move_picker(-1),
        Action::PickerDown => app.move_picker(1),
        Action::PickerConfirm => {
            let choice = app.picker_choice();
            app.mode = Mode::Normal;
            if choice.is_some() && choice.as_deref() != app.slider.selected_source() {
                app.clear_status();
                reload(terminal, app, Some(choice)).await?;
            }
        }
        Action::ExitMode => app.mode = Mode::Normal,
        Action::None => {}
    }
    Ok(())
}

/// Draw a loading frame, then reload the current or a newly selected list
async fn reload<D: DataSource>(
    terminal: &mut Tui,
    app: &mut App<D>,
    selection: Option<Option<String>>,
) -> Result<()> {
    app.is_loading = true;
    terminal.draw(|frame| draw(frame, app))?;

    let report = match selection {
        Some(name) => app.select_source(name).await,
        None => app.reload().await,
    };
    tracing::info!("Reload finished: {}", report.summary());
    Ok(())
}

/// Start downloads for logos not requested yet
fn spawn_logo_loads<D: DataSource>(app: &mut App<D>, tx: &mpsc::UnboundedSender<LogoLoadResult>) {
    for url in app.take_pending_logos() {
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = match fetch_logo(&url).await {
                Ok(image) => LogoLoadResult::Success { url, image },
                Err(error) => LogoLoadResult::Failure { url, error },
            };
            let _ = tx.send(result);
        });
    }
}

fn draw<D: DataSource>(frame: &mut Frame, app: &mut App<D>) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(app.theme.bg0)), area);

    // Slider centred above the status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let content = main_layout[0];
    let height = SliderWidget::height(app.config.slider.tile_height).min(content.height);
    let slider_area = Rect::new(
        content.x,
        content.y + (content.height - height) / 2,
        content.width,
        height,
    );

    SliderWidget::render(frame, slider_area, app);
    StatusBarWidget::render(frame, main_layout[1], app);

    match app.mode {
        Mode::SourcePicker { cursor } => {
            let pane = app.property_pane();
            SourcePickerWidget::render(frame, &pane, cursor, &app.theme);
        }
        Mode::Help => HelpWidget::render(frame, &app.theme),
        Mode::Normal => {}
    }
}
