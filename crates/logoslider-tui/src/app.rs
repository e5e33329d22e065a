use std::path::PathBuf;

use chrono::{DateTime, Local};
use logoslider_core::component::PropertyPane;
use logoslider_core::loader::LoadReport;
use logoslider_core::slider::{Direction, ScrollMove};
use logoslider_core::source::DataSource;
use logoslider_core::{AppConfig, LogoSlider};

use crate::logo::LogoCache;
use crate::surface::{Hit, TerminalSurface, TerminalViewport};
use crate::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Source dropdown open, `cursor` indexes its options
    SourcePicker { cursor: usize },
    Help,
}

/// Terminal host state around one logo slider
pub struct App<D: DataSource> {
    pub slider: LogoSlider<D, TerminalSurface>,
    pub config: AppConfig,
    /// Where a changed list selection is persisted; `None` keeps it in memory
    pub config_path: Option<PathBuf>,
    pub logos: LogoCache,
    pub theme: Theme,
    pub mode: Mode,
    pub status_message: Option<String>,
    pub last_report: Option<String>,
    pub last_loaded_at: Option<DateTime<Local>>,
    pub is_loading: bool,
    pub should_quit: bool,
}

impl<D: DataSource> App<D> {
    pub fn new(source: D, config: AppConfig, config_path: Option<PathBuf>, theme: Theme) -> Self {
        let surface = TerminalSurface::new(&config);
        let slider = LogoSlider::new(source, surface, &config);
        let logos = LogoCache::new(
            config.slider.tile_width.max(1),
            config.slider.tile_height.max(1),
            theme.backdrop_rgb(),
        );

        Self {
            slider,
            config,
            config_path,
            logos,
            theme,
            mode: Mode::Normal,
            status_message: None,
            last_report: None,
            last_loaded_at: None,
            is_loading: false,
            should_quit: false,
        }
    }

    /// Fetch sources and logos for the current selection
    pub async fn reload(&mut self) -> LoadReport {
        self.is_loading = true;
        let report = self.slider.initialize().await;
        self.finish_load(&report);
        report
    }

    /// Switch the active list, persist it and reload
    pub async fn select_source(&mut self, name: Option<String>) -> LoadReport {
        let name = name.filter(|n| !n.is_empty());
        self.config.source.list_name = name.clone();
        self.persist_selection();

        self.is_loading = true;
        let report = self.slider.set_selected_source(name).await;
        self.finish_load(&report);
        report
    }

    /// Write only `source.list_name` into the config file
    ///
    /// The in-memory config also carries command-line overrides, which must
    /// not leak into the file.
    fn persist_selection(&mut self) {
        let Some(path) = self.config_path.clone() else {
            return;
        };
        let saved = AppConfig::load_from(&path).and_then(|mut on_disk| {
            on_disk.source.list_name = self.config.source.list_name.clone();
            on_disk.save_to(&path)
        });
        if let Err(e) = saved {
            tracing::warn!("Failed to save list selection to {}: {}", path.display(), e);
            self.set_status(format!("Could not save selection: {}", e));
        }
    }

    fn finish_load(&mut self, report: &LoadReport) {
        self.is_loading = false;
        self.last_report = Some(report.summary());
        self.last_loaded_at = Some(Local::now());
        self.logos
            .retain_urls(self.slider.items().iter().map(|item| item.logo_image_url.as_str()));

        if let Some(e) = report.sources.error().or(report.items.error()) {
            self.set_status(format!("Load failed: {}", e));
        }
    }

    /// Image URLs of the current logos not yet requested
    ///
    /// Each returned URL is marked loading; the caller starts the download.
    pub fn take_pending_logos(&mut self) -> Vec<String> {
        if !self.config.ui.image_preview {
            return Vec::new();
        }
        let urls: Vec<String> = self
            .slider
            .items()
            .iter()
            .map(|item| item.logo_image_url.clone())
            .collect();
        urls.into_iter()
            .filter(|url| self.logos.start_loading(url))
            .collect()
    }

    pub fn slide(&mut self, direction: Direction) -> Option<ScrollMove> {
        let mv = self.slider.slide(direction);
        if mv.is_some() {
            self.clear_status();
        }
        mv
    }

    pub fn viewport(&self) -> Option<&TerminalViewport> {
        self.slider.engine().viewport()
    }

    pub fn viewport_mut(&mut self) -> Option<&mut TerminalViewport> {
        self.slider.engine_mut().viewport_mut()
    }

    /// Advance the scroll animation one frame
    pub fn tick(&mut self) {
        if let Some(viewport) = self.viewport_mut() {
            viewport.tick();
        }
    }

    pub fn is_animating(&self) -> bool {
        self.viewport().is_some_and(TerminalViewport::is_animating)
    }

    pub fn phase_name(&self) -> &'static str {
        self.slider.phase().name()
    }

    /// What a click landed on; `None` while there is no strip to click
    pub fn hit_test(&self, column: u16, row: u16) -> Option<Hit> {
        if !self.slider.engine().has_strip() {
            return None;
        }
        self.viewport()?.hit_test(column, row)
    }

    /// Link of the strip entry at `index`
    pub fn link_at(&self, index: usize) -> Option<String> {
        self.viewport()?
            .entries()
            .get(index)
            .map(|entry| entry.href.clone())
    }

    /// Link of the leftmost fully scrolled-in logo
    pub fn first_visible_link(&self) -> Option<String> {
        let index = self.viewport()?.first_visible_entry()?;
        self.link_at(index)
    }

    /// Open `href` in the system handler
    pub fn open_link(&mut self, href: &str) {
        if href.trim().is_empty() {
            self.set_status("Logo has no link");
            return;
        }
        match open::that(href) {
            Ok(()) => self.set_status(format!("Opened {}", href)),
            Err(e) => {
                tracing::warn!("Failed to open {}: {}", href, e);
                self.set_status(format!("Failed to open link: {}", e));
            }
        }
    }

    pub fn property_pane(&self) -> PropertyPane {
        self.slider.property_pane()
    }

    /// Open the dropdown with the cursor on the current selection
    pub fn open_source_picker(&mut self) {
        let cursor = self
            .slider
            .selected_source()
            .and_then(|name| self.slider.options().iter().position(|o| o.key == name))
            .unwrap_or(0);
        self.mode = Mode::SourcePicker { cursor };
    }

    pub fn move_picker(&mut self, delta: isize) {
        if let Mode::SourcePicker { cursor } = self.mode {
            let len = self.slider.options().len();
            if len == 0 {
                return;
            }
            let next = (cursor as isize + delta).rem_euclid(len as isize) as usize;
            self.mode = Mode::SourcePicker { cursor: next };
        }
    }

    /// Key of the option under the picker cursor
    pub fn picker_choice(&self) -> Option<String> {
        match self.mode {
            Mode::SourcePicker { cursor } => self
                .slider
                .options()
                .get(cursor)
                .map(|option| option.key.clone()),
            _ => None,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use logoslider_core::source::{DataSourceOption, LogoItem};
    use logoslider_core::Error;
    use ratatui::layout::Rect;

    /// Serves a fixed set of lists, each with `logos` items
    pub(crate) struct StaticSource {
        pub lists: Vec<&'static str>,
        pub logos: usize,
        pub fail_items: bool,
    }

    #[async_trait::async_trait]
    impl DataSource for StaticSource {
        async fn list_sources(&self) -> logoslider_core::Result<Vec<DataSourceOption>> {
            Ok(self
                .lists
                .iter()
                .map(|name| DataSourceOption::from_name(*name))
                .collect())
        }

        async fn list_items(&self, source_name: &str) -> logoslider_core::Result<Vec<LogoItem>> {
            if self.fail_items {
                return Err(Error::Other("list unavailable".to_string()));
            }
            let count = if source_name == "Empty" { 0 } else { self.logos };
            Ok((0..count)
                .map(|i| LogoItem {
                    title: format!("{} {}", source_name, i),
                    link_url: format!("https://{}.example/{}", source_name.to_lowercase(), i),
                    logo_image_url: format!("https://cdn.example/{}/{}.png", source_name, i),
                })
                .collect())
        }
    }

    pub(crate) fn app(selected: Option<&str>, fail_items: bool) -> App<StaticSource> {
        let mut config = AppConfig::default();
        config.source.list_name = selected.map(str::to_string);
        config.slider.tile_width = 10;
        config.slider.logo_gap = 5;
        config.ui.scroll.smooth_enabled = false;
        let source = StaticSource {
            lists: vec!["Partners", "Sponsors", "Empty"],
            logos: 3,
            fail_items,
        };
        App::new(source, config, None, Theme::default())
    }

    fn lay_out(app: &mut App<StaticSource>) {
        if let Some(viewport) = app.viewport_mut() {
            viewport.set_layout(
                Rect::new(3, 1, 40, 9),
                Rect::new(0, 1, 3, 9),
                Rect::new(43, 1, 3, 9),
            );
        }
    }

    #[tokio::test]
    async fn test_reload_mounts_and_queues_logos() {
        let mut app = app(Some("Partners"), false);
        app.reload().await;

        assert_eq!(app.phase_name(), "mounted");
        assert_eq!(app.last_report.as_deref(), Some("3 sources, 3 logos"));
        assert!(app.last_loaded_at.is_some());
        assert!(!app.is_loading);

        let pending = app.take_pending_logos();
        assert_eq!(pending.len(), 3);
        assert!(app.take_pending_logos().is_empty());
    }

    #[tokio::test]
    async fn test_no_selection_stays_unmounted() {
        let mut app = app(None, false);
        app.reload().await;
        assert_eq!(app.phase_name(), "unmounted");
        assert_eq!(app.last_report.as_deref(), Some("3 sources, no logos"));
        assert!(app.first_visible_link().is_none());
    }

    #[tokio::test]
    async fn test_item_failure_sets_status() {
        let mut app = app(Some("Partners"), true);
        app.reload().await;
        assert_eq!(app.phase_name(), "unmounted");
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("list unavailable")));
    }

    #[tokio::test]
    async fn test_picker_selects_and_reloads() {
        let mut app = app(Some("Partners"), false);
        app.reload().await;

        app.open_source_picker();
        assert_eq!(app.mode, Mode::SourcePicker { cursor: 0 });
        app.move_picker(-1);
        assert_eq!(app.picker_choice().as_deref(), Some("Empty"));
        app.move_picker(1);
        assert_eq!(app.picker_choice().as_deref(), Some("Partners"));
        app.move_picker(1);

        let choice = app.picker_choice();
        app.select_source(choice).await;

        assert_eq!(app.slider.selected_source(), Some("Sponsors"));
        assert_eq!(app.config.source.list_name.as_deref(), Some("Sponsors"));
        assert_eq!(app.slider.items()[0].title, "Sponsors 0");
        // Same viewport, repopulated
        assert_eq!(app.slider.engine().surface().mounts(), 1);
    }

    #[tokio::test]
    async fn test_selection_is_persisted() {
        let path = std::env::temp_dir().join(format!(
            "logoslider-app-test-{}.toml",
            std::process::id()
        ));
        let mut app = app(Some("Partners"), false);
        app.config_path = Some(path.clone());

        app.select_source(Some("Sponsors".to_string())).await;

        let saved = AppConfig::load_from(&path).unwrap();
        assert_eq!(saved.source.list_name.as_deref(), Some("Sponsors"));
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_persisting_selection_keeps_file_values() {
        let path = std::env::temp_dir().join(format!(
            "logoslider-app-overrides-{}.toml",
            std::process::id()
        ));
        let mut on_disk = AppConfig::default();
        on_disk.source.site_url = "https://real.example/sites/brand".to_string();
        on_disk.source.list_name = Some("Partners".to_string());
        on_disk.save_to(&path).unwrap();

        // As if started with --site and --list
        let mut app = app(Some("Partners"), false);
        app.config.source.site_url = "https://override.example/sites/test".to_string();
        app.config.slider.tile_width = 10;
        app.config_path = Some(path.clone());

        app.select_source(Some("Sponsors".to_string())).await;

        let saved = AppConfig::load_from(&path).unwrap();
        assert_eq!(saved.source.site_url, "https://real.example/sites/brand");
        assert_eq!(saved.source.list_name.as_deref(), Some("Sponsors"));
        assert_eq!(saved.slider.tile_width, AppConfig::default().slider.tile_width);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_switching_lists_evicts_old_logos() {
        let mut app = app(Some("Partners"), false);
        app.reload().await;
        assert_eq!(app.take_pending_logos().len(), 3);
        assert_eq!(app.logos.len(), 3);

        app.select_source(Some("Sponsors".to_string())).await;
        assert_eq!(app.logos.len(), 0);
        let pending = app.take_pending_logos();
        assert_eq!(pending.len(), 3);
        assert!(pending.iter().all(|url| url.contains("/Sponsors/")));

        app.select_source(Some("Partners".to_string())).await;
        assert!(app.logos.get("https://cdn.example/Sponsors/0.png").is_none());
        assert_eq!(app.take_pending_logos().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_list_ignores_clicks_and_slides() {
        let mut app = app(Some("Partners"), false);
        app.reload().await;
        lay_out(&mut app);
        assert!(app.hit_test(1, 4).is_some());

        app.select_source(Some("Empty".to_string())).await;
        assert_eq!(app.phase_name(), "mounted");
        assert!(!app.slider.engine().has_strip());
        assert_eq!(app.hit_test(1, 4), None);
        assert_eq!(app.slide(Direction::Next), None);
        assert!(app.first_visible_link().is_none());
        assert_eq!(app.last_report.as_deref(), Some("3 sources, no logos"));
    }

    #[tokio::test]
    async fn test_slide_and_first_visible_link() {
        let mut app = app(Some("Partners"), false);
        app.reload().await;
        lay_out(&mut app);

        assert_eq!(
            app.first_visible_link().as_deref(),
            Some("https://partners.example/0")
        );
        assert_eq!(app.slide(Direction::Next), Some(ScrollMove::Smooth(15)));
        assert_eq!(app.slider.current_index(), 1);
        assert_eq!(
            app.first_visible_link().as_deref(),
            Some("https://partners.example/1")
        );
        assert_eq!(app.hit_test(1, 4), Some(Hit::Button(Direction::Previous)));
    }
}
