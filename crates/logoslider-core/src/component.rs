//! Host-facing lifecycle: initialize, render, reconfigure

use crate::config::AppConfig;
use crate::loader::{DataLoader, LoadReport};
use crate::slider::{Direction, ScrollMove, SliderEngine, SliderPhase, Surface};
use crate::source::{DataSource, DataSourceOption, LogoItem};

/// Name of the only configurable property
pub const LIST_NAME_PROPERTY: &str = "listName";

/// Configuration page shown by the host's property pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPane {
    pub header: String,
    pub groups: Vec<PropertyGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyGroup {
    pub name: String,
    pub fields: Vec<PropertyField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyField {
    Dropdown {
        property: &'static str,
        label: String,
        options: Vec<DataSourceOption>,
        selected: Option<String>,
    },
}

impl PropertyPane {
    /// The source dropdown, if present
    pub fn dropdown(&self) -> Option<(&[DataSourceOption], Option<&str>)> {
        self.groups
            .iter()
            .flat_map(|group| &group.fields)
            .find_map(|field| match field {
                PropertyField::Dropdown {
                    property,
                    options,
                    selected,
                    ..
                } if *property == LIST_NAME_PROPERTY => {
                    Some((options.as_slice(), selected.as_deref()))
                }
                _ => None,
            })
    }
}

/// A logo slider bound to one data source and one rendering surface
pub struct LogoSlider<D: DataSource, S: Surface> {
    loader: DataLoader<D>,
    engine: SliderEngine<S>,
    selected_source: Option<String>,
}

impl<D: DataSource, S: Surface> LogoSlider<D, S> {
    pub fn new(source: D, surface: S, config: &AppConfig) -> Self {
        Self {
            loader: DataLoader::new(source),
            engine: SliderEngine::new(surface, &config.slider),
            selected_source: config.source.selected_list().map(str::to_string),
        }
    }

    /// Load options and logos, then render
    ///
    /// Never fails; per-fetch outcomes are in the returned report.
    pub async fn initialize(&mut self) -> LoadReport {
        self.engine.begin_loading();
        let report = self
            .loader
            .initialize(self.selected_source.as_deref())
            .await;
        self.engine.finish_loading(self.loader.items());
        self.render();
        report
    }

    /// Mount the strip when logos are available; safe to call repeatedly
    pub fn render(&mut self) -> bool {
        self.engine.render()
    }

    /// Change the `listName` property and run a full reload and re-render
    pub async fn set_selected_source(&mut self, name: Option<String>) -> LoadReport {
        let name = name.filter(|n| !n.is_empty());
        tracing::info!("Selected source changed to {:?}", name);
        self.selected_source = name;
        self.initialize().await
    }

    pub fn slide(&mut self, direction: Direction) -> Option<ScrollMove> {
        self.engine.slide(direction)
    }

    pub fn selected_source(&self) -> Option<&str> {
        self.selected_source.as_deref()
    }

    pub fn options(&self) -> &[DataSourceOption] {
        self.loader.options()
    }

    pub fn items(&self) -> &[LogoItem] {
        self.engine.items()
    }

    pub fn current_index(&self) -> usize {
        self.engine.current_index()
    }

    pub fn phase(&self) -> &SliderPhase<S::Viewport> {
        self.engine.phase()
    }

    pub fn engine(&self) -> &SliderEngine<S> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SliderEngine<S> {
        &mut self.engine
    }

    pub fn data_source(&self) -> &D {
        self.loader.source()
    }

    pub fn property_pane(&self) -> PropertyPane {
        PropertyPane {
            header: "Configure Logo Slider".to_string(),
            groups: vec![PropertyGroup {
                name: "Settings".to_string(),
                fields: vec![PropertyField::Dropdown {
                    property: LIST_NAME_PROPERTY,
                    label: "Select Logo List".to_string(),
                    options: self.loader.options().to_vec(),
                    selected: self.selected_source.clone(),
                }],
            }],
        }
    }
}
