use crate::source::{DataSource, DataSourceOption, LogoItem};
use crate::Error;

/// Outcome of one startup fetch
#[derive(Debug)]
pub enum TaskOutcome {
    /// Fetch succeeded with this many records
    Loaded(usize),
    /// Nothing to fetch (no source selected)
    Skipped,
    /// Fetch failed; stored data left as described by the operation
    Failed(Error),
}

impl TaskOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, TaskOutcome::Failed(_))
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            TaskOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Per-task results of [`DataLoader::initialize`]
#[derive(Debug)]
pub struct LoadReport {
    pub sources: TaskOutcome,
    pub items: TaskOutcome,
}

impl LoadReport {
    pub fn has_failures(&self) -> bool {
        self.sources.is_failed() || self.items.is_failed()
    }

    /// One-line summary for status displays
    pub fn summary(&self) -> String {
        let part = |label: &str, outcome: &TaskOutcome| match outcome {
            TaskOutcome::Loaded(n) => format!("{} {}", n, label),
            TaskOutcome::Skipped => format!("no {}", label),
            TaskOutcome::Failed(_) => format!("{} failed", label),
        };
        format!("{}, {}", part("sources", &self.sources), part("logos", &self.items))
    }
}

/// Fetches the dropdown options and the active source's logos
///
/// Failures never escape: they are logged, recorded in the returned
/// outcome, and the stored data is left in a usable state.
pub struct DataLoader<D: DataSource> {
    source: D,
    options: Vec<DataSourceOption>,
    items: Vec<LogoItem>,
}

impl<D: DataSource> DataLoader<D> {
    pub fn new(source: D) -> Self {
        Self {
            source,
            options: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn source(&self) -> &D {
        &self.source
    }

    /// Options discovered by the last directory read
    pub fn options(&self) -> &[DataSourceOption] {
        &self.options
    }

    /// Logos of the selected source
    pub fn items(&self) -> &[LogoItem] {
        &self.items
    }

    /// Read the source directory and replace the dropdown options
    ///
    /// On failure the options are cleared so the picker shows an empty list.
    pub async fn load_available_sources(&mut self) -> TaskOutcome {
        let result = self.source.list_sources().await;
        self.apply_sources(result)
    }

    /// Read the logos of `selected`; `None` or an empty name resolves at once
    ///
    /// On failure the previous logos are kept.
    pub async fn load_items(&mut self, selected: Option<&str>) -> TaskOutcome {
        let result = fetch_items(&self.source, selected).await;
        self.apply_items(result)
    }

    /// Run both loads concurrently and wait for both, whatever their outcome
    pub async fn initialize(&mut self, selected: Option<&str>) -> LoadReport {
        let (sources, items) = tokio::join!(
            self.source.list_sources(),
            fetch_items(&self.source, selected)
        );

        let report = LoadReport {
            sources: self.apply_sources(sources),
            items: self.apply_items(items),
        };
        tracing::info!("Initial load finished: {}", report.summary());
        report
    }

    fn apply_sources(&mut self, result: crate::Result<Vec<DataSourceOption>>) -> TaskOutcome {
        match result {
            Ok(options) => {
                tracing::debug!("Discovered {} sources", options.len());
                self.options = options;
                TaskOutcome::Loaded(self.options.len())
            }
            Err(e) => {
                tracing::error!("Error fetching available lists: {}", e);
                self.options.clear();
                TaskOutcome::Failed(e)
            }
        }
    }

    fn apply_items(&mut self, result: Option<crate::Result<Vec<LogoItem>>>) -> TaskOutcome {
        match result {
            None => TaskOutcome::Skipped,
            Some(Ok(items)) => {
                tracing::debug!("Loaded {} logos", items.len());
                self.items = items;
                TaskOutcome::Loaded(self.items.len())
            }
            Some(Err(e)) => {
                tracing::error!(
                    "Error loading logo data, keeping {} previous logos: {}",
                    self.items.len(),
                    e
                );
                TaskOutcome::Failed(e)
            }
        }
    }
}

/// `None` when there is nothing selected to fetch
async fn fetch_items<D: DataSource>(
    source: &D,
    selected: Option<&str>,
) -> Option<crate::Result<Vec<LogoItem>>> {
    match selected.filter(|name| !name.is_empty()) {
        Some(name) => Some(source.list_items(name).await),
        None => None,
    }
}
