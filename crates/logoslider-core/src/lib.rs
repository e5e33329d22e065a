pub mod component;
pub mod config;
pub mod error;
pub mod loader;
pub mod slider;
pub mod source;

pub use component::{LogoSlider, PropertyPane};
pub use config::{AppConfig, EasingType, ScrollConfig};
pub use error::{Error, Result};
pub use loader::{DataLoader, LoadReport, TaskOutcome};
