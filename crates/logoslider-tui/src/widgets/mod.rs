mod help;
mod slider;
mod source_picker;
mod status_bar;

pub use help::HelpWidget;
pub use slider::SliderWidget;
pub use source_picker::SourcePickerWidget;
pub use status_bar::StatusBarWidget;
