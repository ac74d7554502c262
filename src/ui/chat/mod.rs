//! Chat view components.

mod error_banner;
mod header;
mod input_area;
mod results;
mod shell;

pub use error_banner::ErrorBannerView;
pub use header::ChatHeader;
pub use input_area::PromptForm;
pub use results::ResultsView;
pub use shell::ChatPanel;
