// Library exports for api-research
pub mod analysis;
pub mod codegen;
pub mod config;
pub mod probe;
pub mod traffic;
pub mod ui;
pub mod utils;

pub use analysis::category;
pub use codegen::{generator, templates};
pub use config::settings;
pub use probe::{endpoint, transport};
pub use traffic::{analyzer, capture, summary};
pub use ui::menu;
pub use utils::formatting;

// Error types
pub use anyhow::{Error, Result};
