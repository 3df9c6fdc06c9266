pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::PlottersRenderer;
pub use config::{cli::LocalStorage, toml_config::ChartSettings};
pub use core::{engine::ChartEngine, pipeline::ChatStatsPipeline};
pub use utils::error::{ChartError, Result};
