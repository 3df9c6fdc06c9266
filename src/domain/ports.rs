use crate::config::toml_config::ChartSettings;
use crate::domain::model::{ChartData, ChatExport};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

pub trait Storage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &Path;
    fn output_path(&self) -> &Path;
    fn csv_path(&self) -> Option<&Path>;
    /// Bucket days by UTC date instead of the local zone.
    fn bucket_in_utc(&self) -> bool;
    fn chart_settings(&self) -> &ChartSettings;
}

/// Draws a chart image. Implementations own the output format.
pub trait ChartRenderer {
    fn render(&self, chart: &ChartData, output: &Path) -> Result<()>;
}

pub trait Pipeline {
    fn extract(&self) -> Result<ChatExport>;
    fn transform(&self, export: ChatExport) -> Result<ChartData>;
    fn load(&self, chart: &ChartData) -> Result<PathBuf>;
}
