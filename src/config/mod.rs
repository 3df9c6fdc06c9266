pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::toml_config::ChartSettings;
    use crate::domain::ports::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_file_extension, validate_input_exists, validate_path, Validate,
    };
    use clap::Parser;
    use std::path::{Path, PathBuf};

    pub const IMAGE_EXTENSIONS: &[&str] = &["png", "bmp", "jpg", "jpeg"];

    #[derive(Debug, Clone, Parser)]
    #[command(name = "chat-daily-stats")]
    #[command(about = "Chart daily message counts of a chat export: you vs your partner")]
    pub struct CliConfig {
        /// Path to the exported result.json
        pub input: PathBuf,

        /// Where to write the chart image
        #[arg(default_value = "chart.png")]
        pub output: PathBuf,

        /// TOML file with chart and smoothing settings
        #[arg(long)]
        pub config: Option<PathBuf>,

        /// Also write the daily series as CSV
        #[arg(long)]
        pub csv: Option<PathBuf>,

        /// Chart title (overrides the settings file)
        #[arg(long)]
        pub title: Option<String>,

        /// Bucket days by UTC date instead of the local time zone
        #[arg(long)]
        pub utc: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(skip)]
        pub settings: ChartSettings,
    }

    impl CliConfig {
        /// Loads the settings file, if any, and applies command line overrides.
        pub fn load_settings(&mut self) -> Result<()> {
            if let Some(path) = &self.config {
                tracing::debug!("Loading chart settings from {}", path.display());
                self.settings = ChartSettings::from_file(path)?;
            }
            if let Some(title) = &self.title {
                self.settings.chart.title = title.clone();
            }
            Ok(())
        }
    }

    impl ConfigProvider for CliConfig {
        fn input_path(&self) -> &Path {
            &self.input
        }

        fn output_path(&self) -> &Path {
            &self.output
        }

        fn csv_path(&self) -> Option<&Path> {
            self.csv.as_deref()
        }

        fn bucket_in_utc(&self) -> bool {
            self.utc
        }

        fn chart_settings(&self) -> &ChartSettings {
            &self.settings
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_input_exists(&self.input)?;
            validate_path("output", &self.output)?;
            validate_file_extension("output", &self.output, IMAGE_EXTENSIONS)?;
            if let Some(csv) = &self.csv {
                validate_path("csv", csv)?;
            }
            self.settings.validate()
        }
    }

}
