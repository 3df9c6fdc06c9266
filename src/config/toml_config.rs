use crate::utils::error::{ChartError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Chart appearance and smoothing, loaded from an optional TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub chart: ChartStyle,
    pub smoothing: SmoothingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub title: String,
    pub self_label: String,
    /// Defaults to the export name for personal chats.
    pub partner_label: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: "Messages per day: You vs Partner".to_string(),
            self_label: "You".to_string(),
            partner_label: None,
            x_label: "Date".to_string(),
            y_label: "Messages per day".to_string(),
            width: 1400,
            height: 700,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    pub min_window: usize,
    pub max_window: usize,
    /// Days of span per unit of window length.
    pub days_per_step: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            min_window: 3,
            max_window: 14,
            days_per_step: 30,
        }
    }
}

pub const FALLBACK_PARTNER_LABEL: &str = "Partner";

impl ChartSettings {
    /// Loads settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ChartError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("chart.title", &self.chart.title)?;
        validate_non_empty_string("chart.self_label", &self.chart.self_label)?;
        if let Some(label) = &self.chart.partner_label {
            validate_non_empty_string("chart.partner_label", label)?;
        }
        validate_range("chart.width", self.chart.width, 200, 10_000)?;
        validate_range("chart.height", self.chart.height, 200, 10_000)?;

        validate_positive_number("smoothing.min_window", self.smoothing.min_window, 1)?;
        validate_positive_number("smoothing.days_per_step", self.smoothing.days_per_step, 1)?;
        validate_positive_number(
            "smoothing.max_window",
            self.smoothing.max_window,
            self.smoothing.min_window,
        )?;

        Ok(())
    }

    /// Label for the partner's series.
    pub fn partner_label(&self, export_name: Option<&str>, personal_chat: bool) -> String {
        if let Some(label) = &self.chart.partner_label {
            return label.clone();
        }
        match export_name {
            Some(name) if personal_chat && !name.trim().is_empty() => name.to_string(),
            _ => FALLBACK_PARTNER_LABEL.to_string(),
        }
    }
}

impl Validate for ChartSettings {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_standard_chart() {
        let settings = ChartSettings::default();
        assert_eq!(settings.chart.width, 1400);
        assert_eq!(settings.chart.height, 700);
        assert_eq!(settings.smoothing, SmoothingConfig {
            min_window: 3,
            max_window: 14,
            days_per_step: 30
        });
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml_config() {
        let toml_content = r#"
[chart]
title = "Us"
partner_label = "Mom"
width = 1920

[smoothing]
max_window = 7
"#;

        let settings = ChartSettings::from_toml_str(toml_content).unwrap();

        assert_eq!(settings.chart.title, "Us");
        assert_eq!(settings.chart.width, 1920);
        assert_eq!(settings.chart.height, 700);
        assert_eq!(settings.chart.self_label, "You");
        assert_eq!(settings.smoothing.min_window, 3);
        assert_eq!(settings.smoothing.max_window, 7);
        assert_eq!(settings.partner_label(Some("Alice"), true), "Mom");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let settings = ChartSettings::from_toml_str("").unwrap();
        assert_eq!(settings, ChartSettings::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[chart]\nself_label = \"Me\"").unwrap();

        let settings = ChartSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.chart.self_label, "Me");
    }

    #[test]
    fn test_invalid_toml_reports_parse_error() {
        let err = ChartSettings::from_toml_str("[chart\ntitle = 1").unwrap_err();
        assert!(matches!(err, ChartError::ConfigValidationError { .. }));

        let err = ChartSettings::from_toml_str("[chart]\nwidth = \"wide\"").unwrap_err();
        assert!(matches!(err, ChartError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_validation() {
        let mut settings = ChartSettings::default();
        settings.smoothing.max_window = 2;
        assert!(settings.validate().is_err());

        let mut settings = ChartSettings::default();
        settings.smoothing.days_per_step = 0;
        assert!(settings.validate().is_err());

        let mut settings = ChartSettings::default();
        settings.chart.height = 50;
        assert!(settings.validate().is_err());

        let mut settings = ChartSettings::default();
        settings.chart.title = " ".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partner_label_fallbacks() {
        let settings = ChartSettings::default();
        assert_eq!(settings.partner_label(Some("Alice"), true), "Alice");
        assert_eq!(settings.partner_label(Some("Book club"), false), "Partner");
        assert_eq!(settings.partner_label(None, true), "Partner");
        assert_eq!(settings.partner_label(Some("  "), true), "Partner");
    }
}
