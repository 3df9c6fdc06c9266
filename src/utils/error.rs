use std::path::PathBuf;
use thiserror::Error;

/// Why a run ended without anything to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// The export has no entries of kind "message".
    NoMessages,
    /// Neither the outbound flag nor a personal chat id could attribute senders.
    UnknownSenders,
    /// Classified messages produced no calendar days.
    NoDays,
}

impl std::fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            EmptyReason::NoMessages => "the export contains no entries of type \"message\"",
            EmptyReason::UnknownSenders => {
                "could not determine senders (no \"out\" flag and not a personal_chat)"
            }
            EmptyReason::NoDays => "no data to build a chart from",
        };
        f.write_str(text)
    }
}

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse chat export: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Nothing to plot: {0}")]
    NothingToPlot(EmptyReason),

    #[error("Chart rendering failed: {message}")]
    RenderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Data,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational; the run finished without producing output.
    Low,
    High,
    Critical,
}

impl ChartError {
    pub fn render<E: std::fmt::Display>(err: E) -> Self {
        ChartError::RenderError {
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ChartError::InputNotFound { .. } | ChartError::SerializationError(_) => {
                ErrorCategory::Input
            }
            ChartError::ConfigValidationError { .. }
            | ChartError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ChartError::NothingToPlot(_) => ErrorCategory::Data,
            ChartError::IoError(_) | ChartError::CsvError(_) | ChartError::RenderError { .. } => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ChartError::NothingToPlot(_) => ErrorSeverity::Low,
            ChartError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::High | ErrorSeverity::Critical => 1,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ChartError::InputNotFound { path } => format!("File not found: {}", path.display()),
            ChartError::NothingToPlot(reason) => {
                let mut text = reason.to_string();
                if let Some(first) = text.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                format!("{}.", text)
            }
            other => format!("Error: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ChartError::InputNotFound { .. } => "Check the path to the exported result.json",
            ChartError::SerializationError(_) => {
                "Make sure the file is a JSON chat export with a \"messages\" array"
            }
            ChartError::ConfigValidationError { .. }
            | ChartError::InvalidConfigValueError { .. } => {
                "Fix the chart settings file or command line options"
            }
            ChartError::NothingToPlot(EmptyReason::UnknownSenders) => {
                "Export a personal chat, or an export that carries the \"out\" flag"
            }
            ChartError::NothingToPlot(_) => "Export a chat that contains regular messages",
            ChartError::IoError(_) | ChartError::CsvError(_) => {
                "Check that the output location is writable"
            }
            ChartError::RenderError { .. } => {
                "Use a .png/.bmp/.jpg output path and make sure system fonts are installed"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_to_plot_exits_cleanly() {
        let err = ChartError::NothingToPlot(EmptyReason::NoMessages);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.exit_code(), 0);
        assert!(err.user_friendly_message().starts_with("The export contains"));
    }

    #[test]
    fn test_failures_exit_with_one() {
        let missing = ChartError::InputNotFound {
            path: PathBuf::from("nope.json"),
        };
        assert_eq!(missing.exit_code(), 1);
        assert!(missing.user_friendly_message().contains("nope.json"));

        let io = ChartError::IoError(std::io::Error::other("disk full"));
        assert_eq!(io.severity(), ErrorSeverity::Critical);
        assert_eq!(io.exit_code(), 1);

        let render = ChartError::render("font not found");
        assert_eq!(render.category(), ErrorCategory::Output);
        assert_eq!(render.exit_code(), 1);
        assert!(render.to_string().contains("font not found"));
    }
}
