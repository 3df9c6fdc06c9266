pub mod aggregator;
pub mod classifier;
pub mod engine;
pub mod pipeline;
pub mod smoother;
pub mod summary;

pub use crate::domain::model::{ChartData, ChatExport, Message};
pub use crate::domain::ports::{ChartRenderer, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
