use crate::core::summary::SummaryReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use std::path::PathBuf;

pub struct ChartEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ChartEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs extract, transform and load, printing the summary in between.
    pub fn run(&self) -> Result<PathBuf> {
        tracing::info!("🚀 Starting chart generation");

        let export = self.pipeline.extract()?;
        let chart = self.pipeline.transform(export)?;

        print!("{}", SummaryReport(&chart));

        let output_path = self.pipeline.load(&chart)?;
        tracing::info!("✅ Chart saved to {}", output_path.display());

        Ok(output_path)
    }
}
