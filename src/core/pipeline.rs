use crate::adapters::csv_export::daily_csv;
use crate::config::toml_config::ChartSettings;
use crate::core::aggregator::{AlignedSeries, DailySeries};
use crate::core::classifier::classify;
use crate::core::smoother::{smooth_counts, window_for_span};
use crate::core::summary::summarize;
use crate::domain::model::{ChartData, ChatExport, SeriesData};
use crate::domain::ports::{ChartRenderer, ConfigProvider, Pipeline, Storage};
use crate::utils::error::{ChartError, EmptyReason, Result};
use chrono::{Local, TimeZone, Utc};
use std::path::PathBuf;

/// Reads an export, turns it into chart data and writes the chart.
pub struct ChatStatsPipeline<S: Storage, R: ChartRenderer, C: ConfigProvider> {
    storage: S,
    renderer: R,
    config: C,
}

impl<S: Storage, R: ChartRenderer, C: ConfigProvider> ChatStatsPipeline<S, R, C> {
    pub fn new(storage: S, renderer: R, config: C) -> Self {
        Self {
            storage,
            renderer,
            config,
        }
    }
}

impl<S: Storage, R: ChartRenderer, C: ConfigProvider> Pipeline for ChatStatsPipeline<S, R, C> {
    fn extract(&self) -> Result<ChatExport> {
        let input = self.config.input_path();
        tracing::info!("📥 Reading chat export from {}", input.display());

        let bytes = self.storage.read_file(input)?;
        tracing::debug!("Read {} bytes", bytes.len());

        let export = ChatExport::from_json_slice(&bytes)?;
        tracing::info!(
            "📊 Loaded {} entries (chat type: {})",
            export.messages.len(),
            export.chat_kind.as_deref().unwrap_or("unknown")
        );
        Ok(export)
    }

    fn transform(&self, export: ChatExport) -> Result<ChartData> {
        let settings = self.config.chart_settings();
        if self.config.bucket_in_utc() {
            build_chart(&export, settings, &Utc)
        } else {
            build_chart(&export, settings, &Local)
        }
    }

    fn load(&self, chart: &ChartData) -> Result<PathBuf> {
        let output = self.config.output_path();
        tracing::info!("🖼️ Rendering chart to {}", output.display());
        self.renderer.render(chart, output)?;

        if let Some(csv_path) = self.config.csv_path() {
            let data = daily_csv(chart)?;
            tracing::debug!("Writing daily CSV ({} bytes)", data.len());
            self.storage.write_file(csv_path, &data)?;
            tracing::info!("📄 Daily series saved to {}", csv_path.display());
        }

        Ok(output.to_path_buf())
    }
}

/// Classifies, buckets by day in `tz`, summarizes and smooths both sides.
pub fn build_chart<Tz: TimeZone>(
    export: &ChatExport,
    settings: &ChartSettings,
    tz: &Tz,
) -> Result<ChartData> {
    if export.countable_messages().next().is_none() {
        return Err(ChartError::NothingToPlot(EmptyReason::NoMessages));
    }

    let classified = classify(export);
    if classified.is_empty() {
        return Err(ChartError::NothingToPlot(EmptyReason::UnknownSenders));
    }

    let mine_daily = DailySeries::from_messages(classified.mine.iter().copied(), tz);
    let theirs_daily = DailySeries::from_messages(classified.theirs.iter().copied(), tz);

    let aligned = AlignedSeries::new(&mine_daily, &theirs_daily)
        .ok_or(ChartError::NothingToPlot(EmptyReason::NoDays))?;
    let days_span = aligned.days_span();
    let window = window_for_span(days_span, &settings.smoothing);

    tracing::info!(
        "🔧 {} days from {} to {}, smoothing window {}",
        days_span,
        aligned.range.first,
        aligned.range.last,
        window
    );

    let mine = SeriesData {
        label: settings.chart.self_label.clone(),
        smoothed: smooth_counts(&aligned.mine, window),
        summary: summarize(&mine_daily, &aligned.mine, days_span),
        counts: aligned.mine,
    };
    let theirs = SeriesData {
        label: settings.partner_label(export.name.as_deref(), export.is_personal_chat()),
        smoothed: smooth_counts(&aligned.theirs, window),
        summary: summarize(&theirs_daily, &aligned.theirs, days_span),
        counts: aligned.theirs,
    };

    Ok(ChartData {
        title: settings.chart.title.clone(),
        x_label: settings.chart.x_label.clone(),
        y_label: settings.chart.y_label.clone(),
        width: settings.chart.width,
        height: settings.chart.height,
        days: aligned.days,
        window,
        mine,
        theirs,
    })
}
