use crate::domain::model::ChartData;
use crate::utils::error::{ChartError, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct DailyRow {
    date: String,
    mine: u32,
    theirs: u32,
    mine_avg: String,
    theirs_avg: String,
}

/// Daily series as CSV, one row per day of the span.
pub fn daily_csv(chart: &ChartData) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for (i, day) in chart.days.iter().enumerate() {
        writer.serialize(DailyRow {
            date: day.format("%Y-%m-%d").to_string(),
            mine: chart.mine.counts[i],
            theirs: chart.theirs.counts[i],
            mine_avg: format!("{:.2}", chart.mine.smoothed[i]),
            theirs_avg: format!("{:.2}", chart.theirs.smoothed[i]),
        })?;
    }

    writer
        .into_inner()
        .map_err(|e| ChartError::IoError(e.into_error()))
}
