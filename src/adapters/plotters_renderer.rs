use crate::domain::model::{ChartData, Peak, SeriesData};
use crate::domain::ports::ChartRenderer;
use crate::utils::error::{ChartError, Result};
use chrono::NaiveDate;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::Path;

/// Bar width in days. Two bars share one day slot.
pub const BAR_WIDTH: f64 = 0.36;
pub const BAR_OFFSET: f64 = 0.18;
const X_MARGIN: f64 = 0.02;
const Y_MARGIN: f64 = 0.08;

const FONT: &str = "sans-serif";
const MINE_COLOR: RGBColor = RGBColor(31, 119, 180);
const THEIRS_COLOR: RGBColor = RGBColor(255, 127, 14);
const MINE_TREND: RGBColor = RGBColor(16, 64, 120);
const THEIRS_TREND: RGBColor = RGBColor(200, 70, 0);

type DayChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Renders the dual bar chart with trend lines into a bitmap file.
/// The image format follows the output extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlottersRenderer;

impl ChartRenderer for PlottersRenderer {
    fn render(&self, chart: &ChartData, output: &Path) -> Result<()> {
        tracing::debug!(
            "Rendering {}x{} chart with {} days to {}",
            chart.width,
            chart.height,
            chart.days_span(),
            output.display()
        );

        let root = BitMapBackend::new(output, (chart.width, chart.height)).into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::render)?;

        let (x_range, y_range) = axis_ranges(chart);
        let date_label = |x: &f64| day_label(&chart.days, *x);
        let y_label = |y: &f64| count_label(*y);

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, (FONT, 28))
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(64)
            .build_cartesian_2d(x_range, y_range)
            .map_err(ChartError::render)?;

        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_labels(chart.days_span().clamp(2, 12))
            .x_label_formatter(&date_label)
            .y_label_formatter(&y_label)
            .draw()
            .map_err(ChartError::render)?;

        draw_bars(&mut ctx, &chart.mine, -BAR_OFFSET, MINE_COLOR)?;
        draw_bars(&mut ctx, &chart.theirs, BAR_OFFSET, THEIRS_COLOR)?;
        draw_trend(&mut ctx, &chart.mine, MINE_TREND)?;
        draw_trend(&mut ctx, &chart.theirs, THEIRS_TREND)?;

        for (series, offset, color) in [
            (&chart.mine, -BAR_OFFSET, MINE_TREND),
            (&chart.theirs, BAR_OFFSET, THEIRS_TREND),
        ] {
            if let Some(peak) = series.summary.annotated_peak() {
                draw_peak(&mut ctx, &chart.days, series, peak, offset, color)?;
            }
        }

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .label_font((FONT, 16))
            .draw()
            .map_err(ChartError::render)?;

        root.present().map_err(ChartError::render)?;
        Ok(())
    }
}

/// Axis ranges: one unit per day, padded like the classic 2%/8% margins.
pub fn axis_ranges(chart: &ChartData) -> (Range<f64>, Range<f64>) {
    let days = chart.days_span().max(1) as f64;
    let x_pad = days * X_MARGIN;
    let x_range = (-0.5 - x_pad)..(days - 0.5 + x_pad);

    let y_max = chart
        .mine
        .counts
        .iter()
        .chain(&chart.theirs.counts)
        .map(|&c| f64::from(c))
        .chain(chart.mine.smoothed.iter().copied())
        .chain(chart.theirs.smoothed.iter().copied())
        .fold(1.0_f64, f64::max);

    // room above the tallest bar for the peak labels
    (x_range, 0.0..y_max * (1.0 + 2.0 * Y_MARGIN))
}

/// Date label for an axis position; blank between days and outside the span.
pub fn day_label(days: &[NaiveDate], x: f64) -> String {
    let index = x.round();
    if index < 0.0 || (x - index).abs() > 0.25 {
        return String::new();
    }
    days.get(index as usize)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Count label for an axis position; blank for fractional ticks.
pub fn count_label(y: f64) -> String {
    if y.fract() != 0.0 {
        return String::new();
    }
    format!("{:.0}", y)
}

fn draw_bars<DB: DrawingBackend>(
    ctx: &mut DayChart<'_, DB>,
    series: &SeriesData,
    offset: f64,
    color: RGBColor,
) -> Result<()> {
    ctx.draw_series(
        series
            .counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(i, &count)| {
                let center = i as f64 + offset;
                Rectangle::new(
                    [
                        (center - BAR_WIDTH / 2.0, 0.0),
                        (center + BAR_WIDTH / 2.0, f64::from(count)),
                    ],
                    color.filled(),
                )
            }),
    )
    .map_err(ChartError::render)?
    .label(series.label.as_str())
    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 14, y + 5)], color.filled()));
    Ok(())
}

fn draw_trend<DB: DrawingBackend>(
    ctx: &mut DayChart<'_, DB>,
    series: &SeriesData,
    color: RGBColor,
) -> Result<()> {
    ctx.draw_series(LineSeries::new(
        series
            .smoothed
            .iter()
            .enumerate()
            .map(|(i, &value)| (i as f64, value)),
        color.stroke_width(2),
    ))
    .map_err(ChartError::render)?
    .label(format!("{} (MA)", series.label))
    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 14, y)], color.stroke_width(2)));
    Ok(())
}

fn draw_peak<DB: DrawingBackend>(
    ctx: &mut DayChart<'_, DB>,
    days: &[NaiveDate],
    series: &SeriesData,
    peak: Peak,
    offset: f64,
    color: RGBColor,
) -> Result<()> {
    let Some(index) = days.iter().position(|d| *d == peak.date) else {
        tracing::warn!("Peak day {} is outside the chart range", peak.date);
        return Ok(());
    };
    let point = (index as f64 + offset, f64::from(peak.value));
    let text = format!(
        "Peak {}: {} • {}",
        series.label,
        peak.value,
        peak.date.format("%Y-%m-%d")
    );
    let style = (FONT, 15)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));

    ctx.draw_series(std::iter::once(Circle::new(point, 4, color.filled())))
        .map_err(ChartError::render)?;
    ctx.draw_series(std::iter::once(Text::new(text, point, style)))
        .map_err(ChartError::render)?;
    Ok(())
}
