use crate::core::aggregator::DailySeries;
use crate::domain::model::{ChartData, Peak, SideSummary};
use std::fmt;

/// Busiest day. Ties keep the earliest date.
pub fn find_peak(series: &DailySeries) -> Option<Peak> {
    series.iter().fold(None, |best: Option<Peak>, (date, value)| match best {
        Some(peak) if peak.value >= value => Some(peak),
        _ => Some(Peak { date, value }),
    })
}

pub fn average_per_day(total: u64, days_span: usize) -> f64 {
    if days_span > 0 {
        total as f64 / days_span as f64
    } else {
        0.0
    }
}

pub fn summarize(series: &DailySeries, dense: &[u32], days_span: usize) -> SideSummary {
    let total: u64 = dense.iter().map(|&c| u64::from(c)).sum();
    SideSummary {
        total,
        peak: find_peak(series),
        average: average_per_day(total, days_span),
    }
}

/// Console summary printed before the chart is drawn.
pub struct SummaryReport<'a>(pub &'a ChartData);

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chart = self.0;
        writeln!(f, "--- Summary ---")?;
        if let (Some(first), Some(last)) = (chart.first_day(), chart.last_day()) {
            writeln!(
                f,
                "{:<14}{} .. {} ({} days)",
                "Range:",
                first.format("%Y-%m-%d"),
                last.format("%Y-%m-%d"),
                chart.days_span()
            )?;
        }
        for series in [&chart.mine, &chart.theirs] {
            let summary = &series.summary;
            let peak_day = summary
                .peak
                .map(|p| p.date.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "{:<14}total {}, peak {} on {}, average {:.2}/day",
                format!("{}:", series.label),
                summary.total,
                summary.peak_value(),
                peak_day,
                summary.average
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{parse_timestamp, Message, SeriesData};
    use chrono::{NaiveDate, Utc};

    fn series(timestamps: &[&str]) -> DailySeries {
        let messages: Vec<Message> = timestamps
            .iter()
            .map(|ts| Message {
                id: 0,
                kind: Some("message".to_string()),
                date: Some(parse_timestamp(ts).unwrap()),
                outbound: None,
                from: None,
                from_id: None,
            })
            .collect();
        DailySeries::from_messages(&messages, &Utc)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    #[test]
    fn test_unique_peak() {
        let s = series(&[
            "2024-04-01T10:00:00Z",
            "2024-04-02T10:00:00Z",
            "2024-04-02T11:00:00Z",
            "2024-04-02T12:00:00Z",
            "2024-04-03T10:00:00Z",
        ]);
        assert_eq!(find_peak(&s), Some(Peak { date: day(2), value: 3 }));
    }

    #[test]
    fn test_tied_peak_keeps_earliest_day() {
        let s = series(&[
            "2024-04-05T10:00:00Z",
            "2024-04-05T11:00:00Z",
            "2024-04-01T10:00:00Z",
            "2024-04-01T11:00:00Z",
            "2024-04-03T10:00:00Z",
        ]);
        assert_eq!(find_peak(&s), Some(Peak { date: day(1), value: 2 }));
    }

    #[test]
    fn test_empty_side_has_no_peak() {
        let s = DailySeries::default();
        let summary = summarize(&s, &[0, 0, 0], 3);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.peak_value(), 0);
        assert!(summary.peak.is_none());
        assert_eq!(summary.average, 0.0);
    }

    #[test]
    fn test_summarize_totals_and_average() {
        let s = series(&["2024-04-01T10:00:00Z", "2024-04-04T10:00:00Z", "2024-04-04T12:00:00Z"]);
        let summary = summarize(&s, &[1, 0, 0, 2], 4);
        assert_eq!(summary.total, 3);
        assert!((summary.average - 0.75).abs() < 1e-9);
        assert_eq!(average_per_day(10, 0), 0.0);
    }

    #[test]
    fn test_summary_report_format() {
        let mine = SideSummary {
            total: 3,
            peak: Some(Peak { date: day(2), value: 2 }),
            average: 1.5,
        };
        let theirs = SideSummary {
            total: 0,
            peak: None,
            average: 0.0,
        };
        let chart = ChartData {
            title: "t".to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            width: 1400,
            height: 700,
            days: vec![day(1), day(2)],
            window: 3,
            mine: SeriesData {
                label: "You".to_string(),
                counts: vec![1, 2],
                smoothed: vec![1.5, 1.5],
                summary: mine,
            },
            theirs: SeriesData {
                label: "Alice".to_string(),
                counts: vec![0, 0],
                smoothed: vec![0.0, 0.0],
                summary: theirs,
            },
        };

        let report = SummaryReport(&chart).to_string();

        assert!(report.contains("2024-04-01 .. 2024-04-02 (2 days)"));
        assert!(report.contains("You:"));
        assert!(report.contains("total 3, peak 2 on 2024-04-02, average 1.50/day"));
        assert!(report.contains("total 0, peak 0 on -, average 0.00/day"));
    }
}
