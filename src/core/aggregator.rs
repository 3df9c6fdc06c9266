use crate::domain::model::Message;
use chrono::{NaiveDate, TimeZone};
use std::collections::BTreeMap;

/// Message counts per calendar day, ascending by date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailySeries {
    counts: BTreeMap<NaiveDate, u32>,
}

impl DailySeries {
    /// Groups messages by their calendar date in `tz`.
    pub fn from_messages<'a, Tz, I>(messages: I, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        I: IntoIterator<Item = &'a Message>,
    {
        let mut counts = BTreeMap::new();
        for date in messages.into_iter().filter_map(|m| m.date) {
            let day = date.with_timezone(tz).date_naive();
            *counts.entry(day).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn get(&self, day: NaiveDate) -> u32 {
        self.counts.get(&day).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u32)> + '_ {
        self.counts.iter().map(|(day, count)| (*day, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct days with at least one message.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.counts.keys().next().copied()
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.counts.keys().next_back().copied()
    }

    /// Zero-filled counts for every day of `range`.
    pub fn densify(&self, range: &DateRange) -> Vec<u32> {
        range.days().map(|day| self.get(day)).collect()
    }
}

/// Inclusive span of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DateRange {
    /// Smallest range containing every day present in any of the series.
    pub fn covering<'a, I>(series: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a DailySeries>,
    {
        series
            .into_iter()
            .filter_map(|s| Some((s.first_day()?, s.last_day()?)))
            .reduce(|(first, last), (f, l)| (first.min(f), last.max(l)))
            .map(|(first, last)| Self { first, last })
    }

    pub fn days_span(&self) -> usize {
        (self.last - self.first).num_days() as usize + 1
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.first.iter_days().take(self.days_span())
    }
}

/// Both sides densified over the same range, position `i` being day `first + i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedSeries {
    pub range: DateRange,
    pub days: Vec<NaiveDate>,
    pub mine: Vec<u32>,
    pub theirs: Vec<u32>,
}

impl AlignedSeries {
    pub fn new(mine: &DailySeries, theirs: &DailySeries) -> Option<Self> {
        let range = DateRange::covering([mine, theirs])?;
        Some(Self {
            range,
            days: range.days().collect(),
            mine: mine.densify(&range),
            theirs: theirs.densify(&range),
        })
    }

    pub fn days_span(&self) -> usize {
        self.days.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::parse_timestamp;
    use chrono::{FixedOffset, Utc};

    fn message_at(ts: &str) -> Message {
        Message {
            id: 0,
            kind: Some("message".to_string()),
            date: Some(parse_timestamp(ts).unwrap()),
            outbound: Some(true),
            from: None,
            from_id: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_groups_by_calendar_day_in_zone() {
        let messages = vec![
            message_at("2024-01-01T08:00:00+00:00"),
            message_at("2024-01-01T22:30:00+00:00"),
            message_at("2024-01-03T10:00:00+00:00"),
        ];

        let utc = DailySeries::from_messages(&messages, &Utc);
        assert_eq!(utc.iter().collect::<Vec<_>>(), vec![(day(2024, 1, 1), 2), (day(2024, 1, 3), 1)]);

        // 22:30 UTC is already the next day at UTC+3
        let plus3 = FixedOffset::east_opt(3 * 3600).unwrap();
        let shifted = DailySeries::from_messages(&messages, &plus3);
        assert_eq!(shifted.get(day(2024, 1, 1)), 1);
        assert_eq!(shifted.get(day(2024, 1, 2)), 1);
        assert_eq!(shifted.get(day(2024, 1, 3)), 1);
    }

    #[test]
    fn test_densify_fills_gaps_with_zero() {
        let messages = vec![
            message_at("2024-02-27T12:00:00Z"),
            message_at("2024-02-27T13:00:00Z"),
            message_at("2024-03-02T12:00:00Z"),
        ];
        let series = DailySeries::from_messages(&messages, &Utc);
        let range = DateRange::covering([&series]).unwrap();

        // 2024 is a leap year
        assert_eq!(range.days_span(), 5);
        let dense = series.densify(&range);
        assert_eq!(dense, vec![2, 0, 0, 0, 1]);
        assert_eq!(dense.iter().sum::<u32>() as usize, messages.len());
    }

    #[test]
    fn test_range_is_union_of_both_sides() {
        let mine = DailySeries::from_messages(&[message_at("2024-06-10T12:00:00Z")], &Utc);
        let theirs = DailySeries::from_messages(
            &[message_at("2024-06-05T12:00:00Z"), message_at("2024-06-07T12:00:00Z")],
            &Utc,
        );

        let aligned = AlignedSeries::new(&mine, &theirs).unwrap();

        assert_eq!(aligned.range.first, day(2024, 6, 5));
        assert_eq!(aligned.range.last, day(2024, 6, 10));
        assert_eq!(aligned.days_span(), 6);
        assert_eq!(aligned.mine, vec![0, 0, 0, 0, 0, 1]);
        assert_eq!(aligned.theirs, vec![1, 0, 1, 0, 0, 0]);
        assert_eq!(aligned.days.first(), Some(&day(2024, 6, 5)));
        assert_eq!(aligned.days.last(), Some(&day(2024, 6, 10)));
    }

    #[test]
    fn test_empty_side_still_aligned() {
        let mine = DailySeries::from_messages(
            &[message_at("2024-06-01T12:00:00Z"), message_at("2024-06-03T12:00:00Z")],
            &Utc,
        );
        let theirs = DailySeries::default();

        let aligned = AlignedSeries::new(&mine, &theirs).unwrap();

        assert_eq!(aligned.mine, vec![1, 0, 1]);
        assert_eq!(aligned.theirs, vec![0, 0, 0]);
    }

    #[test]
    fn test_no_days_means_no_range() {
        let empty = DailySeries::default();
        assert!(DateRange::covering([&empty, &empty]).is_none());
        assert!(AlignedSeries::new(&empty, &empty).is_none());
    }

    #[test]
    fn test_single_day_range() {
        let series = DailySeries::from_messages(&[message_at("2024-06-01T12:00:00Z")], &Utc);
        let range = DateRange::covering([&series]).unwrap();
        assert_eq!(range.days_span(), 1);
        assert_eq!(series.densify(&range), vec![1]);
    }
}
