use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// Number of calendar days covered by an [`ActivitySeries`].
pub const SERIES_DAYS: usize = 365;

/// Public events observed on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityDay {
    pub date: NaiveDate,
    pub contributions: u32,
}

/// Exactly [`SERIES_DAYS`] consecutive days ending at `today`, oldest first.
///
/// Every date in `[today - 364, today]` appears once, zero-filled when no
/// events were seen. The constructors are the only way to build one, so the
/// shape holds for every value of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActivitySeries {
    days: Vec<ActivityDay>,
}

impl ActivitySeries {
    pub fn from_counts(today: NaiveDate, counts: &HashMap<NaiveDate, u32>) -> Self {
        let days = (0..SERIES_DAYS as i64)
            .rev()
            .map(|offset| {
                let date = today - Duration::days(offset);
                ActivityDay {
                    date,
                    contributions: counts.get(&date).copied().unwrap_or(0),
                }
            })
            .collect();

        Self { days }
    }

    /// All-zero series, used when the event feed is unavailable.
    pub fn empty(today: NaiveDate) -> Self {
        Self::from_counts(today, &HashMap::new())
    }

    pub fn days(&self) -> &[ActivityDay] {
        &self.days
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActivityDay> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.last().map(|d| d.date)
    }

    pub fn total_contributions(&self) -> u64 {
        self.days.iter().map(|d| d.contributions as u64).sum()
    }

    pub fn active_days(&self) -> usize {
        self.days.iter().filter(|d| d.contributions > 0).count()
    }

    pub fn max_contributions(&self) -> u32 {
        self.days.iter().map(|d| d.contributions).max().unwrap_or(0)
    }

    /// Day with the most events; the most recent one wins ties.
    pub fn busiest_day(&self) -> Option<&ActivityDay> {
        self.days
            .iter()
            .filter(|d| d.contributions > 0)
            .max_by_key(|d| d.contributions)
    }

    pub fn longest_streak(&self) -> usize {
        let mut longest = 0;
        let mut current = 0;
        for day in &self.days {
            if day.contributions > 0 {
                current += 1;
                longest = longest.max(current);
            } else {
                current = 0;
            }
        }
        longest
    }

    /// Run of active days ending today, or ending yesterday if today has
    /// no events yet.
    pub fn current_streak(&self) -> usize {
        let mut days = self.days.iter().rev().peekable();
        if days.peek().is_some_and(|d| d.contributions == 0) {
            days.next();
        }
        days.take_while(|d| d.contributions > 0).count()
    }

    /// Heatmap shade from 0 (no events) to 5, relative to the busiest day.
    pub fn intensity(&self, contributions: u32) -> u8 {
        let max = self.max_contributions();
        if contributions == 0 || max == 0 {
            return 0;
        }
        let ratio = contributions as f64 / max as f64;
        match ratio {
            r if r <= 0.2 => 1,
            r if r <= 0.4 => 2,
            r if r <= 0.6 => 3,
            r if r <= 0.8 => 4,
            _ => 5,
        }
    }

    /// Week columns for a calendar grid, Sunday first. The first column is
    /// padded with `None` before the oldest day and the last after today.
    pub fn weeks(&self) -> Vec<[Option<&ActivityDay>; 7]> {
        let lead = self
            .days
            .first()
            .map(|d| d.date.weekday().num_days_from_sunday() as usize)
            .unwrap_or(0);

        let cells: Vec<Option<&ActivityDay>> = std::iter::repeat(None)
            .take(lead)
            .chain(self.days.iter().map(Some))
            .collect();

        cells
            .chunks(7)
            .map(|chunk| {
                let mut week = [None; 7];
                week[..chunk.len()].copy_from_slice(chunk);
                week
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a ActivitySeries {
    type Item = &'a ActivityDay;
    type IntoIter = std::slice::Iter<'a, ActivityDay>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}
