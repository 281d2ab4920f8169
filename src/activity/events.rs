use std::collections::HashMap;

use chrono::NaiveDate;
use serde_json::Value;

use crate::activity::dates::calendar_date;
use crate::models::ActivitySeries;

/// Count events per calendar date of their `created_at` field.
///
/// A payload that is not an array yields no counts. Events without a
/// parsable timestamp are skipped.
pub fn fold_events(payload: &Value) -> HashMap<NaiveDate, u32> {
    let mut counts = HashMap::new();

    let Some(events) = payload.as_array() else {
        return counts;
    };

    for event in events {
        if let Some(date) = event
            .get("created_at")
            .and_then(Value::as_str)
            .and_then(calendar_date)
        {
            *counts.entry(date).or_insert(0) += 1;
        }
    }

    counts
}

pub fn reconstruct(payload: &Value, today: NaiveDate) -> ActivitySeries {
    ActivitySeries::from_counts(today, &fold_events(payload))
}
