use crate::models::ActivitySeries;

/// Cell glyph per intensity level, 0 through 5.
const SHADES: [char; 6] = ['·', '▁', '▃', '▅', '▇', '█'];

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Plain-text contribution grid: one row per weekday (Sunday first), one
/// column per week, oldest week on the left. Padding cells before the first
/// day and after today are blank. The last row is a shade legend.
pub fn render_heatmap(series: &ActivitySeries) -> Vec<String> {
    let weeks = series.weeks();

    let mut rows: Vec<String> = WEEKDAYS
        .iter()
        .enumerate()
        .map(|(weekday, label)| {
            let cells: String = weeks
                .iter()
                .map(|week| match week[weekday] {
                    Some(day) => SHADES[series.intensity(day.contributions) as usize],
                    None => ' ',
                })
                .collect();
            format!("{} {}", label, cells.trim_end())
        })
        .collect();

    let legend: Vec<String> = SHADES.iter().map(char::to_string).collect();
    rows.push(format!("    less {} more", legend.join(" ")));
    rows
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_quiet_year_is_all_dots() {
        // 2024-06-15 is a Saturday, so the year fills 53 whole weeks.
        let rows = render_heatmap(&ActivitySeries::empty(date("2024-06-15")));
        assert_eq!(rows.len(), 8);

        let saturday = &rows[6];
        assert!(saturday.starts_with("Sat "));
        assert_eq!(saturday.chars().skip(4).count(), 53);
        assert!(saturday.chars().skip(4).all(|c| c == '·'));

        // The oldest day is a Saturday; earlier cells in that week are blank.
        assert!(rows[0].starts_with("Sun  ·"));
    }

    #[test]
    fn test_busiest_day_is_darkest() {
        let mut counts = HashMap::new();
        counts.insert(date("2024-06-15"), 10);
        counts.insert(date("2024-06-09"), 1);
        let series = ActivitySeries::from_counts(date("2024-06-15"), &counts);

        let rows = render_heatmap(&series);
        assert!(rows[6].ends_with('█'));
        assert!(rows[0].ends_with('▁'));
        assert!(rows[1].ends_with('·'));
    }

    #[test]
    fn test_cells_after_today_are_blank() {
        // Wednesday: Thursday through Saturday of the last week are padding.
        let rows = render_heatmap(&ActivitySeries::empty(date("2024-06-12")));
        assert!(rows[3].ends_with('·'));
        assert_eq!(rows[4].chars().count(), rows[3].chars().count() - 1);
        assert!(rows[7].contains("less · ▁ ▃ ▅ ▇ █ more"));
    }
}
