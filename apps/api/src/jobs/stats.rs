//! Pipeline statistics for the dashboard cards and the activity chart.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use tracing::warn;

use crate::models::job::JobStatus;

/// Length of the activity series, today included.
pub const ACTIVITY_WINDOW_DAYS: u64 = 14;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineStats {
    pub total: i64,
    pub by_status: HashMap<JobStatus, i64>,
    /// Applied or interviewing.
    pub in_progress: i64,
    /// Oldest first, ends with `today`.
    pub activity: Vec<DailyActivity>,
}

/// First day of the activity window ending on `today`.
pub fn window_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(ACTIVITY_WINDOW_DAYS - 1))
        .unwrap_or(today)
}

/// Folds raw per-status and per-day counts into the dashboard summary.
/// Unknown status strings are logged and left out.
pub fn compute_stats(
    status_counts: &[(String, i64)],
    daily_counts: &[(NaiveDate, i64)],
    today: NaiveDate,
) -> PipelineStats {
    let mut by_status: HashMap<JobStatus, i64> =
        JobStatus::ALL.into_iter().map(|s| (s, 0)).collect();

    for (raw, count) in status_counts {
        match raw.parse::<JobStatus>() {
            Ok(status) => *by_status.entry(status).or_default() += count,
            Err(e) => warn!("Skipping job count with {e}"),
        }
    }

    let total = by_status.values().sum();
    let in_progress = by_status[&JobStatus::Applied] + by_status[&JobStatus::Interview];

    let per_day: HashMap<NaiveDate, i64> = daily_counts.iter().copied().collect();
    let activity = window_start(today)
        .iter_days()
        .take(ACTIVITY_WINDOW_DAYS as usize)
        .map(|date| DailyActivity {
            date,
            count: per_day.get(&date).copied().unwrap_or(0),
        })
        .collect();

    PipelineStats {
        total,
        by_status,
        in_progress,
        activity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_counts_are_grouped_by_status() {
        let counts = vec![
            ("SAVED".to_string(), 5),
            ("APPLIED".to_string(), 3),
            ("INTERVIEW".to_string(), 2),
            ("OFFER".to_string(), 1),
        ];
        let stats = compute_stats(&counts, &[], day(2026, 10, 16));

        assert_eq!(stats.total, 11);
        assert_eq!(stats.in_progress, 5);
        assert_eq!(stats.by_status[&JobStatus::Offer], 1);
        assert_eq!(stats.by_status[&JobStatus::Rejected], 0);
    }

    #[test]
    fn test_unknown_status_is_ignored() {
        let counts = vec![("SAVED".to_string(), 2), ("ARCHIVED".to_string(), 7)];
        let stats = compute_stats(&counts, &[], day(2026, 10, 16));
        assert_eq!(stats.total, 2);
    }

    #[test]
    fn test_activity_covers_fourteen_days_ending_today() {
        let today = day(2026, 10, 16);
        let daily = vec![(day(2026, 10, 3), 2), (today, 1), (day(2026, 9, 1), 9)];
        let stats = compute_stats(&[], &daily, today);

        assert_eq!(stats.activity.len(), 14);
        assert_eq!(stats.activity[0], DailyActivity { date: day(2026, 10, 3), count: 2 });
        assert_eq!(stats.activity[13], DailyActivity { date: today, count: 1 });
        assert_eq!(stats.activity.iter().map(|a| a.count).sum::<i64>(), 3);
    }

    #[test]
    fn test_window_crosses_month_boundary() {
        assert_eq!(window_start(day(2026, 3, 5)), day(2026, 2, 20));
    }
}
