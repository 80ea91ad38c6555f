//! Outbound movement velocity.

use serde::{Deserialize, Serialize};

use scentstock_core::TimeSeriesPoint;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Movement rate projected to day/week/month granularity.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
}

impl Velocity {
    pub fn zero() -> Self {
        Self {
            daily: 0.0,
            weekly: 0.0,
            monthly: 0.0,
        }
    }

    fn from_daily(daily: f64) -> Self {
        Self {
            daily,
            weekly: daily * 7.0,
            monthly: daily * 30.0,
        }
    }
}

/// Total quantity divided by the elapsed days between first and last
/// observation, projected to day/week/month.
///
/// A single observation, or several sharing one timestamp, has zero elapsed
/// time; the total then stands in as a single-day rate instead of dividing
/// by zero. Empty input yields zero velocity.
pub fn calculate_velocity(series: &[TimeSeriesPoint]) -> Velocity {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Velocity::zero();
    };

    let total: f64 = series.iter().map(|p| p.quantity).sum();
    let elapsed_days =
        (last.occurred_at - first.occurred_at).num_seconds() as f64 / SECONDS_PER_DAY;

    if elapsed_days <= 0.0 {
        return Velocity::from_daily(total);
    }

    Velocity::from_daily(total / elapsed_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap()
    }

    fn point(day: u32, quantity: f64) -> TimeSeriesPoint {
        TimeSeriesPoint::new(at(day), quantity)
    }

    #[test]
    fn empty_series_has_zero_velocity() {
        let velocity = calculate_velocity(&[]);
        assert_eq!(velocity.daily, 0.0);
        assert_eq!(velocity.weekly, 0.0);
        assert_eq!(velocity.monthly, 0.0);
    }

    #[test]
    fn steady_sales_project_to_week_and_month() {
        // 10 units over 10 elapsed days.
        let series: Vec<_> = (1..=11).map(|d| point(d, 1.0)).collect();
        let velocity = calculate_velocity(&series);
        assert!((velocity.daily - 1.1).abs() < 1e-9);
        assert!((velocity.weekly - 7.7).abs() < 1e-9);
        assert!((velocity.monthly - 33.0).abs() < 1e-9);
    }

    #[test]
    fn single_observation_degenerates_to_raw_total() {
        let velocity = calculate_velocity(&[point(5, 4.0)]);
        assert_eq!(velocity.daily, 4.0);
        assert_eq!(velocity.weekly, 28.0);
        assert_eq!(velocity.monthly, 120.0);
    }

    #[test]
    fn same_timestamp_points_sum_as_one_day() {
        let velocity = calculate_velocity(&[point(5, 2.0), point(5, 3.0)]);
        assert_eq!(velocity.daily, 5.0);
    }
}
