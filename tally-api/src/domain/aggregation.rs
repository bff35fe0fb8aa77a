//! Monthly roll-ups and yearly target progress.
//!
//! Everything here is pure: the same entries and rates always produce the
//! same output. Hours and money stay exact decimals; rounding is left to
//! whoever formats the numbers for display.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use super::models::{MonthlyStat, ProgressStat, ProjectId, TimeEntry};

/// Group a user's entries for `year` into per-month hours and revenue.
///
/// Only months with at least one entry are returned, ascending by month.
/// Entries outside `year` are ignored. An entry whose project has no known
/// rate still counts towards hours but adds no revenue.
pub fn monthly_stats(
    year: i32,
    entries: &[TimeEntry],
    rates: &HashMap<ProjectId, Decimal>,
) -> Vec<MonthlyStat> {
    let mut months: BTreeMap<u8, MonthlyStat> = BTreeMap::new();

    for entry in entries.iter().filter(|e| e.date.year() == year) {
        let month = u8::from(entry.date.month());
        let stat = months
            .entry(month)
            .or_insert_with(|| MonthlyStat::empty(month));

        stat.total_hours += entry.hours;
        match rates.get(&entry.project_id) {
            Some(rate) => stat.total_revenue += entry.hours * *rate,
            None => tracing::warn!(
                entry_id = %entry.id,
                project_id = %entry.project_id,
                "no hourly rate for project, entry adds no revenue"
            ),
        }
    }

    months.into_values().collect()
}

/// Expand a sparse monthly report to all twelve months.
pub fn zero_filled(stats: Vec<MonthlyStat>) -> Vec<MonthlyStat> {
    let mut by_month: BTreeMap<u8, MonthlyStat> =
        stats.into_iter().map(|s| (s.month, s)).collect();

    (1..=12)
        .map(|month| {
            by_month
                .remove(&month)
                .unwrap_or_else(|| MonthlyStat::empty(month))
        })
        .collect()
}

pub fn yearly_revenue(stats: &[MonthlyStat]) -> Decimal {
    stats.iter().map(|s| s.total_revenue).sum()
}

/// Progress of `current_amount` towards `yearly_target`, in percent.
///
/// A zero target yields 0% rather than dividing by zero.
pub fn progress(current_amount: Decimal, yearly_target: Decimal) -> ProgressStat {
    let progress_percentage = if yearly_target > Decimal::ZERO {
        (current_amount * Decimal::ONE_HUNDRED / yearly_target).normalize()
    } else {
        Decimal::ZERO
    };

    ProgressStat {
        current_amount,
        yearly_target,
        progress_percentage,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::{
        macros::{date, datetime},
        Date,
    };

    use super::*;
    use crate::domain::models::{TimeEntryId, UserId};

    fn entry(id: i32, project: i32, date: Date, hours: Decimal) -> TimeEntry {
        TimeEntry {
            id: TimeEntryId::new(id),
            user_id: UserId::new(1),
            project_id: ProjectId::new(project),
            date,
            hours,
            description: None,
            created_at: datetime!(2024-01-01 0:00 UTC),
            updated_at: datetime!(2024-01-01 0:00 UTC),
        }
    }

    fn rates() -> HashMap<ProjectId, Decimal> {
        HashMap::from([
            (ProjectId::new(1), dec!(100)),
            (ProjectId::new(2), dec!(87.35)),
        ])
    }

    #[test]
    fn groups_by_month_sparse_and_ascending() {
        let entries = vec![
            entry(1, 1, date!(2024 - 11 - 04), dec!(2)),
            entry(2, 1, date!(2024 - 03 - 01), dec!(8)),
            entry(3, 1, date!(2024 - 03 - 01), dec!(16)),
            entry(4, 2, date!(2024 - 01 - 15), dec!(7.5)),
        ];

        let stats = monthly_stats(2024, &entries, &rates());

        assert_eq!(
            stats,
            vec![
                MonthlyStat {
                    month: 1,
                    total_hours: dec!(7.5),
                    total_revenue: dec!(655.125),
                },
                MonthlyStat {
                    month: 3,
                    total_hours: dec!(24),
                    total_revenue: dec!(2400),
                },
                MonthlyStat {
                    month: 11,
                    total_hours: dec!(2),
                    total_revenue: dec!(200),
                },
            ]
        );
    }

    #[test]
    fn ignores_entries_from_other_years() {
        let entries = vec![
            entry(1, 1, date!(2023 - 12 - 31), dec!(5)),
            entry(2, 1, date!(2024 - 01 - 01), dec!(1)),
        ];

        let stats = monthly_stats(2024, &entries, &rates());
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].total_hours, dec!(1));
    }

    #[test]
    fn missing_rate_counts_hours_without_revenue() {
        let entries = vec![entry(1, 99, date!(2024 - 05 - 05), dec!(3))];

        let stats = monthly_stats(2024, &entries, &rates());
        assert_eq!(stats[0].total_hours, dec!(3));
        assert_eq!(stats[0].total_revenue, Decimal::ZERO);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let entries = vec![
            entry(1, 2, date!(2024 - 02 - 01), dec!(0.33)),
            entry(2, 2, date!(2024 - 02 - 02), dec!(1.67)),
            entry(3, 1, date!(2024 - 07 - 01), dec!(4.25)),
        ];

        let first = monthly_stats(2024, &entries, &rates());
        let second = monthly_stats(2024, &entries, &rates());
        assert_eq!(first, second);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.total_revenue.serialize(), b.total_revenue.serialize());
        }
    }

    #[test]
    fn monthly_revenue_sums_to_direct_total() {
        let entries = vec![
            entry(1, 2, date!(2024 - 02 - 01), dec!(0.33)),
            entry(2, 2, date!(2024 - 02 - 02), dec!(1.67)),
            entry(3, 1, date!(2024 - 07 - 01), dec!(4.25)),
            entry(4, 2, date!(2024 - 12 - 24), dec!(7.77)),
        ];
        let rates = rates();

        let direct: Decimal = entries
            .iter()
            .map(|e| e.hours * rates[&e.project_id])
            .sum();
        let stats = monthly_stats(2024, &entries, &rates);

        assert_eq!(yearly_revenue(&stats), direct);
    }

    #[test]
    fn zero_fill_produces_twelve_months() {
        let stats = vec![MonthlyStat {
            month: 3,
            total_hours: dec!(24),
            total_revenue: dec!(2400),
        }];

        let filled = zero_filled(stats);
        assert_eq!(filled.len(), 12);
        assert_eq!(filled[0], MonthlyStat::empty(1));
        assert_eq!(filled[2].total_revenue, dec!(2400));
        assert_eq!(filled[11].month, 12);
    }

    #[test]
    fn progress_is_percentage_of_target() {
        let stat = progress(dec!(12500), dec!(50000));
        assert_eq!(stat.progress_percentage, dec!(25.0));
        assert_eq!(stat.current_amount, dec!(12500));
        assert_eq!(stat.yearly_target, dec!(50000));
    }

    #[test]
    fn zero_target_never_divides() {
        let stat = progress(dec!(12500), Decimal::ZERO);
        assert_eq!(stat.progress_percentage, Decimal::ZERO);
    }

    #[test]
    fn raw_progress_can_exceed_hundred_but_clamped_cannot() {
        let stat = progress(dec!(75000), dec!(50000));
        assert_eq!(stat.progress_percentage, dec!(150));

        let clamped = stat.clone().clamped();
        assert_eq!(clamped.progress_percentage, dec!(100));
        assert_eq!(clamped.current_amount, stat.current_amount);
    }
}
