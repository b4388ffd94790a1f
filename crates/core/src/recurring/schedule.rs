//! Pure date arithmetic for recurring series.
//!
//! Month-based frequencies clamp to month length: a series anchored on
//! Jan 31 lands on Feb 28/29, not Mar 3. Occurrences are always computed
//! from the series anchor (not the previous occurrence), so the anchored
//! day-of-month is recovered in longer months.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recurring generation frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every 7 days.
    Weekly,
    /// Every calendar month, same day-of-month with clamping.
    Monthly,
    /// Every 3 calendar months.
    Quarterly,
    /// Every 12 calendar months.
    Yearly,
}

impl Frequency {
    /// Returns the string representation of the frequency.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    /// Step size in months for month-based frequencies.
    const fn months_per_step(self) -> Option<u32> {
        match self {
            Self::Weekly => None,
            Self::Monthly => Some(1),
            Self::Quarterly => Some(3),
            Self::Yearly => Some(12),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of resolving the next occurrence of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occurrence {
    /// The series continues on this date.
    Next(NaiveDate),
    /// The series has reached its end date.
    Ended,
}

impl Occurrence {
    /// Returns the date if the series continues.
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Next(date) => Some(*date),
            Self::Ended => None,
        }
    }
}

/// Stateless resolver for recurring schedules.
pub struct Schedule;

impl Schedule {
    /// The n-th occurrence after the anchor (n = 0 is the anchor itself).
    ///
    /// Returns `None` only on calendar overflow, which cannot happen for
    /// realistic billing dates.
    #[must_use]
    pub fn nth_occurrence(frequency: Frequency, anchor: NaiveDate, n: u32) -> Option<NaiveDate> {
        match frequency.months_per_step() {
            None => anchor.checked_add_days(Days::new(7 * u64::from(n))),
            Some(step) => anchor.checked_add_months(Months::new(step.checked_mul(n)?)),
        }
    }

    /// Resolves the next occurrence after the anchor date.
    ///
    /// If `end_date` is set and the computed occurrence exceeds it, the
    /// series is `Ended`. No end date means indefinite recurrence.
    #[must_use]
    pub fn next_occurrence(
        frequency: Frequency,
        anchor: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Occurrence {
        Self::next_after(frequency, anchor, anchor, end_date)
    }

    /// Resolves the first occurrence strictly after `after`, stepping from
    /// the series anchor so the anchored day-of-month is preserved.
    #[must_use]
    pub fn next_after(
        frequency: Frequency,
        anchor: NaiveDate,
        after: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Occurrence {
        for n in 1..=u32::MAX {
            let Some(date) = Self::nth_occurrence(frequency, anchor, n) else {
                return Occurrence::Ended;
            };
            if date <= after {
                continue;
            }
            return match end_date {
                Some(end) if date > end => Occurrence::Ended,
                _ => Occurrence::Next(date),
            };
        }
        Occurrence::Ended
    }

    /// All occurrences of the series falling within `[start, end]`
    /// inclusive, for generation previews.
    #[must_use]
    pub fn occurrences_between(
        frequency: Frequency,
        anchor: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        for n in 0..=u32::MAX {
            let Some(date) = Self::nth_occurrence(frequency, anchor, n) else {
                break;
            };
            if date > end {
                break;
            }
            if date >= start {
                dates.push(date);
            }
        }
        dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_weekly_adds_seven_days() {
        assert_eq!(
            Schedule::next_occurrence(Frequency::Weekly, d(2024, 3, 1), None),
            Occurrence::Next(d(2024, 3, 8))
        );
    }

    #[test]
    fn test_monthly_leap_year_clamping_round_trip() {
        // Anchored on Jan 31 of a leap year: Feb clamps to 29, then the
        // anchored day-of-month is recovered in March, then April clamps
        // to 30.
        let anchor = d(2024, 1, 31);

        let first = Schedule::next_occurrence(Frequency::Monthly, anchor, None);
        assert_eq!(first, Occurrence::Next(d(2024, 2, 29)));

        let second = Schedule::next_after(Frequency::Monthly, anchor, d(2024, 2, 29), None);
        assert_eq!(second, Occurrence::Next(d(2024, 3, 31)));

        let third = Schedule::next_after(Frequency::Monthly, anchor, d(2024, 3, 31), None);
        assert_eq!(third, Occurrence::Next(d(2024, 4, 30)));
    }

    #[test]
    fn test_monthly_non_leap_february() {
        assert_eq!(
            Schedule::next_occurrence(Frequency::Monthly, d(2025, 1, 31), None),
            Occurrence::Next(d(2025, 2, 28))
        );
    }

    #[test]
    fn test_quarterly_and_yearly_steps() {
        assert_eq!(
            Schedule::next_occurrence(Frequency::Quarterly, d(2024, 1, 15), None),
            Occurrence::Next(d(2024, 4, 15))
        );
        assert_eq!(
            Schedule::next_occurrence(Frequency::Yearly, d(2024, 2, 29), None),
            // Feb 29 anchors clamp to Feb 28 in non-leap years.
            Occurrence::Next(d(2025, 2, 28))
        );
    }

    #[test]
    fn test_end_date_ends_series() {
        assert_eq!(
            Schedule::next_occurrence(Frequency::Monthly, d(2024, 1, 15), Some(d(2024, 2, 1))),
            Occurrence::Ended
        );
        // Landing exactly on the end date still counts.
        assert_eq!(
            Schedule::next_occurrence(Frequency::Monthly, d(2024, 1, 15), Some(d(2024, 2, 15))),
            Occurrence::Next(d(2024, 2, 15))
        );
    }

    #[test]
    fn test_no_end_date_means_indefinite() {
        let occurrence =
            Schedule::next_after(Frequency::Yearly, d(2000, 6, 1), d(2099, 12, 31), None);
        assert_eq!(occurrence, Occurrence::Next(d(2100, 6, 1)));
    }

    #[test]
    fn test_occurrences_between() {
        let dates = Schedule::occurrences_between(
            Frequency::Monthly,
            d(2024, 1, 31),
            d(2024, 2, 1),
            d(2024, 4, 30),
        );
        assert_eq!(dates, vec![d(2024, 2, 29), d(2024, 3, 31), d(2024, 4, 30)]);
    }

    #[test]
    fn test_occurrence_date_accessor() {
        assert_eq!(Occurrence::Next(d(2024, 1, 1)).date(), Some(d(2024, 1, 1)));
        assert_eq!(Occurrence::Ended.date(), None);
    }
}
