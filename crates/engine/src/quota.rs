//! The daily choice quota.
//!
//! A small state machine scoped to the device-local calendar date. Two
//! states: OPEN (fewer than 20 items chosen today) and EXHAUSTED (20
//! chosen). The only transitions are quota filling and the day rollover -
//! any query made on a new day first resets the chosen set. There is no
//! manual reset.
//!
//! All queries take `today` as a parameter so transitions stay pure; the
//! session layer supplies the real device-local date.

use catalog::ItemId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum number of distinct items a user may act on per day.
pub const DAILY_CHOICE_LIMIT: usize = 20;

/// Calendar-day-scoped set of chosen item ids.
///
/// The count is derived from the set, so recording the same item twice in
/// one day cannot inflate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyQuota {
    day: NaiveDate,
    chosen: HashSet<ItemId>,
}

impl Default for DailyQuota {
    /// An epoch-dated quota; the first query rolls it over to the caller's
    /// current day.
    fn default() -> Self {
        Self {
            day: NaiveDate::default(),
            chosen: HashSet::new(),
        }
    }
}

impl DailyQuota {
    /// Fresh quota for the given day.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            day: today,
            chosen: HashSet::new(),
        }
    }

    /// The calendar date this state is scoped to.
    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// The day-rollover transition: entering a new day clears the set.
    fn roll_over(&mut self, today: NaiveDate) {
        if self.day != today {
            self.day = today;
            self.chosen.clear();
        }
    }

    /// True iff today's quota is used up.
    pub fn is_exhausted(&mut self, today: NaiveDate) -> bool {
        self.roll_over(today);
        self.chosen.len() >= DAILY_CHOICE_LIMIT
    }

    /// Choices left today, clamped to zero.
    pub fn remaining(&mut self, today: NaiveDate) -> usize {
        self.roll_over(today);
        DAILY_CHOICE_LIMIT.saturating_sub(self.chosen.len())
    }

    /// Record an item as chosen today.
    ///
    /// Returns `false` without mutating when the quota is exhausted.
    /// Recording an id already chosen today succeeds but does not change
    /// the count.
    pub fn record_choice(&mut self, item_id: &str, today: NaiveDate) -> bool {
        self.roll_over(today);
        if self.chosen.len() >= DAILY_CHOICE_LIMIT {
            return false;
        }
        self.chosen.insert(item_id.to_string());
        true
    }

    /// The ids chosen today.
    pub fn chosen(&mut self, today: NaiveDate) -> &HashSet<ItemId> {
        self.roll_over(today);
        &self.chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_quota_fills_and_exhausts() {
        let mut quota = DailyQuota::new(day(1));

        for i in 0..DAILY_CHOICE_LIMIT {
            assert!(!quota.is_exhausted(day(1)));
            assert!(quota.record_choice(&i.to_string(), day(1)));
        }

        assert!(quota.is_exhausted(day(1)));
        assert_eq!(quota.remaining(day(1)), 0);

        // 21st choice is refused and the set stays at 20
        assert!(!quota.record_choice("21st", day(1)));
        assert_eq!(quota.chosen(day(1)).len(), DAILY_CHOICE_LIMIT);
    }

    #[test]
    fn test_repeat_choice_counts_once() {
        let mut quota = DailyQuota::new(day(1));

        assert!(quota.record_choice("42", day(1)));
        assert!(quota.record_choice("42", day(1)));

        assert_eq!(quota.remaining(day(1)), DAILY_CHOICE_LIMIT - 1);
    }

    #[test]
    fn test_day_rollover_resets() {
        let mut quota = DailyQuota::new(day(1));
        for i in 0..DAILY_CHOICE_LIMIT {
            quota.record_choice(&i.to_string(), day(1));
        }
        assert!(quota.is_exhausted(day(1)));

        // A query on the next day resets the state before evaluating
        assert!(!quota.is_exhausted(day(2)));
        assert_eq!(quota.remaining(day(2)), DAILY_CHOICE_LIMIT);
        assert_eq!(quota.day(), day(2));
        assert!(quota.chosen(day(2)).is_empty());
    }

    #[test]
    fn test_default_rolls_into_current_day() {
        let mut quota = DailyQuota::default();
        assert_eq!(quota.remaining(day(5)), DAILY_CHOICE_LIMIT);
        assert_eq!(quota.day(), day(5));
    }

    #[test]
    fn test_serde_round_trip_preserves_day_and_choices() {
        let mut quota = DailyQuota::new(day(3));
        quota.record_choice("a", day(3));
        quota.record_choice("b", day(3));

        let json = serde_json::to_string(&quota).unwrap();
        let mut back: DailyQuota = serde_json::from_str(&json).unwrap();

        assert_eq!(back, quota);
        assert_eq!(back.remaining(day(3)), DAILY_CHOICE_LIMIT - 2);
    }

    #[test]
    fn test_count_never_exceeds_limit() {
        let mut quota = DailyQuota::new(day(1));
        for i in 0..100 {
            quota.record_choice(&i.to_string(), day(1));
        }
        assert_eq!(quota.chosen(day(1)).len(), DAILY_CHOICE_LIMIT);
    }
}
