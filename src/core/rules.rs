//! Load limit rules
//!
//! The validator runs `RULE_CHAIN` in order and stops at the first rule that
//! fails; that rule names the rejection reason. Rules only read a customer's
//! history.
//!
//! The count rule counts every earlier attempt in the day window, accepted or
//! not. The amount rules only sum accepted loads, since a rejected load never
//! moved money. Both kinds add the incoming request before comparing, and a
//! total that lands exactly on a ceiling is rejected.

use crate::core::history_store::CustomerHistory;
use crate::core::window::{day_window_start, week_window_start};
use crate::types::{Limits, LoadRequest, RejectionReason};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A single load limit rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The load id has not been used by this customer before
    UniqueId,

    /// Fewer than `daily_transactions` attempts earlier in the day
    DailyCount,

    /// Accepted loads in the day plus this one stay below `daily_amount`
    DailyAmount,

    /// Accepted loads in the week plus this one stay below `weekly_amount`
    WeeklyAmount,
}

/// Rules in evaluation order
pub const RULE_CHAIN: [Rule; 4] = [
    Rule::UniqueId,
    Rule::DailyCount,
    Rule::DailyAmount,
    Rule::WeeklyAmount,
];

impl Rule {
    /// Check the rule for a request against the customer's history
    pub fn passes(self, request: &LoadRequest, limits: &Limits, history: &CustomerHistory) -> bool {
        match self {
            Rule::UniqueId => !history.contains_id(request.id),
            Rule::DailyCount => {
                let attempts = history
                    .within(day_window_start(&request.time), request.time)
                    .count();
                attempts < limits.daily_transactions as usize
            }
            Rule::DailyAmount => {
                accepted_total(history, day_window_start(&request.time), request)
                    < limits.daily_amount_ceiling()
            }
            Rule::WeeklyAmount => {
                accepted_total(history, week_window_start(&request.time), request)
                    < limits.weekly_amount_ceiling()
            }
        }
    }

    /// Reason reported when this rule fails
    pub fn rejection(self) -> RejectionReason {
        match self {
            Rule::UniqueId => RejectionReason::DuplicateId,
            Rule::DailyCount => RejectionReason::DailyCountExceeded,
            Rule::DailyAmount => RejectionReason::DailyAmountExceeded,
            Rule::WeeklyAmount => RejectionReason::WeeklyAmountExceeded,
        }
    }
}

/// First rule in the chain that the request fails, if any
pub fn first_failure(
    request: &LoadRequest,
    limits: &Limits,
    history: &CustomerHistory,
) -> Option<Rule> {
    RULE_CHAIN
        .into_iter()
        .find(|rule| !rule.passes(request, limits, history))
}

/// Request amount plus accepted loads strictly between `after` and the request
fn accepted_total(history: &CustomerHistory, after: DateTime<Utc>, request: &LoadRequest) -> Decimal {
    history
        .within(after, request.time)
        .filter(|decision| decision.is_accepted())
        .fold(request.load_amount, |total, decision| {
            total.saturating_add(decision.load_amount)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CustomerId, Decision, LoadId};
    use chrono::TimeZone;
    use rstest::rstest;

    const LIMITS: Limits = Limits {
        daily_amount: 5000,
        daily_transactions: 3,
        weekly_amount: 20000,
    };

    const CUSTOMER: CustomerId = 1;

    // 2000-01-03 is a Monday
    fn at(day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2000, 1, day, hour, min, sec).unwrap()
    }

    fn request(id: LoadId, amount: i64, time: DateTime<Utc>) -> LoadRequest {
        LoadRequest {
            id,
            customer_id: CUSTOMER,
            load_amount: Decimal::new(amount, 0),
            time,
        }
    }

    fn history(entries: &[(LoadId, i64, DateTime<Utc>, bool)]) -> CustomerHistory {
        let mut history = CustomerHistory::new();
        for &(id, amount, time, accepted) in entries {
            let request = request(id, amount, time);
            history.push(if accepted {
                Decision::accepted(&request)
            } else {
                Decision::rejected(&request, RejectionReason::DailyAmountExceeded)
            });
        }
        history
    }

    #[test]
    fn test_rule_chain_order() {
        assert_eq!(
            RULE_CHAIN,
            [
                Rule::UniqueId,
                Rule::DailyCount,
                Rule::DailyAmount,
                Rule::WeeklyAmount
            ]
        );
    }

    #[rstest]
    #[case::unique_id(Rule::UniqueId)]
    #[case::daily_count(Rule::DailyCount)]
    #[case::daily_amount(Rule::DailyAmount)]
    #[case::weekly_amount(Rule::WeeklyAmount)]
    fn test_empty_history_passes_small_load(#[case] rule: Rule) {
        let request = request(1, 100, at(3, 12, 0, 0));
        assert!(rule.passes(&request, &LIMITS, &CustomerHistory::new()));
    }

    #[rstest]
    #[case::same_time_accepted(&[(1, 100, at(3, 12, 0, 0), true)], false)]
    #[case::rejected_earlier(&[(1, 100, at(1, 8, 0, 0), false)], false)]
    #[case::later_timestamp(&[(1, 100, at(9, 8, 0, 0), true)], false)]
    #[case::different_id(&[(2, 100, at(3, 11, 0, 0), true)], true)]
    fn test_unique_id(
        #[case] entries: &[(LoadId, i64, DateTime<Utc>, bool)],
        #[case] expected: bool,
    ) {
        let request = request(1, 100, at(3, 12, 0, 0));
        assert_eq!(
            Rule::UniqueId.passes(&request, &LIMITS, &history(entries)),
            expected
        );
    }

    #[rstest]
    #[case::two_earlier(&[(1, 10, at(3, 8, 0, 0), true), (2, 10, at(3, 9, 0, 0), true)], true)]
    #[case::three_earlier(&[(1, 10, at(3, 8, 0, 0), true), (2, 10, at(3, 9, 0, 0), true), (3, 10, at(3, 10, 0, 0), true)], false)]
    #[case::rejected_attempts_count(&[(1, 9000, at(3, 8, 0, 0), false), (2, 9000, at(3, 9, 0, 0), false), (3, 9000, at(3, 10, 0, 0), false)], false)]
    #[case::midnight_counts(&[(1, 10, at(3, 0, 0, 0), true), (2, 10, at(3, 9, 0, 0), true), (3, 10, at(3, 10, 0, 0), true)], false)]
    #[case::previous_day_ignored(&[(1, 10, at(2, 23, 59, 59), true), (2, 10, at(3, 9, 0, 0), true), (3, 10, at(3, 10, 0, 0), true)], true)]
    #[case::same_instant_ignored(&[(1, 10, at(3, 8, 0, 0), true), (2, 10, at(3, 9, 0, 0), true), (3, 10, at(3, 12, 0, 0), true)], true)]
    #[case::later_ignored(&[(1, 10, at(3, 8, 0, 0), true), (2, 10, at(3, 9, 0, 0), true), (3, 10, at(3, 18, 0, 0), true)], true)]
    fn test_daily_count(
        #[case] entries: &[(LoadId, i64, DateTime<Utc>, bool)],
        #[case] expected: bool,
    ) {
        let request = request(99, 1, at(3, 12, 0, 0));
        assert_eq!(
            Rule::DailyCount.passes(&request, &LIMITS, &history(entries)),
            expected
        );
    }

    #[rstest]
    #[case::alone_below(&[], 4999, true)]
    #[case::alone_at_ceiling(&[], 5000, false)]
    #[case::alone_above(&[], 5001, false)]
    #[case::sum_reaches_ceiling(&[(1, 3000, at(3, 8, 0, 0), true)], 2000, false)]
    #[case::sum_below_ceiling(&[(1, 3000, at(3, 8, 0, 0), true)], 1999, true)]
    #[case::rejected_excluded(&[(1, 6000, at(3, 8, 0, 0), false)], 100, true)]
    #[case::previous_day_excluded(&[(1, 4000, at(2, 23, 59, 59), true)], 4000, true)]
    #[case::midnight_included(&[(1, 4000, at(3, 0, 0, 0), true)], 1000, false)]
    #[case::same_instant_excluded(&[(1, 4000, at(3, 12, 0, 0), true)], 4000, true)]
    fn test_daily_amount(
        #[case] entries: &[(LoadId, i64, DateTime<Utc>, bool)],
        #[case] amount: i64,
        #[case] expected: bool,
    ) {
        let request = request(99, amount, at(3, 12, 0, 0));
        assert_eq!(
            Rule::DailyAmount.passes(&request, &LIMITS, &history(entries)),
            expected
        );
    }

    #[test]
    fn test_daily_amount_uses_exact_decimals() {
        let history = history(&[(1, 2500, at(3, 8, 0, 0), true)]);
        let mut request = request(99, 0, at(3, 12, 0, 0));

        request.load_amount = Decimal::new(249999, 2); // 2499.99
        assert!(Rule::DailyAmount.passes(&request, &LIMITS, &history));

        request.load_amount = Decimal::new(250000, 2); // 2500.00
        assert!(!Rule::DailyAmount.passes(&request, &LIMITS, &history));
    }

    #[rstest]
    #[case::week_below(&[(1, 4900, at(3, 8, 0, 0), true), (2, 4900, at(4, 8, 0, 0), true), (3, 4900, at(5, 8, 0, 0), true)], 5000, true)]
    #[case::week_at_ceiling(&[(1, 4900, at(3, 8, 0, 0), true), (2, 4900, at(4, 8, 0, 0), true), (3, 4900, at(5, 8, 0, 0), true)], 5300, false)]
    #[case::monday_midnight_excluded(&[(1, 4900, at(3, 0, 0, 0), true), (2, 4900, at(4, 8, 0, 0), true), (3, 4900, at(5, 8, 0, 0), true)], 5300, true)]
    #[case::previous_week_excluded(&[(1, 4900, at(2, 8, 0, 0), true), (2, 4900, at(4, 8, 0, 0), true), (3, 4900, at(5, 8, 0, 0), true)], 5300, true)]
    #[case::rejected_excluded(&[(1, 4900, at(3, 8, 0, 0), true), (2, 9000, at(4, 8, 0, 0), false), (3, 4900, at(5, 8, 0, 0), true)], 5300, true)]
    fn test_weekly_amount(
        #[case] entries: &[(LoadId, i64, DateTime<Utc>, bool)],
        #[case] amount: i64,
        #[case] expected: bool,
    ) {
        // Saturday of the same week
        let request = request(99, amount, at(8, 12, 0, 0));
        assert_eq!(
            Rule::WeeklyAmount.passes(&request, &LIMITS, &history(entries)),
            expected
        );
    }

    #[test]
    fn test_first_failure_short_circuits() {
        // Duplicate id that would also break the daily amount
        let history = history(&[(1, 4000, at(3, 8, 0, 0), true)]);
        let request = request(1, 4000, at(3, 12, 0, 0));

        assert_eq!(
            first_failure(&request, &LIMITS, &history),
            Some(Rule::UniqueId)
        );
    }

    #[test]
    fn test_first_failure_none_when_all_pass() {
        let request = request(1, 100, at(3, 12, 0, 0));
        assert_eq!(first_failure(&request, &LIMITS, &CustomerHistory::new()), None);
    }

    #[rstest]
    #[case::unique_id(Rule::UniqueId, RejectionReason::DuplicateId)]
    #[case::daily_count(Rule::DailyCount, RejectionReason::DailyCountExceeded)]
    #[case::daily_amount(Rule::DailyAmount, RejectionReason::DailyAmountExceeded)]
    #[case::weekly_amount(Rule::WeeklyAmount, RejectionReason::WeeklyAmountExceeded)]
    fn test_rejection_reason(#[case] rule: Rule, #[case] expected: RejectionReason) {
        assert_eq!(rule.rejection(), expected);
    }
}
