//! Load request validator
//!
//! This module provides the `Validator` that replays load requests in arrival
//! order. For each request it evaluates the rule chain against the customer's
//! history, then commits the resulting decision back into that history.
//!
//! Evaluation reads history and commit writes it. Because a decision is
//! committed only after it was evaluated, a request never counts itself.

use crate::core::history_store::{CustomerHistory, HistoryStore};
use crate::core::rules::first_failure;
use crate::types::{Decision, Limits, LimitsError, LoadRequest};
use tracing::debug;

/// Evaluate a request against a customer's history
///
/// Runs the rule chain and returns a rejected decision for the first failing
/// rule, or an accepted decision when every rule passes. Never mutates
/// history and never fails.
pub fn evaluate(request: &LoadRequest, limits: &Limits, history: &CustomerHistory) -> Decision {
    match first_failure(request, limits, history) {
        Some(rule) => Decision::rejected(request, rule.rejection()),
        None => Decision::accepted(request),
    }
}

/// Sequential load request validator
///
/// Owns the history of every customer it has seen. Requests must be handed
/// over in arrival order; reordering them changes the decisions.
#[derive(Debug)]
pub struct Validator {
    limits: Limits,
    history: HistoryStore,
}

impl Validator {
    /// Create a new Validator with empty history
    ///
    /// # Errors
    ///
    /// Returns `LimitsError::InvalidLimits` if any ceiling is zero.
    pub fn new(limits: Limits) -> Result<Self, LimitsError> {
        limits.validate()?;
        Ok(Validator {
            limits,
            history: HistoryStore::new(),
        })
    }

    /// All decisions committed so far
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Evaluate a request without recording it
    pub fn evaluate(&self, request: &LoadRequest) -> Decision {
        match self.history.get(request.customer_id) {
            Some(history) => evaluate(request, &self.limits, history),
            None => evaluate(request, &self.limits, &CustomerHistory::new()),
        }
    }

    /// Record a decision in its customer's history
    pub fn commit(&mut self, decision: Decision) {
        self.history.commit(decision);
    }

    /// Evaluate a request and commit the decision
    ///
    /// The decision is committed whether or not the load was accepted.
    pub fn process(&mut self, request: &LoadRequest) -> Decision {
        let decision = self.evaluate(request);
        if let Some(reason) = decision.reason {
            debug!(
                id = decision.id,
                customer_id = decision.customer_id,
                %reason,
                "load rejected"
            );
        }
        self.commit(decision.clone());
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CustomerId, LoadId, RejectionReason};
    use chrono::{DateTime, TimeZone, Utc};
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

    #[fixture]
    fn limits() -> Limits {
        Limits {
            daily_amount: 5000,
            daily_transactions: 3,
            weekly_amount: 20000,
        }
    }

    #[fixture]
    fn validator(limits: Limits) -> Validator {
        Validator::new(limits).unwrap()
    }

    // 2000-01-03 is a Monday
    fn at(day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2000, 1, day, hour, min, sec).unwrap()
    }

    fn request(id: LoadId, customer_id: CustomerId, amount: i64, time: DateTime<Utc>) -> LoadRequest {
        LoadRequest {
            id,
            customer_id,
            load_amount: Decimal::new(amount, 0),
            time,
        }
    }

    fn accepted(validator: &mut Validator, requests: &[LoadRequest]) -> Vec<bool> {
        requests
            .iter()
            .map(|request| validator.process(request).is_accepted())
            .collect()
    }

    #[rstest]
    #[case::daily_amount(Limits { daily_amount: 0, daily_transactions: 3, weekly_amount: 20000 }, "daily_amount")]
    #[case::daily_transactions(Limits { daily_amount: 5000, daily_transactions: 0, weekly_amount: 20000 }, "daily_transactions")]
    #[case::weekly_amount(Limits { daily_amount: 5000, daily_transactions: 3, weekly_amount: 0 }, "weekly_amount")]
    fn test_new_rejects_zero_limits(#[case] limits: Limits, #[case] field: &str) {
        let result = Validator::new(limits);
        assert_eq!(result.unwrap_err(), LimitsError::invalid_limits(field));
    }

    #[rstest]
    fn test_first_request_baseline(mut validator: Validator) {
        let requests = [
            request(1, 1, 1750, at(3, 9, 0, 0)),
            request(2, 2, 3600, at(3, 9, 0, 0)),
            request(3, 3, 5001, at(3, 9, 0, 0)),
        ];

        assert_eq!(accepted(&mut validator, &requests), vec![true, true, false]);
        let third = validator.history().get(3).unwrap().log()[0].clone();
        assert_eq!(third.reason, Some(RejectionReason::DailyAmountExceeded));
    }

    #[rstest]
    fn test_evaluate_is_deterministic_and_read_only(mut validator: Validator) {
        validator.process(&request(1, 1, 1000, at(3, 8, 0, 0)));
        let next = request(2, 1, 3000, at(3, 9, 0, 0));

        let first = validator.evaluate(&next);
        let second = validator.evaluate(&next);

        assert_eq!(first, second);
        assert_eq!(validator.history().decision_count(), 1);
    }

    #[rstest]
    fn test_request_does_not_count_itself(mut validator: Validator) {
        // 4999 would be rejected if its own amount were already in history
        let decision = validator.process(&request(1, 1, 4999, at(3, 9, 0, 0)));
        assert!(decision.is_accepted());
        assert_eq!(validator.history().decision_count(), 1);
    }

    #[rstest]
    fn test_duplicate_id_rejected(mut validator: Validator) {
        let requests = [
            request(1, 1, 100, at(3, 9, 0, 0)),
            request(1, 1, 100, at(4, 9, 0, 0)),
            request(2, 1, 100, at(4, 10, 0, 0)),
        ];

        assert_eq!(accepted(&mut validator, &requests), vec![true, false, true]);
        let history = validator.history().get(1).unwrap();
        assert_eq!(history.log()[1].reason, Some(RejectionReason::DuplicateId));
    }

    #[rstest]
    fn test_duplicate_id_scoped_to_customer(mut validator: Validator) {
        let requests = [
            request(1, 1, 100, at(3, 9, 0, 0)),
            request(1, 2, 100, at(3, 9, 0, 0)),
        ];

        assert_eq!(accepted(&mut validator, &requests), vec![true, true]);
    }

    #[test]
    fn test_daily_count_ceiling_ignores_amount() {
        let mut validator = Validator::new(Limits {
            daily_amount: 5000,
            daily_transactions: 2,
            weekly_amount: 20000,
        })
        .unwrap();
        let requests = [
            request(1, 1, 1, at(3, 9, 0, 0)),
            request(2, 1, 1, at(3, 10, 0, 0)),
            request(3, 1, 1, at(3, 11, 0, 0)),
            request(4, 1, 1, at(4, 9, 0, 0)),
        ];

        assert_eq!(
            accepted(&mut validator, &requests),
            vec![true, true, false, true]
        );
        let history = validator.history().get(1).unwrap();
        assert_eq!(history.log()[2].reason, Some(RejectionReason::DailyCountExceeded));
    }

    #[rstest]
    fn test_rejected_attempts_still_count_toward_daily_count(mut validator: Validator) {
        let requests = [
            request(1, 1, 6000, at(3, 9, 0, 0)),
            request(2, 1, 6000, at(3, 10, 0, 0)),
            request(3, 1, 6000, at(3, 11, 0, 0)),
            request(4, 1, 10, at(3, 12, 0, 0)),
        ];

        assert_eq!(
            accepted(&mut validator, &requests),
            vec![false, false, false, false]
        );
        let history = validator.history().get(1).unwrap();
        assert_eq!(history.log()[3].reason, Some(RejectionReason::DailyCountExceeded));
    }

    #[rstest]
    fn test_rejected_amounts_excluded_from_totals(mut validator: Validator) {
        let requests = [
            request(1, 1, 6000, at(3, 9, 0, 0)),
            request(2, 1, 100, at(3, 10, 0, 0)),
            request(3, 1, 4899, at(3, 11, 0, 0)),
        ];

        assert_eq!(accepted(&mut validator, &requests), vec![false, true, true]);
    }

    #[rstest]
    fn test_weekly_amount_rejection(mut validator: Validator) {
        // 4900 a day Monday to Thursday, then 900 more on Friday
        let requests = [
            request(1, 1, 4900, at(3, 9, 0, 0)),
            request(2, 1, 4900, at(4, 9, 0, 0)),
            request(3, 1, 4900, at(5, 9, 0, 0)),
            request(4, 1, 4900, at(6, 9, 0, 0)),
            request(5, 1, 400, at(7, 9, 0, 0)),
            request(6, 1, 399, at(7, 10, 0, 0)),
            // Next Monday starts a new week
            request(7, 1, 4900, at(10, 9, 0, 0)),
        ];

        assert_eq!(
            accepted(&mut validator, &requests),
            vec![true, true, true, true, false, true, true]
        );
        let history = validator.history().get(1).unwrap();
        assert_eq!(history.log()[4].reason, Some(RejectionReason::WeeklyAmountExceeded));
    }

    #[rstest]
    fn test_first_failing_rule_wins(mut validator: Validator) {
        validator.process(&request(1, 1, 4000, at(3, 9, 0, 0)));

        // Same id and over the daily amount: duplicate is reported
        let decision = validator.process(&request(1, 1, 4000, at(3, 10, 0, 0)));
        assert_eq!(decision.reason, Some(RejectionReason::DuplicateId));
    }

    #[rstest]
    fn test_earlier_timestamp_later_in_file(mut validator: Validator) {
        // The 18:00 load is committed first but lies after the 12:00 request
        validator.process(&request(1, 1, 4000, at(3, 18, 0, 0)));
        let decision = validator.process(&request(2, 1, 4000, at(3, 12, 0, 0)));
        assert!(decision.is_accepted());

        // Uniqueness still sees it
        let duplicate = validator.process(&request(1, 1, 1, at(3, 8, 0, 0)));
        assert_eq!(duplicate.reason, Some(RejectionReason::DuplicateId));
    }

    #[rstest]
    fn test_history_stays_most_recent_first(mut validator: Validator) {
        let times = [
            at(5, 9, 0, 0),
            at(3, 9, 0, 0),
            at(7, 9, 0, 0),
            at(3, 9, 0, 0),
            at(4, 23, 59, 59),
        ];
        for (id, time) in times.into_iter().enumerate() {
            validator.process(&request(id as LoadId, 1, 10, time));
        }

        let history = validator.history().get(1).unwrap();
        let sorted: Vec<_> = history.iter().map(|d| d.time).collect();
        assert!(sorted.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(history.len(), times.len());
    }
}
