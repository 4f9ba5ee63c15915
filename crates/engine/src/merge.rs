//! Merge policies that fold k strategy outcomes into one aggregate decision.

use chrono::{DateTime, Utc};
use core_types::{AggregateOutcome, MergePolicy, Signal, StrategyOutcome, Symbol};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// One strategy's outcome together with the weight of its vote.
#[derive(Debug, Clone, PartialEq)]
pub struct Vote {
    pub outcome: StrategyOutcome,
    pub weight: Decimal,
}

pub fn merge(symbol: &Symbol, votes: &[Vote], policy: MergePolicy) -> AggregateOutcome {
    match policy {
        MergePolicy::MajorityVote => majority_vote(symbol, votes),
        MergePolicy::LatestReport => latest_report(symbol, votes),
    }
}

fn undecided(symbol: &Symbol) -> AggregateOutcome {
    AggregateOutcome {
        symbol: symbol.clone(),
        signal: Signal::Undecided,
        confidence: 0.0,
        as_of: None,
    }
}

/// The last registered strategy's outcome, reported with full confidence.
fn latest_report(symbol: &Symbol, votes: &[Vote]) -> AggregateOutcome {
    match votes.last() {
        Some(vote) => AggregateOutcome {
            symbol: symbol.clone(),
            signal: vote.outcome.signal,
            confidence: 100.0,
            as_of: vote.outcome.as_of,
        },
        None => undecided(symbol),
    }
}

/// Weighted vote over the strategies that produced a decision.
///
/// Confidence is the weight behind the reported signal as a share of the total
/// registered weight, so failed strategies dilute it. A tie for the top reports
/// Hold. Weights are summed as decimals so fractional weights tie exactly.
fn majority_vote(symbol: &Symbol, votes: &[Vote]) -> AggregateOutcome {
    let total_weight: Decimal = votes.iter().map(|v| v.weight).sum();
    let decided: Vec<&Vote> = votes
        .iter()
        .filter(|v| v.outcome.succeeded && v.outcome.signal != Signal::Undecided)
        .collect();

    if decided.is_empty() || total_weight <= Decimal::ZERO {
        return undecided(symbol);
    }

    let weight_for = |signal: Signal| -> Decimal {
        decided
            .iter()
            .filter(|v| v.outcome.signal == signal)
            .map(|v| v.weight)
            .sum()
    };
    let tally = [Signal::Hold, Signal::Buy, Signal::Sell].map(|s| (s, weight_for(s)));

    let top = tally.iter().map(|(_, w)| *w).max().unwrap_or_default();
    let leaders: Vec<Signal> = tally
        .iter()
        .filter(|(_, w)| *w == top)
        .map(|(s, _)| *s)
        .collect();

    let (signal, as_of) = match leaders.as_slice() {
        [winner] => {
            let voters = decided.iter().copied().filter(|v| v.outcome.signal == *winner);
            (*winner, latest_date(voters))
        }
        _ => (Signal::Hold, latest_date(decided.iter().copied())),
    };

    AggregateOutcome {
        symbol: symbol.clone(),
        signal,
        confidence: (weight_for(signal) * Decimal::ONE_HUNDRED / total_weight)
            .to_f64()
            .unwrap_or_default(),
        as_of,
    }
}

fn latest_date<'a>(votes: impl Iterator<Item = &'a Vote>) -> Option<DateTime<Utc>> {
    votes.filter_map(|v| v.outcome.as_of).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap() + Duration::days(n)
    }

    fn vote(signal: Signal, date: i64, weight: Decimal) -> Vote {
        Vote {
            outcome: StrategyOutcome::decided(Symbol::from("AAPL"), signal, day(date)),
            weight,
        }
    }

    fn failed(weight: Decimal) -> Vote {
        Vote {
            outcome: StrategyOutcome::undecided(Symbol::from("AAPL")),
            weight,
        }
    }

    #[test]
    fn single_vote_passes_through_under_both_policies() {
        let votes = [vote(Signal::Buy, 4, dec!(1.0))];
        for policy in [MergePolicy::MajorityVote, MergePolicy::LatestReport] {
            let merged = merge(&Symbol::from("AAPL"), &votes, policy);
            assert_eq!(merged.signal, Signal::Buy);
            assert_eq!(merged.symbol, Symbol::from("AAPL"));
            assert_eq!(merged.confidence, 100.0);
            assert_eq!(merged.as_of, Some(day(4)));
        }
    }

    #[test]
    fn majority_wins_with_share_of_total_weight() {
        let votes = [
            vote(Signal::Buy, 1, dec!(1.0)),
            vote(Signal::Sell, 2, dec!(1.0)),
            vote(Signal::Buy, 3, dec!(2.0)),
        ];

        let merged = merge(&Symbol::from("AAPL"), &votes, MergePolicy::MajorityVote);

        assert_eq!(merged.signal, Signal::Buy);
        assert_eq!(merged.confidence, 75.0);
        assert_eq!(merged.as_of, Some(day(3)));
    }

    #[test]
    fn tie_reports_hold() {
        let votes = [vote(Signal::Buy, 1, dec!(1.0)), vote(Signal::Sell, 5, dec!(1.0))];

        let merged = merge(&Symbol::from("AAPL"), &votes, MergePolicy::MajorityVote);

        assert_eq!(merged.signal, Signal::Hold);
        assert_eq!(merged.confidence, 0.0);
        assert_eq!(merged.as_of, Some(day(5)));
    }

    #[test]
    fn fractional_weights_tie_exactly() {
        let votes = [
            vote(Signal::Buy, 1, dec!(0.1)),
            vote(Signal::Buy, 2, dec!(0.2)),
            vote(Signal::Sell, 3, dec!(0.3)),
        ];

        let merged = merge(&Symbol::from("AAPL"), &votes, MergePolicy::MajorityVote);

        assert_eq!(merged.signal, Signal::Hold);
        assert_eq!(merged.confidence, 0.0);
        assert_eq!(merged.as_of, Some(day(3)));
    }

    #[test]
    fn tie_including_hold_carries_hold_share() {
        let votes = [vote(Signal::Hold, 1, dec!(1.0)), vote(Signal::Buy, 2, dec!(1.0))];

        let merged = merge(&Symbol::from("AAPL"), &votes, MergePolicy::MajorityVote);

        assert_eq!(merged.signal, Signal::Hold);
        assert_eq!(merged.confidence, 50.0);
    }

    #[test]
    fn failed_strategies_dilute_confidence_but_do_not_vote() {
        let votes = [failed(dec!(1.0)), vote(Signal::Sell, 2, dec!(1.0)), failed(dec!(2.0))];

        let merged = merge(&Symbol::from("AAPL"), &votes, MergePolicy::MajorityVote);

        assert_eq!(merged.signal, Signal::Sell);
        assert_eq!(merged.confidence, 25.0);
    }

    #[test]
    fn all_failed_is_undecided() {
        let votes = [failed(dec!(1.0)), failed(dec!(1.0))];

        let merged = merge(&Symbol::from("AAPL"), &votes, MergePolicy::MajorityVote);

        assert_eq!(merged.signal, Signal::Undecided);
        assert_eq!(merged.confidence, 0.0);
        assert_eq!(merged.as_of, None);
    }

    #[test]
    fn latest_report_takes_last_slot() {
        let votes = [vote(Signal::Buy, 1, dec!(5.0)), vote(Signal::Sell, 2, dec!(1.0)), failed(dec!(1.0))];

        let merged = merge(&Symbol::from("AAPL"), &votes, MergePolicy::LatestReport);

        assert_eq!(merged.signal, Signal::Undecided);
        assert_eq!(merged.confidence, 100.0);
        assert_eq!(merged.as_of, None);
    }
}
