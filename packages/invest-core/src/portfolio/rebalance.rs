//! Equal-weight rebalancing advice.

use super::aggregate::total_value;
use crate::metrics::{should_rebalance, weight_in_portfolio};
use crate::types::Portfolio;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A position whose weight drifted outside the tolerance band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RebalanceCandidate {
    /// Ticker to rebalance
    pub ticker: String,
    /// Actual weight as a fraction
    pub current_weight: f64,
    /// Equal-weight target as a fraction
    pub target_weight: f64,
}

/// Equal-weight target for a portfolio of `positions` members.
pub fn target_weight(positions: usize) -> Result<f64> {
    if positions == 0 {
        return Err(Error::InvalidInput(
            "cannot compute a target weight for an empty portfolio".to_string(),
        ));
    }
    Ok(1.0 / positions as f64)
}

/// Positions to rebalance, in portfolio order, each paired with the target.
pub fn rebalancing_candidates(portfolio: &Portfolio) -> Result<Vec<RebalanceCandidate>> {
    let target = target_weight(portfolio.len())?;
    let total = total_value(portfolio);

    let mut candidates = Vec::new();
    for investment in portfolio {
        if should_rebalance(investment, total, target)? {
            candidates.push(RebalanceCandidate {
                ticker: investment.ticker().to_string(),
                current_weight: weight_in_portfolio(investment, total)?,
                target_weight: target,
            });
        }
    }

    debug!(
        candidates = candidates.len(),
        target_weight = target,
        "evaluated rebalancing candidates"
    );
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Investment;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn investment(ticker: &str, quantity: u32, current: f64) -> Investment {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let bought = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        Investment::new_as_of(ticker, quantity, 100.0, current, "Stock", bought, today).unwrap()
    }

    #[test]
    fn test_target_weight() {
        assert_relative_eq!(target_weight(3).unwrap(), 0.3333, epsilon = 1e-4);
        assert_eq!(target_weight(4).unwrap(), 0.25);
        assert!(matches!(target_weight(0), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_three_position_portfolio() {
        let portfolio = Portfolio::from(vec![
            investment("AAPL", 50, 175.0),
            investment("TSLA", 20, 700.0),
            investment("BTC", 2, 35000.0),
        ]);

        let candidates = rebalancing_candidates(&portfolio).unwrap();
        let tickers: Vec<&str> = candidates.iter().map(|c| c.ticker.as_str()).collect();

        // Weights 0.0943, 0.1509, 0.7547 against 0.3333: all outside the band
        assert_eq!(tickers, vec!["AAPL", "TSLA", "BTC"]);
        let btc = &candidates[2];
        assert_relative_eq!(btc.current_weight, 70000.0 / 92750.0);
        for candidate in &candidates {
            assert_relative_eq!(candidate.target_weight, 1.0 / 3.0);
        }
    }

    #[test]
    fn test_balanced_portfolio_has_no_candidates() {
        let portfolio = Portfolio::from(vec![
            investment("AAPL", 10, 100.0),
            investment("MSFT", 10, 104.0),
            investment("GOOG", 10, 96.0),
        ]);
        assert!(rebalancing_candidates(&portfolio).unwrap().is_empty());
    }

    #[test]
    fn test_only_drifted_positions_are_flagged() {
        // Weights 0.40, 0.35, 0.25 against 0.3333
        let portfolio = Portfolio::from(vec![
            investment("A", 40, 1.0),
            investment("B", 35, 1.0),
            investment("C", 25, 1.0),
        ]);

        let candidates = rebalancing_candidates(&portfolio).unwrap();
        let tickers: Vec<&str> = candidates.iter().map(|c| c.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["A", "C"]);
    }

    #[test]
    fn test_empty_portfolio_is_invalid() {
        assert!(matches!(
            rebalancing_candidates(&Portfolio::new()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_worthless_portfolio_cannot_be_weighted() {
        let portfolio = Portfolio::from(vec![investment("A", 10, 0.0)]);
        assert!(matches!(
            rebalancing_candidates(&portfolio),
            Err(Error::DivisionByZero(_))
        ));
    }
}
