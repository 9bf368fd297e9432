//! Portfolio-level aggregation.

use crate::metrics::{
    capital_gains_tax, current_value, dividend_tax, profit_loss, weight_in_portfolio,
};
use crate::types::Portfolio;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sum of current values, accumulated in portfolio order.
///
/// An empty portfolio is worth zero; callers must guard later divisions.
pub fn total_value(portfolio: &Portfolio) -> f64 {
    let total: f64 = portfolio.iter().map(current_value).sum();
    debug!(positions = portfolio.len(), total, "computed portfolio value");
    total
}

/// Weight of each position as `(ticker, fraction)`, in portfolio order.
pub fn weights(portfolio: &Portfolio) -> Result<Vec<(String, f64)>> {
    let total = total_value(portfolio);
    if total == 0.0 {
        return Err(Error::DivisionByZero(
            "total portfolio value is zero".to_string(),
        ));
    }

    portfolio
        .iter()
        .map(|i| weight_in_portfolio(i, total).map(|w| (i.ticker().to_string(), w)))
        .collect()
}

/// Portfolio summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioSummary {
    /// Total cost basis of all positions
    pub total_cost: f64,
    /// Total current market value
    pub total_value: f64,
    /// Total unrealized gain/loss
    pub total_profit_loss: f64,
    /// Gain/loss relative to cost, in percent (absent when cost is zero)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_return_percent: Option<f64>,
    /// Estimated capital gains tax across positions
    pub total_capital_gains_tax: f64,
    /// Estimated dividend tax across positions
    pub total_dividend_tax: f64,
    /// Number of positions
    pub position_count: usize,
    /// Number of positions with gains
    pub positions_in_profit: usize,
    /// Number of positions with losses
    pub positions_in_loss: usize,
}

impl PortfolioSummary {
    pub fn from_portfolio(portfolio: &Portfolio) -> Self {
        let total_cost: f64 = portfolio
            .iter()
            .map(|i| i.purchase_price() * i.quantity() as f64)
            .sum();
        let total_value = total_value(portfolio);
        let total_profit_loss: f64 = portfolio.iter().map(profit_loss).sum();

        let total_return_percent = if total_cost > 0.0 {
            Some(total_profit_loss / total_cost * 100.0)
        } else {
            None
        };

        Self {
            total_cost,
            total_value,
            total_profit_loss,
            total_return_percent,
            total_capital_gains_tax: portfolio.iter().map(capital_gains_tax).sum(),
            total_dividend_tax: portfolio.iter().map(dividend_tax).sum(),
            position_count: portfolio.len(),
            positions_in_profit: portfolio.iter().filter(|i| profit_loss(i) > 0.0).count(),
            positions_in_loss: portfolio.iter().filter(|i| profit_loss(i) < 0.0).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Investment;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn investment(ticker: &str, quantity: u32, purchase: f64, current: f64) -> Investment {
        let bought = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        Investment::new_as_of(ticker, quantity, purchase, current, "Stock", bought, today())
            .unwrap()
    }

    fn sample_portfolio() -> Portfolio {
        Portfolio::from(vec![
            investment("AAPL", 50, 150.0, 175.0),
            investment("TSLA", 20, 600.0, 700.0),
            investment("BTC", 2, 30000.0, 35000.0),
        ])
    }

    #[test]
    fn test_total_value() {
        assert_eq!(total_value(&sample_portfolio()), 92750.0);
        assert_eq!(total_value(&Portfolio::new()), 0.0);
    }

    #[test]
    fn test_total_value_order_independent() {
        let mut reversed = sample_portfolio();
        reversed.investments.reverse();
        assert_relative_eq!(total_value(&reversed), total_value(&sample_portfolio()));
    }

    #[test]
    fn test_weights_sum_to_one() {
        let weights = weights(&sample_portfolio()).unwrap();

        assert_eq!(weights.len(), 3);
        assert_eq!(weights[0].0, "AAPL");
        assert_relative_eq!(weights[0].1, 8750.0 / 92750.0);
        assert_relative_eq!(weights[2].1, 0.7547, epsilon = 1e-4);

        let sum: f64 = weights.iter().map(|(_, w)| w).sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_weights_zero_total() {
        let portfolio = Portfolio::from(vec![investment("AAPL", 10, 150.0, 0.0)]);
        assert!(matches!(weights(&portfolio), Err(Error::DivisionByZero(_))));
        assert!(matches!(
            weights(&Portfolio::new()),
            Err(Error::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_portfolio_summary() {
        let mut portfolio = sample_portfolio();
        portfolio.push(investment("GOOGL", 5, 100.0, 90.0));

        let summary = PortfolioSummary::from_portfolio(&portfolio);

        // 7500 + 12000 + 60000 + 500
        assert_eq!(summary.total_cost, 80000.0);
        assert_eq!(summary.total_value, 93200.0);
        // 1250 + 2000 + 10000 - 50
        assert_eq!(summary.total_profit_loss, 13200.0);
        assert_relative_eq!(summary.total_return_percent.unwrap(), 16.5);
        // (1250 + 2000 + 10000) * 0.15
        assert_relative_eq!(summary.total_capital_gains_tax, 1987.5);
        assert_eq!(summary.total_dividend_tax, 0.0);
        assert_eq!(summary.position_count, 4);
        assert_eq!(summary.positions_in_profit, 3);
        assert_eq!(summary.positions_in_loss, 1);
    }

    #[test]
    fn test_empty_portfolio_summary() {
        let summary = PortfolioSummary::from_portfolio(&Portfolio::new());
        assert_eq!(summary.total_value, 0.0);
        assert!(summary.total_return_percent.is_none());
    }
}
