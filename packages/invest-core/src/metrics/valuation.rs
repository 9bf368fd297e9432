//! Valuation, weighting and sector classification.

use crate::types::Investment;
use crate::{Error, Result};

/// Category tag that enables ticker-based sector classification.
pub const STOCK_CATEGORY: &str = "Stock";

/// P/E above which a position counts as overvalued.
pub const OVERVALUED_PE_THRESHOLD: f64 = 25.0;

/// Allowed absolute drift between actual and target weight.
pub const REBALANCE_TOLERANCE: f64 = 0.05;

/// Market value of the position, `current_price * quantity`.
pub fn current_value(investment: &Investment) -> f64 {
    investment.current_price() * investment.quantity() as f64
}

/// Share of `total_value` held in this position, as a fraction.
pub fn weight_in_portfolio(investment: &Investment, total_value: f64) -> Result<f64> {
    finite("total portfolio value", total_value)?;
    if total_value == 0.0 {
        return Err(Error::DivisionByZero(format!(
            "total portfolio value is zero while weighting {}",
            investment.ticker()
        )));
    }
    Ok(current_value(investment) / total_value)
}

/// Whether the weight drifts from `target_weight` by more than the tolerance.
pub fn should_rebalance(
    investment: &Investment,
    total_value: f64,
    target_weight: f64,
) -> Result<bool> {
    let weight = weight_in_portfolio(investment, total_value)?;
    Ok((weight - target_weight).abs() > REBALANCE_TOLERANCE)
}

/// Price over per-unit earnings, given total `earnings` for the position.
pub fn price_to_earnings_ratio(investment: &Investment, earnings: f64) -> Result<f64> {
    finite("earnings", earnings)?;
    if earnings == 0.0 {
        return Err(Error::DivisionByZero(format!(
            "earnings for {} are zero",
            investment.ticker()
        )));
    }
    if investment.quantity() == 0 {
        return Err(Error::DivisionByZero(format!(
            "quantity of {} is zero",
            investment.ticker()
        )));
    }

    let earnings_per_unit = earnings / investment.quantity() as f64;
    Ok(investment.current_price() / earnings_per_unit)
}

fn finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::InvalidInput(format!(
            "{} must be a finite number, got {}",
            name, value
        )));
    }
    Ok(())
}

pub fn is_overvalued(investment: &Investment, earnings: f64) -> Result<bool> {
    Ok(price_to_earnings_ratio(investment, earnings)? > OVERVALUED_PE_THRESHOLD)
}

/// Coarse sector for a position.
///
/// Stocks are classified by the first letter of the ticker ("A" is
/// Technology, "B" is Finance, anything else Other). Other categories are
/// returned unchanged.
pub fn sector_category(investment: &Investment) -> &str {
    if investment.category() != STOCK_CATEGORY {
        return investment.category();
    }

    let ticker = investment.ticker();
    if ticker.starts_with('A') {
        "Technology"
    } else if ticker.starts_with('B') {
        "Finance"
    } else {
        "Other"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn investment(ticker: &str, quantity: u32, current: f64, category: &str) -> Investment {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let bought = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        Investment::new_as_of(ticker, quantity, 100.0, current, category, bought, today).unwrap()
    }

    #[test]
    fn test_current_value() {
        assert_eq!(current_value(&investment("AAPL", 50, 175.0, "Stock")), 8750.0);
        assert_eq!(current_value(&investment("AAPL", 0, 175.0, "Stock")), 0.0);
    }

    #[test]
    fn test_weight_in_portfolio() {
        let inv = investment("AAPL", 50, 175.0, "Stock");
        assert_relative_eq!(
            weight_in_portfolio(&inv, 92750.0).unwrap(),
            8750.0 / 92750.0
        );
        assert!(matches!(
            weight_in_portfolio(&inv, 0.0),
            Err(Error::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_should_rebalance_is_symmetric() {
        // 25 / 100 -> weight 0.25
        let inv = investment("X", 25, 1.0, "Stock");

        assert!(!should_rebalance(&inv, 100.0, 0.25).unwrap());
        assert!(!should_rebalance(&inv, 100.0, 0.20).unwrap());
        assert!(!should_rebalance(&inv, 100.0, 0.30).unwrap());
        assert!(should_rebalance(&inv, 100.0, 0.1999).unwrap());
        assert!(should_rebalance(&inv, 100.0, 0.3001).unwrap());
    }

    #[test]
    fn test_should_rebalance_zero_total() {
        let inv = investment("X", 25, 1.0, "Stock");
        assert!(matches!(
            should_rebalance(&inv, 0.0, 0.5),
            Err(Error::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_price_to_earnings_ratio() {
        // 50 units, 500 total earnings -> 10 per unit; 175 / 10 = 17.5
        let inv = investment("AAPL", 50, 175.0, "Stock");
        assert_relative_eq!(price_to_earnings_ratio(&inv, 500.0).unwrap(), 17.5);
        assert!(!is_overvalued(&inv, 500.0).unwrap());

        // 2 per unit -> 87.5
        assert!(is_overvalued(&inv, 100.0).unwrap());
    }

    #[test]
    fn test_price_to_earnings_division_guards() {
        let inv = investment("AAPL", 50, 175.0, "Stock");
        assert!(matches!(
            price_to_earnings_ratio(&inv, 0.0),
            Err(Error::DivisionByZero(_))
        ));

        let empty = investment("AAPL", 0, 175.0, "Stock");
        assert!(matches!(
            is_overvalued(&empty, 500.0),
            Err(Error::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_overvalued_threshold_is_strict() {
        // 100 units, 400 earnings -> 4 per unit; 100 / 4 = 25
        let inv = investment("AAPL", 100, 100.0, "Stock");
        assert!(!is_overvalued(&inv, 400.0).unwrap());
    }

    #[test]
    fn test_sector_category() {
        assert_eq!(sector_category(&investment("AAPL", 1, 1.0, "Stock")), "Technology");
        assert_eq!(sector_category(&investment("BAC", 1, 1.0, "Stock")), "Finance");
        assert_eq!(sector_category(&investment("ZZZ", 1, 1.0, "Stock")), "Other");
        assert_eq!(
            sector_category(&investment("BTC", 1, 1.0, "Cryptocurrency")),
            "Cryptocurrency"
        );
        // Classification only applies to the exact "Stock" tag
        assert_eq!(sector_category(&investment("AMZN", 1, 1.0, "ETF")), "ETF");
        assert_eq!(sector_category(&investment("AMZN", 1, 1.0, "Stock ")), "Stock ");
    }

    #[test]
    fn test_sector_category_is_case_sensitive() {
        assert_eq!(sector_category(&investment("aapl", 1, 1.0, "Stock")), "Other");
        assert_eq!(sector_category(&investment("bac", 1, 1.0, "Stock")), "Other");
        assert_eq!(sector_category(&investment("AAPL", 1, 1.0, "stock")), "stock");
    }

    #[test]
    fn test_non_finite_scalars_rejected() {
        let inv = investment("AAPL", 50, 175.0, "Stock");
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                weight_in_portfolio(&inv, bad),
                Err(Error::InvalidInput(_))
            ));
            assert!(matches!(
                should_rebalance(&inv, bad, 0.25),
                Err(Error::InvalidInput(_))
            ));
            assert!(matches!(
                price_to_earnings_ratio(&inv, bad),
                Err(Error::InvalidInput(_))
            ));
            assert!(matches!(is_overvalued(&inv, bad), Err(Error::InvalidInput(_))));
        }
    }
}
