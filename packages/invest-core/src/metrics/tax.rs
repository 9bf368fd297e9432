//! Flat-rate tax estimates.

use super::performance::profit_loss;
use crate::types::Investment;

/// Rate applied to unrealized gains.
pub const CAPITAL_GAINS_TAX_RATE: f64 = 0.15;

/// Rate applied to dividend income.
pub const DIVIDEND_TAX_RATE: f64 = 0.10;

/// Tax due on the unrealized gain. Losses are neither taxed nor offset.
pub fn capital_gains_tax(investment: &Investment) -> f64 {
    let profit = profit_loss(investment);
    if profit > 0.0 {
        profit * CAPITAL_GAINS_TAX_RATE
    } else {
        0.0
    }
}

/// Tax on the last dividend across all held units.
pub fn dividend_tax(investment: &Investment) -> f64 {
    investment.last_dividend() * investment.quantity() as f64 * DIVIDEND_TAX_RATE
}
