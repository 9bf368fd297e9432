//! Per-position metrics.
//!
//! Every function here is a pure function of one [`Investment`](crate::Investment)
//! plus, for a few of them, a caller-supplied scalar:
//!
//! - **Performance**: profit/loss, return, annualized return, dividend yield
//! - **Risk**: volatility-based score and level
//! - **Valuation**: current value, portfolio weight, P/E, sector
//! - **Tax**: capital gains and dividend tax
//!
//! Monetary results are plain `f64` in the position's currency. Percentages are
//! returned as fractions except where a function name says otherwise.

mod performance;
mod risk;
mod tax;
mod valuation;

pub use performance::{
    annualized_return, annualized_return_as_of, dividend_yield, performance_category,
    performance_category_as_of, performance_category_for, profit_loss, return_percentage,
    PerformanceCategory,
};
pub use risk::{risk_level, risk_level_for, risk_score, RiskLevel};
pub use tax::{capital_gains_tax, dividend_tax, CAPITAL_GAINS_TAX_RATE, DIVIDEND_TAX_RATE};
pub use valuation::{
    current_value, is_overvalued, price_to_earnings_ratio, sector_category, should_rebalance,
    weight_in_portfolio, OVERVALUED_PE_THRESHOLD, REBALANCE_TOLERANCE, STOCK_CATEGORY,
};
