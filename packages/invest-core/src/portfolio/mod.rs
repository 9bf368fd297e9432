//! Portfolio management module.
//!
//! Provides portfolio aggregation, equal-weight rebalancing advice, and
//! portfolio loading.

mod aggregate;
mod rebalance;
mod source;

pub use aggregate::{total_value, weights, PortfolioSummary};
pub use rebalance::{rebalancing_candidates, target_weight, RebalanceCandidate};
pub use source::{demo_portfolio, load_from_path, PortfolioSource, PORTFOLIO_FILE_ENV};
