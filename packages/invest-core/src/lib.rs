//! Invest Core - Investment valuation and portfolio analytics library.
//!
//! This crate computes per-position metrics and portfolio aggregates:
//!
//! - **Investment record**: one held position with validated fields
//! - **Metrics**: profit/loss, returns, risk, categorization, tax, valuation
//! - **Portfolio aggregation**: total value and position weights
//! - **Rebalancing**: equal-weight targets and drift detection
//! - **Reports**: a pure analysis pass rendered as text or JSON
//!
//! # Example
//!
//! ```rust
//! use chrono::{Duration, Local};
//! use invest_core::{metrics, Investment};
//!
//! let bought = Local::now().date_naive() - Duration::days(180);
//! let aapl = Investment::new("AAPL", 50, 150.0, 175.0, "Stock", bought).unwrap();
//!
//! assert_eq!(metrics::profit_loss(&aapl), 1250.0);
//! assert_eq!(metrics::current_value(&aapl), 8750.0);
//! assert_eq!(metrics::sector_category(&aapl), "Technology");
//! ```

pub mod metrics;
pub mod portfolio;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use types::{ApiResponse, Investment, Portfolio};

// Re-export main functionality
pub use metrics::{PerformanceCategory, RiskLevel};
pub use portfolio::{
    rebalancing_candidates, target_weight, total_value, weights, PortfolioSource,
    PortfolioSummary, RebalanceCandidate,
};
pub use report::{InvestmentAnalysis, PortfolioReport, PositionDetail, ValuationCheck};

/// Error types for invest-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for invest-core operations.
pub type Result<T> = std::result::Result<T, Error>;
