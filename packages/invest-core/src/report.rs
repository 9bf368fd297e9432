//! Portfolio analysis report.
//!
//! [`PortfolioReport::build`] runs every metric over a portfolio and collects
//! the results; rendering is a separate step so the analysis stays free of I/O.
//!
//! A metric that fails for a single position (for example annualizing a
//! position bought today) is recorded as `None` and rendered as `n/a`. Failures
//! that concern the whole portfolio, such as an empty portfolio, abort the build.

use crate::metrics::{
    self, annualized_return_as_of, capital_gains_tax, current_value, dividend_tax,
    dividend_yield, performance_category_as_of, profit_loss, return_percentage, risk_level,
    risk_score, sector_category, weight_in_portfolio, PerformanceCategory, RiskLevel,
};
use crate::portfolio::{rebalancing_candidates, PortfolioSummary, RebalanceCandidate};
use crate::types::{Investment, Portfolio};
use crate::Result;
use chrono::{Local, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

const NOT_AVAILABLE: &str = "n/a";

/// Computed metrics for one position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvestmentAnalysis {
    pub ticker: String,
    pub current_value: f64,
    pub profit_loss: f64,
    /// Price return in percent
    pub return_percentage: Option<f64>,
    /// Annualized return as a fraction
    pub annualized_return: Option<f64>,
    pub performance: Option<PerformanceCategory>,
    pub sector: String,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    /// Weight in the portfolio as a fraction
    pub weight: Option<f64>,
    /// Dividend yield in percent
    pub dividend_yield: Option<f64>,
    pub capital_gains_tax: f64,
    pub dividend_tax: f64,
}

impl InvestmentAnalysis {
    /// Analyze one position against a portfolio total, as of `as_of`.
    pub fn analyze(investment: &Investment, total_value: f64, as_of: NaiveDate) -> Self {
        let ticker = investment.ticker();

        Self {
            ticker: ticker.to_string(),
            current_value: current_value(investment),
            profit_loss: profit_loss(investment),
            return_percentage: available(ticker, "return", return_percentage(investment)),
            annualized_return: available(
                ticker,
                "annualized return",
                annualized_return_as_of(investment, as_of),
            ),
            performance: available(
                ticker,
                "performance",
                performance_category_as_of(investment, as_of),
            ),
            sector: sector_category(investment).to_string(),
            risk_score: risk_score(investment),
            risk_level: risk_level(investment),
            weight: available(
                ticker,
                "weight",
                weight_in_portfolio(investment, total_value),
            ),
            dividend_yield: available(ticker, "dividend yield", dividend_yield(investment)),
            capital_gains_tax: capital_gains_tax(investment),
            dividend_tax: dividend_tax(investment),
        }
    }
}

fn available<T>(ticker: &str, metric: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(ticker, metric, error = %e, "metric unavailable");
            None
        }
    }
}

/// Full analysis of a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioReport {
    /// Date the time-dependent metrics were evaluated for
    pub as_of: NaiveDate,
    pub total_value: f64,
    pub summary: PortfolioSummary,
    pub positions: Vec<InvestmentAnalysis>,
    pub rebalancing: Vec<RebalanceCandidate>,
}

impl PortfolioReport {
    /// Build the report as of today.
    pub fn build(portfolio: &Portfolio) -> Result<Self> {
        Self::build_as_of(portfolio, Local::now().date_naive())
    }

    pub fn build_as_of(portfolio: &Portfolio, as_of: NaiveDate) -> Result<Self> {
        let rebalancing = rebalancing_candidates(portfolio)?;
        let summary = PortfolioSummary::from_portfolio(portfolio);
        let total_value = summary.total_value;

        let positions = portfolio
            .iter()
            .map(|investment| InvestmentAnalysis::analyze(investment, total_value, as_of))
            .collect();

        Ok(Self {
            as_of,
            total_value,
            summary,
            positions,
            rebalancing,
        })
    }

    /// Render the human-readable transcript.
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PortfolioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Portfolio Analysis")?;
        writeln!(f, "--------------------")?;
        writeln!(f, "Total Portfolio Value: {}", currency(self.total_value))?;

        for position in &self.positions {
            writeln!(f)?;
            writeln!(f, "Investment: {}", position.ticker)?;
            writeln!(f, "Profit/Loss: {}", currency(position.profit_loss))?;
            writeln!(f, "Return: {}", or_na(position.return_percentage.map(percent)))?;
            writeln!(
                f,
                "Performance: {}",
                or_na(position.performance.map(|p| p.to_string()))
            )?;
            writeln!(f, "Sector: {}", position.sector)?;
            writeln!(f, "Risk Level: {}", position.risk_level)?;
            writeln!(
                f,
                "Portfolio Weight: {}",
                or_na(position.weight.map(|w| percent(w * 100.0)))
            )?;
            writeln!(
                f,
                "Capital Gains Tax: {}",
                currency(position.capital_gains_tax)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Rebalancing Recommendations:")?;
        for candidate in &self.rebalancing {
            writeln!(
                f,
                "- Rebalance {} to reach target weight of {}",
                candidate.ticker,
                percent(candidate.target_weight * 100.0)
            )?;
        }
        Ok(())
    }
}

/// Price-to-earnings check for one position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValuationCheck {
    pub ticker: String,
    /// Total earnings attributed to the position
    pub earnings: f64,
    pub price_to_earnings: f64,
    pub overvalued: bool,
}

impl ValuationCheck {
    pub fn evaluate(investment: &Investment, earnings: f64) -> Result<Self> {
        Ok(Self {
            ticker: investment.ticker().to_string(),
            earnings,
            price_to_earnings: metrics::price_to_earnings_ratio(investment, earnings)?,
            overvalued: metrics::is_overvalued(investment, earnings)?,
        })
    }
}

/// Every metric of a single position, rendered through `Display`.
pub struct PositionDetail<'a> {
    pub analysis: &'a InvestmentAnalysis,
    pub valuation: Option<&'a ValuationCheck>,
}

impl fmt::Display for PositionDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.analysis;
        writeln!(f, "Investment: {}", a.ticker)?;
        writeln!(f, "Current Value: {}", currency(a.current_value))?;
        writeln!(f, "Profit/Loss: {}", currency(a.profit_loss))?;
        writeln!(f, "Return: {}", or_na(a.return_percentage.map(percent)))?;
        writeln!(
            f,
            "Annualized Return: {}",
            or_na(a.annualized_return.map(|r| percent(r * 100.0)))
        )?;
        writeln!(
            f,
            "Performance: {}",
            or_na(a.performance.map(|p| p.to_string()))
        )?;
        writeln!(f, "Sector: {}", a.sector)?;
        writeln!(f, "Risk Score: {}", two_decimals(a.risk_score))?;
        writeln!(f, "Risk Level: {}", a.risk_level)?;
        writeln!(
            f,
            "Portfolio Weight: {}",
            or_na(a.weight.map(|w| percent(w * 100.0)))
        )?;
        writeln!(f, "Dividend Yield: {}", or_na(a.dividend_yield.map(percent)))?;
        writeln!(f, "Capital Gains Tax: {}", currency(a.capital_gains_tax))?;
        writeln!(f, "Dividend Tax: {}", currency(a.dividend_tax))?;

        if let Some(check) = self.valuation {
            writeln!(f, "P/E Ratio: {}", two_decimals(check.price_to_earnings))?;
            writeln!(
                f,
                "Overvalued: {}",
                if check.overvalued { "yes" } else { "no" }
            )?;
        }
        Ok(())
    }
}

/// Currency with two decimals, e.g. `$1250.00`.
pub fn currency(value: f64) -> String {
    format!("${}", two_decimals(value))
}

/// Percentage value with two decimals, e.g. `16.67%`.
pub fn percent(value: f64) -> String {
    format!("{}%", two_decimals(value))
}

/// Rounds half away from zero on the shortest decimal form of `value`, so
/// `0.125` prints as `0.13` rather than following the binary expansion.
fn two_decimals(value: f64) -> String {
    match Decimal::from_str(&value.to_string()) {
        Ok(decimal) => {
            let mut rounded =
                decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(2);
            rounded.to_string()
        }
        // Out of Decimal range or not finite
        Err(_) => format!("{:.2}", value),
    }
}

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
