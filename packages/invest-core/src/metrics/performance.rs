//! Position performance analytics.

use crate::types::Investment;
use crate::{Error, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unrealized gain (positive) or loss (negative) in currency.
pub fn profit_loss(investment: &Investment) -> f64 {
    (investment.current_price() - investment.purchase_price()) * investment.quantity() as f64
}

/// Price return since purchase, in percent (16.67 means 16.67%).
pub fn return_percentage(investment: &Investment) -> Result<f64> {
    let purchase_price = investment.purchase_price();
    if purchase_price == 0.0 {
        return Err(Error::DivisionByZero(format!(
            "purchase price of {} is zero",
            investment.ticker()
        )));
    }
    Ok((investment.current_price() - purchase_price) / purchase_price * 100.0)
}

/// Compound annual return as a fraction, evaluated as of today.
pub fn annualized_return(investment: &Investment) -> Result<f64> {
    annualized_return_as_of(investment, Local::now().date_naive())
}

/// Compound annual return as a fraction, evaluated as of `as_of`.
///
/// Uses a 365-day year. A holding period of zero days has no defined
/// annualization and returns [`Error::DomainError`].
pub fn annualized_return_as_of(investment: &Investment, as_of: NaiveDate) -> Result<f64> {
    let days = (as_of - investment.purchase_date()).num_days();
    if days <= 0 {
        return Err(Error::DomainError(format!(
            "{} has a holding period of {} days, cannot annualize",
            investment.ticker(),
            days
        )));
    }

    let years = days as f64 / 365.0;
    let total_return = 1.0 + return_percentage(investment)? / 100.0;

    Ok(total_return.powf(1.0 / years) - 1.0)
}

/// Last dividend relative to the current price, in percent.
pub fn dividend_yield(investment: &Investment) -> Result<f64> {
    let current_price = investment.current_price();
    if current_price == 0.0 {
        return Err(Error::DivisionByZero(format!(
            "current price of {} is zero",
            investment.ticker()
        )));
    }
    Ok(investment.last_dividend() / current_price * 100.0)
}

/// Performance bucket derived from the annualized return.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PerformanceCategory {
    Excellent,
    Good,
    Regular,
    Poor,
}

impl PerformanceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceCategory::Excellent => "Excellent",
            PerformanceCategory::Good => "Good",
            PerformanceCategory::Regular => "Regular",
            PerformanceCategory::Poor => "Poor",
        }
    }
}

impl fmt::Display for PerformanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket an annualized return expressed in percent.
///
/// Thresholds are strict: exactly 20% is `Good`, exactly 0% is `Poor`.
pub fn performance_category_for(annualized_pct: f64) -> PerformanceCategory {
    if annualized_pct > 20.0 {
        PerformanceCategory::Excellent
    } else if annualized_pct > 10.0 {
        PerformanceCategory::Good
    } else if annualized_pct > 0.0 {
        PerformanceCategory::Regular
    } else {
        PerformanceCategory::Poor
    }
}

/// Categorize a position by its annualized return as of today.
pub fn performance_category(investment: &Investment) -> Result<PerformanceCategory> {
    performance_category_as_of(investment, Local::now().date_naive())
}

pub fn performance_category_as_of(
    investment: &Investment,
    as_of: NaiveDate,
) -> Result<PerformanceCategory> {
    let annualized = annualized_return_as_of(investment, as_of)?;
    Ok(performance_category_for(annualized * 100.0))
}
