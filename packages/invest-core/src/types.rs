//! Core data types for investment analysis.

use crate::{Error, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// One held position.
///
/// Identity fields (`ticker`, `purchase_date`) are fixed at creation. Market
/// fields can be updated through the validated setters as new prices, dividends
/// or volatility estimates arrive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "InvestmentRecord")]
pub struct Investment {
    ticker: String,
    quantity: u32,
    purchase_price: f64,
    current_price: f64,
    category: String,
    purchase_date: NaiveDate,
    last_dividend: f64,
    volatility: f64,
}

impl Investment {
    /// Create a new investment, validating the purchase date against today.
    ///
    /// `last_dividend` and `volatility` start at zero.
    pub fn new(
        ticker: &str,
        quantity: u32,
        purchase_price: f64,
        current_price: f64,
        category: &str,
        purchase_date: NaiveDate,
    ) -> Result<Self> {
        Self::new_as_of(
            ticker,
            quantity,
            purchase_price,
            current_price,
            category,
            purchase_date,
            Local::now().date_naive(),
        )
    }

    /// Create a new investment, validating the purchase date against `today`.
    pub fn new_as_of(
        ticker: &str,
        quantity: u32,
        purchase_price: f64,
        current_price: f64,
        category: &str,
        purchase_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Self> {
        if ticker.trim().is_empty() {
            return Err(Error::InvalidInput("ticker must not be empty".to_string()));
        }
        if purchase_date > today {
            return Err(Error::InvalidInput(format!(
                "purchase date {} is in the future",
                purchase_date
            )));
        }

        let mut investment = Self {
            ticker: ticker.to_string(),
            quantity,
            purchase_price: 0.0,
            current_price: 0.0,
            category: category.to_string(),
            purchase_date,
            last_dividend: 0.0,
            volatility: 0.0,
        };
        investment.set_purchase_price(purchase_price)?;
        investment.set_current_price(current_price)?;
        Ok(investment)
    }

    /// Ticker symbol as given at creation.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Units held.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price per unit at acquisition.
    pub fn purchase_price(&self) -> f64 {
        self.purchase_price
    }

    /// Latest known price per unit.
    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    /// Asset category tag, e.g. "Stock" or "Cryptocurrency".
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Date the position was acquired.
    pub fn purchase_date(&self) -> NaiveDate {
        self.purchase_date
    }

    /// Per-unit dividend most recently paid.
    pub fn last_dividend(&self) -> f64 {
        self.last_dividend
    }

    /// Risk proxy, e.g. historical standard deviation.
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    /// Update the acquisition price. Must be strictly positive.
    pub fn set_purchase_price(&mut self, price: f64) -> Result<()> {
        if !price.is_finite() || price <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "purchase price must be positive, got {}",
                price
            )));
        }
        self.purchase_price = price;
        Ok(())
    }

    /// Update the market price. Must be non-negative.
    pub fn set_current_price(&mut self, price: f64) -> Result<()> {
        self.current_price = non_negative("current price", price)?;
        Ok(())
    }

    pub fn set_category(&mut self, category: &str) {
        self.category = category.to_string();
    }

    /// Update the last per-unit dividend. Must be non-negative.
    pub fn set_last_dividend(&mut self, dividend: f64) -> Result<()> {
        self.last_dividend = non_negative("last dividend", dividend)?;
        Ok(())
    }

    /// Update the volatility estimate. Must be non-negative.
    pub fn set_volatility(&mut self, volatility: f64) -> Result<()> {
        self.volatility = non_negative("volatility", volatility)?;
        Ok(())
    }

    /// Builder-style variant of [`set_last_dividend`](Self::set_last_dividend).
    pub fn with_last_dividend(mut self, dividend: f64) -> Result<Self> {
        self.set_last_dividend(dividend)?;
        Ok(self)
    }

    /// Builder-style variant of [`set_volatility`](Self::set_volatility).
    pub fn with_volatility(mut self, volatility: f64) -> Result<Self> {
        self.set_volatility(volatility)?;
        Ok(self)
    }
}

fn non_negative(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidInput(format!(
            "{} must be non-negative, got {}",
            field, value
        )));
    }
    Ok(value)
}

/// Unvalidated investment as it appears in a portfolio file.
///
/// Quantity is signed here so a negative count is reported as invalid input
/// rather than as a parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentRecord {
    pub ticker: String,
    pub quantity: i64,
    pub purchase_price: f64,
    pub current_price: f64,
    pub category: String,
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub last_dividend: f64,
    #[serde(default)]
    pub volatility: f64,
}

impl InvestmentRecord {
    /// Validate the record into an [`Investment`] as of `today`.
    pub fn into_investment(self, today: NaiveDate) -> Result<Investment> {
        let quantity = u32::try_from(self.quantity).map_err(|_| {
            Error::InvalidInput(format!(
                "quantity for {} must be a non-negative count, got {}",
                self.ticker, self.quantity
            ))
        })?;

        Investment::new_as_of(
            &self.ticker,
            quantity,
            self.purchase_price,
            self.current_price,
            &self.category,
            self.purchase_date,
            today,
        )?
        .with_last_dividend(self.last_dividend)?
        .with_volatility(self.volatility)
    }
}

impl TryFrom<InvestmentRecord> for Investment {
    type Error = Error;

    fn try_from(record: InvestmentRecord) -> Result<Self> {
        record.into_investment(Local::now().date_naive())
    }
}

/// An ordered collection of investments.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Portfolio {
    /// Positions in report order
    pub investments: Vec<Investment>,
}

impl Portfolio {
    /// Create a new empty portfolio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a position, keeping insertion order.
    pub fn push(&mut self, investment: Investment) {
        self.investments.push(investment);
    }

    /// Get the number of positions.
    pub fn len(&self) -> usize {
        self.investments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.investments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Investment> {
        self.investments.iter()
    }

    /// Find a position by ticker (case insensitive).
    pub fn find(&self, ticker: &str) -> Option<&Investment> {
        let ticker = ticker.trim();
        self.investments
            .iter()
            .find(|i| i.ticker.eq_ignore_ascii_case(ticker))
    }

    /// Find a mutable position by ticker (case insensitive).
    pub fn find_mut(&mut self, ticker: &str) -> Option<&mut Investment> {
        let ticker = ticker.trim();
        self.investments
            .iter_mut()
            .find(|i| i.ticker.eq_ignore_ascii_case(ticker))
    }

    /// Owned copy for analysis while this portfolio keeps receiving updates.
    pub fn snapshot(&self) -> Portfolio {
        self.clone()
    }
}

impl From<Vec<Investment>> for Portfolio {
    fn from(investments: Vec<Investment>) -> Self {
        Self { investments }
    }
}

impl<'a> IntoIterator for &'a Portfolio {
    type Item = &'a Investment;
    type IntoIter = std::slice::Iter<'a, Investment>;

    fn into_iter(self) -> Self::IntoIter {
        self.investments.iter()
    }
}

/// API response wrapper for success cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
