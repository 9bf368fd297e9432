//! Where a portfolio comes from: a JSON file or the built-in demo.

use crate::types::{Investment, InvestmentRecord, Portfolio};
use crate::{Error, Result};
use chrono::{Local, Months, NaiveDate};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable that overrides the default portfolio file.
pub const PORTFOLIO_FILE_ENV: &str = "INVEST_PORTFOLIO_FILE";

/// Source of the positions to analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortfolioSource {
    /// JSON portfolio file
    File(PathBuf),
    /// Built-in demonstration portfolio
    Demo,
}

impl PortfolioSource {
    /// Resolve the source from an explicit path, `INVEST_PORTFOLIO_FILE`, or
    /// the default path, falling back to the demo portfolio.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        Self::resolve_with(
            explicit,
            env::var(PORTFOLIO_FILE_ENV).ok(),
            Self::default_path(),
        )
    }

    /// Resolution with the environment and default path supplied by the caller.
    ///
    /// Explicit and environment paths are used as given; a missing file then
    /// surfaces as an IO error on load. The default path is only used if it
    /// exists.
    pub fn resolve_with(
        explicit: Option<PathBuf>,
        env_path: Option<String>,
        default_path: PathBuf,
    ) -> Self {
        if let Some(path) = explicit {
            return PortfolioSource::File(path);
        }
        if let Some(path) = env_path.filter(|p| !p.trim().is_empty()) {
            return PortfolioSource::File(PathBuf::from(path));
        }
        if default_path.exists() {
            return PortfolioSource::File(default_path);
        }
        PortfolioSource::Demo
    }

    /// Get the default portfolio file path.
    ///
    /// Default path: `~/.invest/portfolio.json`
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".invest/portfolio.json"))
            .unwrap_or_else(|| PathBuf::from("portfolio.json"))
    }

    /// Load the portfolio, validating dates against today.
    pub fn load(&self) -> Result<Portfolio> {
        self.load_as_of(Local::now().date_naive())
    }

    pub fn load_as_of(&self, today: NaiveDate) -> Result<Portfolio> {
        match self {
            PortfolioSource::File(path) => load_from_path(path, today),
            PortfolioSource::Demo => {
                info!("No portfolio file found, using demo portfolio");
                demo_portfolio(today)
            }
        }
    }
}

/// Load a portfolio file.
///
/// Accepts either a bare array of investments or an object with an
/// `investments` array. Every record is validated as of `today`.
pub fn load_from_path(path: &Path, today: NaiveDate) -> Result<Portfolio> {
    let content = fs::read_to_string(path)?;
    let data: serde_json::Value = serde_json::from_str(&content)?;

    let records: Vec<InvestmentRecord> = match data {
        serde_json::Value::Object(mut map) => match map.remove("investments") {
            Some(investments) => serde_json::from_value(investments)?,
            None => {
                return Err(Error::InvalidInput(format!(
                    "{} has no `investments` array",
                    path.display()
                )))
            }
        },
        other => serde_json::from_value(other)?,
    };

    let investments = records
        .into_iter()
        .map(|record| record.into_investment(today))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        path = %path.display(),
        positions = investments.len(),
        "loaded portfolio file"
    );
    Ok(Portfolio::from(investments))
}

/// Three-position demo: AAPL and TSLA stock plus BTC.
pub fn demo_portfolio(today: NaiveDate) -> Result<Portfolio> {
    let months_ago = |months: u32| {
        today
            .checked_sub_months(Months::new(months))
            .ok_or_else(|| Error::InvalidInput(format!("{} months before {}", months, today)))
    };

    Ok(Portfolio::from(vec![
        Investment::new_as_of("AAPL", 50, 150.0, 175.0, "Stock", months_ago(6)?, today)?,
        Investment::new_as_of("TSLA", 20, 600.0, 700.0, "Stock", months_ago(12)?, today)?,
        Investment::new_as_of(
            "BTC",
            2,
            30000.0,
            35000.0,
            "Cryptocurrency",
            months_ago(3)?,
            today,
        )?,
    ]))
}
