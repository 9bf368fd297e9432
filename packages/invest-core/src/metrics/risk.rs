//! Volatility-based risk assessment.

use crate::types::Investment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Linear risk score, `volatility * 10`. Not clamped.
pub fn risk_score(investment: &Investment) -> f64 {
    investment.volatility() * 10.0
}

/// Risk bucket derived from the risk score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket a risk score. A score sitting exactly on a threshold falls to the
/// lower bucket.
pub fn risk_level_for(score: f64) -> RiskLevel {
    if score > 8.0 {
        RiskLevel::High
    } else if score > 5.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn risk_level(investment: &Investment) -> RiskLevel {
    risk_level_for(risk_score(investment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn with_volatility(volatility: f64) -> Investment {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        Investment::new_as_of("BTC", 2, 30000.0, 35000.0, "Cryptocurrency", today, today)
            .unwrap()
            .with_volatility(volatility)
            .unwrap()
    }

    #[test]
    fn test_risk_score_is_linear() {
        assert_eq!(risk_score(&with_volatility(0.0)), 0.0);
        assert_eq!(risk_score(&with_volatility(0.25)), 2.5);
        // No upper clamp
        assert_eq!(risk_score(&with_volatility(3.0)), 30.0);
    }

    #[test]
    fn test_risk_level_boundaries() {
        assert_eq!(risk_level_for(8.0001), RiskLevel::High);
        assert_eq!(risk_level_for(8.0), RiskLevel::Medium);
        assert_eq!(risk_level_for(5.0001), RiskLevel::Medium);
        assert_eq!(risk_level_for(5.0), RiskLevel::Low);
        assert_eq!(risk_level_for(0.0), RiskLevel::Low);
    }

    #[test]
    fn test_risk_level_from_volatility() {
        assert_eq!(risk_level(&with_volatility(0.0)), RiskLevel::Low);
        assert_eq!(risk_level(&with_volatility(0.6)), RiskLevel::Medium);
        assert_eq!(risk_level(&with_volatility(0.95)), RiskLevel::High);
        assert_eq!(RiskLevel::High.to_string(), "High");
    }
}
