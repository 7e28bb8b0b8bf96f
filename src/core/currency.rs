//! Currency codes and exchange rate abstractions

use crate::core::error::RateError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Usd,
    Czk,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Eur, Currency::Usd, Currency::Czk];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Czk => "CZK",
        }
    }

    /// Currencies selectable as conversion target while `self` is the source.
    pub fn target_options(&self) -> Vec<Currency> {
        Self::ALL.into_iter().filter(|c| c != self).collect()
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            "CZK" => Ok(Currency::Czk),
            _ => Err(anyhow::anyhow!("Unsupported currency: {}", s)),
        }
    }
}

/// Quote currency code to rate, as returned for a single base currency.
pub type RateTable = HashMap<String, f64>;

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self, from: Currency, to: Currency) -> Result<RateTable, RateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_options_exclude_source() {
        for source in Currency::ALL {
            let options = source.target_options();
            assert_eq!(options.len(), 2);
            assert!(!options.contains(&source));
        }
        assert_eq!(
            Currency::Eur.target_options(),
            vec![Currency::Usd, Currency::Czk]
        );
        assert_eq!(
            Currency::Usd.target_options(),
            vec![Currency::Eur, Currency::Czk]
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("eur".parse::<Currency>().unwrap(), Currency::Eur);
        assert_eq!(" Czk ".parse::<Currency>().unwrap(), Currency::Czk);
        let err = "GBP".parse::<Currency>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported currency: GBP");
    }

    #[test]
    fn test_serde_uses_codes() {
        let c: Currency = serde_yaml::from_str("CZK").unwrap();
        assert_eq!(c, Currency::Czk);
        assert_eq!(serde_json::to_string(&Currency::Usd).unwrap(), "\"USD\"");
        assert_eq!(Currency::Eur.to_string(), "EUR");
    }
}
