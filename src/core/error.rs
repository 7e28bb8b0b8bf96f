use crate::core::currency::Currency;
use thiserror::Error;

/// Failures of a single rate lookup against the remote service.
#[derive(Debug, Error)]
pub enum RateError {
    #[error("Request error for {pair}: {source}")]
    Request {
        pair: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP error: {status} for currency pair: {pair}")]
    Status {
        pair: String,
        status: reqwest::StatusCode,
    },
    #[error("Malformed rate response for {pair}: {reason}")]
    Malformed { pair: String, reason: String },
    #[error("No rate for {0} in response")]
    MissingRate(Currency),
}

/// Rejected form transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Enter an amount before confirming")]
    EmptyAmount,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Cannot convert {0} into itself")]
    SameCurrency(Currency),
}
