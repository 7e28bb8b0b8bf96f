//! Conversion form state and its transitions
//!
//! `ConversionForm` holds everything the pipeline mutates. Every change goes
//! through one of the transition methods below; none of them perform I/O, so
//! the whole state machine can be exercised without a runtime.

use crate::core::currency::{Currency, RateTable};
use crate::core::error::{FormError, RateError};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionStatus {
    /// Amount is empty, nothing scheduled.
    Idle,
    /// A fetch is scheduled or in flight for the current input.
    Pending,
    Resolved(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionInput {
    pub amount: String,
    pub source: Currency,
    pub target: Currency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionRecord {
    pub before: String,
    pub after: String,
    pub from_currency: Currency,
    pub to_currency: Currency,
}

/// Rate lookup captured at the moment the input changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub amount: String,
    pub from: Currency,
    pub to: Currency,
}

#[derive(Debug, Clone)]
pub struct ConversionForm {
    input: ConversionInput,
    converted_amount: String,
    status: ConversionStatus,
    history: Vec<ConversionRecord>,
    generation: u64,
}

impl ConversionForm {
    pub fn new(source: Currency, target: Currency) -> Result<Self, FormError> {
        if source == target {
            return Err(FormError::SameCurrency(source));
        }
        Ok(Self {
            input: ConversionInput {
                amount: String::new(),
                source,
                target,
            },
            converted_amount: String::new(),
            status: ConversionStatus::Idle,
            history: Vec::new(),
            generation: 0,
        })
    }

    pub fn input(&self) -> &ConversionInput {
        &self.input
    }

    /// Last successfully computed amount. May lag behind the input.
    pub fn converted_amount(&self) -> &str {
        &self.converted_amount
    }

    pub fn status(&self) -> &ConversionStatus {
        &self.status
    }

    pub fn history(&self) -> &[ConversionRecord] {
        &self.history
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn target_options(&self) -> Vec<Currency> {
        self.input.source.target_options()
    }

    pub fn set_amount(&mut self, amount: &str) -> Option<FetchRequest> {
        self.input.amount = amount.trim().to_string();
        self.schedule()
    }

    /// Changes the source currency. A source equal to the current target
    /// moves the target to the first remaining option.
    pub fn set_source(&mut self, source: Currency) -> Option<FetchRequest> {
        self.input.source = source;
        if self.input.target == source {
            let options = source.target_options();
            self.input.target = options[0];
            debug!(target_currency = %self.input.target, "Reassigned target currency");
        }
        self.schedule()
    }

    pub fn set_target(&mut self, target: Currency) -> Result<Option<FetchRequest>, FormError> {
        if target == self.input.source {
            return Err(FormError::SameCurrency(target));
        }
        self.input.target = target;
        Ok(self.schedule())
    }

    /// Applies the outcome of a rate fetch. Returns false when the request
    /// has been superseded by a newer input change.
    pub fn apply_rates(
        &mut self,
        request: &FetchRequest,
        rates: Result<RateTable, RateError>,
    ) -> bool {
        if request.generation != self.generation {
            debug!(
                request_generation = request.generation,
                current_generation = self.generation,
                "Discarding stale rate result"
            );
            return false;
        }

        let outcome = rates
            .and_then(|table| {
                table
                    .get(request.to.code())
                    .copied()
                    .ok_or(RateError::MissingRate(request.to))
            })
            .map_err(|e| e.to_string())
            .and_then(|rate| convert_amount(&request.amount, rate).map_err(|e| e.to_string()));

        match outcome {
            Ok(value) => {
                debug!(%value, "Conversion resolved");
                self.converted_amount = value.clone();
                self.status = ConversionStatus::Resolved(value);
            }
            Err(reason) => {
                self.status = ConversionStatus::Failed(reason);
            }
        }
        true
    }

    /// Records the current conversion and resets the form for the next one.
    pub fn confirm(&mut self) -> Result<ConversionRecord, FormError> {
        if self.input.amount.is_empty() {
            return Err(FormError::EmptyAmount);
        }
        let record = ConversionRecord {
            before: self.input.amount.clone(),
            after: self.converted_amount.clone(),
            from_currency: self.input.source,
            to_currency: self.input.target,
        };
        self.history.push(record.clone());
        self.reset_after_confirm();
        Ok(record)
    }

    /// Clears the amount and invalidates any in-flight fetch. Currencies and
    /// the last converted amount are kept.
    fn reset_after_confirm(&mut self) {
        self.input.amount.clear();
        self.generation += 1;
        self.status = ConversionStatus::Idle;
    }

    fn schedule(&mut self) -> Option<FetchRequest> {
        self.generation += 1;
        if self.input.amount.is_empty() {
            self.status = ConversionStatus::Idle;
            return None;
        }
        if let Err(e) = parse_amount(&self.input.amount) {
            self.status = ConversionStatus::Failed(e.to_string());
            return None;
        }
        self.status = ConversionStatus::Pending;
        Some(FetchRequest {
            generation: self.generation,
            amount: self.input.amount.clone(),
            from: self.input.source,
            to: self.input.target,
        })
    }
}

pub fn parse_amount(amount: &str) -> Result<Decimal, FormError> {
    let value = Decimal::from_str(amount.trim())
        .map_err(|_| FormError::InvalidAmount(amount.to_string()))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(FormError::InvalidAmount(amount.to_string()));
    }
    Ok(value)
}

/// `amount × rate`, rounded half away from zero to two decimals.
pub fn convert_amount(amount: &str, rate: f64) -> Result<String, FormError> {
    let amount = parse_amount(amount)?;
    let rate = Decimal::from_f64(rate)
        .ok_or_else(|| FormError::InvalidAmount(format!("rate {rate}")))?;
    let converted = amount
        .checked_mul(rate)
        .ok_or_else(|| FormError::InvalidAmount(amount.to_string()))?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    Ok(format!("{converted:.2}"))
}
