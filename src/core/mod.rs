//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod debounce;
pub mod error;
pub mod form;
pub mod log;
pub mod notify;
pub mod pipeline;

// Re-export main types for cleaner imports
pub use currency::{Currency, RateProvider, RateTable};
pub use error::{FormError, RateError};
pub use form::{ConversionForm, ConversionRecord, ConversionStatus};
pub use notify::Notifier;
pub use pipeline::{ConversionPipeline, FormSnapshot};
