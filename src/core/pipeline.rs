//! Debounced rate-fetch pipeline driving a [`ConversionForm`]

use crate::core::currency::{Currency, RateProvider};
use crate::core::debounce::Debouncer;
use crate::core::error::FormError;
use crate::core::form::{
    ConversionForm, ConversionInput, ConversionRecord, ConversionStatus, FetchRequest,
};
use crate::core::notify::Notifier;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tracing::{debug, warn};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
pub const CONFIRM_MESSAGE: &str = "Conversion successful!";

/// Point-in-time copy of the form for rendering.
#[derive(Debug, Clone)]
pub struct FormSnapshot {
    pub input: ConversionInput,
    pub converted_amount: String,
    pub status: ConversionStatus,
    pub history: Vec<ConversionRecord>,
    pub target_options: Vec<Currency>,
}

pub struct ConversionPipeline {
    form: Arc<Mutex<ConversionForm>>,
    status: Arc<watch::Sender<ConversionStatus>>,
    debouncer: Debouncer<FetchRequest>,
    notifier: Arc<dyn Notifier>,
}

impl ConversionPipeline {
    pub fn new(
        form: ConversionForm,
        provider: Arc<dyn RateProvider>,
        notifier: Arc<dyn Notifier>,
        delay: Duration,
    ) -> Self {
        let (status, _) = watch::channel(form.status().clone());
        let status = Arc::new(status);
        let form = Arc::new(Mutex::new(form));

        let debouncer = {
            let form = Arc::clone(&form);
            let status = Arc::clone(&status);
            Debouncer::new(delay, move |request: FetchRequest| {
                let form = Arc::clone(&form);
                let status = Arc::clone(&status);
                let provider = Arc::clone(&provider);
                async move {
                    debug!(
                        from = %request.from,
                        to = %request.to,
                        generation = request.generation,
                        "Fetching rate"
                    );
                    let rates = provider.fetch_rates(request.from, request.to).await;
                    if let Err(e) = &rates {
                        warn!(error = %e, "Rate fetch failed");
                    }

                    let mut form = form.lock().await;
                    if form.apply_rates(&request, rates) {
                        status.send_replace(form.status().clone());
                    }
                }
            })
        };

        Self {
            form,
            status,
            debouncer,
            notifier,
        }
    }

    pub async fn set_amount(&self, amount: &str) {
        let mut form = self.form.lock().await;
        let request = form.set_amount(amount);
        self.publish(&form, request);
    }

    pub async fn set_source(&self, source: Currency) {
        let mut form = self.form.lock().await;
        let request = form.set_source(source);
        self.publish(&form, request);
    }

    pub async fn set_target(&self, target: Currency) -> Result<(), FormError> {
        let mut form = self.form.lock().await;
        let request = form.set_target(target)?;
        self.publish(&form, request);
        Ok(())
    }

    /// Appends the current conversion to the history, notifies, and resets
    /// the amount.
    pub async fn confirm(&self) -> Result<ConversionRecord, FormError> {
        let record = {
            let mut form = self.form.lock().await;
            let record = form.confirm()?;
            self.publish(&form, None);
            record
        };
        debug!(?record, "Conversion confirmed");
        self.notifier.success(CONFIRM_MESSAGE);
        Ok(record)
    }

    pub async fn snapshot(&self) -> FormSnapshot {
        let form = self.form.lock().await;
        FormSnapshot {
            input: form.input().clone(),
            converted_amount: form.converted_amount().to_string(),
            status: form.status().clone(),
            history: form.history().to_vec(),
            target_options: form.target_options(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ConversionStatus> {
        self.status.subscribe()
    }

    /// Waits until no fetch is outstanding for the current input.
    pub async fn wait_until_settled(&self) -> ConversionStatus {
        let mut rx = self.status.subscribe();
        let settled = rx
            .wait_for(|status| *status != ConversionStatus::Pending)
            .await
            .map(|status| status.clone());
        match settled {
            Ok(status) => status,
            Err(_) => self.form.lock().await.status().clone(),
        }
    }

    fn publish(&self, form: &ConversionForm, request: Option<FetchRequest>) {
        self.status.send_replace(form.status().clone());
        match request {
            Some(request) => self.debouncer.trigger(request),
            None => self.debouncer.cancel(),
        }
    }
}
