pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{ConversionForm, ConversionPipeline, Currency};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: String,
        from: Option<Currency>,
        to: Option<Currency>,
    },
    Interactive,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxform starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = Arc::new(providers::FastForexProvider::new(
        &config.provider.base_url,
        &config.provider.api_key,
    )?);
    let notifier = Arc::new(cli::ui::ConsoleNotifier);

    match command {
        AppCommand::Convert { amount, from, to } => {
            let from = from.unwrap_or(config.defaults.from);
            let to = to.unwrap_or(if from == config.defaults.to {
                from.target_options()[0]
            } else {
                config.defaults.to
            });
            let form = ConversionForm::new(from, to)?;
            let pipeline = ConversionPipeline::new(form, provider, notifier, config.debounce());
            cli::convert::run(&pipeline, &amount).await?;
        }
        AppCommand::Interactive => {
            let form = ConversionForm::new(config.defaults.from, config.defaults.to)?;
            let pipeline = ConversionPipeline::new(form, provider, notifier, config.debounce());
            cli::interactive::run(Arc::new(pipeline)).await?;
        }
    }
    Ok(())
}
