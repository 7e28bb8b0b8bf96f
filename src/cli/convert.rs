use super::ui;
use crate::core::{ConversionPipeline, ConversionStatus};
use anyhow::Result;

/// Runs a single conversion through the pipeline and prints the outcome.
pub async fn run(pipeline: &ConversionPipeline, amount: &str) -> Result<String> {
    pipeline.set_amount(amount).await;

    let pb = ui::new_spinner("Fetching rate...");
    let status = pipeline.wait_until_settled().await;
    pb.finish_and_clear();

    let snapshot = pipeline.snapshot().await;
    match status {
        ConversionStatus::Resolved(value) => {
            println!(
                "{} {} = {}",
                snapshot.input.amount,
                snapshot.input.source,
                ui::style_text(
                    &format!("{} {}", value, snapshot.input.target),
                    ui::StyleType::Value
                )
            );
            Ok(value)
        }
        ConversionStatus::Failed(reason) => anyhow::bail!("Conversion failed: {}", reason),
        ConversionStatus::Idle => anyhow::bail!("No amount to convert"),
        ConversionStatus::Pending => anyhow::bail!("Conversion did not settle"),
    }
}
