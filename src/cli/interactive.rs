use super::{history, ui};
use crate::core::{ConversionPipeline, ConversionStatus, Currency};
use anyhow::{Context, Result};
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const HELP: &str = "\
Commands:
  amount <value>   set the amount (empty clears it); a bare number works too
  from <code>      set the source currency
  to <code>        set the target currency
  confirm          record the current conversion
  history          show confirmed conversions
  show             show the form
  help             show this help
  quit             leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    Amount(String),
    From(Currency),
    To(Currency),
    Confirm,
    History,
    Show,
    Help,
    Quit,
}

impl FromStr for FormCommand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (verb, arg) = match s.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (s, ""),
        };

        match verb.to_lowercase().as_str() {
            "amount" | "a" => Ok(FormCommand::Amount(arg.to_string())),
            "from" | "f" => Ok(FormCommand::From(
                arg.parse().context("Usage: from <EUR|USD|CZK>")?,
            )),
            "to" | "t" => Ok(FormCommand::To(
                arg.parse().context("Usage: to <EUR|USD|CZK>")?,
            )),
            "confirm" | "c" if arg.is_empty() => Ok(FormCommand::Confirm),
            "history" | "h" if arg.is_empty() => Ok(FormCommand::History),
            "show" | "s" if arg.is_empty() => Ok(FormCommand::Show),
            "help" | "?" if arg.is_empty() => Ok(FormCommand::Help),
            "quit" | "q" | "exit" if arg.is_empty() => Ok(FormCommand::Quit),
            _ if arg.is_empty() && s.starts_with(|c: char| c.is_ascii_digit() || c == '.') => {
                Ok(FormCommand::Amount(s.to_string()))
            }
            _ => Err(anyhow::anyhow!("Unknown command: {}. Type `help`.", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Applies one command to the pipeline, printing user-facing feedback.
pub async fn handle_command(pipeline: &ConversionPipeline, command: FormCommand) -> Flow {
    debug!(?command, "Handling command");
    match command {
        FormCommand::Amount(amount) => pipeline.set_amount(&amount).await,
        FormCommand::From(currency) => {
            let previous = pipeline.snapshot().await.input.target;
            pipeline.set_source(currency).await;
            let target = pipeline.snapshot().await.input.target;
            if target != previous {
                println!(
                    "{}",
                    ui::style_text(
                        &format!("Target switched to {target}"),
                        ui::StyleType::Subtle
                    )
                );
            }
        }
        FormCommand::To(currency) => {
            if let Err(e) = pipeline.set_target(currency).await {
                println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
            }
        }
        FormCommand::Confirm => {
            if let Err(e) = pipeline.confirm().await {
                println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
            }
        }
        FormCommand::History => history::print_history(&pipeline.snapshot().await.history),
        FormCommand::Show => print_form(pipeline).await,
        FormCommand::Help => println!("{HELP}"),
        FormCommand::Quit => return Flow::Quit,
    }
    Flow::Continue
}

pub async fn print_form(pipeline: &ConversionPipeline) {
    let snapshot = pipeline.snapshot().await;
    let options: Vec<&str> = snapshot
        .target_options
        .iter()
        .map(|c| c.code())
        .collect();
    let amount = if snapshot.input.amount.is_empty() {
        ui::style_text("(empty)", ui::StyleType::Subtle)
    } else {
        snapshot.input.amount.clone()
    };

    println!(
        "{} {}",
        ui::style_text("Amount:", ui::StyleType::Label),
        amount
    );
    println!(
        "{} {}",
        ui::style_text("From:  ", ui::StyleType::Label),
        snapshot.input.source
    );
    println!(
        "{} {} {}",
        ui::style_text("To:    ", ui::StyleType::Label),
        snapshot.input.target,
        ui::style_text(&format!("[{}]", options.join("|")), ui::StyleType::Subtle)
    );
    println!(
        "{} {}",
        ui::style_text("Result:", ui::StyleType::Label),
        ui::status_line(
            &snapshot.status,
            &snapshot.converted_amount,
            snapshot.input.target.code()
        )
    );
    if !snapshot.input.amount.is_empty() {
        println!(
            "{}",
            ui::style_text("Type `confirm` to record it.", ui::StyleType::Subtle)
        );
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

/// Runs the form session on stdin until `quit` or end of input.
pub async fn run(pipeline: Arc<ConversionPipeline>) -> Result<()> {
    println!(
        "{}",
        ui::style_text("Currency Converter", ui::StyleType::Title)
    );
    println!("{HELP}\n");
    print_form(&pipeline).await;

    let watcher = {
        let pipeline = Arc::clone(&pipeline);
        let mut rx = pipeline.subscribe();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let status = rx.borrow_and_update().clone();
                if matches!(
                    status,
                    ConversionStatus::Resolved(_) | ConversionStatus::Failed(_)
                ) {
                    let snapshot = pipeline.snapshot().await;
                    println!(
                        "\n{} {} = {}",
                        snapshot.input.amount,
                        snapshot.input.source,
                        ui::status_line(
                            &status,
                            &snapshot.converted_amount,
                            snapshot.input.target.code()
                        )
                    );
                    prompt();
                }
            }
        })
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        if line.trim().is_empty() {
            prompt();
            continue;
        }
        match line.parse::<FormCommand>() {
            Ok(command) => {
                if handle_command(&pipeline, command).await == Flow::Quit {
                    break;
                }
            }
            Err(e) => println!("{}", ui::style_text(&format!("{e:#}"), ui::StyleType::Error)),
        }
        prompt();
    }

    watcher.abort();
    history::print_history(&pipeline.snapshot().await.history);
    Ok(())
}
