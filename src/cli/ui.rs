use crate::core::ConversionStatus;
use crate::core::notify::Notifier;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Value,
    Success,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Value => style(text).cyan().bold(),
        StyleType::Success => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// One-line description of a conversion status.
pub fn status_line(status: &ConversionStatus, converted_amount: &str, target: &str) -> String {
    match status {
        ConversionStatus::Idle if converted_amount.is_empty() => {
            style_text("Enter an amount", StyleType::Subtle)
        }
        ConversionStatus::Idle => style_text(
            &format!("Last result: {converted_amount} {target}"),
            StyleType::Subtle,
        ),
        ConversionStatus::Pending => style_text("Fetching rate...", StyleType::Subtle),
        ConversionStatus::Resolved(value) => {
            style_text(&format!("{value} {target}"), StyleType::Value)
        }
        ConversionStatus::Failed(reason) => {
            style_text(&format!("Failed: {reason}"), StyleType::Error)
        }
    }
}

/// Spinner shown while a rate is being fetched.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Prints success notifications to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("{} {}", style("✔").green(), style_text(message, StyleType::Success));
    }
}
