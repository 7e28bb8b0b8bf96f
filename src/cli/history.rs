use super::ui;
use crate::core::ConversionRecord;
use comfy_table::{Cell, CellAlignment, Table};

/// Builds the conversion log table, numbered from 1 in insertion order.
pub fn history_table(history: &[ConversionRecord]) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Before"),
        ui::header_cell("After"),
    ]);

    for (idx, record) in history.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1).set_alignment(CellAlignment::Right),
            Cell::new(format!("{} {}", record.before, record.from_currency))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{} {}", record.after, record.to_currency))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn print_history(history: &[ConversionRecord]) {
    if history.is_empty() {
        println!("{}", ui::style_text("No conversions yet.", ui::StyleType::Subtle));
        return;
    }
    println!(
        "\n{}",
        ui::style_text("Table of Conversions", ui::StyleType::Title)
    );
    println!("{}", history_table(history));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Currency;

    #[test]
    fn test_history_table_rows_are_numbered_in_order() {
        let history = vec![
            ConversionRecord {
                before: "100".to_string(),
                after: "110.00".to_string(),
                from_currency: Currency::Eur,
                to_currency: Currency::Usd,
            },
            ConversionRecord {
                before: "50".to_string(),
                after: "1250.00".to_string(),
                from_currency: Currency::Eur,
                to_currency: Currency::Czk,
            },
        ];

        let table = history_table(&history);
        assert_eq!(table.row_count(), 2);

        let rendered = table.to_string();
        assert!(rendered.contains("100 EUR"));
        assert!(rendered.contains("110.00 USD"));
        assert!(rendered.contains("1250.00 CZK"));
        let first = rendered.find("110.00 USD").unwrap();
        let second = rendered.find("1250.00 CZK").unwrap();
        assert!(first < second);
    }
}
