use super::ui;
use crate::core::config::ProviderConfig;
use crate::core::{Currency, DailyRates, DateKey, ExchangeRateReport};
use crate::providers::privatbank;
use anyhow::{Context, Result};
use comfy_table::Cell;

impl DailyRates {
    pub fn display_as_table(&self) -> String {
        let mut output = format!(
            "Rates for {}\n\n",
            ui::style_text(self.date.as_str(), ui::StyleType::Title)
        );

        if self.rates.is_empty() {
            output.push_str(&ui::style_text(
                "No EUR or USD rates reported for this date",
                ui::StyleType::Subtle,
            ));
            return output;
        }

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Currency"),
            ui::header_cell("Sale (UAH)"),
            ui::header_cell("Purchase (UAH)"),
        ]);

        // Fixed row order so every date reads the same
        for currency in Currency::ALL {
            if let Some(entry) = self.rates.get(&currency) {
                table.add_row(vec![
                    Cell::new(currency.code()),
                    ui::format_optional_cell(entry.sale, |v| format!("{v:.2}")),
                    ui::format_optional_cell(entry.purchase, |v| format!("{v:.2}")),
                ]);
            }
        }

        output.push_str(&table.to_string());
        output
    }
}

/// Fetches the report while drawing a progress bar on stderr.
pub async fn fetch_with_progress(
    config: &ProviderConfig,
    dates: &[DateKey],
) -> Result<ExchangeRateReport> {
    let pb = ui::new_progress_bar(dates.len() as u64, true);
    pb.set_message("Fetching rates...");

    let report = privatbank::fetch(config, dates, &|| pb.inc(1)).await;
    pb.finish_and_clear();
    report
}

pub fn print_table(report: &ExchangeRateReport) {
    let num_entries = report.len();
    for (i, entry) in report.iter().enumerate() {
        println!("{}", entry.display_as_table());
        if i < num_entries - 1 {
            ui::print_separator();
        }
    }
}

pub fn print_json(report: &ExchangeRateReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    println!("{json}");
    Ok(())
}
