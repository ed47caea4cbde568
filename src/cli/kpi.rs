use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};
use tracing::{debug, warn};

use finboard::amount::sum_decimals;
use finboard::report::{load_json, MonthlyReport};
use finboard::settings::load_settings;

use super::DisplayArgs;

/// Cross-check the category breakdown against the reported expense total.
fn check_breakdown(report: &MonthlyReport) {
    let totals = report.category_breakdown.iter().map(|c| &c.total);
    match (sum_decimals(totals), report.expense_total.to_decimal()) {
        (Ok(sum), Ok(expense)) if sum != expense => {
            warn!(%sum, %expense, "category breakdown does not add up to the expense total");
        }
        (Err(e), _) | (_, Err(e)) => debug!(error = %e, "skipping breakdown check"),
        _ => {}
    }
}

pub fn run(file: &std::path::Path, display: &DisplayArgs) -> Result<()> {
    let settings = load_settings();
    let report: MonthlyReport =
        load_json(file).with_context(|| format!("Failed to read report {}", file.display()))?;
    check_breakdown(&report);

    let fmt = display.formatter(&settings)?;
    let currency = display.currency(Some(&report.currency), &settings);

    let net = fmt.format_kpi(Some(&report.net_total), &currency);
    let net = match report.net_total.parse() {
        Some(v) if v < 0.0 => net.red().bold(),
        Some(_) => net.green().bold(),
        None => net.normal(),
    };

    let mut table = Table::new();
    table.set_header(vec!["", "Amount"]);
    let rows = [
        ("Income", fmt.format_kpi(Some(&report.income_total), &currency).normal()),
        ("Expenses", fmt.format_kpi(Some(&report.expense_total), &currency).normal()),
        ("Net", net),
        ("Transactions", report.transactions_count.to_string().normal()),
    ];
    for (label, value) in rows {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("Monthly Summary {}\n{table}", report.month);
    Ok(())
}
