use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};
use serde::Serialize;
use tracing::{info, warn};

use finboard::chart::{map_category_breakdown_for_chart, map_top_payees_for_chart, UNCATEGORIZED};
use finboard::currency::CurrencyFormatter;
use finboard::report::{load_json, AnnualReport, MonthlyReport, NetWorthReport, SpendingTrendReport};
use finboard::series::{annual_rows, net_worth_series, trend_rows};
use finboard::settings::load_settings;

use super::ChartArgs;

fn load<T: serde::de::DeserializeOwned>(args: &ChartArgs) -> Result<T> {
    load_json(&args.file).with_context(|| format!("Failed to read report {}", args.file.display()))
}

fn note_dropped(kind: &str, total: usize, kept: usize) {
    if kept < total {
        warn!(kind, dropped = total - kept, "skipped rows with unparsable amounts");
    } else {
        info!(kind, rows = kept, "chart rows ready");
    }
}

fn write_csv<T: Serialize>(rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn amount_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn signed_cell(fmt: &CurrencyFormatter, value: f64, currency: &str) -> Cell {
    let text = fmt.format_currency(value, currency);
    let text = if value < 0.0 { text.red() } else { text.normal() };
    Cell::new(text).set_alignment(CellAlignment::Right)
}

pub fn payees(args: &ChartArgs) -> Result<()> {
    let settings = load_settings();
    let report: MonthlyReport = load(args)?;
    let rows = map_top_payees_for_chart(&report.top_payees);
    note_dropped("payees", report.top_payees.len(), rows.len());

    if args.csv {
        return write_csv(&rows);
    }
    let fmt = args.display.formatter(&settings)?;
    let currency = args.display.currency(Some(&report.currency), &settings);

    let mut table = Table::new();
    table.set_header(vec!["Payee", "Amount"]);
    for row in &rows {
        table.add_row(vec![
            Cell::new(&row.payee),
            amount_cell(fmt.format_currency(row.amount, &currency)),
        ]);
    }
    println!("Top Payees {}\n{table}", report.month);
    Ok(())
}

pub fn categories(args: &ChartArgs) -> Result<()> {
    let settings = load_settings();
    let report: MonthlyReport = load(args)?;
    let rows = map_category_breakdown_for_chart(&report.category_breakdown);
    note_dropped("categories", report.category_breakdown.len(), rows.len());

    if args.csv {
        return write_csv(&rows);
    }
    let fmt = args.display.formatter(&settings)?;
    let currency = args.display.currency(Some(&report.currency), &settings);

    let mut table = Table::new();
    table.set_header(vec!["Category", "Amount"]);
    for row in &rows {
        table.add_row(vec![
            Cell::new(&row.category),
            amount_cell(fmt.format_currency(row.amount, &currency)),
        ]);
    }
    println!("Spending by Category {}\n{table}", report.month);
    Ok(())
}

pub fn net_worth(args: &ChartArgs) -> Result<()> {
    let settings = load_settings();
    let report: NetWorthReport = load(args)?;
    let rows = net_worth_series(&report.history);
    note_dropped("net-worth", report.history.len(), rows.len());

    if args.csv {
        return write_csv(&rows);
    }
    let fmt = args.display.formatter(&settings)?;
    let currency = args.display.currency(Some(&report.currency), &settings);

    let mut table = Table::new();
    table.set_header(vec!["Month", "Net Worth"]);
    for row in &rows {
        table.add_row(vec![Cell::new(&row.month), signed_cell(&fmt, row.total, &currency)]);
    }

    let change = match report.month_over_month_change.parse() {
        Some(v) if v < 0.0 => fmt.format_signed_change(v, &currency).red(),
        Some(v) => fmt.format_signed_change(v, &currency).green(),
        None => fmt
            .format_money_string(report.month_over_month_change.as_str(), &currency)
            .normal(),
    };
    println!(
        "Net Worth: {} ({change})\n{table}",
        fmt.format_money_string(report.current_total.as_str(), &currency).bold()
    );
    Ok(())
}

pub fn trends(args: &ChartArgs) -> Result<()> {
    let settings = load_settings();
    let report: SpendingTrendReport = load(args)?;
    let rows = trend_rows(&report.categories, UNCATEGORIZED);
    note_dropped(
        "trends",
        report.categories.len().min(finboard::series::TREND_CHART_LIMIT),
        rows.len(),
    );

    if args.csv {
        return write_csv(&rows);
    }
    if rows.is_empty() {
        println!("No spending data for {}.", report.month);
        return Ok(());
    }
    let fmt = args.display.formatter(&settings)?;
    let currency = args.display.currency(Some(&report.currency), &settings);

    let mut table = Table::new();
    table.set_header(vec![
        "Category".to_string(),
        format!("Avg ({} mo)", report.lookback_months),
        "This Month".to_string(),
    ]);
    for row in &rows {
        table.add_row(vec![
            Cell::new(&row.name),
            amount_cell(fmt.format_currency(row.avg, &currency)),
            amount_cell(fmt.format_currency(row.actual, &currency)),
        ]);
    }
    println!(
        "Spending Trends {} (projected {})\n{table}",
        report.month,
        fmt.format_money_string(report.total_projected.as_str(), &currency)
    );
    Ok(())
}

pub fn annual(args: &ChartArgs) -> Result<()> {
    let settings = load_settings();
    let report: AnnualReport = load(args)?;
    let rows = annual_rows(&report.months);
    note_dropped("annual", report.months.len(), rows.len());

    if args.csv {
        return write_csv(&rows);
    }
    let fmt = args.display.formatter(&settings)?;
    let currency = args.display.currency(Some(&report.currency), &settings);

    let mut table = Table::new();
    table.set_header(vec!["Month", "Income", "Expenses", "Net", "Savings Rate"]);
    for row in &rows {
        table.add_row(vec![
            Cell::new(&row.month),
            amount_cell(fmt.format_currency(row.income, &currency)),
            amount_cell(fmt.format_currency(row.expenses, &currency)),
            signed_cell(&fmt, row.net, &currency),
            amount_cell(format!("{:.1}%", row.savings_rate)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        amount_cell(fmt.format_money_string(report.total_income.as_str(), &currency)),
        amount_cell(fmt.format_money_string(report.total_expenses.as_str(), &currency)),
        amount_cell(fmt.format_money_string(report.total_net.as_str(), &currency)),
        amount_cell(format!("{}%", report.avg_savings_rate)),
    ]);
    println!("Annual Overview {}\n{table}", report.year);
    Ok(())
}
