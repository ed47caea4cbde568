pub mod chart;
pub mod config;
pub mod format;
pub mod kpi;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};

use finboard::currency::{CurrencyFormatter, Locale};
use finboard::settings::Settings;

#[derive(Parser)]
#[command(
    name = "finboard",
    version,
    about = "Render personal-finance report payloads as charts, tables and KPI tiles."
)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Format a single backend amount for display.
    Format {
        /// Decimal amount as sent by the backend, e.g. -12.34
        #[arg(allow_hyphen_values = true)]
        amount: String,
        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Turn a saved report payload into chart rows.
    Chart {
        #[command(subcommand)]
        command: ChartCommands,
    },
    /// Show the KPI tiles of a monthly report.
    Kpi {
        /// Monthly report JSON (use - for stdin)
        file: PathBuf,
        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Show or change display settings.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ChartCommands {
    /// Top payees of a monthly report.
    Payees(ChartArgs),
    /// Spending by category of a monthly report.
    Categories(ChartArgs),
    /// Net worth history.
    NetWorth(ChartArgs),
    /// Category spending against its monthly average.
    Trends(ChartArgs),
    /// Income and expenses per month of an annual report.
    Annual(ChartArgs),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the current settings.
    Show,
    /// Set the fallback currency code (ISO 4217).
    SetCurrency { code: String },
    /// Set the display locale, e.g. de-DE.
    SetLocale { tag: String },
    /// Go back to the locale from the environment.
    ClearLocale,
}

#[derive(Args)]
pub struct DisplayArgs {
    /// Currency code (defaults to the report's currency, then settings)
    #[arg(long)]
    pub currency: Option<String>,
    /// Locale tag such as en-US or de-DE (defaults to settings, then environment)
    #[arg(long)]
    pub locale: Option<String>,
}

#[derive(Args)]
pub struct ChartArgs {
    /// Report JSON (use - for stdin)
    pub file: PathBuf,
    #[command(flatten)]
    pub display: DisplayArgs,
    /// Write chart rows as CSV instead of a table
    #[arg(long)]
    pub csv: bool,
}

impl DisplayArgs {
    pub(crate) fn formatter(&self, settings: &Settings) -> Result<CurrencyFormatter> {
        match &self.locale {
            Some(tag) => Locale::parse(tag)
                .map(CurrencyFormatter::new)
                .ok_or_else(|| anyhow!("Unknown locale: {tag}")),
            None => Ok(settings.formatter()),
        }
    }

    /// Flag, then the report's own currency, then settings.
    pub(crate) fn currency(&self, report_currency: Option<&str>, settings: &Settings) -> String {
        self.currency
            .as_deref()
            .or(report_currency.filter(|c| !c.trim().is_empty()))
            .unwrap_or(&settings.currency)
            .to_string()
    }
}
