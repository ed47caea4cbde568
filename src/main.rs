mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{ChartCommands, Cli, Commands, ConfigCommands};

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Format { amount, display } => cli::format::run(&amount, &display),
        Commands::Chart { command } => match command {
            ChartCommands::Payees(args) => cli::chart::payees(&args),
            ChartCommands::Categories(args) => cli::chart::categories(&args),
            ChartCommands::NetWorth(args) => cli::chart::net_worth(&args),
            ChartCommands::Trends(args) => cli::chart::trends(&args),
            ChartCommands::Annual(args) => cli::chart::annual(&args),
        },
        Commands::Kpi { file, display } => cli::kpi::run(&file, &display),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::SetCurrency { code } => cli::config::set_currency(&code),
            ConfigCommands::SetLocale { tag } => cli::config::set_locale(&tag),
            ConfigCommands::ClearLocale => cli::config::clear_locale(),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
