//! budget-fx CLI - normalize budget figures to million USD
//!
//! ## Example Usage
//!
//! ```bash
//! # Inspect how a unit string is read
//! budget-fx parse "billion ZAR"
//!
//! # Convert one figure with the 2023 rates
//! budget-fx convert 20.35 "billion ZAR" --year 2023
//!
//! # List the rates for a year (or the default average)
//! budget-fx rates --year 2024
//!
//! # Add ValueUSD/UnitUSD columns to an observation table
//! budget-fx normalize budget.csv -o budget_usd.csv
//! ```

use anyhow::Context;
use budget_fx::config::NormalizerConfig;
use budget_fx::dataset::{normalize, read_observations_csv, write_normalized, write_normalized_csv};
use budget_fx::fx::TableSource;
use budget_fx::report::{exchange_rate_info, format_value_with_unit};
use budget_fx::units::parse_unit;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process;

/// budget-fx: currency normalization for budget indicators
#[derive(Parser)]
#[command(name = "budget-fx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Normalize local-currency budget figures to million USD", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how a unit string is parsed
    Parse {
        /// Unit text, e.g. "billion ZAR"
        #[arg(value_name = "UNIT")]
        unit: String,
    },

    /// Convert a single figure to million USD
    Convert {
        /// Raw value as stated in the source
        #[arg(value_name = "VALUE", allow_hyphen_values = true)]
        value: f64,

        /// Unit text, e.g. "billion ZAR"
        #[arg(value_name = "UNIT")]
        unit: String,

        /// Fiscal year used to pick the rate table
        #[arg(short = 'y', long)]
        year: Option<i32>,
    },

    /// List exchange rates
    Rates {
        /// Fiscal year (default average table if omitted or unsupported)
        #[arg(short = 'y', long)]
        year: Option<i32>,
    },

    /// Normalize an observation CSV
    Normalize {
        /// Input CSV with CountryISO,Indicator,FiscalYear,Value,Unit columns
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output CSV (stdout if omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<NormalizerConfig> {
    if let Some(config_path) = path {
        return NormalizerConfig::load(config_path)
            .with_context(|| format!("loading {}", config_path.display()));
    }

    // Try default location
    if let Some(home) = dirs::home_dir() {
        let default_config = home.join(".budget-fx").join("config.toml");
        if default_config.exists() {
            return NormalizerConfig::load(&default_config)
                .with_context(|| format!("loading {}", default_config.display()));
        }
    }

    Ok(NormalizerConfig::default())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = load_config(cli.config.as_deref()).and_then(|config| {
        if cli.verbose {
            eprintln!("{} v{}", "budget-fx".cyan().bold(), env!("CARGO_PKG_VERSION"));
            eprintln!("Currency policy: {:?}", config.currency_policy);
        }

        match cli.command {
            Commands::Parse { unit } => show_parse(&unit),
            Commands::Convert { value, unit, year } => run_convert(&config, value, &unit, year, cli.verbose),
            Commands::Rates { year } => show_rates(&config, year),
            Commands::Normalize { input, output } => run_normalize(&config, &input, output.as_deref()),
        }
    });

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn show_parse(unit: &str) -> anyhow::Result<()> {
    let parsed = parse_unit(unit);
    let magnitude = match parsed.magnitude.as_str() {
        "" => "none",
        m => m,
    };
    println!("  {} {}", "Magnitude:".bold(), magnitude);
    println!("  {} {}", "Multiplier:".bold(), parsed.magnitude.multiplier());
    println!("  {} {}", "Currency:".bold(), parsed.currency);
    Ok(())
}

fn run_convert(
    config: &NormalizerConfig,
    value: f64,
    unit: &str,
    year: Option<i32>,
    verbose: bool,
) -> anyhow::Result<()> {
    let converter = config.build_converter()?;
    let conversion = converter.explain(Some(value), unit, year);

    println!(
        "{}",
        format_value_with_unit(conversion.value.amount, conversion.value.unit.unwrap_or(""), 2).green()
    );

    if verbose {
        println!("  {} {}", "Parsed unit:".bold(), conversion.parsed);
        println!("  {} {}", "Rate table:".bold(), conversion.source);
        println!("  {} {}", "Rate:".bold(), conversion.rate);
        if conversion.identity_fallback {
            println!(
                "  {} no rate for {}, treated as USD",
                "Warning:".yellow(),
                conversion.parsed.currency
            );
        }
    }
    Ok(())
}

fn show_rates(config: &NormalizerConfig, year: Option<i32>) -> anyhow::Result<()> {
    let converter = config.build_converter()?;
    let (source, table) = match converter.custom_rates() {
        Some(table) => (TableSource::Custom, table),
        None => converter.book().resolve(year),
    };

    println!("{} {}", "Rate table:".bold(), source);
    println!("{}", "===========".dimmed());
    for info in exchange_rate_info(table) {
        println!(
            "  {:<4} {:>12}  {}",
            info.currency.to_string().bold(),
            info.rate_display,
            info.region.dimmed()
        );
    }

    if source == TableSource::Default {
        let years = converter.book().supported_years();
        println!();
        println!(
            "{}",
            format!("Year-specific tables: {:?}", years).dimmed()
        );
    }
    Ok(())
}

fn run_normalize(
    config: &NormalizerConfig,
    input: &Path,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let converter = config.build_converter()?;
    let policy = config.build_policy();

    let rows = read_observations_csv(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let normalized = normalize(&converter, &policy, &rows, config.parallel);

    match output {
        Some(path) => {
            write_normalized_csv(path, &normalized)
                .with_context(|| format!("writing {}", path.display()))?;
            let flagged = normalized.iter().filter(|r| r.flagged).count();
            eprintln!(
                "{} {} rows written to {} ({} flagged)",
                "Done:".green().bold(),
                normalized.len(),
                path.display(),
                flagged
            );
        }
        None => write_normalized(std::io::stdout().lock(), &normalized)?,
    }
    Ok(())
}
