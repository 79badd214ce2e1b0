//! unitbasis CLI
//!
//! Main entry point for the `unitbasis` command.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::Result;
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use unitbasis::config::ConverterConfig;
use unitbasis::units::{BasisMatrix, Fraction, QuantityCatalog, UnitError};

#[derive(Parser)]
#[command(name = "unitbasis")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Re-express physical dimensions in a basis of anchor quantities",
    long_about = "Pick seven anchor quantities (for example charge instead of current) and \
                  rewrite any quantity's dimensions as exact powers of those anchors."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (default: nearest unitbasis.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the known quantities with their SI dimensions
    List,

    /// Express quantities in the anchor basis
    Convert {
        /// Quantity names, e.g. "Electric Potential" or electric_potential
        #[arg(value_name = "QUANTITY", required = true)]
        quantities: Vec<String>,

        /// Comma-separated anchor names (overrides the config file)
        #[arg(short, long, value_delimiter = ',')]
        anchors: Option<Vec<String>>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the anchor matrix, its determinant and its inverse
    Matrix {
        /// Comma-separated anchor names (overrides the config file)
        #[arg(short, long, value_delimiter = ',')]
        anchors: Option<Vec<String>>,
    },
}

#[derive(Serialize)]
struct Conversion<'a> {
    quantity: &'a str,
    exponents: Vec<Fraction>,
    unit: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("unitbasis=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = load_config(cli.config.as_deref())?;
    let catalog = config.catalog()?;

    match cli.command {
        Commands::List => list(&catalog),
        Commands::Convert {
            quantities,
            anchors,
            json,
        } => {
            let basis = select_basis(&config, &catalog, anchors)?;
            convert(&basis, &catalog, &quantities, json)
        }
        Commands::Matrix { anchors } => {
            let basis = select_basis(&config, &catalog, anchors)?;
            show_matrix(&basis)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ConverterConfig> {
    match path {
        Some(path) => Ok(ConverterConfig::from_file(path)?),
        None => {
            let cwd = std::env::current_dir()
                .map_err(|e| miette::miette!("Cannot read current directory: {}", e))?;
            Ok(ConverterConfig::find_config(&cwd)?.unwrap_or_default())
        }
    }
}

fn select_basis(
    config: &ConverterConfig,
    catalog: &QuantityCatalog,
    anchors: Option<Vec<String>>,
) -> Result<BasisMatrix> {
    let basis = match anchors {
        Some(names) => BasisMatrix::from_names(catalog, &names)?,
        None => config.basis(catalog)?,
    };
    Ok(basis)
}

fn list(catalog: &QuantityCatalog) -> Result<()> {
    let si = BasisMatrix::si();
    let width = catalog.iter().map(|q| q.name().chars().count()).max().unwrap_or(0);
    for quantity in catalog.iter() {
        let dims = si.express(quantity)?;
        println!(
            "{:<width$}  {:<10}  {}",
            quantity.name(),
            quantity.short_unit(),
            if dims.is_empty() { "1" } else { dims.as_str() }
        );
    }
    Ok(())
}

fn convert(
    basis: &BasisMatrix,
    catalog: &QuantityCatalog,
    names: &[String],
    json: bool,
) -> Result<()> {
    if basis.is_incoherent() {
        return Err(UnitError::IncoherentBasis.into());
    }

    let mut results = Vec::with_capacity(names.len());
    for name in names {
        let quantity = catalog.lookup(name)?;
        let exponents = basis.convert(quantity)?;
        let unit = basis.unit_string(&exponents)?;
        results.push(Conversion {
            quantity: quantity.name(),
            exponents,
            unit,
        });
    }

    if json {
        let text = serde_json::to_string_pretty(&results)
            .map_err(|e| miette::miette!("Failed to serialize results: {}", e))?;
        println!("{}", text);
    } else {
        for result in &results {
            let unit = if result.unit.is_empty() { "1" } else { result.unit.as_str() };
            println!("{}: {}", result.quantity, unit);
        }
    }
    Ok(())
}

fn show_matrix(basis: &BasisMatrix) -> Result<()> {
    let names: Vec<&str> = basis.anchors().iter().map(|a| a.name()).collect();
    println!("Anchors: {}", names.join(", "));
    println!();
    println!("{}", basis.matrix());
    println!();
    println!("Determinant: {}", basis.determinant());
    println!();
    match basis.inverse_matrix() {
        Some(inverse) => println!("Inverse:\n{}", inverse),
        None => println!("Incoherent: the anchors are linearly dependent, no inverse exists"),
    }
    Ok(())
}
