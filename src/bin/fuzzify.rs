//! Fuzzifies a value against a table of linguistic variables.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fuzzy_reasoning::{ConfigError, LinguisticVariable, VariableTable};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

const KPIS: &str = include_str!("../kpis.toml");

#[derive(Parser)]
#[command(name = "fuzzify")]
#[command(version)]
#[command(about = "Shows which terms of a linguistic variable apply to a value", long_about = None)]
struct Cli {
    /// List the variables with their terms
    #[arg(short, long)]
    list: bool,

    /// Variable to fuzzify, by index or name
    #[arg(long, value_name = "N", requires = "value")]
    kpi: Option<String>,

    /// Value to fuzzify
    #[arg(value_name = "VALUE", allow_negative_numbers = true)]
    value: Option<f64>,

    /// TOML variable table to use instead of the built-in KPIs
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(event = "fuzzify_failed", error = %e);
            eprintln!("fuzzify: {e}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli) -> Result<(), ConfigError> {
    let table = match &cli.config {
        Some(path) => VariableTable::load(path)?,
        None => VariableTable::from_toml_str(KPIS)?,
    };
    let mut vars = table.build()?;

    debug!(event = "table_loaded", variables = vars.len());

    if cli.list {
        for var in &vars {
            print_variable(var);
        }
    }

    if let (Some(kpi), Some(value)) = (&cli.kpi, cli.value) {
        let var = select(&mut vars, kpi)?;

        var.set_value(value);

        let mut applying: Vec<_> = var.memberships().filter(|(_, degree)| *degree > 0.).collect();
        applying.sort_by(|a, b| b.1.total_cmp(&a.1));

        for (term, degree) in applying {
            println!("{:<14}\t{degree:.4}", term.name());
        }
    }

    Ok(())
}

fn select<'v>(vars: &'v mut [LinguisticVariable], kpi: &str) -> Result<&'v mut LinguisticVariable, ConfigError> {
    let count = vars.len();
    let index = match kpi.parse::<usize>() {
        Ok(index) => Some(index),
        Err(_) => vars.iter().position(|var| var.name() == kpi),
    };

    index
        .and_then(|index| vars.get_mut(index))
        .ok_or_else(|| ConfigError::Invalid(format!("no variable {kpi}; use 0..{count} or a listed name")))
}

fn print_variable(var: &LinguisticVariable) {
    println!("\n{}", var.name());

    for term in var.terms() {
        let [x1, x2, x3, x4] = term.points();

        println!("\t{:<14}\t{x1} {x2} {x3} {x4}", term.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_kpis() {
        let mut vars = VariableTable::from_toml_str(KPIS).unwrap().build().unwrap();

        assert_eq!(vars.len(), 5);
        assert!(vars.iter().all(|var| var.terms().count() == 7));

        let var = select(&mut vars, "0").unwrap();
        var.set_value(2.5);

        assert!((var.membership("tolerable").unwrap() - 2. / 3.).abs() < 1e-9);
        assert!((var.membership("acceptable").unwrap() - 1. / 3.).abs() < 1e-9);
        assert_eq!(var.membership("good").unwrap(), 0.);

        let name = "PcktsNoVend_PolicyModel_SetB_65Fields_0Max_Median";

        assert_eq!(select(&mut vars, name).unwrap().name(), name);
        assert!(matches!(select(&mut vars, "5"), Err(ConfigError::Invalid(_))));
    }
}
