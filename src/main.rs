use anyhow::{bail, Context, Result};
use clap::Parser;
use molar_mass::{compound_molar_mass, parse, Compound, ElementTable, Error, MolarMassResult};
use std::{fs::File, path::PathBuf};

#[derive(Parser, Debug)]
#[command(version, about = "Compute the molar mass of chemical formulas", long_about = None)]
struct Args {
    /// Formulas to evaluate, e.g. "Mg(OH)2"
    #[arg(required = true)]
    formulas: Vec<String>,

    /// JSON file with an array of {symbol, name, atomic_weight} records to use
    /// instead of the built-in periodic table
    #[arg(long, short)]
    elements: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

fn print_result(compound: &Compound, result: &MolarMassResult) {
    println!("\nFormula: {}", compound);
    println!("Composition:");
    for (element, count) in compound.composition() {
        println!("  {}: {}", element, count);
    }
    println!("Molar mass: {:.4} g/mol", result.aggregate_weight);
    for info in &result.elements {
        println!(
            "  {:<3} {:<14} x{:<4} {:>12.4} g/mol {:>8.3} %",
            info.symbol, info.name, info.atom_count, info.weight_in_compound, info.weight_percent
        );
    }
    println!("{}", "-".repeat(40));
}

fn evaluate(formula: &str, table: &ElementTable) -> Result<(Compound, MolarMassResult), Error> {
    let compound = parse(formula)?;
    let result = compound_molar_mass(&compound, table)?;
    Ok((compound, result))
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let args = Args::parse();

    let table = match &args.elements {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open element table {}", path.display()))?;
            ElementTable::from_json_reader(file)
                .with_context(|| format!("failed to read element table {}", path.display()))?
        }
        None => ElementTable::standard(),
    };

    let mut failures = 0;
    for formula in &args.formulas {
        match evaluate(formula, &table) {
            Ok((_, result)) if args.json => println!("{}", serde_json::to_string_pretty(&result)?),
            Ok((compound, result)) => print_result(&compound, &result),
            Err(e) => {
                eprintln!("{}: {}", formula, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} formula(s) could not be evaluated");
    }
    Ok(())
}
