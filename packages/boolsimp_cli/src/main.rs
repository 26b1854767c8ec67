use std::io;

use boolsimp::{parse, Simplification, Simplifier};
use clap::Parser;
use color_eyre::eyre::{bail, eyre};
use colored::Colorize;
use log::{error, info};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use crate::report::{normalize_input, Report};

mod report;

#[derive(Parser)]
#[command(name = "boolsimp")]
#[command(about = "Step-by-step simplification of Boolean expressions")]
struct Cli {
    /// Expression to simplify; read line by line from stdin when omitted
    expression: Option<String>,

    /// Print the export document as JSON
    #[arg(long)]
    json: bool,

    /// Also print the simplified expression as a tree
    #[arg(long)]
    tree: bool,

    /// Maximum number of rewriting passes
    #[arg(long, value_name = "N")]
    max_iterations: Option<usize>,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn simplifier(&self) -> Simplifier {
        match self.max_iterations {
            Some(max_iterations) => Simplifier::new().with_max_iterations(max_iterations),
            None => Simplifier::new(),
        }
    }
}

fn print_text(simplification: &Simplification, tree: bool) {
    println!("{} {}", "Simplified:".bold(), simplification.text().green());

    if simplification.steps.is_empty() {
        println!("No simplification law applied.");
    } else {
        println!("{}", "Steps:".bold());

        for (i, step) in simplification.steps.iter().enumerate() {
            println!(
                "{:>4}. {} : {} => {}",
                i + 1,
                step.rule.to_string().cyan(),
                step.before,
                step.after.green()
            );
        }
    }

    if tree {
        println!("{}", simplification.node.get_tree());
    }
}

fn run(cli: &Cli, expression: &str) -> color_eyre::Result<()> {
    let normalized = normalize_input(expression);
    if normalized.is_empty() {
        bail!("empty expression");
    }

    info!("simplifying {normalized}");

    let node = parse(&normalized)?;
    let simplification = cli.simplifier().simplify(&node)?;

    if cli.json {
        let report = Report::new(expression, simplification);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&simplification, cli.tree);
    }

    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    TermLogger::init(
        cli.level(),
        Config::default(),
        TerminalMode::Mixed,
        if cli.no_color {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        },
    )?;

    if let Some(expression) = &cli.expression {
        return run(&cli, expression);
    }

    let mut failures = 0;

    for line in io::stdin().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        if let Err(report) = run(&cli, &line) {
            error!("{}: {report}", line.trim());
            failures += 1;
        }
    }

    if failures > 0 {
        return Err(eyre!("{failures} expression(s) failed"));
    }

    Ok(())
}
