// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! `kickoff`: finds the best set of training combos for a card inventory.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use kickoff_model::{
    catalog::Catalog,
    family::ResourceFamily,
    inventory::Inventory,
    loading::CatalogLoader,
    objective::{CategoryLimit, ObjectiveMode},
};
use kickoff_solver::{
    config::{SolverConfig, inventory_from_toml_file},
    report::{CatalogListing, CatalogOrder, ResultReport},
    solver::ComboOptimizer,
};
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "kickoff=info";

#[derive(Parser, Debug)]
#[command(name = "kickoff")]
#[command(about = "Finds the combo set that makes the most of your training cards")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the best combo set for an inventory
    Optimize(OptimizeArgs),

    /// List every combo of the catalog
    List {
        /// Combo catalog (delimited text with a header row)
        #[arg(long)]
        catalog: PathBuf,

        /// Sort order
        #[arg(long, value_enum, default_value_t = SortOrder::Alpha)]
        sort: SortOrder,
    },

    /// List the distinct cards of the catalog with their family
    Cards {
        /// Combo catalog (delimited text with a header row)
        #[arg(long)]
        catalog: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct OptimizeArgs {
    /// Combo catalog (delimited text with a header row)
    #[arg(long)]
    catalog: PathBuf,

    /// Solver configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Inventory file (TOML table of "Card" = count)
    #[arg(long)]
    inventory: Option<PathBuf>,

    /// Card count, overrides the inventory file (can be used multiple times)
    #[arg(long = "card", value_name = "NAME=COUNT", action = clap::ArgAction::Append)]
    cards: Vec<String>,

    /// Objective: cards or skills
    #[arg(long)]
    mode: Option<ObjectiveMode>,

    /// Cap on restricted-category combos: none or a number
    #[arg(long)]
    gk_limit: Option<CategoryLimit>,

    /// Wall-clock budget in milliseconds, 0 disables it
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Node budget of the search
    #[arg(long)]
    node_limit: Option<u64>,

    /// Drop one copy of a combo from the printed result (can be used multiple times)
    #[arg(long = "remove", value_name = "NAME", action = clap::ArgAction::Append)]
    remove: Vec<String>,

    /// Print search statistics after the result
    #[arg(long)]
    stats: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SortOrder {
    /// A to Z by name
    Alpha,
    /// Highest skill total first
    Skill,
}

impl From<SortOrder> for CatalogOrder {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Alpha => CatalogOrder::Alphabetical,
            SortOrder::Skill => CatalogOrder::SkillTotal,
        }
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    let catalog = CatalogLoader::new()
        .from_path(path)
        .with_context(|| format!("Failed to load catalog from {}", path.display()))?;
    info!(event = "catalog_loaded", path = %path.display(), combos = catalog.len());
    Ok(catalog)
}

/// Layers command-line overrides on top of the configuration file.
fn resolve_config(args: &OptimizeArgs) -> Result<SolverConfig> {
    let mut config = match &args.config {
        Some(path) => SolverConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SolverConfig::default(),
    };

    if let Some(mode) = args.mode {
        config = config.with_objective(mode);
    }
    if let Some(limit) = args.gk_limit {
        config = config.with_category_limit(limit);
    }
    if let Some(ms) = args.time_limit_ms {
        config = config.with_termination_millis(ms);
    }
    if let Some(nodes) = args.node_limit {
        config = config.with_node_limit(nodes);
    }
    config.validate().context("Invalid configuration")?;
    debug!(event = "config_resolved", config = ?config);
    Ok(config)
}

fn resolve_inventory(args: &OptimizeArgs, config: &SolverConfig) -> Result<Inventory> {
    let bounds = config.inventory_bounds();
    let mut inventory = match &args.inventory {
        Some(path) => inventory_from_toml_file(path, bounds)
            .with_context(|| format!("Failed to load inventory from {}", path.display()))?,
        None => Inventory::new(),
    };
    for entry in &args.cards {
        let (name, count) = Inventory::parse_entry(entry)?;
        inventory.set_bounded(&name, count, bounds)?;
    }
    Ok(inventory)
}

fn optimize(args: OptimizeArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let catalog = load_catalog(&args.catalog)?;
    let inventory = resolve_inventory(&args, &config)?;

    if inventory.is_empty() {
        warn!(event = "empty_inventory", "no cards given, the result will be empty");
    }

    let optimization = ComboOptimizer::new(&config).optimize(&catalog, &inventory);

    let mut report = ResultReport::new(&catalog, &optimization);
    for name in &args.remove {
        if !report.remove(name) {
            warn!(event = "remove_ignored", combo = %name, "combo is not part of the result");
        }
    }

    print!("{}", report);
    if !optimization.is_optimal() {
        println!();
        println!(
            "Search stopped early ({}); this is the best set found so far.",
            optimization.termination_reason()
        );
    }
    if args.stats {
        println!();
        print!("{}", optimization.statistics());
    }
    Ok(())
}

fn list(catalog: PathBuf, sort: SortOrder) -> Result<()> {
    let catalog = load_catalog(&catalog)?;
    print!("{}", CatalogListing::new(&catalog, sort.into()));
    Ok(())
}

fn cards(catalog: PathBuf) -> Result<()> {
    let catalog = load_catalog(&catalog)?;
    let names = catalog.resource_names();
    if names.is_empty() {
        bail!("Catalog names no cards");
    }
    let width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);
    for name in names {
        println!("{:<width$}  {}", name, ResourceFamily::classify(name), width = width);
    }
    Ok(())
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Optimize(args) => optimize(args),
        Commands::List { catalog, sort } => list(catalog, sort),
        Commands::Cards { catalog } => cards(catalog),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::time::Duration;

    fn optimize_args(argv: &[&str]) -> OptimizeArgs {
        let mut full = vec!["kickoff", "optimize", "--catalog", "combos.csv"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Optimize(args) => args,
            other => panic!("expected optimize, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = optimize_args(&[
            "--mode",
            "skills",
            "--gk-limit",
            "2",
            "--time-limit-ms",
            "1500",
            "--node-limit",
            "100",
        ]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.objective, ObjectiveMode::Skills);
        assert_eq!(config.category_limit, CategoryLimit::AtMost(2));
        assert_eq!(config.time_limit(), Some(Duration::from_millis(1_500)));
        assert_eq!(config.node_limit(), Some(100));
    }

    #[test]
    fn test_defaults_without_flags() {
        let args = optimize_args(&[]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config, SolverConfig::default());
    }

    #[test]
    fn test_invalid_flag_values_are_rejected() {
        let base = ["kickoff", "optimize", "--catalog", "c.csv"];
        let with = |extra: &[&str]| {
            let mut argv = base.to_vec();
            argv.extend_from_slice(extra);
            Cli::try_parse_from(argv)
        };
        assert!(with(&["--gk-limit", "-1"]).is_err());
        assert!(with(&["--gk-limit", "lots"]).is_err());
        assert!(with(&["--mode", "goals"]).is_err());
        assert!(with(&["--gk-limit", "none"]).is_ok());
    }

    #[test]
    fn test_card_entries_are_bounded() {
        let config = SolverConfig::default();

        let args = optimize_args(&["--card", "Running=3", "--card", "Place Kicks=10"]);
        let inventory = resolve_inventory(&args, &config).unwrap();
        assert_eq!(inventory.count("Running"), 3);
        assert_eq!(inventory.count("Place Kicks"), 10);

        let args = optimize_args(&["--card", "Running=11"]);
        assert!(resolve_inventory(&args, &config).is_err());

        let args = optimize_args(&["--card", "Running"]);
        assert!(resolve_inventory(&args, &config).is_err());
    }

    #[test]
    fn test_list_sort_values() {
        let cli = Cli::try_parse_from(["kickoff", "list", "--catalog", "c.csv", "--sort", "skill"])
            .unwrap();
        match cli.command {
            Commands::List { sort, .. } => assert_eq!(CatalogOrder::from(sort), CatalogOrder::SkillTotal),
            other => panic!("expected list, got {:?}", other),
        }
    }
}
