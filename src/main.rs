use anyhow::Result;
use clap::{Parser, Subcommand};
use mealplanner::cli::household::{DietCommand, HouseholdCommand};
use mealplanner::cli::pantry::PantryCommand;
use mealplanner::cli::plan::PlanCommand;
use mealplanner::cli::recipe::RecipeCommand;
use mealplanner::cli::shopping::ShoppingArgs;

/// mealplanner - weekly meal plans and shopping lists
#[derive(Parser)]
#[command(name = "mealplanner")]
#[command(about = "Plan a week of household meals and derive the shopping list", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the recipe collection
    Recipe {
        #[command(subcommand)]
        command: RecipeCommand,
    },
    /// Manage pantry stock
    Pantry {
        #[command(subcommand)]
        command: PantryCommand,
    },
    /// Generate, show or edit the weekly plan
    Plan {
        #[command(subcommand)]
        command: PlanCommand,
    },
    /// Print the shopping list for the current plan
    Shopping(ShoppingArgs),
    /// Manage household members
    Household {
        #[command(subcommand)]
        command: HouseholdCommand,
    },
    /// Manage dietary restrictions
    Diet {
        #[command(subcommand)]
        command: DietCommand,
    },
    /// Restore the initial data and clear saved state
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = mealplanner::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealplanner::observability::init_observability(&config.observability.log_level)?;

    let mut store = mealplanner::cli::open_store(&config)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Recipe { command } => mealplanner::cli::recipe::run(&mut store, command, &mut out),
        Commands::Pantry { command } => mealplanner::cli::pantry::run(&mut store, command, &mut out),
        Commands::Plan { command } => mealplanner::cli::plan::run(&mut store, command, &mut out),
        Commands::Shopping(args) => mealplanner::cli::shopping::run(&store, args, &mut out),
        Commands::Household { command } => {
            mealplanner::cli::household::run(&mut store, command, &mut out)
        }
        Commands::Diet { command } => {
            mealplanner::cli::household::run_diet(&mut store, command, &mut out)
        }
        Commands::Reset => mealplanner::cli::reset(&mut store, &mut out),
    }
}
