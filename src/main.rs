use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mealweek_shared::mealplan::WeekId;

mod cli;

use cli::days::DaysCommand;
use cli::plan::PlanCommand;
use cli::recipe::RecipeCommand;

/// mealweek - weekly dinner planner with calendar export
#[derive(Parser)]
#[command(name = "mealweek")]
#[command(about = "Plan a week of dinners and export it as an iCalendar file", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a session for the configured password
    Login {
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// End the current session
    Logout,
    /// Print an Argon2 hash for `session.password_hash`
    HashPassword {
        #[arg(long)]
        password: Option<String>,
    },
    /// Manage the recipe catalog
    Recipe {
        #[command(subcommand)]
        command: RecipeCommand,
    },
    /// Choose which weekdays are planned
    Days {
        #[command(subcommand)]
        command: DaysCommand,
    },
    /// Build and inspect week plans
    Plan {
        #[command(subcommand)]
        command: PlanCommand,
    },
    /// Write the week as an .ics file and mark its recipes as cooked
    Export {
        #[arg(long)]
        week: Option<WeekId>,

        /// Output directory (overrides config file)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealweek::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealweek::observability::init_observability(
        "mealweek",
        &config.observability.log_level,
        config.observability.json,
    )?;

    match cli.command {
        Commands::Login { password } => cli::session::login(config, password),
        Commands::Logout => cli::session::logout(config),
        Commands::HashPassword { password } => cli::session::hash_password(password),
        Commands::Recipe { command } => cli::recipe::run(config, command),
        Commands::Days { command } => cli::days::run(config, command),
        Commands::Plan { command } => cli::plan::run(config, command),
        Commands::Export { week, out } => cli::plan::export(config, week, out),
    }
}
