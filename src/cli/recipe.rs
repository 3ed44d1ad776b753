use clap::Subcommand;
use mealweek::Config;
use mealweek_shared::recipe::{Category, Recipe, RecipeInput};

use super::format_cooked;

#[derive(Subcommand)]
pub enum RecipeCommand {
    /// List recipes, optionally filtered
    List {
        /// Case-insensitive match on name or source
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        category: Option<Category>,
    },
    /// Add a recipe
    Add {
        name: String,

        #[arg(long, default_value_t = Category::Other)]
        category: Category,

        #[arg(long)]
        source: Option<String>,
    },
    /// Change name, category or source; an empty source clears it
    Edit {
        id: u64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        category: Option<Category>,

        #[arg(long)]
        source: Option<String>,
    },
    /// Delete a recipe
    Remove { id: u64 },
    /// Forget when a recipe was last cooked
    ResetCooked { id: u64 },
}

fn print_recipe(recipe: &Recipe) {
    println!(
        "{:>4}  {:<10}  {}  [{}]  last cooked: {}",
        recipe.id,
        recipe.category.to_string(),
        recipe.name,
        recipe.source.as_deref().unwrap_or("-"),
        format_cooked(recipe.last_cooked)
    );
}

pub fn run(config: Config, command: RecipeCommand) -> anyhow::Result<()> {
    let planner = mealweek::create_planner(&config)?;

    match command {
        RecipeCommand::List { search, category } => {
            let recipes = planner.search(search.as_deref(), category)?;
            for recipe in &recipes {
                print_recipe(recipe);
            }
            tracing::debug!(count = recipes.len(), "listed recipes");
        }
        RecipeCommand::Add {
            name,
            category,
            source,
        } => {
            let recipe = planner.add_recipe(RecipeInput::new(name, category, source.as_deref()))?;
            print_recipe(&recipe);
        }
        RecipeCommand::Edit {
            id,
            name,
            category,
            source,
        } => {
            let current = planner.recipe(id)?;
            let input = RecipeInput::new(
                name.unwrap_or(current.name),
                category.unwrap_or(current.category),
                source.as_deref().or(current.source.as_deref()),
            );
            print_recipe(&planner.edit_recipe(id, input)?);
        }
        RecipeCommand::Remove { id } => {
            let removed = planner.remove_recipe(id)?;
            println!("Removed {} ({})", removed.name, removed.id);
        }
        RecipeCommand::ResetCooked { id } => {
            print_recipe(&planner.reset_cooked(id)?);
        }
    }

    Ok(())
}
