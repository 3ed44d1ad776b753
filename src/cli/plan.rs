use std::path::PathBuf;

use clap::Subcommand;
use mealweek::{Config, Planner};
use mealweek_shared::mealplan::{DayIndex, WeekId};
use mealweek_store::KeyValue;

use super::day_index;

#[derive(Subcommand)]
pub enum PlanCommand {
    /// Print the week, one line per day
    Show {
        /// ISO week as YYYY-Www, defaults to the current week
        #[arg(long)]
        week: Option<WeekId>,
    },
    /// Fill days with freshly picked recipes
    Randomize {
        #[arg(long)]
        week: Option<WeekId>,

        /// Days to fill, defaults to the active days
        #[arg(long = "day", value_parser = clap::value_parser!(u8).range(0..=6))]
        days: Vec<u8>,
    },
    /// Pick a new recipe for one day
    Reroll {
        #[arg(long)]
        week: Option<WeekId>,

        #[arg(value_parser = clap::value_parser!(u8).range(0..=6))]
        day: u8,
    },
    /// Set one day by hand; omit the recipe to clear it
    Assign {
        #[arg(long)]
        week: Option<WeekId>,

        #[arg(value_parser = clap::value_parser!(u8).range(0..=6))]
        day: u8,

        recipe: Option<u64>,
    },
}

fn print_week<K: KeyValue>(planner: &Planner<K>, week: WeekId) -> anyhow::Result<()> {
    let assignment = planner.week(week)?;
    let recipes = planner.recipes()?;
    let active = planner.active_days()?;
    let dates = mealweek_calendar::week_dates(week)?;

    println!("{week}");
    for (day, date) in DayIndex::ALL.into_iter().zip(dates) {
        let name = match assignment.recipe_for(day) {
            Some(id) => recipes
                .iter()
                .find(|r| r.id == id)
                .map(|r| format!("{} ({})", r.name, r.category))
                .unwrap_or_else(|| format!("unknown recipe {id}")),
            None => "-".to_owned(),
        };
        let mark = if active.contains(&day) { ' ' } else { '~' };

        println!("{mark} {:<9} {date}  {name}", day.to_string());
    }

    Ok(())
}

pub fn run(config: Config, command: PlanCommand) -> anyhow::Result<()> {
    let planner = mealweek::create_planner(&config)?;
    let current = planner.current_week();

    let week = match command {
        PlanCommand::Show { week } => week.unwrap_or(current),
        PlanCommand::Randomize { week, days } => {
            let week = week.unwrap_or(current);
            let days = days
                .into_iter()
                .map(day_index)
                .collect::<anyhow::Result<Vec<_>>>()?;

            planner.randomize_week(week, (!days.is_empty()).then_some(days.as_slice()))?;
            week
        }
        PlanCommand::Reroll { week, day } => {
            let week = week.unwrap_or(current);
            planner.reroll_day(week, day_index(day)?)?;
            week
        }
        PlanCommand::Assign { week, day, recipe } => {
            let week = week.unwrap_or(current);
            planner.assign(week, day_index(day)?, recipe)?;
            week
        }
    };

    print_week(&planner, week)
}

pub fn export(config: Config, week: Option<WeekId>, out: Option<PathBuf>) -> anyhow::Result<()> {
    let planner = mealweek::create_planner(&config)?;
    let week = week.unwrap_or_else(|| planner.current_week());
    let out = out.unwrap_or_else(|| PathBuf::from(&config.storage.export_dir));

    match planner.export(week, &out)? {
        Some(report) => println!(
            "Wrote {} dinners to {} and marked {} recipes as cooked",
            report.events,
            report.path.display(),
            report.cooked.len()
        ),
        None => println!("Nothing planned on active days in {week}, no file written"),
    }

    Ok(())
}
