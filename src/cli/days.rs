use clap::Subcommand;
use mealweek::Config;
use mealweek_shared::mealplan::DayIndex;

use super::day_index;

#[derive(Subcommand)]
pub enum DaysCommand {
    /// Show which days get planned and exported
    Show,
    /// Replace the active days (0 = Monday .. 6 = Sunday)
    Set {
        #[arg(required = true, value_parser = clap::value_parser!(u8).range(0..=6))]
        days: Vec<u8>,
    },
    /// Switch one day on or off
    Toggle {
        #[arg(value_parser = clap::value_parser!(u8).range(0..=6))]
        day: u8,
    },
}

fn print_days(active: &[DayIndex]) {
    for day in DayIndex::ALL {
        let mark = if active.contains(&day) { "x" } else { " " };
        println!("[{mark}] {} {day}", day.value());
    }
}

pub fn run(config: Config, command: DaysCommand) -> anyhow::Result<()> {
    let planner = mealweek::create_planner(&config)?;

    let active = match command {
        DaysCommand::Show => planner.active_days()?,
        DaysCommand::Set { days } => {
            let days = days
                .into_iter()
                .map(day_index)
                .collect::<anyhow::Result<Vec<_>>>()?;
            planner.set_active_days(&days)?
        }
        DaysCommand::Toggle { day } => planner.toggle_day(day_index(day)?)?,
    };

    print_days(&active);

    Ok(())
}
