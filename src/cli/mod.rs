pub mod days;
pub mod plan;
pub mod recipe;
pub mod session;

use mealweek_shared::mealplan::DayIndex;
use time::OffsetDateTime;
use time::macros::format_description;

pub fn day_index(value: u8) -> anyhow::Result<DayIndex> {
    Ok(DayIndex::new(value)?)
}

pub fn format_cooked(last_cooked: Option<OffsetDateTime>) -> String {
    let format = format_description!("[year]-[month]-[day]");

    last_cooked
        .and_then(|at| at.date().format(&format).ok())
        .unwrap_or_else(|| "never".to_owned())
}
