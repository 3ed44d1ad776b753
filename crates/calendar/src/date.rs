use mealweek_shared::mealplan::{DayIndex, WeekId};
use mealweek_shared::{Error, Result};
use time::{Date, Duration, Month};

/// Resolves a `YYYY-Www` identifier and a Monday-based day index to a date.
pub fn resolve_date(week_identifier: &str, day_index: u8) -> Result<Date> {
    let week = week_identifier.parse::<WeekId>()?;
    let day = DayIndex::new(day_index)?;

    resolve(week, day)
}

/// ISO 8601: January 4th always falls in week 1, so week 1 starts on the
/// Monday on or before it. All arithmetic is on plain calendar dates, which
/// carry no zone and therefore no daylight saving shifts.
pub fn resolve(week: WeekId, day: DayIndex) -> Result<Date> {
    let offset = (i64::from(week.week()) - 1) * 7 + i64::from(day.value());

    first_monday(week.year())?
        .checked_add(Duration::days(offset))
        .ok_or_else(|| Error::InvalidDateSpec(format!("{week} day {} overflows", day.value())))
}

/// Monday through Sunday of `week`.
pub fn week_dates(week: WeekId) -> Result<[Date; 7]> {
    let monday = resolve(week, DayIndex::MONDAY)?;
    let mut dates = [monday; 7];

    for (offset, date) in dates.iter_mut().enumerate().skip(1) {
        *date = monday
            .checked_add(Duration::days(offset as i64))
            .ok_or_else(|| Error::InvalidDateSpec(format!("{week} overflows")))?;
    }

    Ok(dates)
}

fn first_monday(year: i32) -> Result<Date> {
    let jan4 = Date::from_calendar_date(year, Month::January, 4)?;
    let back = i64::from(jan4.weekday().number_from_monday()) - 1;

    jan4.checked_sub(Duration::days(back))
        .ok_or_else(|| Error::InvalidDateSpec(format!("week 1 of {year} is out of range")))
}
