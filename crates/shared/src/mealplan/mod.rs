use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Date, Weekday};

use crate::Error;

/// Day of the week, Monday = 0 through Sunday = 6.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayIndex(u8);

impl DayIndex {
    pub const MONDAY: DayIndex = DayIndex(0);
    pub const SUNDAY: DayIndex = DayIndex(6);

    pub const ALL: [DayIndex; 7] = [
        DayIndex(0),
        DayIndex(1),
        DayIndex(2),
        DayIndex(3),
        DayIndex(4),
        DayIndex(5),
        DayIndex(6),
    ];

    pub fn new(value: u8) -> crate::Result<Self> {
        Self::try_from(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn weekday(self) -> Weekday {
        Weekday::Monday.nth_next(self.0)
    }
}

impl TryFrom<u8> for DayIndex {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 6 {
            crate::invalid_date!("day index {value} is outside 0..=6");
        }

        Ok(Self(value))
    }
}

impl From<DayIndex> for u8 {
    fn from(value: DayIndex) -> Self {
        value.0
    }
}

impl fmt::Display for DayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.weekday())
    }
}

/// ISO week identifier, rendered as `YYYY-Www`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekId {
    year: i32,
    week: u8,
}

impl WeekId {
    pub fn new(year: i32, week: u8) -> crate::Result<Self> {
        if !(1..=53).contains(&week) {
            crate::invalid_date!("week number {week} is outside 1..=53");
        }

        if !(0..=9999).contains(&year) {
            crate::invalid_date!("year {year} is outside 0..=9999");
        }

        let weeks = time::util::weeks_in_year(year);
        if week > weeks {
            crate::invalid_date!("{year} has {weeks} ISO weeks, week {week} does not exist");
        }

        Ok(Self { year, week })
    }

    /// The ISO week that contains `date`.
    pub fn containing(date: Date) -> Self {
        let (year, week, _) = date.to_iso_week_date();
        Self { year, week }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn week(self) -> u8 {
        self.week
    }
}

impl FromStr for WeekId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidDateSpec(format!("invalid week identifier `{s}`"));

        let (year, week) = s.split_once("-W").ok_or_else(invalid)?;
        if year.len() != 4 || week.len() != 2 {
            return Err(invalid());
        }

        if !year.bytes().chain(week.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let week = week.parse::<u8>().map_err(|_| invalid())?;

        Self::new(year, week)
    }
}

impl TryFrom<String> for WeekId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeekId> for String {
    fn from(value: WeekId) -> Self {
        value.to_string()
    }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySlot {
    #[serde(rename = "dayId")]
    pub day: DayIndex,
    #[serde(rename = "recipeId")]
    pub recipe_id: Option<u64>,
}

impl DaySlot {
    pub fn new(day: DayIndex, recipe_id: Option<u64>) -> Self {
        Self { day, recipe_id }
    }

    pub fn is_assigned(&self) -> bool {
        self.recipe_id.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeekAssignment {
    #[serde(rename = "weekIdentifier")]
    pub week: WeekId,
    pub days: Vec<DaySlot>,
}

impl WeekAssignment {
    pub fn new(week: WeekId) -> Self {
        Self { week, days: vec![] }
    }

    /// Finds the assignment for `week`, creating an empty one on first use.
    pub fn entry(plans: &mut Vec<WeekAssignment>, week: WeekId) -> &mut WeekAssignment {
        let idx = match plans.iter().position(|p| p.week == week) {
            Some(idx) => idx,
            None => {
                plans.push(WeekAssignment::new(week));
                plans.len() - 1
            }
        };

        &mut plans[idx]
    }

    pub fn slot(&self, day: DayIndex) -> Option<&DaySlot> {
        self.days.iter().find(|d| d.day == day)
    }

    pub fn recipe_for(&self, day: DayIndex) -> Option<u64> {
        self.slot(day).and_then(|d| d.recipe_id)
    }

    pub fn set_day(&mut self, day: DayIndex, recipe_id: Option<u64>) {
        match self.days.iter_mut().find(|d| d.day == day) {
            Some(slot) => slot.recipe_id = recipe_id,
            None => self.days.push(DaySlot::new(day, recipe_id)),
        }
    }

    /// Overwrites every day present in `slots`; other days keep their recipe.
    pub fn apply(&mut self, slots: impl IntoIterator<Item = DaySlot>) {
        for slot in slots {
            self.set_day(slot.day, slot.recipe_id);
        }
    }

    /// Assigned slots whose day is in `active`, in stored order.
    pub fn assigned_on(&self, active: &[DayIndex]) -> Vec<DaySlot> {
        self.days
            .iter()
            .filter(|d| d.is_assigned() && active.contains(&d.day))
            .copied()
            .collect()
    }
}
