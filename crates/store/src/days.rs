use mealweek_shared::Result;
use mealweek_shared::mealplan::DayIndex;

use crate::{KeyValue, read_json, write_json};

pub const ACTIVE_DAYS_KEY: &str = "active_days_v1";

/// Days of the week that get planned and exported.
pub struct ActiveDaysStore<K> {
    kv: K,
}

impl<K: KeyValue> ActiveDaysStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Every day when nothing was stored yet.
    pub fn load(&self) -> Result<Vec<DayIndex>> {
        let days: Option<Vec<DayIndex>> = read_json(&self.kv, ACTIVE_DAYS_KEY)?;

        Ok(days.unwrap_or_else(|| DayIndex::ALL.to_vec()))
    }

    pub fn save(&self, days: &[DayIndex]) -> Result<Vec<DayIndex>> {
        let mut days = days.to_vec();
        days.sort_unstable();
        days.dedup();

        write_json(&self.kv, ACTIVE_DAYS_KEY, &days)?;

        Ok(days)
    }

    /// Flips `day` and returns the resulting sorted set.
    pub fn toggle(&self, day: DayIndex) -> Result<Vec<DayIndex>> {
        let mut days = self.load()?;

        match days.iter().position(|d| *d == day) {
            Some(idx) => {
                days.remove(idx);
            }
            None => days.push(day),
        }

        self.save(&days)
    }
}
