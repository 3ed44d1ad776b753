use mealweek_shared::Result;
use mealweek_shared::mealplan::WeekAssignment;

use crate::{KeyValue, read_json, write_json};

pub const PLANS_KEY: &str = "plans_v2";

pub struct PlanStore<K> {
    kv: K,
}

impl<K: KeyValue> PlanStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn load(&self) -> Result<Vec<WeekAssignment>> {
        Ok(read_json(&self.kv, PLANS_KEY)?.unwrap_or_default())
    }

    pub fn save(&self, plans: &[WeekAssignment]) -> Result<()> {
        write_json(&self.kv, PLANS_KEY, plans)
    }
}
