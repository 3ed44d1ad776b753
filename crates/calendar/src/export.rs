use mealweek_shared::mealplan::{DaySlot, WeekId};
use mealweek_shared::recipe::{Recipe, mark_cooked};
use mealweek_shared::{Error, Result};
use serde::Deserialize;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

use crate::{Calendar, Event};

const MAX_DURATION_MINUTES: i64 = 24 * 60;
const MAX_REMINDER_MINUTES: i64 = 7 * 24 * 60;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    pub prod_id: String,
    /// Right hand side of every event `UID`.
    pub uid_domain: String,
    pub start_hour: u8,
    pub start_minute: u8,
    pub duration_minutes: i64,
    pub reminder_minutes: i64,
    pub summary_prefix: String,
    pub unknown_source: String,
    pub file_prefix: String,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            prod_id: "-//mealweek//NONSGML v1.3//EN".to_owned(),
            uid_domain: "mealweek".to_owned(),
            start_hour: 17,
            start_minute: 30,
            duration_minutes: 60,
            reminder_minutes: 15,
            summary_prefix: "Dinner: ".to_owned(),
            unknown_source: "Unknown source".to_owned(),
            file_prefix: "mealplan".to_owned(),
        }
    }
}

impl CalendarSettings {
    pub fn start_time(&self) -> Result<Time> {
        Ok(Time::from_hms(self.start_hour, self.start_minute, 0)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.start_time()?;

        if !(1..=MAX_DURATION_MINUTES).contains(&self.duration_minutes) {
            mealweek_shared::bail!(
                "calendar duration_minutes must be between 1 and {MAX_DURATION_MINUTES}"
            );
        }

        if !(0..=MAX_REMINDER_MINUTES).contains(&self.reminder_minutes) {
            mealweek_shared::bail!(
                "calendar reminder_minutes must be between 0 and {MAX_REMINDER_MINUTES}"
            );
        }

        Ok(())
    }
}

/// A rendered week, ready to be written out.
///
/// Holding one is proof the document was built; only then may the recipes it
/// contains be stamped as cooked.
#[derive(Debug, Clone)]
pub struct Export {
    pub week: WeekId,
    pub file_name: String,
    pub document: String,
    pub events: usize,
    pub exported_at: OffsetDateTime,
    cooked: Vec<u64>,
}

impl Export {
    pub fn cooked_ids(&self) -> &[u64] {
        &self.cooked
    }

    /// Sets `last_cooked` to the export time on every exported recipe.
    pub fn mark_cooked(&self, recipes: &mut [Recipe]) -> usize {
        mark_cooked(recipes, &self.cooked, self.exported_at)
    }
}

#[derive(Debug, Clone)]
pub struct CalendarExporter {
    settings: CalendarSettings,
    now: OffsetDateTime,
}

impl CalendarExporter {
    pub fn new(settings: CalendarSettings, now: OffsetDateTime) -> Self {
        Self { settings, now }
    }

    pub fn file_name(&self, week: WeekId) -> String {
        format!("{}-{week}.ics", self.settings.file_prefix)
    }

    pub fn build_events(
        &self,
        week_identifier: &str,
        slots: &[DaySlot],
        pool: &[Recipe],
    ) -> Result<Vec<Event>> {
        self.build_week_events(week_identifier.parse()?, slots, pool)
    }

    /// One event per slot with a known recipe, in slot order.
    pub fn build_week_events(
        &self,
        week: WeekId,
        slots: &[DaySlot],
        pool: &[Recipe],
    ) -> Result<Vec<Event>> {
        let start_time = self.settings.start_time()?;
        let mut events = vec![];

        for slot in slots {
            let Some(recipe_id) = slot.recipe_id else {
                continue;
            };

            let Some(recipe) = pool.iter().find(|r| r.id == recipe_id) else {
                tracing::warn!(
                    %week,
                    day = slot.day.value(),
                    recipe_id,
                    "recipe missing from pool, slot skipped"
                );
                continue;
            };

            let date = crate::resolve(week, slot.day)?;
            let start = PrimitiveDateTime::new(date, start_time);
            let end = start
                .checked_add(Duration::minutes(self.settings.duration_minutes))
                .ok_or_else(|| Error::InvalidDateSpec(format!("{week} event end overflows")))?;

            events.push(Event {
                uid: format!(
                    "plan-{week}-{}-{recipe_id}-{}@{}",
                    slot.day.value(),
                    Uuid::new_v4().simple(),
                    self.settings.uid_domain
                ),
                stamp: self.now,
                start,
                end,
                summary: format!("{}{}", self.settings.summary_prefix, recipe.name),
                description: format!(
                    "Category: {}\nSource: {}",
                    recipe.category,
                    recipe
                        .source
                        .as_deref()
                        .unwrap_or(&self.settings.unknown_source)
                ),
                reminder: Duration::minutes(self.settings.reminder_minutes),
                recipe_id,
            });
        }

        Ok(events)
    }

    /// Builds and renders the week. `None` when no slot produced an event.
    pub fn export(
        &self,
        week: WeekId,
        slots: &[DaySlot],
        pool: &[Recipe],
    ) -> Result<Option<Export>> {
        let events = self.build_week_events(week, slots, pool)?;
        if events.is_empty() {
            return Ok(None);
        }

        let mut cooked = events.iter().map(|e| e.recipe_id).collect::<Vec<_>>();
        cooked.sort_unstable();
        cooked.dedup();

        let mut calendar = Calendar::new(self.settings.prod_id.to_owned());
        let count = events.len();
        calendar.extend(events);
        let document = calendar.render()?;

        tracing::info!(%week, events = count, "calendar rendered");

        Ok(Some(Export {
            week,
            file_name: self.file_name(week),
            document,
            events: count,
            exported_at: self.now,
            cooked,
        }))
    }
}
