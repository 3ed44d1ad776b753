use std::collections::HashSet;

use mealweek_calendar::{CalendarExporter, CalendarSettings};
use mealweek_shared::mealplan::{DayIndex, DaySlot, WeekId};
use mealweek_shared::recipe::{Category, Recipe};
use time::macros::datetime;

fn pool() -> Vec<Recipe> {
    vec![
        Recipe::new(3, "Grönkålspasta", Category::Pasta).with_source("Portionen under tian"),
        Recipe::new(10, "Lax med sås i ugn", Category::Fish),
        Recipe::new(11, "Tacos", Category::Other),
        Recipe::new(16, "Flygande Jacob", Category::Chicken).with_source("ICA.se"),
    ]
}

fn slots() -> Vec<DaySlot> {
    [(0, 3), (1, 10), (3, 11), (6, 16)]
        .into_iter()
        .map(|(day, id)| DaySlot::new(DayIndex::new(day).unwrap(), Some(id)))
        .collect()
}

#[test]
fn test_one_event_per_assigned_slot_with_unique_uids() -> anyhow::Result<()> {
    let now = datetime!(2025-02-01 12:00:00 UTC);
    let exporter = CalendarExporter::new(CalendarSettings::default(), now);
    let week: WeekId = "2025-W06".parse()?;

    let export = exporter
        .export(week, &slots(), &pool())?
        .ok_or_else(|| anyhow::anyhow!("nothing exported"))?;

    assert_eq!(export.document.matches("BEGIN:VEVENT").count(), 4);
    assert_eq!(export.document.matches("END:VEVENT").count(), 4);

    let uids = export
        .document
        .split("\r\n")
        .filter(|line| line.starts_with("UID:"))
        .collect::<HashSet<_>>();
    assert_eq!(uids.len(), 4);

    assert!(export.document.contains("DTSTART:20250203T173000"));
    assert!(export.document.contains("DTSTART:20250209T173000"));
    assert!(export.document.ends_with("END:VCALENDAR\r\n"));

    Ok(())
}

#[test]
fn test_second_export_wins_last_cooked() -> anyhow::Result<()> {
    let week: WeekId = "2025-W06".parse()?;
    let first_at = datetime!(2025-02-01 12:00:00 UTC);
    let second_at = datetime!(2025-02-02 08:30:00 UTC);
    let mut recipes = pool();

    for at in [first_at, second_at] {
        let exporter = CalendarExporter::new(CalendarSettings::default(), at);
        let export = exporter
            .export(week, &slots(), &recipes)?
            .ok_or_else(|| anyhow::anyhow!("nothing exported"))?;
        export.mark_cooked(&mut recipes);
    }

    assert!(recipes.iter().all(|r| r.last_cooked == Some(second_at)));

    Ok(())
}

#[test]
fn test_custom_settings_shape_the_events() -> anyhow::Result<()> {
    let settings = CalendarSettings {
        start_hour: 18,
        start_minute: 0,
        duration_minutes: 45,
        reminder_minutes: 30,
        summary_prefix: "Middag: ".to_owned(),
        file_prefix: "veckomeny".to_owned(),
        ..CalendarSettings::default()
    };
    let exporter = CalendarExporter::new(settings, datetime!(2025-02-01 12:00:00 UTC));
    let week: WeekId = "2025-W06".parse()?;

    let export = exporter
        .export(week, &slots()[..1], &pool())?
        .ok_or_else(|| anyhow::anyhow!("nothing exported"))?;

    assert_eq!(export.file_name, "veckomeny-2025-W06.ics");
    assert!(export.document.contains("DTSTART:20250203T180000\r\n"));
    assert!(export.document.contains("DTEND:20250203T184500\r\n"));
    assert!(export.document.contains("TRIGGER:-PT30M\r\n"));
    assert!(export.document.contains("SUMMARY:Middag: Grönkålspasta\r\n"));

    Ok(())
}
