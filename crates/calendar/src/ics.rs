use mealweek_shared::Result;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

const LINE_LIMIT: usize = 75;

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub uid: String,
    pub stamp: OffsetDateTime,
    /// Floating local time, rendered without a zone suffix.
    pub start: PrimitiveDateTime,
    pub end: PrimitiveDateTime,
    pub summary: String,
    pub description: String,
    pub reminder: Duration,
    pub recipe_id: u64,
}

impl Event {
    fn write_lines(&self, lines: &mut Vec<String>) -> Result<()> {
        let local = format_description!("[year][month][day]T[hour][minute][second]");
        let utc = format_description!("[year][month][day]T[hour][minute][second]Z");

        lines.push("BEGIN:VEVENT".to_owned());
        lines.push(format!("UID:{}", self.uid));
        lines.push(format!(
            "DTSTAMP:{}",
            self.stamp.to_offset(UtcOffset::UTC).format(&utc)?
        ));
        lines.push(format!("DTSTART:{}", self.start.format(&local)?));
        lines.push(format!("DTEND:{}", self.end.format(&local)?));
        lines.push(format!("SUMMARY:{}", escape_text(&self.summary)));
        lines.push(format!("DESCRIPTION:{}", escape_text(&self.description)));
        lines.push("BEGIN:VALARM".to_owned());
        lines.push(format!("TRIGGER:-PT{}M", self.reminder.whole_minutes()));
        lines.push("ACTION:DISPLAY".to_owned());
        lines.push("DESCRIPTION:Reminder".to_owned());
        lines.push("END:VALARM".to_owned());
        lines.push("END:VEVENT".to_owned());

        Ok(())
    }
}

/// An iCalendar document holding one `VEVENT` per planned dinner.
#[derive(Debug, Clone, PartialEq)]
pub struct Calendar {
    prod_id: String,
    events: Vec<Event>,
}

impl Calendar {
    pub fn new(prod_id: impl Into<String>) -> Self {
        Self {
            prod_id: prod_id.into(),
            events: vec![],
        }
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn render(&self) -> Result<String> {
        let mut lines = vec![
            "BEGIN:VCALENDAR".to_owned(),
            "VERSION:2.0".to_owned(),
            format!("PRODID:{}", self.prod_id),
            "CALSCALE:GREGORIAN".to_owned(),
            "METHOD:PUBLISH".to_owned(),
        ];

        for event in &self.events {
            event.write_lines(&mut lines)?;
        }

        lines.push("END:VCALENDAR".to_owned());

        let mut document = String::new();
        for line in &lines {
            document.push_str(&fold(line));
            document.push_str("\r\n");
        }

        Ok(document)
    }
}

impl Extend<Event> for Calendar {
    fn extend<T: IntoIterator<Item = Event>>(&mut self, iter: T) {
        self.events.extend(iter);
    }
}

/// RFC 5545 TEXT escaping.
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(ch),
        }
    }

    escaped
}

/// Splits a content line into 75-octet chunks without cutting a UTF-8 sequence.
pub fn fold(line: &str) -> String {
    if line.len() <= LINE_LIMIT {
        return line.to_owned();
    }

    let mut folded = String::with_capacity(line.len() + line.len() / LINE_LIMIT * 3);
    let mut width = 0;

    for ch in line.chars() {
        let len = ch.len_utf8();
        if width + len > LINE_LIMIT {
            folded.push_str("\r\n ");
            width = 1;
        }

        folded.push(ch);
        width += len;
    }

    folded
}
