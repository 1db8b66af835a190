use chrono::NaiveDateTime;

/// Display strings for the date banner and per-entry time badges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeLabel {
    pub date: String,
    pub time: String,
}

/// Source of "now". Injected so formatting can be tested against a fixed moment.
pub trait Clock: Send {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// en-US long date (`Wednesday, October 14, 2026`) and 2-digit 12-hour time (`09:05 AM`).
pub fn format_date_time(moment: NaiveDateTime) -> DateTimeLabel {
    DateTimeLabel {
        date: moment.format("%A, %B %-d, %Y").to_string(),
        time: moment.format("%I:%M %p").to_string(),
    }
}

pub fn current_date_time(clock: &dyn Clock) -> DateTimeLabel {
    format_date_time(clock.now())
}
