//! Display helpers for dates, statuses and calorie values (Polish locale)

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Weekday};

use crate::meals::MealCategory;
use crate::progress::ProgressStatus;

const MONTHS_GENITIVE: [&str; 12] = [
    "stycznia",
    "lutego",
    "marca",
    "kwietnia",
    "maja",
    "czerwca",
    "lipca",
    "sierpnia",
    "września",
    "października",
    "listopada",
    "grudnia",
];

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "poniedziałek",
        Weekday::Tue => "wtorek",
        Weekday::Wed => "środa",
        Weekday::Thu => "czwartek",
        Weekday::Fri => "piątek",
        Weekday::Sat => "sobota",
        Weekday::Sun => "niedziela",
    }
}

/// "Dzisiaj", "Wczoraj" or e.g. "wtorek, 7 maja"
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Dzisiaj".to_string();
    }
    if date == today - Duration::days(1) {
        return "Wczoraj".to_string();
    }
    let month = MONTHS_GENITIVE[date.month0() as usize];
    if date.year() == today.year() {
        format!("{}, {} {}", weekday_name(date.weekday()), date.day(), month)
    } else {
        format!(
            "{}, {} {} {}",
            weekday_name(date.weekday()),
            date.day(),
            month,
            date.year()
        )
    }
}

/// `DD.MM.YYYY`
pub fn short_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// `HH:MM` in the timestamp's own zone
pub fn time_of_day<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.format("%H:%M").to_string()
}

/// `1 234 kcal`
pub fn calories(value: i32) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    let sign = if value < 0 { "-" } else { "" };
    format!("{}{} kcal", sign, grouped)
}

pub fn status_label(status: ProgressStatus) -> &'static str {
    match status {
        ProgressStatus::Under => "Poniżej celu",
        ProgressStatus::OnTrack => "W normie",
        ProgressStatus::Over => "Powyżej celu",
    }
}

/// Visual weight of a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Warning,
    Success,
    Danger,
}

impl Tone {
    pub fn css_class(&self) -> &'static str {
        match self {
            Tone::Warning => "text-yellow-600 bg-yellow-50",
            Tone::Success => "text-green-600 bg-green-50",
            Tone::Danger => "text-red-600 bg-red-50",
        }
    }
}

pub fn status_tone(status: ProgressStatus) -> Tone {
    match status {
        ProgressStatus::Under => Tone::Warning,
        ProgressStatus::OnTrack => Tone::Success,
        ProgressStatus::Over => Tone::Danger,
    }
}

pub fn category_label(category: MealCategory) -> &'static str {
    match category {
        MealCategory::Breakfast => "Śniadanie",
        MealCategory::Lunch => "Obiad",
        MealCategory::Dinner => "Kolacja",
        MealCategory::Snack => "Przekąska",
        MealCategory::Other => "Inne",
    }
}
