// Data model for the habit-tracker backend
//
// These types mirror the backend's JSON payloads. One quirk is deliberately
// preserved: the backend returns `frequency` upper-case ("DAILY") but expects
// lower-case ("daily") in create bodies. `Habit` keeps the raw string exactly
// as received and `NewHabit` serializes the enum lower-case, so the client
// never normalizes between the two representations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A habit as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Raw backend value, e.g. "DAILY". Displayed as-is.
    pub frequency: String,
}

/// Frequency selection for the create form. Serialized lower-case on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn all() -> &'static [Frequency] {
        &[Frequency::Daily, Frequency::Weekly, Frequency::Monthly]
    }

    /// Cycle to the next option (wraps around).
    pub fn next(self) -> Self {
        match self {
            Frequency::Daily => Frequency::Weekly,
            Frequency::Weekly => Frequency::Monthly,
            Frequency::Monthly => Frequency::Daily,
        }
    }

    /// Cycle to the previous option (wraps around).
    pub fn prev(self) -> Self {
        match self {
            Frequency::Daily => Frequency::Monthly,
            Frequency::Weekly => Frequency::Daily,
            Frequency::Monthly => Frequency::Weekly,
        }
    }

    /// Form label; matches the wire representation.
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

/// Create-habit request body.
#[derive(Debug, Clone, Serialize)]
pub struct NewHabit {
    pub name: String,
    pub description: String,
    pub frequency: Frequency,
}

/// One completion record for a habit. The habit association is implicit in
/// the endpoint the log came from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HabitLog {
    pub id: i64,
    pub date: NaiveDate,
}

/// Per-habit completion summary over an arbitrary date range.
/// `rate` is completions/possible in [0,1], computed by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RangeStat {
    pub completions: u64,
    pub possible: u64,
    pub rate: f64,
}

impl RangeStat {
    /// Rate formatted as a whole percentage. Guards the possible = 0 case so
    /// the display never depends on a division by zero upstream.
    pub fn rate_display(&self) -> String {
        if self.possible == 0 {
            "0%".to_string()
        } else {
            format!("{:.0}%", self.rate * 100.0)
        }
    }
}

/// Monthly stats payload: habit name -> completion count for one month.
pub type MonthlyStats = BTreeMap<String, u64>;

/// Range stats payload: habit name -> completion summary.
pub type RangeStats = BTreeMap<String, RangeStat>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_habit_serializes_frequency_lower_case() {
        let body = NewHabit {
            name: "Read".to_string(),
            description: String::new(),
            frequency: Frequency::Daily,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["frequency"], "daily");
    }

    #[test]
    fn habit_keeps_raw_upper_case_frequency() {
        let habit: Habit = serde_json::from_str(
            r#"{"id":1,"name":"Read","description":"","frequency":"DAILY"}"#,
        )
        .unwrap();
        assert_eq!(habit.frequency, "DAILY");
    }

    #[test]
    fn habit_log_parses_iso_date() {
        let log: HabitLog = serde_json::from_str(r#"{"id":7,"date":"2024-03-05"}"#).unwrap();
        assert_eq!(log.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn frequency_cycle_wraps() {
        assert_eq!(Frequency::Monthly.next(), Frequency::Daily);
        assert_eq!(Frequency::Daily.prev(), Frequency::Monthly);
    }

    #[test]
    fn rate_display_rounds_to_whole_percent() {
        let stat = RangeStat {
            completions: 2,
            possible: 3,
            rate: 2.0 / 3.0,
        };
        assert_eq!(stat.rate_display(), "67%");
    }

    #[test]
    fn rate_display_is_zero_when_nothing_was_possible() {
        let stat = RangeStat {
            completions: 0,
            possible: 0,
            rate: f64::NAN,
        };
        assert_eq!(stat.rate_display(), "0%");
    }
}
