use crate::errors::HabitError;
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A tracked habit, persisted with the camelCase field names of the stored blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub emoji: String,
    /// Day 1 of the formation window.
    pub created_at: NaiveDate,
    #[serde(default)]
    pub completed_days: BTreeSet<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<ReminderTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<String>,
}

impl Habit {
    pub fn new(
        id: impl Into<String>,
        name: &str,
        emoji: impl Into<String>,
        created_at: NaiveDate,
    ) -> Result<Self, HabitError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HabitError::EmptyName);
        }

        Ok(Self {
            id: id.into(),
            name: name.to_string(),
            emoji: emoji.into(),
            created_at,
            completed_days: BTreeSet::new(),
            reminder_time: None,
            notification_id: None,
        })
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_days.contains(&date)
    }

    /// Flips membership of `date`. Returns true when the date is now completed.
    pub fn toggle_day(&mut self, date: NaiveDate) -> bool {
        if self.completed_days.remove(&date) {
            false
        } else {
            self.completed_days.insert(date);
            true
        }
    }
}

/// Request to create a habit; the tracker fills in id and creation date.
#[derive(Debug, Clone, Default)]
pub struct NewHabit {
    pub name: String,
    pub emoji: String,
    pub reminder_time: Option<ReminderTime>,
}

impl NewHabit {
    pub fn new(name: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emoji: emoji.into(),
            reminder_time: None,
        }
    }

    pub fn with_reminder(mut self, time: ReminderTime) -> Self {
        self.reminder_time = Some(time);
        self
    }
}

/// Time of day for a daily reminder, stored as `HH:mm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReminderTime(NaiveTime);

impl ReminderTime {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ReminderTime {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M").map(Self)
    }
}

impl Serialize for ReminderTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReminderTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
