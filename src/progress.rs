//! Values every habit screen displays, derived from a [`Habit`] and a
//! reference date. Nothing here touches storage.

use crate::models::Habit;
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::Serialize;

/// Length of the habit formation window in days.
pub const TOTAL_DAYS: u32 = 40;

const WEEK_LEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Completed,
    Today,
    Future,
    Missed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressTier {
    Starting,
    Building,
    Halfway,
    Formed,
}

impl ProgressTier {
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction >= 1.0 {
            Self::Formed
        } else if fraction >= 0.5 {
            Self::Halfway
        } else if fraction >= 0.25 {
            Self::Building
        } else {
            Self::Starting
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// 1-based position in the window.
    pub day_number: u32,
    pub status: DayStatus,
    pub pressable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarGrid {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Sunday-first rows; `None` pads the first row. The last row may be short.
    pub weeks: Vec<Vec<Option<CalendarCell>>>,
}

impl CalendarGrid {
    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.weeks.iter().flatten().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitSummary {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub current_day: u32,
    pub completed_count: usize,
    pub percent: u32,
    pub tier: ProgressTier,
    pub done_today: bool,
}

impl HabitSummary {
    pub fn at(habit: &Habit, today: NaiveDate) -> Self {
        Self {
            id: habit.id.clone(),
            name: habit.name.clone(),
            emoji: habit.emoji.clone(),
            current_day: current_day_index(habit, today),
            completed_count: completed_count(habit),
            percent: progress_percent(habit),
            tier: ProgressTier::from_fraction(progress_fraction(habit)),
            done_today: habit.is_completed_on(today),
        }
    }
}

pub fn summarize(habit: &Habit) -> HabitSummary {
    HabitSummary::at(habit, Local::now().date_naive())
}

/// Day of the window `today` falls on, clamped to `1..=TOTAL_DAYS`.
pub fn current_day_index(habit: &Habit, today: NaiveDate) -> u32 {
    let elapsed = (today - habit.created_at).num_days();
    (elapsed + 1).clamp(1, i64::from(TOTAL_DAYS)) as u32
}

/// Counts every completion, including dates outside the window.
pub fn completed_count(habit: &Habit) -> usize {
    habit.completed_days.len()
}

pub fn progress_fraction(habit: &Habit) -> f64 {
    (completed_count(habit) as f64 / f64::from(TOTAL_DAYS)).min(1.0)
}

pub fn progress_percent(habit: &Habit) -> u32 {
    (progress_fraction(habit) * 100.0).round() as u32
}

pub fn window_end(habit: &Habit) -> NaiveDate {
    habit.created_at + Duration::days(i64::from(TOTAL_DAYS) - 1)
}

/// Completed wins over every other status, even for future dates.
pub fn day_classification(habit: &Habit, date: NaiveDate, today: NaiveDate) -> DayStatus {
    if habit.is_completed_on(date) {
        DayStatus::Completed
    } else if date == today {
        DayStatus::Today
    } else if date > today {
        DayStatus::Future
    } else {
        DayStatus::Missed
    }
}

pub fn calendar_grid(habit: &Habit, today: NaiveDate) -> CalendarGrid {
    let start = habit.created_at;
    let mut weeks = Vec::new();
    let mut row: Vec<Option<CalendarCell>> = Vec::with_capacity(WEEK_LEN);

    let offset = start.weekday().num_days_from_sunday() as usize;
    row.extend(std::iter::repeat_n(None, offset));

    for day in 0..TOTAL_DAYS {
        let date = start + Duration::days(i64::from(day));
        row.push(Some(CalendarCell {
            date,
            day_number: day + 1,
            status: day_classification(habit, date, today),
            pressable: date <= today,
        }));

        if row.len() == WEEK_LEN {
            weeks.push(std::mem::replace(&mut row, Vec::with_capacity(WEEK_LEN)));
        }
    }

    if !row.is_empty() {
        weeks.push(row);
    }

    CalendarGrid {
        start,
        end: window_end(habit),
        weeks,
    }
}
