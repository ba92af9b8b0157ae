use crate::errors::HabitError;
use crate::models::{Habit, NewHabit};
use crate::notifications::NotificationScheduler;
use crate::progress::HabitSummary;
use crate::storage::KeyValueStore;
use crate::store::HabitStore;
use chrono::{Local, NaiveDate};
use tracing::{info, warn};
use uuid::Uuid;

/// Commands the screens issue: create, delete, toggle and the mark-today
/// shortcut, with reminders handed to the notification scheduler.
///
/// Results are returned from the in-memory change; the store is not re-read
/// after a write.
pub struct HabitTracker<S, N> {
    store: HabitStore<S>,
    scheduler: N,
}

impl<S: KeyValueStore, N: NotificationScheduler> HabitTracker<S, N> {
    pub fn new(store: HabitStore<S>, scheduler: N) -> Self {
        Self { store, scheduler }
    }

    pub fn store(&self) -> &HabitStore<S> {
        &self.store
    }

    pub async fn habits(&self) -> Vec<Habit> {
        self.store.list().await
    }

    pub async fn habit(&self, id: &str) -> Option<Habit> {
        self.store.get_by_id(id).await
    }

    pub async fn create_habit(&self, request: NewHabit) -> Result<Habit, HabitError> {
        self.create_habit_on(request, Local::now().date_naive()).await
    }

    pub async fn create_habit_on(
        &self,
        request: NewHabit,
        created_at: NaiveDate,
    ) -> Result<Habit, HabitError> {
        let id = Uuid::new_v4().to_string();
        let mut habit = Habit::new(id, &request.name, request.emoji, created_at)?;

        if let Some(time) = request.reminder_time {
            habit.reminder_time = Some(time);
            let body = format!("Time for {} {}", habit.emoji, habit.name);
            habit.notification_id = self
                .scheduler
                .schedule("Habit reminder", &body, time.hour(), time.minute())
                .await;
            if habit.notification_id.is_none() {
                warn!(id = %habit.id, %time, "reminder not scheduled");
            }
        }

        if let Err(err) = self.store.add(habit.clone()).await {
            if let Some(notification_id) = habit.notification_id.as_deref() {
                self.scheduler.cancel(notification_id).await;
            }
            return Err(err);
        }

        info!(id = %habit.id, "created habit");
        Ok(habit)
    }

    /// Deletes the habit and cancels its reminder. Unknown ids are a no-op.
    pub async fn delete_habit(&self, id: &str) -> Result<(), HabitError> {
        let Some(removed) = self.store.delete(id).await? else {
            return Ok(());
        };

        if let Some(notification_id) = removed.notification_id.as_deref() {
            self.scheduler.cancel(notification_id).await;
        }
        Ok(())
    }

    pub async fn toggle_day(&self, id: &str, date: NaiveDate) -> Result<Option<Habit>, HabitError> {
        self.store.toggle_day_completion(id, date).await
    }

    pub async fn mark_today(&self, id: &str) -> Result<Option<Habit>, HabitError> {
        self.toggle_day(id, Local::now().date_naive()).await
    }

    pub async fn summaries_at(&self, today: NaiveDate) -> Vec<HabitSummary> {
        self.habits()
            .await
            .iter()
            .map(|habit| HabitSummary::at(habit, today))
            .collect()
    }
}
