use crate::errors::HabitError;
use crate::models::Habit;
use crate::storage::KeyValueStore;
use chrono::NaiveDate;
use tracing::{debug, error, info};

pub const HABITS_KEY: &str = "@habit_tracker_habits";

/// Owns the persisted habit collection.
///
/// Every mutation reads the whole collection, changes it in memory and writes
/// the whole collection back under [`HABITS_KEY`]. There is no locking: the
/// store expects one caller issuing one command at a time.
#[derive(Debug, Clone)]
pub struct HabitStore<S> {
    storage: S,
}

impl<S: KeyValueStore> HabitStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// All habits in stored order. Unreadable storage is logged and treated as empty.
    pub async fn list(&self) -> Vec<Habit> {
        match self.try_list().await {
            Ok(habits) => habits,
            Err(err) => {
                error!("failed to read habits: {err}");
                Vec::new()
            }
        }
    }

    pub async fn try_list(&self) -> Result<Vec<Habit>, HabitError> {
        match self.storage.get_item(HABITS_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn get_by_id(&self, id: &str) -> Option<Habit> {
        self.list().await.into_iter().find(|habit| habit.id == id)
    }

    pub async fn add(&self, habit: Habit) -> Result<(), HabitError> {
        let mut habits = self.try_list().await?;
        if habits.iter().any(|existing| existing.id == habit.id) {
            return Err(HabitError::DuplicateId(habit.id));
        }

        info!(id = %habit.id, name = %habit.name, "adding habit");
        habits.push(habit);
        self.save(&habits).await
    }

    /// Replaces the habit with the same id. Returns false if there is none.
    pub async fn update(&self, habit: Habit) -> Result<bool, HabitError> {
        let mut habits = self.try_list().await?;
        let Some(slot) = habits.iter_mut().find(|existing| existing.id == habit.id) else {
            debug!(id = %habit.id, "update skipped, habit not found");
            return Ok(false);
        };

        *slot = habit;
        self.save(&habits).await?;
        Ok(true)
    }

    /// Removes and returns the habit. Unknown ids are a no-op.
    pub async fn delete(&self, id: &str) -> Result<Option<Habit>, HabitError> {
        let mut habits = self.try_list().await?;
        let Some(index) = habits.iter().position(|habit| habit.id == id) else {
            debug!(id, "delete skipped, habit not found");
            return Ok(None);
        };

        let removed = habits.remove(index);
        self.save(&habits).await?;
        info!(id, "deleted habit");
        Ok(Some(removed))
    }

    /// Flips completion of `date` and persists. `Ok(None)` for unknown ids.
    pub async fn toggle_day_completion(
        &self,
        id: &str,
        date: NaiveDate,
    ) -> Result<Option<Habit>, HabitError> {
        let mut habits = self.try_list().await?;
        let Some(habit) = habits.iter_mut().find(|habit| habit.id == id) else {
            return Ok(None);
        };

        let completed = habit.toggle_day(date);
        let updated = habit.clone();
        self.save(&habits).await?;

        debug!(id, %date, completed, "toggled day");
        Ok(Some(updated))
    }

    async fn save(&self, habits: &[Habit]) -> Result<(), HabitError> {
        let payload = serde_json::to_string(habits)?;
        self.storage
            .set_item(HABITS_KEY, &payload)
            .await
            .map_err(|err| {
                error!("failed to save habits: {err}");
                HabitError::from(err)
            })
    }
}
