pub mod errors;
pub mod models;
pub mod notifications;
pub mod progress;
pub mod storage;
pub mod store;
pub mod tracker;

pub use errors::{HabitError, StorageError};
pub use models::{Habit, NewHabit, ReminderTime};
pub use notifications::{DisabledScheduler, NotificationScheduler};
pub use storage::{FileStore, KeyValueStore, MemoryStore, resolve_data_dir};
pub use store::{HABITS_KEY, HabitStore};
pub use tracker::HabitTracker;
