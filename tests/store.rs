use chrono::NaiveDate;
use habit_tracker::{FileStore, HABITS_KEY, Habit, HabitError, HabitStore, KeyValueStore, MemoryStore};
use std::path::PathBuf;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn habit(id: &str, name: &str) -> Habit {
    Habit::new(id, name, "💪", date(2024, 1, 1)).unwrap()
}

fn unique_data_dir() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("habit_tracker_store_{}_{}", std::process::id(), nanos));
    path
}

#[tokio::test]
async fn toggle_twice_restores_completed_days() {
    let store = HabitStore::new(MemoryStore::new());
    store.add(habit("h1", "Exercise")).await.unwrap();

    let day = date(2024, 1, 1);
    let once = store.toggle_day_completion("h1", day).await.unwrap().unwrap();
    assert_eq!(once.completed_days.iter().copied().collect::<Vec<_>>(), vec![day]);

    let twice = store.toggle_day_completion("h1", day).await.unwrap().unwrap();
    assert!(twice.completed_days.is_empty());
    assert!(store.get_by_id("h1").await.unwrap().completed_days.is_empty());
}

#[tokio::test]
async fn toggle_unknown_habit_returns_none() {
    let store = HabitStore::new(MemoryStore::new());
    store.add(habit("h1", "Exercise")).await.unwrap();

    let result = store.toggle_day_completion("missing", date(2024, 1, 1)).await.unwrap();
    assert!(result.is_none());
    assert!(store.get_by_id("missing").await.is_none());
}

#[tokio::test]
async fn list_preserves_insertion_order() {
    let store = HabitStore::new(MemoryStore::new());
    for (id, name) in [("b", "Read"), ("a", "Walk"), ("c", "Water")] {
        store.add(habit(id, name)).await.unwrap();
    }

    let ids: Vec<_> = store.list().await.into_iter().map(|h| h.id).collect();
    assert_eq!(ids, ["b", "a", "c"]);
}

#[tokio::test]
async fn duplicate_id_is_rejected() {
    let store = HabitStore::new(MemoryStore::new());
    store.add(habit("h1", "Exercise")).await.unwrap();

    let err = store.add(habit("h1", "Other")).await.unwrap_err();
    assert!(matches!(err, HabitError::DuplicateId(ref id) if id == "h1"));

    let habits = store.list().await;
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0].name, "Exercise");
}

#[tokio::test]
async fn deleting_missing_id_leaves_collection_unchanged() {
    let memory = MemoryStore::new();
    let store = HabitStore::new(memory.clone());
    store.add(habit("h1", "Exercise")).await.unwrap();
    let before = memory.raw(HABITS_KEY).await;

    assert!(store.delete("nope").await.unwrap().is_none());
    assert_eq!(memory.raw(HABITS_KEY).await, before);

    let removed = store.delete("h1").await.unwrap().unwrap();
    assert_eq!(removed.id, "h1");
    assert!(store.list().await.is_empty());
}

#[tokio::test]
async fn update_replaces_matching_record_only() {
    let store = HabitStore::new(MemoryStore::new());
    store.add(habit("h1", "Exercise")).await.unwrap();

    let mut changed = habit("h1", "Morning run");
    changed.toggle_day(date(2024, 1, 2));
    assert!(store.update(changed.clone()).await.unwrap());
    assert_eq!(store.get_by_id("h1").await.unwrap(), changed);

    assert!(!store.update(habit("h2", "Ghost")).await.unwrap());
    assert_eq!(store.list().await.len(), 1);
}

#[tokio::test]
async fn unreadable_storage_lists_as_empty() {
    let memory = MemoryStore::new();
    let store = HabitStore::new(memory.clone());
    store.add(habit("h1", "Exercise")).await.unwrap();

    memory.set_fail_reads(true).await;
    assert!(store.list().await.is_empty());
    assert!(store.get_by_id("h1").await.is_none());
    assert!(matches!(store.try_list().await, Err(HabitError::Storage(_))));

    // A mutation must not overwrite data it could not read.
    assert!(store.add(habit("h2", "Read")).await.is_err());
    memory.set_fail_reads(false).await;
    assert_eq!(store.list().await.len(), 1);
}

#[tokio::test]
async fn failed_write_is_surfaced() {
    let memory = MemoryStore::new();
    let store = HabitStore::new(memory.clone());
    store.add(habit("h1", "Exercise")).await.unwrap();

    memory.set_fail_writes(true).await;
    let err = store
        .toggle_day_completion("h1", date(2024, 1, 1))
        .await
        .unwrap_err();
    assert!(err.is_storage());
    assert!(store.get_by_id("h1").await.unwrap().completed_days.is_empty());
}

#[tokio::test]
async fn corrupt_blob_reads_as_empty() {
    let memory = MemoryStore::new();
    memory.set_item(HABITS_KEY, "{not json").await.unwrap();
    let store = HabitStore::new(memory);

    assert!(store.list().await.is_empty());
    assert!(matches!(store.try_list().await, Err(HabitError::Corrupt(_))));
}

#[tokio::test]
async fn file_store_persists_across_instances() {
    let dir = unique_data_dir();

    let first = HabitStore::new(FileStore::new(&dir));
    first.add(habit("h1", "Exercise")).await.unwrap();
    first.toggle_day_completion("h1", date(2024, 1, 3)).await.unwrap();

    let second = HabitStore::new(FileStore::new(&dir));
    let loaded = second.get_by_id("h1").await.unwrap();
    assert!(loaded.is_completed_on(date(2024, 1, 3)));

    let raw = std::fs::read_to_string(dir.join("habit_tracker_habits.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["createdAt"], "2024-01-01");
    assert_eq!(value[0]["completedDays"][0], "2024-01-03");

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn missing_file_is_an_empty_collection() {
    let dir = unique_data_dir();
    let store = HabitStore::new(FileStore::new(&dir));
    assert!(store.try_list().await.unwrap().is_empty());
}
