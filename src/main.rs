use chrono::Local;
use habit_tracker::progress::{HabitSummary, TOTAL_DAYS};
use habit_tracker::{FileStore, HabitStore, resolve_data_dir};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_dir = resolve_data_dir();
    let store = HabitStore::new(FileStore::new(&data_dir));
    let habits = store.try_list().await?;
    info!(dir = %data_dir.display(), count = habits.len(), "loaded habits");

    let today = Local::now().date_naive();
    for habit in &habits {
        let summary = HabitSummary::at(habit, today);
        println!(
            "{} {}  day {} of {}  {} done ({}%){}",
            summary.emoji,
            summary.name,
            summary.current_day,
            TOTAL_DAYS,
            summary.completed_count,
            summary.percent,
            if summary.done_today { "  ✓ today" } else { "" },
        );
    }

    Ok(())
}
