use clap::Subcommand;
use pomodoro_pro_core::display::format_hours_minutes;
use pomodoro_pro_core::stats::format_date;
use pomodoro_pro_core::{Database, StatsStore, SystemClock};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's stats
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Forget today's stats
    Reset,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StatsAction::Show { json } => {
            let store = StatsStore::new(super::open_backend(), SystemClock);
            let stats = store.load();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Session:    #{}", stats.session_count);
                println!("Completed:  {}", stats.completed_sessions);
                println!("Focus time: {}", format_hours_minutes(stats.total_time_spent_secs));
                println!("Streak:     {}", stats.streak_count);
                println!("Last saved: {}", format_date(stats.last_save_date));
            }
        }
        StatsAction::Reset => {
            let store = StatsStore::new(Database::open()?, SystemClock);
            store.clear()?;
            println!("stats reset");
        }
    }
    Ok(())
}
