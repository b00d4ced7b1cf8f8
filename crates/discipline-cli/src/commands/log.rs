use clap::Subcommand;
use discipline_core::storage::Database;

#[derive(Subcommand)]
pub enum LogAction {
    /// List log entries, oldest first
    List {
        /// Keep only the newest N entries
        #[arg(long)]
        limit: Option<usize>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check-in counts
    Stats,
}

pub fn run(action: LogAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    match action {
        LogAction::List { limit, json } => {
            let entries = db.entries(limit)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in entries {
                    println!(
                        "{:>5}  {}  [{}] {}",
                        entry.id,
                        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                        entry.productivity_score,
                        entry.activity
                    );
                }
            }
        }
        LogAction::Stats => {
            let stats = db.stats()?;
            println!("total check-ins:   {}", stats.total_checkins);
            println!("  productive:      {}", stats.productive_checkins);
            println!("today's check-ins: {}", stats.today_checkins);
            println!("  productive:      {}", stats.today_productive);
        }
    }
    Ok(())
}
