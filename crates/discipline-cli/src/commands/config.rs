use clap::Subcommand;
use discipline_core::storage::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Set the daily hour goal (one of 3, 5, 8, 10, 12)
    SetTarget {
        hours: u32,
    },
    /// Set the default focus label
    SetFocus {
        label: String,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default();
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::SetTarget { hours } => {
            let mut config = Config::load()?;
            config.set_daily_target(hours)?;
            config.save()?;
            println!("daily goal set to {hours}h");
        }
        ConfigAction::SetFocus { label } => {
            let mut config = Config::load()?;
            config.set_default_focus(label.clone());
            config.save()?;
            println!("default focus set to \"{label}\"");
        }
    }
    Ok(())
}
