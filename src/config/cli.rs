use crate::domain::model::BirthInput;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "esoteric-profile")]
#[command(about = "Esoteric birth profiles and synastry reports")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to an engine TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Full profile: chart, numerology, arcana and summary
    Profile {
        #[arg(long, help = "Birth date as YYYY-MM-DD")]
        date: String,
        #[arg(long, help = "Birth time as HH:MM")]
        time: Option<String>,
        #[arg(long, help = "Birth place, e.g. \"São Paulo\"")]
        place: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Compatibility report between two people
    Synastry {
        #[arg(long)]
        date1: String,
        #[arg(long)]
        name1: Option<String>,
        #[arg(long)]
        date2: String,
        #[arg(long)]
        name2: Option<String>,
    },
}

impl Command {
    pub fn profile_input(&self) -> Option<BirthInput> {
        match self {
            Command::Profile {
                date,
                time,
                place,
                name,
            } => Some(BirthInput {
                name: name.clone(),
                birth_date: date.clone(),
                birth_time: time.clone(),
                birth_place: place.clone(),
            }),
            Command::Synastry { .. } => None,
        }
    }

    pub fn synastry_inputs(&self) -> Option<(BirthInput, BirthInput)> {
        match self {
            Command::Synastry {
                date1,
                name1,
                date2,
                name2,
            } => Some((
                BirthInput {
                    name: name1.clone(),
                    birth_date: date1.clone(),
                    ..BirthInput::default()
                },
                BirthInput {
                    name: name2.clone(),
                    birth_date: date2.clone(),
                    ..BirthInput::default()
                },
            )),
            Command::Profile { .. } => None,
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        Ok(())
    }
}
