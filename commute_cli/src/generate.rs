use std::path::{Path, PathBuf};

use clap::Subcommand;
use commute_planner::input::{CommuteForm, LocationRow};
use tracing::info;

/// Files that help author a `compare --input` document.
#[derive(Subcommand)]
pub enum GenerateSubcommands {
    /// JSON schema of the commute input document
    JsonSchema {
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
    /// A small commute input to start editing from
    SampleInput {
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
}

pub fn run(subcommand: GenerateSubcommands) -> Result<(), anyhow::Error> {
    match subcommand {
        GenerateSubcommands::JsonSchema { out } => {
            write(&out, &commute_planner::schema::generate_json_schema()?)?
        }
        GenerateSubcommands::SampleInput { out } => {
            write(&out, &serde_json::to_string_pretty(&sample_form())?)?
        }
    }

    Ok(())
}

fn sample_form() -> CommuteForm {
    CommuteForm {
        starting_points: vec![
            LocationRow::new("350 5th Ave, New York, NY").with_label("Home"),
            LocationRow::new("Grand Central Terminal, New York, NY")
                .with_label("Partner")
                .with_color("#aa00aa"),
        ],
        destinations: vec![LocationRow::new("1 Liberty Plaza, New York, NY").with_label("Office")],
        ..Default::default()
    }
}

fn write(out: &Path, contents: &str) -> Result<(), anyhow::Error> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(out, contents)?;
    info!("Wrote {}", out.display());

    Ok(())
}
