use clap::{CommandFactory, Parser, Subcommand};

use mimalloc::MiMalloc;

use crate::{compare::CompareArgs, generate::GenerateSubcommands};

mod check_key;
mod compare;
mod generate;
mod parsers;
mod suggest;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare commutes between starting points and destinations
    Compare {
        #[command(flatten)]
        args: CompareArgs,
    },
    /// Check which Maps APIs the configured key can reach
    CheckKey,
    /// Suggest addresses for partial input
    Suggest {
        input: String,
    },
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        commands: GenerateSubcommands,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Compare { args }) => compare::run(args).await?,
        Some(Commands::CheckKey) => check_key::run().await?,
        Some(Commands::Suggest { input }) => suggest::run(&input).await?,
        Some(Commands::Generate { commands }) => generate::run(commands)?,
        None => Cli::command().print_help()?,
    }

    Ok(())
}
