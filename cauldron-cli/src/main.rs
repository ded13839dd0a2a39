use cauldron_lib::{Repository, repository::Quantity};
use clap::{Parser, Subcommand};
use sysexits::ExitCode;
use tracing_subscriber::EnvFilter;

mod ingredient;

#[derive(Parser, Debug)]
#[command(name = "cauldron")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// List ingredients, grouped into unbought and bought sections
    List,
    /// Add a new ingredient to the list
    Add {
        /// Display name for the ingredient
        #[arg(short, long)]
        title: String,
        /// How many to buy
        #[arg(short, long)]
        quantity: Option<Quantity>,
        /// Free-form notes
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// Remove a bought ingredient
    Remove {
        /// Identifier shown by `list`
        id: u64,
    },
}

fn main() -> ExitCode {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    // Logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let repo = Repository::new();
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::List => ingredient::list(&repo),
        Command::Add {
            title,
            quantity,
            notes,
        } => ingredient::add(&repo, title, *quantity, notes),
        Command::Remove { id } => ingredient::remove(&repo, *id),
    };

    match result {
        Ok(()) => ExitCode::Ok,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::Software
        }
    }
}
