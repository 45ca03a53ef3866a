//! CLI frontend for the Gravvandrare character generator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::character::CharacterOptions;

#[derive(Parser)]
#[command(
    name = "gv",
    about = "Gravvandrare — a character generator for doom-laden rulesets",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory with classes.json, items.json, and names.json
    /// (default: the built-in ruleset)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one or more starting characters
    Character {
        /// Class name (exact match; default: rolled at random)
        #[arg(short, long)]
        class: Option<String>,

        /// Leave the name blank instead of rolling one
        #[arg(long)]
        no_name: bool,

        /// RNG seed for reproducible characters (default: entropy)
        #[arg(short, long)]
        seed: Option<u64>,

        /// How many characters to generate
        #[arg(long, default_value = "1")]
        count: u32,

        /// Also allocate starting equipment
        #[arg(short, long)]
        items: bool,

        /// Print the roll transcript after each character
        #[arg(short, long)]
        log: bool,

        /// Emit JSON instead of tables
        #[arg(short, long)]
        json: bool,
    },

    /// List the classes in the catalog
    Classes,

    /// Roll a level-up delta for a character JSON file
    Levelup {
        /// Path to a character draft JSON file
        file: PathBuf,

        /// RNG seed for reproducible rolls (default: entropy)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Emit JSON instead of tables
        #[arg(short, long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let data = cli.data.as_deref();

    let result = match cli.command {
        Commands::Character {
            class,
            no_name,
            seed,
            count,
            items,
            log,
            json,
        } => commands::character::run(
            data,
            &CharacterOptions {
                class,
                roll_name: !no_name,
                seed,
                count,
                items,
                log,
                json,
            },
        ),
        Commands::Classes => commands::classes::run(data),
        Commands::Levelup { file, seed, json } => commands::levelup::run(data, &file, seed, json),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
