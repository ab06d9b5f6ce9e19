//! Melange CLI - recipe-driven table transformation.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Apply {
            recipe,
            files,
            output,
            format,
            tsv,
        } => commands::apply::run(&cli.store, &recipe, &files, output, format, tsv),

        Commands::Save { file } => commands::recipes::save(&cli.store, &file),

        Commands::List { json } => commands::recipes::list(&cli.store, json),

        Commands::Show { recipe } => commands::recipes::show(&cli.store, &recipe),

        Commands::Delete { id } => commands::recipes::delete(&cli.store, &id),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
