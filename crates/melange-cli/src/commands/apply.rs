//! Apply command - run a recipe over input files and export the result.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use melange::{export, ApplyOutcome, FileStore, Melange, Parser, ParserConfig};

use crate::cli::OutputFormat;

pub fn run(
    store_dir: &Path,
    recipe_ref: &str,
    files: &[PathBuf],
    output: Option<PathBuf>,
    format: OutputFormat,
    tsv: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = Melange::open(Box::new(FileStore::new(store_dir)))?;

    let Some(recipe) = engine.find_recipe(recipe_ref) else {
        return Err(format!("Recipe not found: {}", recipe_ref).into());
    };

    let parser = Parser::with_config(ParserConfig {
        delimiter: if tsv { b'\t' } else { b',' },
        ..ParserConfig::default()
    });

    let mut tables = Vec::with_capacity(files.len());
    for file in files {
        let (table, meta) = parser.parse_file(file)?;
        println!(
            "{} {} ({} rows, {} columns)",
            "Loaded".cyan().bold(),
            meta.file.white().bold(),
            meta.row_count,
            meta.column_count
        );
        tables.push(table);
    }

    let table = match engine.apply(&recipe.id, &tables) {
        ApplyOutcome::Success { table } => table,
        ApplyOutcome::Failed { error } => {
            return Err(format!("Recipe '{}' failed: {}", recipe.name, error).into());
        }
    };

    let rendered = match format {
        OutputFormat::Csv => export::to_delimited(&table, b',')?,
        OutputFormat::Tsv => export::to_delimited(&table, b'\t')?,
        OutputFormat::Json => serde_json::to_string_pretty(&export::to_json_objects(&table))?,
    };

    match output {
        Some(path) => {
            fs::write(&path, rendered)?;
            println!(
                "{} {} rows to {}",
                "Wrote".green().bold(),
                table.row_count(),
                path.display()
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
