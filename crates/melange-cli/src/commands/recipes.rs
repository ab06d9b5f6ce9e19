//! Recipe management commands: save, list, show, delete.

use std::fs;
use std::path::Path;

use colored::Colorize;
use melange::{FileStore, Melange, MergeStrategy, Recipe};

fn open_engine(store_dir: &Path) -> Result<Melange, Box<dyn std::error::Error>> {
    Ok(Melange::open(Box::new(FileStore::new(store_dir)))?)
}

pub fn save(store_dir: &Path, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(file)?;
    let recipe: Recipe = serde_json::from_str(&raw)?;

    let mut engine = open_engine(store_dir)?;
    let stored = engine.save_recipe(recipe)?;

    println!(
        "{} recipe '{}' as {}",
        "Saved".green().bold(),
        stored.name.white().bold(),
        stored.id
    );
    Ok(())
}

pub fn list(store_dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine(store_dir)?;
    let recipes = engine.recipes();

    if json {
        println!("{}", serde_json::to_string_pretty(&recipes)?);
        return Ok(());
    }

    if recipes.is_empty() {
        println!(
            "No recipes stored. Add one with {}.",
            "melange save <recipe.json>".cyan()
        );
        return Ok(());
    }

    for recipe in recipes {
        let strategy = match recipe.merge_strategy {
            MergeStrategy::Append => "append".to_string(),
            MergeStrategy::Join => format!(
                "join on '{}'",
                recipe.join_column.as_deref().unwrap_or("?")
            ),
        };

        println!(
            "{}  {} ({}, {} renames, {} new columns)",
            recipe.id.yellow(),
            recipe.name.white().bold(),
            strategy,
            recipe.column_mappings.len(),
            recipe.new_columns.len()
        );
        if let Some(last_used) = recipe.last_used {
            println!("      last used {}", last_used.format("%Y-%m-%d %H:%M"));
        }
    }
    Ok(())
}

pub fn show(store_dir: &Path, recipe_ref: &str) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine(store_dir)?;

    let Some(recipe) = engine.find_recipe(recipe_ref) else {
        return Err(format!("Recipe not found: {}", recipe_ref).into());
    };

    println!("{}", serde_json::to_string_pretty(&recipe)?);
    Ok(())
}

pub fn delete(store_dir: &Path, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = open_engine(store_dir)?;

    if engine.delete_recipe(id)? {
        println!("{} recipe {}", "Deleted".green().bold(), id);
    } else {
        println!("{} no recipe with id {}", "Warning:".yellow().bold(), id);
    }
    Ok(())
}
