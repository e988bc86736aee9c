//! Genres command implementation
//!
//! Lists the registry's genres with their tempo ranges.

use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use tunesmith_registry::{BpmRange, GenreDefinition, GENRES};

/// One row of `tunesmith genres --json`.
#[derive(Debug, Serialize)]
pub struct GenreRow {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bpm: Option<BpmRange>,
    pub moods: &'static [&'static str],
}

impl From<&GenreDefinition> for GenreRow {
    fn from(genre: &GenreDefinition) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
            bpm: genre.bpm,
            moods: genre.moods,
        }
    }
}

/// Registry genres sorted by id.
pub fn rows() -> Vec<GenreRow> {
    let mut rows: Vec<GenreRow> = GENRES.iter().map(GenreRow::from).collect();
    rows.sort_by_key(|row| row.id);
    rows
}

/// Run the genres command
pub fn run(json: bool) -> Result<ExitCode> {
    let rows = rows();
    if json {
        let json = serde_json::to_string_pretty(&rows).context("failed to serialize genres")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    let width = rows.iter().map(|row| row.id.len()).max().unwrap_or(0);
    for row in &rows {
        let bpm = match row.bpm {
            Some(range) => format!("{}-{} BPM (typ. {})", range.min, range.max, range.typical),
            None => "tempo varies".dimmed().to_string(),
        };
        let id = format!("{:<width$}", row.id, width = width);
        println!("  {}  {:<16} {}", id.cyan(), row.name, bpm);
    }
    println!();
    println!("{} genres", rows.len());
    Ok(ExitCode::SUCCESS)
}
