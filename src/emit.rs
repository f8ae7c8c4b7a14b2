use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::parser::{BugPattern, PatternDoc};

pub const PATTERNS_FILE: &str = "patterns.json";
pub const DESCRIPTION_FILE: &str = "description.json";

const TOOL_NAME: &str = "FindBugs";
const LEVEL: &str = "Error";
const CATEGORY: &str = "Security";
const TIME_TO_FIX_MINUTES: u32 = 30;

/// Tool descriptor written to `patterns.json`.
#[derive(Debug, Serialize)]
pub struct PatternSet {
    pub name: &'static str,
    pub patterns: Vec<PatternEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternEntry {
    pub pattern_id: String,
    pub level: &'static str,
    pub category: &'static str,
}

/// One entry of `description.json`, index-aligned with [`PatternSet::patterns`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionEntry {
    pub pattern_id: String,
    pub title: String,
    pub description: String,
    pub time_to_fix: u32,
}

/// Build both output sequences from the parsed patterns.
///
/// The sequences are index-aligned: entry `i` of each describes the same
/// pattern. `description` stays empty — the page's prose needs manual editing
/// before it is usable as a short description (the `docs` subcommand exposes
/// the raw text instead).
pub fn build_outputs(patterns: &[BugPattern]) -> (PatternSet, Vec<DescriptionEntry>) {
    let entries = patterns
        .iter()
        .map(|p| PatternEntry {
            pattern_id: p.id.clone(),
            level: LEVEL,
            category: CATEGORY,
        })
        .collect();

    let descriptions = patterns
        .iter()
        .map(|p| DescriptionEntry {
            pattern_id: p.id.clone(),
            title: p.title.clone(),
            description: String::new(),
            time_to_fix: TIME_TO_FIX_MINUTES,
        })
        .collect();

    (
        PatternSet {
            name: TOOL_NAME,
            patterns: entries,
        },
        descriptions,
    )
}

/// Serialize both files with 2-space indentation, overwriting in place.
pub fn write_json_files(
    dir: &Path,
    set: &PatternSet,
    descriptions: &[DescriptionEntry],
) -> Result<()> {
    write_pretty(&dir.join(PATTERNS_FILE), set)?;
    write_pretty(&dir.join(DESCRIPTION_FILE), &descriptions)?;
    Ok(())
}

fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Write one `<id>.md` per pattern under `dir`, creating it if needed.
/// Returns the number of files written.
pub fn write_markdown_docs(dir: &Path, docs: &[PatternDoc]) -> Result<usize> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    for doc in docs {
        let path = dir.join(format!("{}.md", doc.id));
        fs::write(&path, &doc.body)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(docs.len())
}

// ── Tests ──
