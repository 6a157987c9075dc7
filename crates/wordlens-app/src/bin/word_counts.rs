//! Offline word-frequency ranking over a batch of definition texts.
//!
//! Reads a JSON array of definition-text strings, counts cleaned tokens,
//! and writes the ranked counts as JSON. No runtime relationship to the
//! lookup pipeline; this is a standalone batch tool.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "word-counts", about = "Rank word frequencies across definition texts")]
struct Args {
    /// Path to a JSON array of definition-text strings
    #[arg(long)]
    input: PathBuf,

    /// Drop words seen fewer than this many times (1 = keep everything)
    #[arg(long, default_value_t = 1)]
    min_count: u32,

    /// Where to write the ranked JSON array
    #[arg(long, default_value = "word-counts.json")]
    output: PathBuf,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct WordCount {
    word: String,
    count: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let texts: Vec<String> =
        serde_json::from_str(&raw).context("input must be a JSON array of strings")?;

    let counts = count_words(&texts);
    let ranked = rank(counts, args.min_count);

    let json = serde_json::to_string_pretty(&ranked)?;
    fs::write(&args.output, json)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!(
        "ranked {} word(s) from {} text(s) into {}",
        ranked.len(),
        texts.len(),
        args.output.display()
    );
    Ok(())
}

/// Lower-case the token and strip every character that is not a letter,
/// digit, underscore, apostrophe, or hyphen, then drop a leading apostrophe.
fn clean_word(token: &str) -> String {
    let kept: String = token
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '\'' | '-'))
        .collect();
    kept.strip_prefix('\'').unwrap_or(&kept).to_string()
}

fn count_words(texts: &[String]) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for text in texts {
        for token in text.split(' ') {
            let word = clean_word(token);
            if word.is_empty() {
                // A token that cleans to nothing ends this line.
                break;
            }
            *counts.entry(word).or_insert(0) += 1;
        }
    }
    counts
}

/// Rank by descending count, ties broken by ascending word order, after
/// filtering by the minimum count.
fn rank(counts: HashMap<String, u32>, min_count: u32) -> Vec<WordCount> {
    let mut ranked: Vec<WordCount> = counts
        .into_iter()
        .filter(|(_, count)| *count >= min_count)
        .map(|(word, count)| WordCount { word, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    ranked
}
