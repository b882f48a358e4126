use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use chain_hash::HashMap;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Scores a message against a phrase database and labels it SPAM or NOT_SPAM")]
struct Args {
    /// Database of `phrase,score` lines.
    database: PathBuf,
    /// Message file to score.
    message: PathBuf,
    /// Scores at or above this threshold are spam. Must be positive.
    threshold: u64,
}

fn invalid_input() -> ExitCode {
    eprintln!("Invalid input");
    ExitCode::FAILURE
}

/// Reads the database file into parallel phrase and score vectors, in file
/// order. Every line must hold exactly two non-empty comma-separated fields;
/// phrases are lowercased, scores are non-negative integers.
fn load_database(path: &Path) -> Option<(Vec<String>, Vec<u64>)> {
    let text = fs::read_to_string(path).ok()?;
    let mut phrases = Vec::new();
    let mut scores = Vec::new();
    for line in text.lines() {
        let (phrase, score) = line.split_once(',')?;
        if phrase.is_empty() || score.is_empty() || score.contains(',') {
            return None;
        }
        if !score.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        phrases.push(phrase.to_ascii_lowercase());
        scores.push(score.parse().ok()?);
    }
    Some((phrases, scores))
}

/// Totals the scores of every database phrase found in the message. Each
/// match is spliced out of the line before rescanning, so a consumed region
/// cannot match again.
fn score_message(path: &Path, database: &HashMap<String, u64>) -> Option<u64> {
    let text = fs::read_to_string(path).ok()?;
    let mut total = 0;
    for line in text.lines() {
        if line.is_empty() {
            continue;
        }
        let mut line = line.to_ascii_lowercase();
        for (phrase, score) in database {
            while let Some(found) = line.find(phrase.as_str()) {
                line.replace_range(found..found + phrase.len(), ",");
                total += score;
            }
        }
    }
    Some(total)
}

fn main() -> ExitCode {
    let args = Args::parse();
    if args.threshold == 0 {
        return invalid_input();
    }

    let Some((phrases, scores)) = load_database(&args.database) else {
        return invalid_input();
    };
    let Ok(database) = HashMap::from_keys_and_values(phrases, scores) else {
        return invalid_input();
    };
    let Some(score) = score_message(&args.message, &database) else {
        return invalid_input();
    };

    println!("{}", if score >= args.threshold { "SPAM" } else { "NOT_SPAM" });
    ExitCode::SUCCESS
}
