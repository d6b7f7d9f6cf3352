//! Batch front end for the corpus preparation pipeline: clean a sermon and
//! emit a CoNLL training file, validate an existing file, or align model
//! predictions back onto a sentence.

use std::fs;
use std::path::PathBuf;

use abacus_core::{
    align_predictions, check_bio_validity, clean_sermon, find_good_split, label_document,
    Abbreviations, Prediction, DEFAULT_SPLIT_INDEX,
};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "abacus", about = "ABaCus sermon corpus preparation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clean a marker-annotated sermon and write a BIO-labeled CoNLL file
    Prepare(PrepareArgs),
    /// Check that a CoNLL file follows the BIO annotation standard
    Validate(ValidateArgs),
    /// Align model predictions (JSON) onto the words of a sentence
    Align(AlignArgs),
}

#[derive(Args)]
struct PrepareArgs {
    /// Sermon text with <PERSON>/<LOCATION> markers
    #[arg(long)]
    input: PathBuf,
    /// Bible abbreviation list, one entry per line
    #[arg(long)]
    bible_abbr: PathBuf,
    /// Latin abbreviation list, one entry per line
    #[arg(long)]
    latin_abbr: PathBuf,
    /// Output CoNLL file
    #[arg(long)]
    output: PathBuf,
    /// First candidate index when splitting long documents
    #[arg(long, default_value_t = DEFAULT_SPLIT_INDEX)]
    split_index: usize,
}

#[derive(Args)]
struct ValidateArgs {
    /// CoNLL file to check
    #[arg(long)]
    input: PathBuf,
}

#[derive(Args)]
struct AlignArgs {
    /// The sentence the predictions refer to
    #[arg(long)]
    sentence: String,
    /// JSON file with prediction records ({"start", "entity_group"})
    #[arg(long)]
    predictions: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Prepare(args) => prepare(args),
        Command::Validate(args) => validate(args),
        Command::Align(args) => align(args),
    }
}

fn prepare(args: PrepareArgs) -> Result<()> {
    let abbr = Abbreviations::load(&args.bible_abbr, &args.latin_abbr)?;
    info!(
        bible = abbr.bible.len(),
        latin = abbr.latin.len(),
        "loaded abbreviation lists"
    );

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read sermon {}", args.input.display()))?;
    let cleaned = clean_sermon(&raw, &abbr);
    let tokens = label_document(&cleaned);
    info!(tokens = tokens.len(), "labeled document");

    // Short documents are written as a single chunk; the splitter needs
    // enough tokens to reach the candidate index in the first place.
    let mut out = String::new();
    if tokens.len() > args.split_index {
        let tree = find_good_split(&tokens, args.split_index)?;
        let leaves = tree.leaves();
        info!(chunks = leaves.len(), "split into chunks");
        for leaf in leaves {
            write_chunk(&mut out, leaf);
        }
    } else {
        write_chunk(&mut out, &tokens);
    }

    fs::write(&args.output, &out)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(output = %args.output.display(), "wrote corpus");
    Ok(())
}

fn write_chunk(out: &mut String, tokens: &[abacus_core::LabeledToken]) {
    for token in tokens {
        out.push_str(&token.text);
        out.push('\t');
        out.push_str(token.tag.label());
        out.push('\n');
    }
    out.push('\n');
}

fn validate(args: ValidateArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let lines: Vec<&str> = raw.lines().collect();
    let report = check_bio_validity(&lines);
    if report.valid {
        info!(lines = lines.len(), "corpus is valid");
        Ok(())
    } else {
        for idx in &report.bad_lines {
            eprintln!("line {}: {:?}", idx, lines[*idx]);
        }
        bail!("{} malformed line(s)", report.bad_lines.len());
    }
}

fn align(args: AlignArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.predictions)
        .with_context(|| format!("failed to read {}", args.predictions.display()))?;
    let predictions: Vec<Prediction> =
        serde_json::from_str(&raw).context("failed to parse prediction records")?;

    let (words, labels) = align_predictions(&args.sentence, &predictions);
    for (word, label) in words.iter().zip(labels.iter()) {
        println!("{word}\t{label}");
    }
    Ok(())
}
