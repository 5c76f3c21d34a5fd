use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use pitchsmith::{PitchConfig, PitchEntry, SentenceContour, SentencePitchProcessor};

#[derive(Parser, Debug)]
#[command(name = "pitchsmith")]
#[command(about = "Japanese pitch-accent contours for words and sentences")]
#[command(version)]
struct Args {
    /// Sentences to annotate
    text: Vec<String>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pitch store path (overrides store_path)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Compiled vibrato dictionary, plain or .zst
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// JSON lexicon for the dictionary-free analyzer
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Dictionary feature layout: ipadic or unidic
    #[arg(long)]
    layout: Option<String>,

    /// Never query the online reference
    #[arg(long)]
    no_reference: bool,

    /// Reference request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Resolve each argument as a single word instead of a sentence
    #[arg(long)]
    word: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Process one sentence per line of this file
    #[arg(long)]
    batch: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<(PitchConfig, Options)> {
        let mut config = match &self.config {
            Some(path) => PitchConfig::load(path)?,
            None => PitchConfig::default(),
        };

        if let Some(db) = self.db {
            config.store_path = db;
        }
        if let Some(dictionary) = self.dictionary {
            config.analyzer.dictionary = Some(dictionary);
        }
        if let Some(lexicon) = self.lexicon {
            config.analyzer.lexicon = Some(lexicon);
        }
        if let Some(layout) = self.layout {
            config.analyzer.layout = layout;
        }
        if self.no_reference {
            config.reference.enabled = false;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.reference.timeout_ms = timeout_ms;
        }

        let options = Options {
            inputs: self.text,
            batch: self.batch,
            word: self.word,
            json: self.json,
        };
        Ok((config, options))
    }
}

struct Options {
    inputs: Vec<String>,
    batch: Option<PathBuf>,
    word: bool,
    json: bool,
}

fn print_entry(word: &str, entry: &PitchEntry, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(entry)?);
        return Ok(());
    }
    let levels = pitchsmith::get_pattern(entry.mora_count, entry.drop_position);
    let flags = pitchsmith::get_accent_flags(entry.mora_count, entry.drop_position);
    println!(
        "{word}\t{}\t{} (drop {})\t{}\t{}{}",
        entry.reading,
        entry.pitch_type,
        entry.drop_position,
        pitchsmith::render_levels(&levels),
        pitchsmith::render_flags(&flags),
        if entry.provisional { "\t(provisional)" } else { "" }
    );
    Ok(())
}

fn print_contour(contour: &SentenceContour, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(contour)?);
        return Ok(());
    }
    println!("{}", contour.text);
    println!("  {}", contour.reading);
    println!("  {}", contour.render_levels());
    println!("  {}", contour.render_flags());
    Ok(())
}

fn main() -> Result<()> {
    // WHY: logs go to stderr as JSON so stdout stays pipeable
    tracing_subscriber::fmt()
        .with_target(false)
        .json()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    let (config, options) = args.into_config()?;

    let mut inputs = options.inputs;
    if let Some(batch) = &options.batch {
        if !batch.is_file() {
            anyhow::bail!("Batch file does not exist: {}", batch.display());
        }
        let content = fs::read_to_string(batch)
            .with_context(|| format!("Failed to read batch file: {}", batch.display()))?;
        inputs.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from),
        );
    }
    if inputs.is_empty() {
        anyhow::bail!("Nothing to process: pass text arguments or --batch <FILE>");
    }

    let analyzer = config.build_analyzer()?;
    let mut db = config.open_database(analyzer)?;
    info!("Pitch store has {} entries", db.len());

    if options.word {
        for word in &inputs {
            let entry = db
                .lookup_or_fetch(word)
                .with_context(|| format!("Failed to resolve word: {word}"))?;
            print_entry(word, &entry, options.json)?;
        }
    } else {
        let mut processor = SentencePitchProcessor::new(&mut db, config.phrase.clone());
        for sentence in &inputs {
            let contour = processor.process_sentence(sentence);
            print_contour(&contour, options.json)?;
        }
    }

    info!("Processed {} inputs, {} store writes", inputs.len(), db.writes());
    Ok(())
}
