use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use libdiction_core::{HarvestBackend, StressDictionary};
use librussian::{EditSource, Engine, RussianConfig, StylePreset, TextWord, Transcript};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "librussian", about = "Russian to IPA transcription for singers")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Style preset (sung-russian, modern-standard, petersburg, choir)
    #[arg(long, global = true)]
    preset: Option<StylePreset>,

    /// Stress dictionary (.json or .fst)
    #[arg(long, global = true)]
    stress_dict: Option<PathBuf>,

    /// redb file holding harvested stresses
    #[arg(long, global = true)]
    harvest: Option<PathBuf>,

    /// Print JSON instead of plain IPA
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Text to transcribe; reads lines from stdin when omitted
    text: Vec<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Transcribe a single word
    Word {
        word: String,
        /// Stressed syllable (0-based)
        #[arg(long, conflicts_with = "unstressed")]
        stress: Option<usize>,
        /// Transcribe with no stressed syllable
        #[arg(long)]
        unstressed: bool,
        /// Syllables that keep full vowel quality
        #[arg(long)]
        lock: Vec<usize>,
    },
    /// Build an fst stress dictionary from a word -> index JSON file
    BuildDict {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "words.fst")]
        output: PathBuf,
    },
    /// Inspect or reset the harvest cache
    Harvest {
        #[command(subcommand)]
        action: HarvestAction,
    },
}

#[derive(Subcommand)]
enum HarvestAction {
    Stats,
    /// word -> stress JSON
    Export,
    /// JSON with timestamps and counts
    ExportFull,
    Clear,
}

fn load_config(cli: &Cli) -> Result<RussianConfig> {
    let mut config = match &cli.config {
        Some(path) => RussianConfig::load_toml(path)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("reading config {}", path.display()))?,
        None => RussianConfig::default(),
    };
    if let Some(preset) = cli.preset {
        config.preset = preset;
        config.style = None;
    }
    if let Some(path) = &cli.stress_dict {
        config.base.stress_dictionary_path = Some(path.clone());
    }
    if let Some(path) = &cli.harvest {
        config.base.harvest_backend = HarvestBackend::Redb;
        config.base.harvest_path = Some(path.clone());
    }
    Ok(config)
}

fn print_word(engine: &Engine, word: &TextWord, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(word)?);
        return Ok(());
    }
    let style = engine.style();
    let ipa = word
        .processed
        .syllables
        .iter()
        .map(|s| style.apply(&s.ipa))
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}  [{}] stress {:?} ({})", word.display, ipa, word.stress.index, word.stress.provenance);
    Ok(())
}

fn print_transcript(engine: &Engine, transcript: &Transcript, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(transcript)?);
        return Ok(());
    }
    println!("{}", transcript.render(&engine.style()));
    let pending = transcript.needs_attention();
    if !pending.is_empty() {
        let words: Vec<&str> = pending
            .iter()
            .filter_map(|&i| transcript.words.get(i).map(|w| w.display.as_str()))
            .collect();
        eprintln!("stress unknown: {}", words.join(", "));
    }
    Ok(())
}

fn repl(engine: &Engine, json: bool) -> Result<()> {
    eprintln!("Type Russian text and press Enter. Ctrl+D to exit.");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let transcript = engine.transcribe_text(&line);
        print_transcript(engine, &transcript, json)?;
        io::stdout().flush()?;
    }
    let (hits, misses, rate) = engine.cache_stats();
    tracing::debug!("cache: {} hits, {} misses ({:.1}%)", hits, misses, rate * 100.0);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Some(Command::BuildDict { input, output }) => {
            let dict = StressDictionary::load_json(input)
                .with_context(|| format!("reading {}", input.display()))?;
            dict.save_fst(output)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Wrote {} entries to {}", dict.len(), output.display());
        }
        Some(Command::Harvest { action }) => {
            let harvest = config.base.open_harvest();
            match action {
                HarvestAction::Stats => {
                    let stats = harvest.stats();
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&stats)?);
                    } else {
                        println!("{} harvested word(s)", stats.total);
                        if let Some(newest) = &stats.newest {
                            println!("newest: {}", newest);
                        }
                        if let Some(oldest) = &stats.oldest {
                            println!("oldest: {}", oldest);
                        }
                    }
                }
                HarvestAction::Export => println!("{}", harvest.export_json()?),
                HarvestAction::ExportFull => println!("{}", harvest.export_full_json()?),
                HarvestAction::Clear => {
                    let n = harvest.len();
                    harvest.clear();
                    println!("Cleared {} harvested word(s)", n);
                }
            }
        }
        Some(Command::Word {
            word,
            stress,
            unstressed,
            lock,
        }) => {
            let engine = Engine::new(config);
            let mut w = engine.transcribe_word(word);
            if *unstressed {
                engine.set_word_stress(&mut w, None, EditSource::User)?;
            } else if let Some(index) = stress {
                engine.set_word_stress(&mut w, Some(*index), EditSource::User)?;
            }
            for &syllable in lock {
                engine.lock_word_syllable(&mut w, syllable)?;
            }
            print_word(&engine, &w, cli.json)?;
        }
        None => {
            let engine = Engine::new(config);
            if cli.text.is_empty() {
                repl(&engine, cli.json)?;
            } else {
                let transcript = engine.transcribe_text(&cli.text.join(" "));
                print_transcript(&engine, &transcript, cli.json)?;
            }
        }
    }
    Ok(())
}
