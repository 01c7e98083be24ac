//! CLI driver standing in for the external upload/extraction
//! collaborators: reads plain-text documents and runs the engine.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rfplens_analysis::{
    render_report_block, title_from_filename, AnalysisTelemetry, CompareConfig, ComparisonEngine,
    Document, ScoreStrategy, SectionSegmenter,
};

#[derive(Parser, Debug)]
#[command(name = "rfplens", version, about = "RFP/proposal coverage analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compares a requirement document against a proposal.
    Compare {
        /// Requirement (RFP) text file.
        rfp: PathBuf,
        /// Proposal text file.
        proposal: PathBuf,
        /// Optional JSON configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Scoring strategy override: "lexical" or "vector".
        #[arg(long)]
        strategy: Option<String>,
        /// Emit the full report as JSON instead of the line block.
        #[arg(long)]
        json: bool,
        /// Append structured audit records to this file.
        #[arg(long)]
        audit_log: Option<PathBuf>,
    },
    /// Lists the sections recognized in a requirement document.
    Sections {
        /// Requirement (RFP) text file.
        rfp: PathBuf,
        /// Minimum heading length in characters.
        #[arg(long, default_value_t = 5)]
        min_heading_chars: usize,
    },
    /// Finds the document paragraph best matching a free-form query.
    Locate {
        /// Query string, e.g. a proposal title.
        query: String,
        /// Candidate document text file.
        document: PathBuf,
        /// Optional JSON configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Compare {
            rfp,
            proposal,
            config,
            strategy,
            json,
            audit_log,
        } => run_compare(&rfp, &proposal, config, strategy, json, audit_log),
        Commands::Sections {
            rfp,
            min_heading_chars,
        } => run_sections(&rfp, min_heading_chars),
        Commands::Locate {
            query,
            document,
            config,
        } => run_locate(&query, &document, config),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<CompareConfig> {
    match path {
        Some(path) => CompareConfig::from_json_file(path),
        None => Ok(CompareConfig::default()),
    }
}

fn parse_strategy(raw: &str) -> Result<ScoreStrategy> {
    match raw {
        "lexical" | "lexical-overlap" => Ok(ScoreStrategy::LexicalOverlap),
        "vector" | "vector-similarity" => Ok(ScoreStrategy::VectorSimilarity),
        other => bail!("unknown strategy {other:?}; expected \"lexical\" or \"vector\""),
    }
}

fn load_document(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let filename = path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    );
    Ok(Document::new(title_from_filename(&filename), text))
}

fn run_compare(
    rfp: &Path,
    proposal: &Path,
    config: Option<PathBuf>,
    strategy: Option<String>,
    json: bool,
    audit_log: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config(config)?;
    if let Some(raw) = strategy {
        config.strategy = parse_strategy(&raw)?;
    }
    let mut engine = ComparisonEngine::new(config)?;
    if let Some(path) = audit_log {
        let telemetry = AnalysisTelemetry::builder("rfplens.cli")
            .audit_path(path)
            .build()?;
        engine = engine.with_telemetry(telemetry);
    }

    let rfp_document = load_document(rfp)?;
    let proposal_document = load_document(proposal)?;
    let report = engine.compare(&rfp_document.text, &proposal_document.text);

    if report.results.is_empty() {
        eprintln!("no sections recognized in {}", rfp_document.title);
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_report_block(&report));
    }
    Ok(())
}

fn run_sections(rfp: &Path, min_heading_chars: usize) -> Result<()> {
    let document = load_document(rfp)?;
    let segmented = SectionSegmenter::new(min_heading_chars).segment(&document.text);
    if segmented.is_empty() {
        eprintln!("no sections recognized in {}", document.title);
        return Ok(());
    }
    for section in segmented.sections() {
        println!(
            "{} ({} body chars)",
            section.label(),
            section.body.chars().count()
        );
    }
    Ok(())
}

fn run_locate(query: &str, document: &Path, config: Option<PathBuf>) -> Result<()> {
    let locator = load_config(config)?.locator();
    let document = load_document(document)?;
    match locator.find_in(query, &document) {
        Some(candidate) => {
            println!("similarity {:.3}", candidate.similarity);
            println!("{}", candidate.paragraph);
        }
        None => println!("no relevant paragraph found"),
    }
    Ok(())
}
