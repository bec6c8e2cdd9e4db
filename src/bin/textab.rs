//! Command-line front end for the extraction pipeline
//!
//! Run with: textab notes.txt report.docx --format xlsx

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use textab::config::AppConfig;
use textab::export;
use textab::ingestion::FileType;
use textab::providers::{GeminiClient, LlmProvider};
use textab::types::DocId;
use textab::{ExtractionPipeline, SourceFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Xlsx,
    Csv,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

/// Convert unstructured text documents into structured spreadsheets
#[derive(Debug, Parser)]
#[command(name = "textab", version, about)]
struct Cli {
    /// Input files (.txt, .docx, .pdf)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output path (defaults to Output_<timestamp>.<format>)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Xlsx)]
    format: OutputFormat,

    /// Key to prioritize during extraction (repeatable)
    #[arg(short = 'k', long = "key")]
    keys: Vec<String>,

    /// Gemini API key (falls back to GEMINI_API_KEY)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Target chunk size in characters
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Generation model name
    #[arg(long)]
    model: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Include the source_file column in CSV output
    #[arg(long)]
    with_source: bool,

    /// Skip the header row in spreadsheet output
    #[arg(long)]
    no_header: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "textab=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    // Credential check happens here, before any file is read
    let provider = Arc::new(GeminiClient::new(&config.llm)?);
    tracing::info!("Using {} model {}", provider.name(), provider.model());

    let files = read_files(&cli.files)?;
    let priority_keys = if cli.keys.is_empty() {
        None
    } else {
        Some(cli.keys.as_slice())
    };

    let pipeline = ExtractionPipeline::new(&config, provider);

    let bar = ProgressBar::new(files.len() as u64).with_style(
        ProgressStyle::with_template("{spinner} [{pos}/{len}] {msg}")
            .expect("valid progress template"),
    );

    let mut rows = Vec::new();
    for (idx, file) in files.iter().enumerate() {
        bar.set_message(file.name.clone());
        let document = pipeline.load(DocId::from_ordinal(idx + 1), file)?;
        rows.extend(pipeline.process(&document, priority_keys).await?);
        bar.inc(1);
    }
    bar.finish_and_clear();

    let out_path = cli.out.clone().unwrap_or_else(|| {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        PathBuf::from(format!("Output_{}.{}", timestamp, cli.format.extension()))
    });

    match cli.format {
        OutputFormat::Xlsx => {
            let buffer = export::generate_excel(&rows, &config.export)?;
            std::fs::write(&out_path, buffer)?;
        }
        OutputFormat::Csv => {
            let file = std::fs::File::create(&out_path)?;
            export::write_csv(&rows, cli.with_source, file)?;
        }
    }

    let sources: BTreeSet<&str> = rows.iter().map(|r| r.source_file.as_str()).collect();
    println!(
        "{} Extracted {} record(s) from {} file(s)",
        style("✓").green().bold(),
        style(rows.len()).bold(),
        style(sources.len()).bold(),
    );
    println!("  Output written to {}", style(out_path.display()).cyan());

    Ok(())
}

fn build_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_path(path)?,
        None => AppConfig::default(),
    };
    if let Some(key) = &cli.api_key {
        config.llm.api_key = Some(key.clone());
    }
    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }
    if let Some(size) = cli.chunk_size {
        config.chunking.chunk_size = size;
    }
    if cli.no_header {
        config.export.include_header = false;
    }
    Ok(config)
}

fn read_files(paths: &[PathBuf]) -> anyhow::Result<Vec<SourceFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        // Reject unsupported extensions before reading anything
        FileType::from_filename(&name)?;
        files.push(SourceFile::new(name, std::fs::read(path)?));
    }
    Ok(files)
}
