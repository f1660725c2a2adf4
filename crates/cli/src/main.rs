use anyhow::{Context, Result};
use clap::Parser;
use ebook_renamer_core::{process_file, FileReport, RenameOptions, RenameOutcome};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "ebook-renamer-cli", version)]
#[command(about = "Rename EPUB and PDF files from their embedded metadata")]
struct Cli {
    /// List file metadata, without renaming
    #[arg(short, long)]
    list: bool,
    /// List metadata in JSONL format, requires --list
    #[arg(short, long)]
    json: bool,
    /// Transliterate file names to ASCII
    #[arg(short, long)]
    ascii: bool,
    /// Format string for the output file name, a trailing .epub or .pdf is ignored
    /// [default: "{{.Title}} - {{.Creator}}" for EPUB, "{{.Title}} - {{.Author}}" for PDF]
    #[arg(short, long, value_name = "TEMPLATE")]
    format: Option<String>,
    /// Dry run, only print renames
    #[arg(short = 'n', long)]
    dry: bool,
    /// Drop characters other than letters, digits, '-', '.' and space
    #[arg(short, long)]
    safe: bool,
    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,
}

impl Cli {
    fn options(&self) -> RenameOptions {
        RenameOptions {
            list: self.list,
            json: self.json,
            ascii: self.ascii,
            safe: self.safe,
            dry_run: self.dry,
            format: self.format.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli)
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "ebook_renamer_cli=debug,ebook_renamer_core=debug"
    } else {
        "ebook_renamer_cli=info,ebook_renamer_core=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .with_target(false)
                .without_time(),
        )
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.options();
    options.validate()?;
    let templates = options.templates().context("parsing format string")?;
    debug!(?options, files = cli.files.len(), "starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for file in &cli.files {
        let report = process_file(file, &templates, &options, &mut out)
            .with_context(|| format!("processing file '{}'", file.display()))?;
        if let FileReport::Renamed(RenameOutcome::Preview { from, to }) = report {
            eprintln!("would rename '{}' → '{}'", from.display(), to.display());
        }
    }
    out.flush()?;

    Ok(())
}
