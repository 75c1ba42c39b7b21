//! Command-line interface for the extractor.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{ExtractorError, Result};
use crate::extractor::from_bytes;
use crate::types::ExtractedDocument;

/// Formex Extractor - Extract publication records from Formex XML files.
#[derive(Parser)]
#[command(name = "formex-extractor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract publication records from XML files and write them as JSON.
    Extract {
        /// Formex XML files to process
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output directory for JSON records (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            files,
            output,
            pretty,
        } => extract_command(&files, output.as_deref(), pretty),
    }
}

/// Execute the extract command.
///
/// Processes every input file even when earlier ones fail; the per-file
/// outcome is printed as it happens and the command errors at the end if
/// any file failed.
fn extract_command(files: &[PathBuf], output: Option<&Path>, pretty: bool) -> Result<()> {
    let output_dir = output.unwrap_or(Path::new("."));

    // Validate output directory before processing anything
    if !output_dir.exists() {
        return Err(ExtractorError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Output directory does not exist: {}", output_dir.display()),
        )));
    }
    if !output_dir.is_dir() {
        return Err(ExtractorError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Output path is not a directory: {}", output_dir.display()),
        )));
    }

    // Progress bar only for batches; a single file just prints its summary
    let pb = if files.len() > 1 {
        let pb = ProgressBar::new(files.len() as u64);
        #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.green} {pos}/{len} {msg}")
                .expect("valid template"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut failed = 0usize;
    for file in files {
        pb.set_message(file.display().to_string());

        match extract_file(file, output_dir, pretty) {
            Ok((document, output_path)) => report_success(file, &document, &output_path),
            Err(e) => {
                failed += 1;
                println!("{} {}: {e}", style("Failed").red().bold(), file.display());
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    println!();

    if failed > 0 {
        return Err(ExtractorError::Batch {
            failed,
            total: files.len(),
        });
    }

    println!(
        "{} {} file(s) extracted",
        style("Done:").green().bold(),
        files.len()
    );

    Ok(())
}

/// Extract one file and write its JSON record.
fn extract_file(
    file: &Path,
    output_dir: &Path,
    pretty: bool,
) -> Result<(ExtractedDocument, PathBuf)> {
    let bytes = fs::read(file)?;
    let document = from_bytes(&bytes)?;

    let json = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };

    let output_path = output_dir.join(document.output_file_name());
    fs::write(&output_path, json)?;

    Ok((document, output_path))
}

/// Print the per-document summary.
fn report_success(file: &Path, document: &ExtractedDocument, output_path: &Path) {
    println!(
        "{} {} {}",
        style("Extracted").green().bold(),
        style(&document.celex).cyan(),
        style(format!("({})", file.display())).dim()
    );
    println!("  Date: {}", document.document_ref_date);
    println!("  Title: {}", style(title_preview(&document.content_title)).green());
    println!("  Saved to: {}", output_path.display());
}

/// First line of the title, wrapped for terminal display.
fn title_preview(title: &str) -> String {
    let lines = textwrap::wrap(title, 72);
    match lines.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [first, ..] => format!("{first}..."),
    }
}
