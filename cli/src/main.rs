//! docspan CLI - document outline inference tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docspan::{
    build_outline, load_pages, DocumentText, MatchOutcome, OutlineOptions, TargetMatch,
    TargetSchema,
};

#[derive(Parser)]
#[command(name = "docspan")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Infer document outlines and locate target sections", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer and print a document's outline
    Outline {
        /// Input pages file (JSON array of pages)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Root label (file stem if not specified)
        #[arg(short, long)]
        title: Option<String>,

        /// Include the first page in candidate scanning
        #[arg(long)]
        keep_cover: bool,

        /// String marking a page's first block as a running header (repeatable)
        #[arg(long, value_name = "TEXT")]
        header_feature: Vec<String>,
    },

    /// Resolve a target schema against one or more documents
    Resolve {
        /// Input pages files (JSON arrays of pages)
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Target schema file (JSON array of nodes)
        #[arg(short, long, value_name = "FILE")]
        schema: PathBuf,

        /// Output JSON instead of a report
        #[arg(long)]
        json: bool,

        /// Include the first page in candidate scanning
        #[arg(long)]
        keep_cover: bool,

        /// String marking a page's first block as a running header (repeatable)
        #[arg(long, value_name = "TEXT")]
        header_feature: Vec<String>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Outline {
            input,
            output,
            title,
            keep_cover,
            header_feature,
        } => cmd_outline(
            &input,
            output.as_deref(),
            title.as_deref(),
            build_options(keep_cover, header_feature),
        ),
        Commands::Resolve {
            inputs,
            schema,
            json,
            keep_cover,
            header_feature,
        } => cmd_resolve(
            &inputs,
            &schema,
            json,
            build_options(keep_cover, header_feature),
        ),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_options(keep_cover: bool, header_features: Vec<String>) -> OutlineOptions {
    let mut options = OutlineOptions::new().with_skip_cover(!keep_cover);
    for feature in header_features {
        options = options.with_header_feature(feature);
    }
    options
}

fn document_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn load_document(path: &Path, title: Option<&str>) -> Result<DocumentText, docspan::Error> {
    let pages = load_pages(path)?;
    let label = title
        .map(str::to_string)
        .unwrap_or_else(|| document_label(path));
    Ok(DocumentText::new(label, pages))
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    title: Option<&str>,
    options: OutlineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = load_document(input, title)?;
    let tree = build_outline(&document, &options)?;
    let dump = tree.dump();

    if let Some(path) = output {
        fs::write(path, &dump)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", dump);
    }

    Ok(())
}

fn cmd_resolve(
    inputs: &[PathBuf],
    schema_path: &Path,
    json: bool,
    options: OutlineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = TargetSchema::load(schema_path)?;

    let pb = if inputs.len() > 1 && !json {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    // One document's failure must not abort the rest of the batch.
    let mut reports = Vec::new();
    let mut failures = 0usize;
    for input in inputs {
        if let Some(pb) = &pb {
            pb.set_message(document_label(input));
        }
        let result = load_document(input, None)
            .and_then(|document| docspan::process_document(&document, &schema, &options));
        if result.is_err() {
            failures += 1;
        }
        reports.push((input.as_path(), result));
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&json_report(&reports))?);
    } else {
        for (input, result) in &reports {
            print_report(input, result);
        }
    }

    if failures > 0 {
        return Err(format!("{failures} of {} documents failed", inputs.len()).into());
    }
    Ok(())
}

fn print_report(input: &Path, result: &Result<Vec<TargetMatch>, docspan::Error>) {
    println!("{}", document_label(input).cyan().bold());
    match result {
        Ok(matches) => {
            for m in matches {
                let path = m.path.join(" / ");
                match &m.outcome {
                    MatchOutcome::Found(range) => {
                        println!("  {} {}  {}", "✓".green(), path, format!("{range}").dimmed());
                    }
                    MatchOutcome::NotFound => {
                        println!("  {} {}", "✗".yellow(), path);
                    }
                }
            }
        }
        Err(e) => println!("  {} {}", "error:".red(), e),
    }
}

fn json_report(
    reports: &[(&Path, Result<Vec<TargetMatch>, docspan::Error>)],
) -> serde_json::Value {
    let documents: Vec<serde_json::Value> = reports
        .iter()
        .map(|(input, result)| match result {
            Ok(matches) => serde_json::json!({
                "document": document_label(input),
                "targets": matches.iter().map(json_match).collect::<Vec<_>>(),
            }),
            Err(e) => serde_json::json!({
                "document": document_label(input),
                "error": e.to_string(),
            }),
        })
        .collect();
    serde_json::Value::Array(documents)
}

fn json_match(m: &TargetMatch) -> serde_json::Value {
    match &m.outcome {
        MatchOutcome::Found(range) => serde_json::json!({
            "path": m.path,
            "found": true,
            "start": {"page": range.start.page, "y": range.start.y},
            // An open-ended range runs to the end of the document.
            "end": if range.is_open_ended() {
                serde_json::Value::Null
            } else {
                serde_json::json!({"page": range.end.page, "y": range.end.y})
            },
        }),
        MatchOutcome::NotFound => serde_json::json!({
            "path": m.path,
            "found": false,
        }),
    }
}

fn cmd_version() {
    println!("{} {}", "docspan".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document outline inference tool");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/docspan".dimmed()
    );
    println!("License: MIT");
}
