use clap::{Parser, ValueEnum};
use flowspec::prelude::*;
use std::fs;
use std::time::Instant;

/// Output formats the exporter can emit.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

/// Compile a visual data-pipeline workflow into an AsyncAPI 3.0.0 document
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workflow JSON file exported by the designer
    workflow_path: String,

    /// API title for the info block
    #[arg(long)]
    title: Option<String>,

    /// API version for the info block
    #[arg(long = "api-version")]
    api_version: Option<String>,

    /// API description for the info block
    #[arg(long)]
    description: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    format: OutputFormat,

    /// Write the document to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Print compilation statistics to stderr
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let workflow = WorkflowDocument::from_file(&cli.workflow_path)?;
    let graph = workflow.into_pipeline()?;

    let metadata = Metadata {
        title: cli.title,
        version: cli.api_version,
        description: cli.description,
    };

    let started = Instant::now();
    let document = Compiler::builder(graph)
        .with_metadata(metadata)
        .build()
        .compile();
    let elapsed = started.elapsed();

    if cli.stats {
        eprintln!(
            "compiled {} servers, {} channels, {} operations, {} messages, {} schemas in {:?}",
            document.servers.len(),
            document.channels.len(),
            document.operations.len(),
            document.components.messages.len(),
            document.components.schemas.len(),
            elapsed
        );
    }

    let text = match cli.format {
        OutputFormat::Yaml => render(&document),
        OutputFormat::Json => to_json(&document)?,
    };

    match cli.output {
        Some(path) => fs::write(&path, text)?,
        None => println!("{}", text),
    }

    Ok(())
}
