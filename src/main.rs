use flowspec::prelude::*;
use std::env;
use std::fs;

fn main() {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: cargo run -- <path/to/workflow.json> [path/to/output.yaml]");
        std::process::exit(1);
    }

    let workflow_path = &args[1];
    let output_path = args.get(2);

    println!("Loading workflow from: {}", workflow_path);
    let workflow = match WorkflowDocument::from_file(workflow_path) {
        Ok(workflow) => workflow,
        Err(e) => {
            eprintln!("Failed to load workflow '{}': {}", workflow_path, e);
            std::process::exit(1);
        }
    };

    let graph = match workflow.into_pipeline() {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("Failed to convert workflow: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "Loaded pipeline with {} nodes and {} edges.",
        graph.nodes.len(),
        graph.edges.len()
    );

    // Compilation phase
    println!("\nCompiling pipeline to AsyncAPI 3.0.0...");
    let document = Compiler::builder(graph).build().compile();
    println!(
        "Compilation successful! {} servers, {} channels, {} operations.",
        document.servers.len(),
        document.channels.len(),
        document.operations.len()
    );

    let text = render(&document);

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &text) {
                eprintln!("Failed to write output file '{}': {}", path, e);
                std::process::exit(1);
            }
            println!("  -> Wrote specification to '{}'", path);
        }
        None => {
            println!("\n{}", text);
        }
    }
}
