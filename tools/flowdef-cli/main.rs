use clap::Parser;
use flowdef::prelude::*;
use std::fs;
use std::process;

/// A workflow definition inspection and editing CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workflow definition JSON file
    definition_path: String,

    /// Re-emit the parsed definition as pretty-printed JSON
    #[arg(short, long)]
    emit: bool,

    /// Name of a node to clone and paste
    #[arg(long, value_name = "NODE")]
    clone: Option<String>,

    /// Predecessor of the paste edge; omit to paste before a level head
    #[arg(long, value_name = "NODE", requires = "clone")]
    after: Option<String>,

    /// Successor of the paste edge
    #[arg(long, value_name = "NODE", requires = "clone")]
    before: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    // --- 1. Load and parse ---
    let json = fs::read_to_string(&cli.definition_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read definition file '{}': {}",
            cli.definition_path, e
        ))
    });
    let workflow = Workflow::from_definition(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse definition: {}", e)));

    // --- 2. Validate ---
    if let Err(errors) = resolver::validate(&workflow) {
        eprintln!("Definition has {} structural error(s):", errors.len());
        for error in &errors {
            eprintln!("  - {}", error);
        }
        process::exit(1);
    }
    if let Some(trigger) = &workflow.trigger {
        println!("Trigger: {} ({})", trigger.name, trigger.kind.type_name());
    }
    println!(
        "Actions: {} across all scope levels, definition is structurally valid.",
        workflow.iter().count()
    );

    // --- 3. Optional clone/paste ---
    let workflow = match (&cli.clone, &cli.before) {
        (Some(source), Some(successor)) => {
            let edge = match &cli.after {
                Some(predecessor) => SpliceEdge::Between {
                    predecessor: predecessor.clone(),
                    successor: successor.clone(),
                },
                None => SpliceEdge::Head {
                    successor: successor.clone(),
                },
            };
            let edited = clone_paste(&workflow, source, &edge)
                .unwrap_or_else(|e| exit_with_error(&format!("Clone/paste failed: {}", e)));
            println!("Cloned '{}' onto the requested edge.", source);
            edited
        }
        (Some(_), None) => {
            exit_with_error("--clone requires --before to describe the paste edge.")
        }
        _ => workflow,
    };

    // --- 4. Optional emit ---
    if cli.emit {
        println!("{}", definition::to_string_pretty(&workflow));
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    process::exit(1);
}
