use clap::Parser;
use rensa::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Inspect a chain JSON document: print its EL expression, outline, cell
/// summary and, when a registry is given, the reconciliation report.
#[derive(Parser)]
#[command(name = "rensa-cli", version, about)]
struct Cli {
    /// Path to the chain JSON document.
    chain: PathBuf,

    /// Print the indented multi-line EL form instead of the compact one.
    #[arg(long)]
    pretty: bool,

    /// Print the projected cell and edge counts.
    #[arg(long)]
    cells: bool,

    /// Path to a node-type registry JSON file to reconcile against.
    #[arg(long)]
    registry: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(clean) => {
            if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(&cli.chain)?;
    let mut tree = ElTree::from_json(&text)?;

    if cli.pretty {
        println!("{}", tree.to_el_pretty());
    } else {
        println!("{}", tree.to_el());
    }

    println!();
    print_outline(&tree, tree.root(), 0);

    if cli.cells {
        let graph = tree.to_cells();
        println!();
        println!(
            "{} cells ({} start markers, {} end markers), {} edges",
            graph.cells.len(),
            graph.start_marker_count(),
            graph.end_marker_count(),
            graph.edges.len()
        );
    }

    let mut clean = true;
    if let Some(registry_path) = &cli.registry {
        let registry = NodeTypeRegistry::from_json(&fs::read_to_string(registry_path)?)?;
        let issues = tree.reconcile(&registry);
        println!();
        if issues.is_empty() {
            println!("Reconciliation passed; save may proceed.");
        } else {
            clean = false;
            println!("Reconciliation found {} issue(s):", issues.len());
            for issue in &issues {
                println!("  - {issue}");
            }
        }
    }

    Ok(clean)
}

fn print_outline(tree: &ElTree, node: NodeId, depth: usize) {
    let data = tree.node(node);
    let indent = "  ".repeat(depth);
    let name = match &data.id {
        Some(id) => format!("{id} : {}", data.kind),
        None => data.kind.to_string(),
    };
    if data.kind.is_leaf() {
        println!("{indent}{name} [{}]", tree.infer_contract(node));
    } else {
        println!("{indent}{name}");
    }
    if let Some(condition) = data.condition() {
        print_outline(tree, condition, depth + 1);
    }
    for &child in data.children() {
        print_outline(tree, child, depth + 1);
    }
}
