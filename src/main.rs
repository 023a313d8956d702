use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use modelica_transformer::config::{apply_transforms, load_from_path, TransformOutcome};
use modelica_transformer::modelica::ModelicaParser;
use modelica_transformer::select::{describe_matches, MatchSummary, PathSelector, Selector};
use modelica_transformer::tree::SourceParser;
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "modelica-transformer")]
#[command(about = "Declarative source-to-source transformations for Modelica models", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a transform file to a model or a directory of models
    Apply {
        /// TOML file describing the transforms
        #[arg(short, long)]
        config: PathBuf,

        /// A .mo file, or a directory searched recursively
        target: PathBuf,

        /// Replace changed files on disk
        #[arg(short, long)]
        write: bool,

        /// Show unified diff of changes
        #[arg(short, long)]
        diff: bool,
    },

    /// Show what a selector path matches in a model
    Select {
        /// Model file to parse
        file: PathBuf,

        /// Selector path, e.g. declaration[IDENT=EM].expression
        path: String,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Apply {
            config,
            target,
            write,
            diff,
        } => cmd_apply(&config, &target, write, diff),

        Commands::Select { file, path, json } => cmd_select(&file, &path, json),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Helper: Show unified diff between original and modified content
fn display_diff(file: &Path, original: &str, modified: &str) {
    println!(
        "\n{}",
        format!("--- {} (original)", file.display()).dimmed()
    );
    println!(
        "{}",
        format!("+++ {} (transformed)", file.display()).dimmed()
    );

    let diff = TextDiff::from_lines(original, modified);
    for hunk in diff.unified_diff().context_radius(3).iter_hunks() {
        println!("{}", hunk.header().to_string().cyan());
        for change in hunk.iter_changes() {
            let line = match change.tag() {
                ChangeTag::Delete => format!("-{}", change).red(),
                ChangeTag::Insert => format!("+{}", change).green(),
                ChangeTag::Equal => format!(" {}", change).normal(),
            };
            print!("{}", line);
            if change.missing_newline() {
                println!();
            }
        }
    }
}

fn cmd_apply(config_path: &Path, target: &Path, write: bool, show_diff: bool) -> Result<()> {
    let config = load_from_path(config_path)?;
    let outcomes = apply_transforms(&config, target, write)?;

    // A single file without --write or --diff behaves like a filter.
    if target.is_file() && !write && !show_diff {
        return match outcomes.into_iter().next() {
            Some(TransformOutcome::Changed { output, .. }) => {
                print!("{output}");
                Ok(())
            }
            Some(TransformOutcome::Unchanged { file }) => {
                let text = fs::read_to_string(&file)
                    .with_context(|| format!("failed to read {}", file.display()))?;
                print!("{text}");
                Ok(())
            }
            Some(TransformOutcome::Failed { file, reason }) => {
                anyhow::bail!("{}: {}", file.display(), reason)
            }
            None => Ok(()),
        };
    }

    let mut changed = 0;
    let mut unchanged = 0;
    let mut failed = 0;

    for outcome in &outcomes {
        match outcome {
            TransformOutcome::Changed {
                file,
                original,
                output,
            } => {
                let verb = if write { "Transformed" } else { "Would transform" };
                println!("{} {} {}", "✓".green(), verb, file.display());
                if show_diff {
                    display_diff(file, original, output);
                }
                changed += 1;
            }
            TransformOutcome::Unchanged { file } => {
                println!("{} Unchanged {}", "⊙".yellow(), file.display());
                unchanged += 1;
            }
            TransformOutcome::Failed { file, reason } => {
                eprintln!("{} {}: Failed - {}", "✗".red(), file.display(), reason);
                failed += 1;
            }
        }
    }

    println!();
    println!("{}", "Summary:".bold());
    println!("  {} changed", format!("{}", changed).green());
    println!("  {} unchanged", format!("{}", unchanged).yellow());
    println!("  {} failed", format!("{}", failed).red());

    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_select(file: &Path, path: &str, json: bool) -> Result<()> {
    let source =
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
    let selector = PathSelector::parse(path)?;
    let tree = ModelicaParser::new()
        .parse(&source)
        .with_context(|| format!("failed to parse {}", file.display()))?;
    let nodes = selector.select(tree.root())?;

    if json {
        let summaries: Vec<MatchSummary> = nodes.iter().map(|n| MatchSummary::from_node(*n)).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print!("{}", describe_matches(&selector.describe(), &nodes));
    }

    Ok(())
}
