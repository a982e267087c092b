//! promptree: structure, edit and review heading-based prompts from the command line.
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use promptree::identity::UuidIds;
use promptree::persist::FileStore;
use promptree::{config, outline, section, Color, DocumentStore};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "promptree")]
#[command(about = "Heading-structured prompt outlines with undo and analysis", long_about = None)]
struct Args {
    /// Directory holding the persisted state (overrides promptree.toml)
    #[arg(long, global = true, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read text from a file (or `-` for stdin) and merge it into the outline
    Import {
        /// Source file
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
    /// Merge the stored raw text into the outline again
    Reparse,
    /// Print the outline tree
    Outline,
    /// Print the outline assembled back into text
    Preview,
    /// Score the outline against the selected profile
    Analyze {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List `{^...^}` placeholders
    Vars,
    /// Append a new top-level section
    Add {
        /// Section title
        title: Option<String>,
    },
    /// Change a section title
    Rename {
        /// Section id, or a unique prefix of it
        id: String,
        /// New title
        title: String,
    },
    /// Replace a section body
    Edit {
        /// Section id, or a unique prefix of it
        id: String,
        /// New body text
        content: String,
    },
    /// Fold a section in the outline view
    Fold {
        /// Section id, or a unique prefix of it
        id: String,
    },
    /// Unfold a section in the outline view
    Unfold {
        /// Section id, or a unique prefix of it
        id: String,
    },
    /// Recolour a section
    Color {
        /// Section id, or a unique prefix of it
        id: String,
        /// One of red, orange, green, blue, purple
        color: Color,
    },
    /// Restore the previous snapshot
    Undo,
    /// Re-apply the next snapshot
    Redo,
    /// Show profiles, or select one by name
    Profile {
        /// Profile to select
        name: Option<String>,
    },
}

fn main() -> promptree::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let cfg = config::Config::load();

    // Override config with command line args
    let state_dir = args
        .state_dir
        .unwrap_or_else(|| PathBuf::from(&cfg.state_dir));

    let mut doc = DocumentStore::open(FileStore::new(state_dir), UuidIds, cfg.open_options());
    run(&mut doc, args.command)
}

fn run(doc: &mut DocumentStore<FileStore>, command: Command) -> promptree::Result<()> {
    match command {
        Command::Import { path } => {
            let text = if path.as_os_str() == "-" {
                io::read_to_string(io::stdin())?
            } else {
                std::fs::read_to_string(&path)?
            };
            doc.set_raw_input(text);
            doc.parse_input();
            print!("{}", outline::render(doc.sections()));
        }
        Command::Reparse => {
            doc.parse_input();
            print!("{}", outline::render(doc.sections()));
        }
        Command::Outline => print!("{}", outline::render(doc.sections())),
        Command::Preview => println!("{}", doc.preview()),
        Command::Analyze { json } => {
            let report = doc.analysis();
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let stats = report.stats;
                println!("profile:  {}", doc.profile().name);
                println!("score:    {}/100", report.score);
                println!(
                    "sections: {} (depth {}), ~{} tokens",
                    stats.module_count, stats.depth, stats.token_count
                );
                for suggestion in &report.suggestions {
                    let tag = match suggestion.kind {
                        promptree::analyzer::SuggestionKind::Warning => "warning",
                        promptree::analyzer::SuggestionKind::Tip => "tip",
                    };
                    println!("[{tag}] {}", suggestion.text);
                }
            }
        }
        Command::Vars => {
            for variable in doc.analysis().variables {
                println!("{variable}");
            }
        }
        Command::Add { title } => println!("{}", doc.add_section(title.as_deref())),
        Command::Rename { id, title } => doc.rename_section(&resolve_id(doc, &id), title)?,
        Command::Edit { id, content } => doc.set_content(&resolve_id(doc, &id), content)?,
        Command::Fold { id } => doc.set_collapsed(&resolve_id(doc, &id), true)?,
        Command::Unfold { id } => doc.set_collapsed(&resolve_id(doc, &id), false)?,
        Command::Color { id, color } => doc.set_color(&resolve_id(doc, &id), color)?,
        Command::Undo => {
            if !doc.undo() {
                eprintln!("Nothing to undo");
            }
        }
        Command::Redo => {
            if !doc.redo() {
                eprintln!("Nothing to redo");
            }
        }
        Command::Profile { name: Some(name) } => doc.select_profile(&name)?,
        Command::Profile { name: None } => {
            let selected = doc.profile().name.clone();
            for profile in doc.profiles().iter() {
                let marker = if profile.name == selected { '*' } else { ' ' };
                println!(
                    "{marker} {} (attention {}, max {})",
                    profile.name, profile.attention_limit, profile.hard_maximum
                );
            }
        }
    }
    Ok(())
}

/// Expands an id prefix as printed by `outline` when it names exactly one section.
fn resolve_id(doc: &DocumentStore<FileStore>, given: &str) -> String {
    if doc.find(given).is_some() {
        return given.to_string();
    }
    let mut candidates = Vec::new();
    section::walk(doc.sections(), &mut |s| {
        if s.id.starts_with(given) {
            candidates.push(s.id.clone());
        }
    });
    match candidates.as_slice() {
        [only] => only.clone(),
        _ => given.to_string(),
    }
}
