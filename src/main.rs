//! Prof Alloc - Entry Point
//!
//! Loads the game tables and a character, opens a proficiency session of the
//! requested kind, and drives it from stdin so allocations can be tried out
//! without the game's UI.

use clap::Parser;
use prof_alloc::character::{load_character, StatAccessor};
use prof_alloc::core::config::{set_config, EngineConfig};
use prof_alloc::core::error::{ProfError, Result};
use prof_alloc::core::types::SessionType;
use prof_alloc::profs::{AllocationEngine, SessionRequest};
use prof_alloc::tables::load_tables;
use prof_alloc::ui::TerminalWindow;

use std::io::{self, Write};
use std::path::PathBuf;

/// Interactive proficiency allocation
#[derive(Parser, Debug)]
#[command(name = "prof-alloc")]
#[command(about = "Allocate weapon proficiency points for a character")]
struct Args {
    /// Game tables (proficiencies, classes, kits)
    #[arg(long, default_value = "data/tables.toml")]
    tables: PathBuf,

    /// Character file
    #[arg(long)]
    character: PathBuf,

    /// Session type: chargen, levelup or dual
    #[arg(long, default_value = "levelup")]
    session: SessionType,

    /// Levels per class slot before the session, comma separated
    #[arg(long, value_delimiter = ',', default_value = "0,0,0")]
    prior: Vec<u32>,

    /// Levels per class slot after the session, comma separated
    #[arg(long, value_delimiter = ',', default_value = "1,1,1")]
    new: Vec<u32>,

    /// Class being switched to (dual-class sessions), by id or name
    #[arg(long)]
    class: Option<String>,

    /// Hide the scrollbar on the chargen screen
    #[arg(long)]
    no_scroll: bool,

    /// Override the proficiency table row offset
    #[arg(long)]
    offset: Option<usize>,

    /// Engine config overrides (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the commit report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    if let Some(path) = &args.config {
        let config = EngineConfig::from_toml_str(&std::fs::read_to_string(path)?)?;
        if set_config(config).is_err() {
            tracing::warn!("Engine config already set, ignoring {}", path.display());
        }
    }

    let tables = load_tables(&args.tables)?;
    let mut character = load_character(&args.character)?;
    tracing::info!(
        "Loaded {} ({} proficiency rows)",
        character.name,
        tables.proficiencies.row_count()
    );

    let mut request = SessionRequest::new(args.session)
        .with_levels(args.prior.clone(), args.new.clone())
        .with_scroll(!args.no_scroll);
    if let Some(class) = &args.class {
        let row = tables
            .classes
            .find(class)
            .ok_or_else(|| ProfError::UnknownClassName(class.clone()))?;
        request = request.with_override_class(row.id);
    }
    if let Some(offset) = args.offset {
        request = request.with_table_offset(offset);
    }

    let mut engine = AllocationEngine::default();
    engine.open(
        &request,
        &character,
        &tables,
        TerminalWindow::from_table(&tables.proficiencies),
        || tracing::debug!("Allocation changed"),
    )?;

    println!("\n=== PROFICIENCIES: {} ({}) ===", character.name, args.session.name());
    println!("Commands:");
    println!("  + <slot>        - Add a point to a visible row");
    println!("  - <slot>        - Remove a point from a visible row");
    println!("  ? <slot>        - Show a row's description");
    println!("  scroll <n>      - Scroll so row n is at the top");
    println!("  commit          - Save the allocation and exit");
    println!("  abandon / q     - Exit without saving");
    println!();

    loop {
        if let Some(session) = engine.session() {
            print!("{}", session.window().render());
        }

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "abandon" || input == "quit" || input == "q" {
            engine.abandon();
            println!("Abandoned without saving.");
            break;
        }

        if input == "commit" {
            let report = engine.commit(&mut character)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            for (stat, _) in &report.written {
                println!("  stat {:>3} = {:#04x}", stat.0, character.get_stat(*stat));
            }
            tracing::info!(
                "Committed {} proficiencies ({} empty rows skipped)",
                report.written.len(),
                report.skipped
            );
            break;
        }

        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let Some(arg) = parts.next().and_then(|n| n.parse::<usize>().ok()) else {
            println!("Usage: {} <number>", command);
            continue;
        };

        match command {
            "+" => {
                let outcome = engine.on_increment(arg)?;
                if !outcome.is_changed() {
                    println!("No change ({:?})", outcome);
                }
            }
            "-" => {
                let outcome = engine.on_decrement(arg)?;
                if !outcome.is_changed() {
                    println!("No change ({:?})", outcome);
                }
            }
            "?" => engine.on_inspect(arg)?,
            "scroll" => engine.on_scroll(arg)?,
            _ => println!("Unknown command: {}", command),
        }
    }

    Ok(())
}
