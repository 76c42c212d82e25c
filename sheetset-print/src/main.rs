//! sheetset-print - classify and print sheet music part sets
//!
//! Walks a folder-per-song library, assigns each PDF to an instrument
//! part by filename, and prints the number of copies the active roster
//! asks for. Without a print flag the tool shows what it would do.

use anyhow::Result;
use clap::Parser;
use sheetset_common::config::{self, LoggingConfig};
use sheetset_common::{Catalog, Error};
use sheetset_print::{GhostscriptDispatcher, Library, PrintReport, Session};
use std::path::PathBuf;
use tracing::{info, warn};

/// Command-line arguments for sheetset-print
#[derive(Parser, Debug)]
#[command(name = "sheetset-print")]
#[command(about = "Tool for printing full or partial sets of sheet music")]
#[command(version)]
struct Args {
    /// The directory containing the sheet music library
    #[arg(long, env = "SHEETSET_LIBRARY")]
    directory: Option<PathBuf>,

    /// Print debug info
    #[arg(short, long)]
    debug: bool,

    /// Roster table to plan copy counts from
    #[arg(long)]
    roster: Option<String>,

    /// List available roster tables and exit
    #[arg(long)]
    list_rosters: bool,

    /// Song folder to work on; omit to list the library's songs
    song: Option<String>,

    /// Print the full set for the selected song
    #[arg(long)]
    print_all: bool,

    /// Print one copy of each file matched to one instrument
    #[arg(long, value_name = "INSTRUMENT")]
    print_part: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::load_config()?;

    init_tracing(args.debug, &config.logging)?;

    info!(
        "Starting sheetset-print v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    if args.list_rosters {
        for name in config::available_rosters(&config) {
            println!("{}", name);
        }
        return Ok(());
    }

    let catalog = Catalog::builtin();
    let roster = config::resolve_roster(args.roster.as_deref(), &config)?;
    for name in roster.unknown_names(&catalog) {
        warn!("Roster '{}' names unknown instrument '{}'", roster.name, name);
    }

    let root = config::resolve_library_root(args.directory.as_deref(), &config);
    info!("Library path: {}", root.display());

    // A missing library is reported, not fatal: it behaves as an empty
    // song list.
    let library = match Library::open(&root) {
        Ok(library) => library,
        Err(Error::LibraryNotFound(path)) => {
            warn!("Library not found: {}", path.display());
            println!("No songs (library folder missing: {})", path.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let Some(song) = args.song else {
        return list_songs(&library);
    };

    let mut session = Session::new(library, catalog, roster, config.printer.copy_mode);
    session.select_song(&song)?;

    if let Some(instrument) = &args.print_part {
        let dispatcher = GhostscriptDispatcher::new(config.printer.clone());
        let report = session.print_part(instrument, &dispatcher)?;
        println!(
            "{}: sent {} copies of {}",
            song, report.copies_sent, instrument
        );
        report_failures(&report.failures);
    } else if args.print_all {
        let dispatcher = GhostscriptDispatcher::new(config.printer.clone());
        let report = session.print_all(&dispatcher)?;
        show_print_report(&report);
    } else {
        show_overview(&session)?;
    }

    Ok(())
}

/// Log filter priority: --debug flag, then RUST_LOG, then the config
/// file's logging level.
fn init_tracing(debug: bool, logging: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
    };

    match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}

fn list_songs(library: &Library) -> Result<()> {
    let songs = library.songs()?;
    if songs.is_empty() {
        println!("No songs in {}", library.root().display());
        return Ok(());
    }
    for song in &songs {
        println!("{}", song.name);
    }
    info!("{} songs in library", songs.len());
    Ok(())
}

/// Dry view: classification, the plan the roster implies, and the alerts
fn show_overview(session: &Session) -> Result<()> {
    let Some((song, classification)) = session.current() else {
        return Ok(());
    };

    println!("{} (roster: {})", song.name, session.roster().name);
    println!("{:<20} {:>5} {:>7}", "Instrument", "Files", "Copies");

    let outcome = session.plan_current()?;
    for group in classification.matched() {
        let copies: u32 = outcome
            .plans
            .iter()
            .filter(|p| p.identity == group.identity)
            .map(|p| p.copies)
            .sum();
        println!(
            "{:<20} {:>5} {:>7}",
            group.identity,
            group.files.len(),
            copies
        );
    }

    for alert in &outcome.missing {
        println!("{:<20} IKKE FUNNET", alert.identity);
    }
    for file in classification.unclassified() {
        println!("Unclassified: {}", file.name);
    }
    println!("Total copies planned: {}", outcome.total_copies());
    Ok(())
}

fn show_print_report(report: &PrintReport) {
    println!(
        "{}: sent {} copies across {} files",
        report.song,
        report.dispatch.copies_sent,
        report.outcome.plans.len()
    );
    for alert in &report.outcome.missing {
        println!("IKKE FUNNET: {}", alert.identity);
    }
    for file in &report.unclassified {
        println!("Unclassified: {}", file.name);
    }
    report_failures(&report.dispatch.failures);
}

fn report_failures(failures: &[(PathBuf, String)]) {
    for (file, reason) in failures {
        println!("FAILED: {} ({})", file.display(), reason);
    }
}
