//! Terminal front-end for the Chime alarm clock.
//!
//! # Responsibility
//! - Map subcommands onto the core scheduler and store.
//! - Wire clock, store, presenter and command queue together; nothing here
//!   holds alarm state of its own.

use chime_core::{
    AlarmTime, EventLoop, JsonFileStore, Meridiem, Persist, Scheduler, SystemClock,
};
use clap::{Args, Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::sync::mpsc;

mod input;
mod presenter;

use presenter::{short_id, TerminalPresenter};

#[derive(Parser)]
#[command(name = "chime")]
#[command(about = "Persistent alarm clock for the terminal", long_about = None)]
struct Cli {
    /// Directory holding the persisted alarm list.
    #[arg(long, global = true, default_value = "chime-data")]
    data_dir: PathBuf,
    /// Log directory; defaults to `<data-dir>/logs`.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// Log level (trace|debug|info|warn|error).
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule a new alarm from hour/minute/second/AM-PM selectors
    Add(AddArgs),
    /// Show the persisted alarms, newest first
    List,
    /// Delete one alarm by time or by list position
    Remove(RemoveArgs),
    /// Run the live clock until `q` or end of input
    Run,
    /// Show version information
    Version,
}

#[derive(Args)]
struct AddArgs {
    /// Hour selector, 1-12
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    hour: u32,
    /// Minute selector, 0-59
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=59))]
    minute: u32,
    /// Second selector, 0-59
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=59))]
    second: u32,
    /// AM or PM (case-insensitive)
    #[arg(long)]
    period: String,
}

#[derive(Args)]
struct RemoveArgs {
    /// Canonical alarm time, e.g. "7:05:00 AM"
    #[arg(long, conflicts_with = "index")]
    time: Option<String>,
    /// Position in the newest-first list, starting at 1
    #[arg(long)]
    index: Option<usize>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("chime: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let log_dir = cli
        .log_dir
        .clone()
        .unwrap_or_else(|| cli.data_dir.join("logs"));
    let level = cli
        .log_level
        .as_deref()
        .unwrap_or_else(|| chime_core::default_log_level());
    chime_core::init_logging(level, &log_dir.to_string_lossy())?;

    let store = JsonFileStore::new(&cli.data_dir);
    match cli.command {
        Commands::Add(args) => add(store, &args),
        Commands::List => list(store),
        Commands::Remove(args) => remove(store, &args),
        Commands::Run => run_clock(store),
        Commands::Version => {
            println!("chime {}", chime_core::core_version());
            Ok(())
        }
    }
}

fn add(store: JsonFileStore, args: &AddArgs) -> Result<(), Box<dyn Error>> {
    let meridiem = Meridiem::parse(&args.period)?;
    let time = AlarmTime::from_parts(args.hour, args.minute, args.second, meridiem)?;

    let mut scheduler = Scheduler::new(store);
    let id = scheduler.schedule(time.clone(), Persist::Save)?;
    println!("alarm set for {time}  (id {})", short_id(id));
    Ok(())
}

fn list(store: JsonFileStore) -> Result<(), Box<dyn Error>> {
    let mut scheduler = Scheduler::new(store);
    scheduler.restore();
    if scheduler.is_empty() {
        println!("no alarms set");
        return Ok(());
    }
    for (position, registration) in scheduler.alarms().iter().enumerate() {
        println!("{:>3}. {}", position + 1, registration.time);
    }
    Ok(())
}

fn remove(store: JsonFileStore, args: &RemoveArgs) -> Result<(), Box<dyn Error>> {
    let mut scheduler = Scheduler::new(store);
    scheduler.restore();

    match (&args.time, args.index) {
        (Some(time), None) => {
            let time = AlarmTime::parse(time)?;
            match scheduler.delete_by_time(&time)? {
                Some(_) => println!("deleted alarm {time}"),
                None => println!("no alarm at {time}"),
            }
        }
        (None, Some(index)) => {
            let Some(registration) = scheduler.alarms().get(index.wrapping_sub(1)) else {
                return Err(format!("no alarm at position {index}").into());
            };
            let (id, time) = (registration.id, registration.time.clone());
            scheduler.delete(id)?;
            println!("deleted alarm {time}");
        }
        _ => return Err("pass exactly one of --time or --index".into()),
    }
    Ok(())
}

fn run_clock(store: JsonFileStore) -> Result<(), Box<dyn Error>> {
    let (tx, rx) = mpsc::channel();
    input::spawn_stdin_reader(tx);

    let scheduler = Scheduler::new(store);
    let mut event_loop = EventLoop::new(scheduler, SystemClock, TerminalPresenter::new(), rx);

    let restored = event_loop.restore();
    if restored > 0 {
        println!("restored {restored} alarm(s)");
    }
    println!("commands: add H M S am|pm / del H:MM:SS AM / q to quit");

    event_loop.run();
    println!();
    Ok(())
}
