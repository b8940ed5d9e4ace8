use clap::{Parser, Subcommand};
use log::{warn, LevelFilter};
use slotcount::app::App;
use slotcount::config::TrackerConfig;
use slotcount::tracker::{collect_entries, DataEntry, PullTracker};
use slotcount::models::SlotId;
use slotcount::{error, Result, LOG_FILE};
use std::fs::OpenOptions;
use std::path::PathBuf;

/// Five-slot gacha pull tracker
#[derive(Parser, Debug)]
#[command(name = "slotcount", version, about)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// History file, overriding the configured one
    #[arg(long)]
    history: Option<PathBuf>,

    /// Log level for this crate (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the terminal UI (default)
    Tui,
    /// Print totals and the latest recorded streak counters
    Stats,
    /// Print recorded pulls, newest first
    History {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Record a pull from SLOT=COLOR[:COUNT] entries
    Data {
        #[arg(required = true)]
        entries: Vec<String>,
    },
    /// Erase all pulls and the history file
    Reset {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },
}

fn init_log(level: Option<LevelFilter>, to_file: bool) {
    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (LevelFilter::Warn, LevelFilter::Info)
    } else {
        (LevelFilter::Error, LevelFilter::Error)
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, global_level)
        .filter(Some("slotcount"), level.unwrap_or(my_code_level));

    if to_file {
        // The TUI owns the terminal, so logs go to a file or nowhere
        let file = TrackerConfig::data_dir().ok().and_then(|dir| {
            std::fs::create_dir_all(&dir).ok()?;
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(LOG_FILE))
                .ok()
        });
        match file {
            Some(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            None => return,
        }
    }

    builder.init();
}

fn load_config(cli: &Cli) -> TrackerConfig {
    let loaded = match &cli.config {
        Some(path) => TrackerConfig::load_from(path),
        None => TrackerConfig::load(),
    };
    let config = loaded.unwrap_or_else(|e| {
        warn!("Using default configuration: {}", e);
        TrackerConfig::default()
    });
    match &cli.history {
        Some(path) => config.with_history_path(path.clone()),
        None => config,
    }
}

fn print_stats(tracker: &PullTracker) {
    println!("History file: {}", tracker.history_path().display());
    println!("Total pulls:  {}", tracker.total_pulls());
    let latest = tracker.latest_recorded_counters();
    for slot in SlotId::ALL {
        match latest.get(&slot) {
            Some(count) => println!("{}: {}", slot, count),
            None => println!("{}: -", slot),
        }
    }
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or(Command::Tui);
    let level = cli.log_level.as_deref().and_then(|l| l.parse::<LevelFilter>().ok());
    init_log(level, matches!(command, Command::Tui));
    let config = load_config(&cli);

    match command {
        Command::Tui => {
            let mut app = App::new(config);
            app.init()?;
            app.run()?;
        }
        Command::Stats => print_stats(&PullTracker::new(&config)),
        Command::History { limit } => {
            let tracker = PullTracker::new(&config);
            let limit = limit.unwrap_or(config.history_display_limit);
            for record in tracker.pull_history().iter().take(limit) {
                println!("{}", record.summary());
            }
        }
        Command::Data { entries } => {
            let parsed = match entries
                .iter()
                .map(|raw| DataEntry::parse(raw))
                .collect::<Result<Vec<_>>>()
            {
                Ok(parsed) => parsed,
                Err(e) => {
                    eprintln!("{}", error::user_friendly_message(&e));
                    std::process::exit(1);
                }
            };
            let (colors, counts) = collect_entries(&parsed);
            let mut tracker = PullTracker::new(&config);
            let receipt = tracker.confirm_data_pull(&colors, &counts);
            if let Some(e) = receipt.save.error() {
                eprintln!(
                    "Pull #{} not saved: {}",
                    receipt.pull_number,
                    error::user_friendly_message(e)
                );
                std::process::exit(1);
            }
            println!("Recorded data pull #{}", receipt.pull_number);
        }
        Command::Reset { yes } => {
            if !yes {
                eprintln!("Refusing to erase all pulls without --yes");
                std::process::exit(1);
            }
            let mut tracker = PullTracker::new(&config);
            if let Some(e) = tracker.reset_all().error() {
                eprintln!("Reset done but history not saved: {}", error::user_friendly_message(e));
                std::process::exit(1);
            }
            println!("All pull data erased");
        }
    }

    Ok(())
}
