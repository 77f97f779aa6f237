use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use log::warn;
use pigeon::core::config::{self, CliOverrides, PigeonConfig};
use pigeon::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "pigeon", about = "Mock messaging in the terminal")]
struct Args {
    /// Number of synthetic users to generate
    #[arg(short, long)]
    users: Option<usize>,

    /// Seed for a reproducible user directory
    #[arg(short, long)]
    seed: Option<u64>,

    /// Snapshot file to restore from and save to
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Save the session to the snapshot file on quit
    #[arg(long, overrides_with = "no_autosave")]
    autosave: bool,

    /// Don't save the session on quit
    #[arg(long, overrides_with = "autosave")]
    no_autosave: bool,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Initialize file logger - writes to pigeon.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("pigeon.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Pigeon starting up");

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("{}; falling back to defaults", e);
        PigeonConfig::default()
    });
    let cli = CliOverrides {
        user_count: args.users,
        seed: args.seed,
        snapshot: args.snapshot,
        autosave: match (args.autosave, args.no_autosave) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        },
    };
    let resolved = config::resolve(&file_config, &cli);
    log::debug!("Resolved config: {:?}", resolved);

    tui::run(resolved)
}
