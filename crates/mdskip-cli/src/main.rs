//! mdskip CLI - keep Spotlight out of build and dependency directories
//!
//! Finds directories like `node_modules` and `target` under a path and
//! adds them to the Spotlight exclusion list, then restarts the
//! metadata server so the change takes effect.

use clap::{ArgAction, Parser};
use colored::Colorize;
use mdskip_core::config::SPOTLIGHT_PLIST_PATH;
use mdskip_core::{IgnoreSet, PlutilStore, Settings};
use mdskip_walker::SelectOptions;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "mdskip")]
#[command(author = "mdskip Contributors")]
#[command(version, disable_version_flag = true)]
#[command(
    about = "Tell Spotlight to ignore build and dependency directories under PATH",
    long_about = None,
    after_help = "Requires sudo. See https://alexwlchan.net/2021/08/ignore-lots-of-folders-in-spotlight/"
)]
struct Cli {
    /// Root path to search for directories to ignore
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Additional directory names to ignore (e.g. --also-ignore .vscode .idea)
    #[arg(short = 'a', long, num_args = 1.., value_name = "DIR")]
    also_ignore: Vec<String>,

    /// Skip the built-in default ignore directories
    #[arg(long)]
    skip_defaults: bool,

    /// Show what would be ignored without making changes
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// List directories currently ignored by Spotlight
    #[arg(long)]
    list: bool,

    /// With --list, print JSON instead of text
    #[arg(long, requires = "list")]
    json: bool,

    /// Follow symbolic links while searching
    #[arg(long)]
    follow_symlinks: bool,

    /// Spotlight configuration plist to modify
    #[arg(long, value_name = "PATH", default_value = SPOTLIGHT_PLIST_PATH)]
    plist: PathBuf,

    /// Where to write the configuration backup (defaults to ~/Desktop)
    #[arg(long, value_name = "DIR")]
    backup_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long)]
    verbose: bool,

    /// Print version
    #[allow(dead_code)]
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,
}

fn dispatch(cli: Cli) -> commands::Result<()> {
    // Checked after parsing so --help works without sudo.
    mdskip_core::require_root()?;

    let settings = Settings {
        plist_path: cli.plist,
        backup_dir: cli.backup_dir,
        ..Settings::default()
    };

    if cli.list {
        return commands::list(&PlutilStore::new(&settings), cli.json);
    }

    let ignore = IgnoreSet::build(!cli.skip_defaults, cli.also_ignore)?;
    let options = commands::RunOptions {
        root: cli.path,
        ignore,
        dry_run: cli.dry_run,
        select: SelectOptions {
            follow_symlinks: cli.follow_symlinks,
        },
    };

    commands::run(&options, &settings)
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    if let Err(e) = dispatch(cli) {
        eprintln!("{} {}", "error:".red().bold(), e);
        if let Some(hint) = e
            .downcast_ref::<mdskip_core::Error>()
            .and_then(mdskip_core::Error::hint)
        {
            eprintln!("  {}", hint);
        }
        std::process::exit(1);
    }
}
