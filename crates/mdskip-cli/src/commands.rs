//! CLI command implementations.

use colored::Colorize;
use mdskip_core::{
    create_backup, restart, rollback_commands, ExclusionStore, IgnoreSet, Launchctl, PlutilStore,
    RegisterOutcome, RegisterSummary, Registrar, Settings,
};
use mdskip_walker::{SelectOptions, Selector};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Everything a registration run needs besides the settings.
pub struct RunOptions {
    pub root: PathBuf,
    pub ignore: IgnoreSet,
    pub dry_run: bool,
    pub select: SelectOptions,
}

#[derive(Serialize)]
struct ExclusionReport<'a> {
    count: usize,
    exclusions: &'a [String],
}

/// Renders the current exclusions, sorted and deduplicated.
fn render_list(mut paths: Vec<String>, json: bool) -> Result<String> {
    paths.sort();
    paths.dedup();

    if json {
        let report = ExclusionReport {
            count: paths.len(),
            exclusions: &paths,
        };
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let mut out = String::from("Currently ignored directories:\n");
    if paths.is_empty() {
        out.push_str("  (None)\n");
    } else {
        for path in &paths {
            out.push_str(&format!("  {}\n", path));
        }
    }
    Ok(out)
}

/// Print the directories Spotlight currently ignores.
pub fn list(store: &impl ExclusionStore, json: bool) -> Result<()> {
    let rendered = render_list(store.read()?, json)?;
    if json {
        println!("{}", rendered);
    } else {
        print!("{}", rendered);
    }
    Ok(())
}

/// Registers every selected path, printing each one as it goes.
///
/// Returns as soon as the store can't be read. Failed appends are
/// counted and skipped.
pub fn register_all<S, I>(paths: I, registrar: &mut Registrar<S>) -> Result<RegisterSummary>
where
    S: ExclusionStore,
    I: IntoIterator<Item = PathBuf>,
{
    let mut summary = RegisterSummary::default();

    for path in paths {
        let outcome = registrar.register(&path)?;
        let shown = path.display().to_string();
        match &outcome {
            RegisterOutcome::Added | RegisterOutcome::WouldAdd => {
                println!("{} {}", "+".green(), shown)
            }
            RegisterOutcome::AlreadyExcluded => {
                println!("{} {}", "=".dimmed(), shown.dimmed())
            }
            RegisterOutcome::Failed(_) => {
                eprintln!("{} {}", "⚠".yellow(), shown.red());
                eprintln!("  Continuing with remaining paths...");
            }
        }
        summary.record(&outcome);
    }

    Ok(summary)
}

fn print_backup_notice(backup: &Path, settings: &Settings) {
    eprintln!("{} Created backup of Spotlight configuration", "✓".green());
    eprintln!("If this goes wrong or you want to revert, run:");
    eprintln!("***");
    for cmd in rollback_commands(backup, settings) {
        eprintln!("    {}", cmd.cyan());
    }
    eprintln!("***");
}

/// Find artifact directories under the root and exclude them from Spotlight.
pub fn run(options: &RunOptions, settings: &Settings) -> Result<()> {
    println!(
        "Ignoring directories: {}",
        options.ignore.iter().collect::<Vec<_>>().join(", ")
    );
    if options.dry_run {
        println!("{}", "(Dry run: No changes will be made)".yellow());
    }
    println!();

    // Resolve the root before touching anything.
    let selector = Selector::new(&options.root, &options.ignore, options.select)?;
    debug!("Searching under {}", selector.root().display());

    if !options.dry_run {
        let backup = create_backup(settings)?;
        print_backup_notice(&backup, settings);
    }

    println!("The following paths will be ignored by Spotlight:");
    let mut registrar = Registrar::new(PlutilStore::new(settings), options.dry_run);
    let summary = register_all(selector, &mut registrar)?;

    if summary.failed > 0 {
        eprintln!(
            "\n{} {} path(s) could not be added",
            "⚠ Warning:".yellow(),
            summary.failed
        );
    }

    if summary.added == 0 {
        println!("No new paths found to ignore");
        return Ok(());
    }

    let verb = if options.dry_run { "Would add" } else { "Added" };
    println!(
        "\n{} {} {} path(s) to Spotlight exclusions",
        "✓".green(),
        verb,
        summary.added.to_string().cyan()
    );

    if options.dry_run {
        return Ok(());
    }

    println!("Restarting Spotlight indexing service...");
    let report = restart(&Launchctl::new(settings));
    for e in report.stop.iter().chain(report.start.iter()) {
        eprintln!("{} {}", "⚠ Warning:".yellow(), e);
        if let Some(hint) = e.hint() {
            eprintln!("  {}", hint);
        }
    }
    if report.is_clean() {
        println!("{} Spotlight service restarted successfully", "✓".green());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdskip_core::MemoryStore;
    use std::fs;
    use tempfile::tempdir;

    fn tree() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        for sub in [
            "web/node_modules/pkg/node_modules",
            "crate/target/debug",
            "crate/src",
        ] {
            fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        dir
    }

    fn selector<'a>(root: &Path, ignore: &'a IgnoreSet) -> Selector<'a> {
        Selector::new(root, ignore, SelectOptions::default()).unwrap()
    }

    #[test]
    fn test_render_empty_list_shows_placeholder() {
        let out = render_list(Vec::new(), false).unwrap();
        assert_eq!(out, "Currently ignored directories:\n  (None)\n");
    }

    #[test]
    fn test_render_list_sorts_and_dedups() {
        let out = render_list(
            vec!["/b/target".into(), "/a/dist".into(), "/b/target".into()],
            false,
        )
        .unwrap();
        assert_eq!(
            out,
            "Currently ignored directories:\n  /a/dist\n  /b/target\n"
        );
    }

    #[test]
    fn test_render_list_json() {
        let out = render_list(vec!["/b".into(), "/a".into()], true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["count"], 2);
        assert_eq!(value["exclusions"], serde_json::json!(["/a", "/b"]));
    }

    #[test]
    fn test_list_reads_store() {
        assert!(list(&MemoryStore::default(), false).is_ok());
    }

    #[test]
    fn test_register_all_then_again_adds_nothing() {
        let dir = tree();
        let ignore = IgnoreSet::build(true, Vec::<String>::new()).unwrap();
        let mut registrar = Registrar::new(MemoryStore::default(), false);

        let first = register_all(selector(dir.path(), &ignore), &mut registrar).unwrap();
        assert_eq!(first.added, 2);

        let second = register_all(selector(dir.path(), &ignore), &mut registrar).unwrap();
        assert_eq!(second.added, 0);
        assert_eq!(second.already_excluded, 2);
        assert_eq!(registrar.store().entries().len(), 2);
    }

    #[test]
    fn test_register_all_dry_run_changes_nothing() {
        let dir = tree();
        let ignore = IgnoreSet::build(true, Vec::<String>::new()).unwrap();
        let before = MemoryStore::new(vec!["/elsewhere/target".to_string()]);
        let mut registrar = Registrar::new(before.clone(), true);

        let summary = register_all(selector(dir.path(), &ignore), &mut registrar).unwrap();
        assert_eq!(summary.added, 2);
        assert_eq!(registrar.into_store(), before);
    }

    #[test]
    fn test_registered_paths_are_absolute_matches() {
        let dir = tree();
        let root = dir.path().canonicalize().unwrap();
        let ignore = IgnoreSet::build(false, ["node_modules"]).unwrap();
        let mut registrar = Registrar::new(MemoryStore::default(), false);

        register_all(selector(dir.path(), &ignore), &mut registrar).unwrap();
        assert_eq!(
            registrar.store().entries(),
            [root.join("web").join("node_modules").display().to_string()]
        );
    }

    #[test]
    fn test_run_rejects_missing_root() {
        let dir = tempdir().unwrap();
        let options = RunOptions {
            root: dir.path().join("missing"),
            ignore: IgnoreSet::build(true, Vec::<String>::new()).unwrap(),
            dry_run: true,
            select: SelectOptions::default(),
        };
        assert!(run(&options, &Settings::default()).is_err());
    }
}
