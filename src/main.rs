//! Rabital configuration inspector.
//!
//! Resolves the effective editor configuration for a workspace the same way
//! the editor does at startup, and prints it for inspection.

use anyhow::{Result, bail};
use clap::Parser;
use rabital_config::cli::{Cli, Command};
use rabital_config::config::watcher::{WatchPaths, WatcherConfig, start_config_watcher};
use rabital_config::config::{ConfigStore, ResolverPaths};
use std::fs::OpenOptions;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            let file = OpenOptions::new().create(true).append(true).open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    // CLI flags override environment discovery
    let discovered = ResolverPaths::discover();
    let paths = ResolverPaths::with_dirs(
        cli.app_dir.unwrap_or(discovered.app_dir),
        cli.workspace.or(discovered.workspace),
    );

    let store = ConfigStore::new(paths);

    match cli.command.unwrap_or(Command::Show { all: false }) {
        Command::Show { all } => show(&store, all)?,
        Command::Themes => {
            for theme in store.list_themes() {
                println!("{theme}");
            }
        }
        Command::Theme { name } => match store.load_theme(&name) {
            Some(content) => print!("{content}"),
            None => bail!("theme not found: {name}"),
        },
        Command::Paths => {
            let paths = store.paths();
            println!("shared: {}", paths.shared_dir().display());
            println!("themes: {}", paths.themes_dir().display());
            println!("config: {}", paths.config_dir().display());
            if let Some(project_dir) = paths.project_dir() {
                println!("project: {}", project_dir.display());
            }
        }
        Command::Watch => watch(&store).await?,
    }

    Ok(())
}

/// Print the resolved snapshot as YAML.
fn show(store: &ConfigStore, all: bool) -> Result<()> {
    let snapshot = store.current();

    for diagnostic in &snapshot.diagnostics {
        warn!("{diagnostic}");
    }

    print!("{}", serde_yaml::to_string(&snapshot.settings)?);

    if all {
        match &snapshot.tasks {
            Some(tasks) => print!("---\n{}", serde_yaml::to_string(tasks)?),
            None => println!("--- # no tasks configured"),
        }
        match &snapshot.debug {
            Some(debug) => print!("---\n{}", serde_yaml::to_string(debug)?),
            None => println!("--- # no debug configuration"),
        }
    }

    Ok(())
}

/// Re-resolve and report whenever a watched file changes.
async fn watch(store: &ConfigStore) -> Result<()> {
    let paths = store.paths();
    let watch_paths = WatchPaths {
        project_dir: paths.project_dir(),
        themes_dir: Some(paths.themes_dir()),
    };

    let mut handle = start_config_watcher(watch_paths, WatcherConfig::default())?;
    info!("watching for configuration changes, press Ctrl-C to stop");

    loop {
        tokio::select! {
            event = handle.wait_for_change() => {
                let Some(event) = event else { break };
                if event.requires_reload() {
                    let snapshot = store.reload();
                    info!(
                        "re-resolved: theme={} diagnostics={}",
                        snapshot.settings.editor.theme,
                        snapshot.diagnostics.len()
                    );
                } else {
                    warn!("watcher error event: {:?}", event);
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}
