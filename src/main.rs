mod cli;
mod commands;
mod config;
mod paths;
mod progress;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::Cli;
use config::{CONFIG_FILE, PipacConfig};
use pacmankit::{Client, OrphanPolicy};
use std::io;
use std::process::ExitCode;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
    pub noconfirm: bool,
    pub dry_run: bool,
    pub json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    if let Some(shell) = cli.completions {
        generate(shell, &mut Cli::command(), "pipac", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    if !cli.has_action() {
        if let Err(e) = Cli::command().print_help() {
            ui::error(&e.to_string());
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            ui::error(&format!("{e:#}"));
            if let Some(hint) = error_hint(&e) {
                ui::dim(&hint);
            }
            ExitCode::FAILURE
        }
    }
}

/// Category description and advice for errors raised by pacmankit
fn error_hint(e: &anyhow::Error) -> Option<String> {
    let category = e.downcast_ref::<pacmankit::Error>()?.category();
    Some(format!("{}. {}", category.description(), category.advice()))
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
        noconfirm: cli.noconfirm,
        dry_run: cli.dry_run,
        json: cli.json,
    };
    log::trace!("Verbosity level {}", ctx.verbose);

    let config_dir = paths::ensure_config_dir()?;
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join(CONFIG_FILE));
    let config = PipacConfig::load(&config_path)?;

    let client = Client::new(config.package_manager)?;
    log::info!("Using package manager: {}", client.backend_name());

    let mut code = ExitCode::SUCCESS;

    let intents = cli.intents();
    if intents.any() {
        let hostname = paths::hostname();
        let lists = paths::resolve_lists(
            &cli.lists,
            &config_dir,
            hostname.as_deref(),
            config.default_lists,
            &config.lists,
        );
        code = commands::reconcile::run(&ctx, &client, &lists, intents)?;

        if intents.report {
            return Ok(code);
        }
    }

    if cli.orphans {
        let policy = OrphanPolicy::new(config.max_orphan_passes);
        commands::orphans::run(&ctx, &client, policy)?;
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context as _;

    #[test]
    fn test_error_hint_for_library_errors() {
        let err = anyhow::Error::from(pacmankit::Error::NoPackageManagerFound);
        let hint = error_hint(&err).unwrap();
        assert!(hint.starts_with("No supported package manager. "));
        assert!(hint.contains("yay or paru"));
    }

    #[test]
    fn test_error_hint_survives_context() {
        let err = Err::<(), _>(pacmankit::Error::ListNotFound("/x.txt".into()))
            .context("reading lists")
            .unwrap_err();
        assert!(error_hint(&err).unwrap().starts_with("Package list not found."));
    }

    #[test]
    fn test_no_hint_for_other_errors() {
        assert!(error_hint(&anyhow::anyhow!("bad config")).is_none());
    }
}
