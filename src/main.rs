use anyhow::Result;
use clap::Parser;

use release_hooks::cli::orchestration::{run_pre_push_workflow, run_release_merge_workflow};
use release_hooks::cli::{Cli, Commands};
use release_hooks::conflict::ConflictScanner;
use release_hooks::config::{self, Config};
use release_hooks::git::Git2Repository;
use release_hooks::install::install;
use release_hooks::ui;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match config::load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let start_dir = match &cli.command {
        Commands::Install { dir: Some(dir), .. } => dir.clone(),
        _ => ".".to_string(),
    };

    let repo = match Git2Repository::open(&start_dir) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cli.command, &repo, &config) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn run(command: &Commands, repo: &Git2Repository, config: &Config) -> Result<()> {
    match command {
        Commands::CheckConflicts => check_conflicts(repo, config),
        Commands::PrePush { .. } => {
            let args = command.pre_push_args().unwrap_or_default();
            let result = run_pre_push_workflow(repo, config, &args)?;
            ui::display_pre_push(&result);
            Ok(())
        }
        Commands::Install { .. } => {
            let args = command.install_args().unwrap_or_default();
            let report = install(repo, config, &args)?;
            ui::display_install(&report);
            Ok(())
        }
        Commands::MergeRelease { .. } => {
            let args = command.release_merge_args().unwrap_or_default();
            let result = run_release_merge_workflow(repo, config, &args)?;
            ui::display_release_merge(&result);
            Ok(())
        }
    }
}

fn check_conflicts(repo: &Git2Repository, config: &Config) -> Result<()> {
    let scanner = ConflictScanner::new(&config.conflicts.pattern)?;
    let matches = scanner.scan(repo)?;

    if matches.is_empty() {
        ui::display_success("No conflict markers found");
        return Ok(());
    }

    ui::display_conflicts(&matches);
    std::process::exit(1);
}
