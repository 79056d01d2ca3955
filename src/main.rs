//! lintrelay CLI entry point.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use lintrelay::cli::{Cli, Commands, ConfigArgs, RunArgs};
use lintrelay::config::{self, Overrides};
use lintrelay::runner;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable carrying the CI-run link embedded in issue comments.
const ACTION_LINK_ENV: &str = "GH_ACTION_LINK";

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("lintrelay=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lintrelay=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("lintrelay starting with args: {:?}", cli);

    let cwd = std::env::current_dir().unwrap_or_default();

    match cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(args) => run(cli.config.as_deref(), &cwd, &args.overrides()),
        Commands::Config(args) => dump_config(cli.config.as_deref(), &cwd, &args),
        Commands::Completions(args) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "lintrelay",
                &mut std::io::stdout(),
            );
            ExitCode::SUCCESS
        }
    }
}

fn run(config_path: Option<&std::path::Path>, cwd: &std::path::Path, overrides: &Overrides) -> ExitCode {
    let cfg = match config::load(config_path, cwd, overrides) {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::error!("load config failed: {}", err);
            return ExitCode::from(1);
        }
    };
    // resolved once here; the reporter never reads the environment itself
    let action_link = std::env::var(ACTION_LINK_ENV).unwrap_or_default();
    runner::run_pipeline(&cfg, &action_link)
}

fn dump_config(
    config_path: Option<&std::path::Path>,
    cwd: &std::path::Path,
    args: &ConfigArgs,
) -> ExitCode {
    let overrides = Overrides {
        repo: args.repo.clone(),
        ..Default::default()
    };
    let cfg = match config::load(config_path, cwd, &overrides) {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::error!("load config failed: {}", err);
            return ExitCode::from(1);
        }
    };
    let rendered = if args.json {
        serde_json::to_string_pretty(&cfg).unwrap_or_default()
    } else {
        serde_yaml::to_string(&cfg).unwrap_or_default()
    };
    println!("{rendered}");
    ExitCode::SUCCESS
}
