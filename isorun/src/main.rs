//! Isolated test-session bootstrap CLI.
//!
//! Creates a throwaway home directory (with `.config` and `.cache`), points
//! the module search path at the repository root, delegates to the external
//! test runner, and relays its exit status. The home survives failed runs
//! for post-mortem inspection and is deleted after successful ones.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};

use isorun::exit_codes;
use isorun::io::config::{BootstrapConfig, CONFIG_FILE_NAME, load_config, write_config};
use isorun::io::root::resolve_root;
use isorun::logging;
use isorun::session::{SessionReport, SessionRequest, run_session};

#[derive(Parser)]
#[command(name = "isorun", version, about = "Isolated test-session bootstrap")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the delegated test runner inside a fresh temporary home.
    Run(RunArgs),
    /// Write a default isorun.toml in the current directory.
    Init {
        /// Overwrite an existing config file.
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Repository root (default: search upward for isorun.toml or the runner).
    #[arg(long)]
    root: Option<PathBuf>,

    /// Runner path relative to the root (default from isorun.toml).
    #[arg(long)]
    runner: Option<PathBuf>,

    /// Interpreter invoked with the runner (default from isorun.toml).
    #[arg(long)]
    interpreter: Option<String>,

    /// Wall-clock budget for the delegated run, in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Preserve the temporary home even when the run succeeds.
    #[arg(long)]
    keep_home: bool,

    /// Print a machine-readable outcome line after the run.
    #[arg(long)]
    json: bool,

    /// Arguments forwarded verbatim to the delegated runner.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<OsString>,
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::FAILED);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => cmd_run(args),
        Command::Init { force } => cmd_init(force).map(|()| exit_codes::OK),
    }
}

fn cmd_run(args: RunArgs) -> Result<i32> {
    // The config file lives at the root, and the upward root search uses the
    // runner path as a marker. Search with the flag value (or the built-in
    // default), then let the file refine whatever flags left unset.
    let search_runner = args
        .runner
        .clone()
        .unwrap_or_else(|| PathBuf::from(BootstrapConfig::default().runner));
    let root = resolve_root(args.root.as_deref(), &search_runner)?;
    let config = load_config(&root.join(CONFIG_FILE_NAME))?;

    let request = SessionRequest {
        runner: args
            .runner
            .unwrap_or_else(|| PathBuf::from(config.runner.clone())),
        interpreter: args.interpreter.unwrap_or_else(|| config.interpreter.clone()),
        timeout: args
            .timeout_secs
            .or(config.timeout_secs)
            .map(Duration::from_secs),
        keep_home: args.keep_home || config.keep_home,
        args: args.args,
        root,
    };

    let outcome = run_session(&request)?;
    if args.json {
        let report = SessionReport::from(&outcome);
        println!(
            "{}",
            serde_json::to_string(&report).context("serialize session report")?
        );
    }
    Ok(outcome.exit_code())
}

fn cmd_init(force: bool) -> Result<()> {
    let cwd = env::current_dir().context("resolve current directory")?;
    let path = cwd.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    write_config(&path, &BootstrapConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init() {
        let cli = Cli::parse_from(["isorun", "init"]);
        assert!(matches!(cli.command, Command::Init { force: false }));
    }

    #[test]
    fn parse_init_force() {
        let cli = Cli::parse_from(["isorun", "init", "--force"]);
        assert!(matches!(cli.command, Command::Init { force: true }));
    }

    #[test]
    fn parse_run_forwards_trailing_args() {
        let cli = Cli::parse_from(["isorun", "run", "--keep-home", "one", "--two", "three"]);
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert!(args.keep_home);
        assert_eq!(
            args.args,
            vec![
                OsString::from("one"),
                OsString::from("--two"),
                OsString::from("three")
            ]
        );
    }

    #[test]
    fn parse_run_options() {
        let cli = Cli::parse_from([
            "isorun",
            "run",
            "--root",
            "/repo",
            "--runner",
            "tests/run_all.sh",
            "--interpreter",
            "/bin/sh",
            "--timeout-secs",
            "60",
        ]);
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.root, Some(PathBuf::from("/repo")));
        assert_eq!(args.runner, Some(PathBuf::from("tests/run_all.sh")));
        assert_eq!(args.interpreter.as_deref(), Some("/bin/sh"));
        assert_eq!(args.timeout_secs, Some(60));
        assert!(args.args.is_empty());
    }
}
