//! Main CLI application

use crate::config::{parse_config_auto, parse_config_file, validate_config, Config};
use crate::error::{ConfigError, MachconfError};
use crate::runner::{Context, Pipeline, RunReport, StepOutcome, Verbosity};
use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::Colorize;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// CLI application
pub struct App {
    /// Parsed configuration
    config: Config,
    /// Config file path
    config_path: PathBuf,
}

impl App {
    /// Create a new app from the discovered configuration file
    pub fn new() -> Result<Self, MachconfError> {
        let (config, config_path) = parse_config_auto()?;
        validate_config(&config)?;

        Ok(App {
            config,
            config_path,
        })
    }

    /// Create app with a specific config file
    pub fn with_config_file(path: PathBuf) -> Result<Self, MachconfError> {
        let config = parse_config_file(&path)?;
        validate_config(&config)?;

        Ok(App {
            config,
            config_path: path,
        })
    }

    /// Run the pipeline according to parsed command line flags
    pub fn run(self, matches: &ArgMatches) -> Result<(), MachconfError> {
        let verbosity = get_verbosity(matches);
        init_logging(verbosity);

        let mut ctx = Context::new()
            .with_config_path(self.config_path.clone())
            .with_vars(self.config.vars.clone())
            .with_verbosity(verbosity)
            .with_dry_run(matches.get_flag("dry-run"));

        if let Some(interpreter) = &self.config.interpreter {
            ctx = ctx.with_interpreter(interpreter.clone());
        }
        for (key, value) in parse_var_overrides(matches)? {
            ctx.set_var(key, value);
        }

        let pipeline = Pipeline::from_config(&self.config, &ctx.vars)?;

        if matches.get_flag("list") {
            print_steps(&pipeline, self.config.usage.as_deref());
            return Ok(());
        }

        let report = pipeline.run(&mut ctx)?;
        if verbosity >= Verbosity::Normal {
            print_summary(&report);
        }

        Ok(())
    }
}

/// Build the clap command
pub fn build_command() -> Command {
    Command::new("machconf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run declarative, conditionally gated configuration steps")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Path to machconf.yml config file"),
        )
        .arg(
            Arg::new("var")
                .long("var")
                .value_name("KEY=VALUE")
                .action(ArgAction::Append)
                .help("Set or override a pipeline variable"),
        )
        .arg(
            Arg::new("dry-run")
                .short('n')
                .long("dry-run")
                .help("Resolve steps and report what would run")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .help("List steps with their resolved state and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print command output and errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue),
        )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Install the log subscriber; `RUST_LOG` takes precedence over the flags
fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));

    // a subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Parse `--var KEY=VALUE` overrides
fn parse_var_overrides(matches: &ArgMatches) -> Result<BTreeMap<String, String>, ConfigError> {
    let mut vars = BTreeMap::new();
    for raw in matches.get_many::<String>("var").unwrap_or_default() {
        let (key, value) = raw
            .split_once('=')
            .filter(|(key, _)| !key.is_empty())
            .ok_or_else(|| ConfigError::Invalid(format!("--var expects KEY=VALUE, got '{}'", raw)))?;
        vars.insert(key.to_string(), value.to_string());
    }
    Ok(vars)
}

fn print_steps(pipeline: &Pipeline, usage: Option<&str>) {
    if let Some(name) = &pipeline.name {
        println!("{}", name.bold());
    }
    if let Some(usage) = usage {
        println!("{}", usage);
    }
    for (index, step) in pipeline.steps().enumerate() {
        let state = if step.enabled() {
            "enabled".green()
        } else {
            "disabled".yellow()
        };
        println!(
            "{:>3}. {} [{}] {} {}",
            index + 1,
            step.label(),
            step.command_name().cyan(),
            state,
            step.args().join(" ").dimmed()
        );
    }
}

fn print_summary(report: &RunReport) {
    for (label, outcome) in &report.outcomes {
        let marker = match outcome {
            StepOutcome::Executed => "ran".green(),
            StepOutcome::Skipped => "skipped".yellow(),
            StepOutcome::WouldExecute => "would run".cyan(),
        };
        eprintln!("  {} {}", marker, label);
    }
    eprintln!(
        "{} executed, {} skipped",
        report.count(StepOutcome::Executed),
        report.count(StepOutcome::Skipped)
    );
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<(), MachconfError> {
    run_from(std::env::args_os())
}

/// Run the CLI application with explicit arguments
pub fn run_from<I, T>(args: I) -> Result<(), MachconfError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command().get_matches_from(args);

    let app = match matches.get_one::<PathBuf>("file") {
        Some(path) => App::with_config_file(path.clone())?,
        None => App::new()?,
    };

    app.run(&matches)
}
