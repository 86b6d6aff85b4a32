//! Debug Menu Editor CLI.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use dme_cli::commands::{self, ShowFormat};
use dme_cli::logging::{LogConfig, LogFormat, init_logging};
use dme_cli::settings::Settings;
use dme_cli::shell::{Console, Shell, ShellCommand};
use dme_session::FilterOptions;
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{
    Cli, Command, LogFormatArg, LogLevelArg, NewArgs, SearchArgs, ShellArgs, ShowArgs,
    ShowFormatArg,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let settings_path = cli.settings.clone().unwrap_or_else(Settings::config_path);
    let result = match cli.command {
        Command::Show(args) => run_show(&args),
        Command::Search(args) => run_search(&args, &settings_path),
        Command::New(args) => run_new(&args),
        Command::Shell(args) => run_shell(args, settings_path),
    };
    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "command failed");
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run_show(args: &ShowArgs) -> Result<i32> {
    let format = match args.format {
        ShowFormatArg::Table => ShowFormat::Table,
        ShowFormatArg::Json => ShowFormat::Json,
    };
    println!("{}", commands::show(&args.file, format)?);
    Ok(0)
}

/// Exits with 1 when nothing matches.
fn run_search(args: &SearchArgs, settings_path: &Path) -> Result<i32> {
    let settings = Settings::load_from(settings_path);
    let options = FilterOptions {
        case_sensitive: args.case_sensitive || settings.session.filter.case_sensitive,
    };
    let (hits, rendered) = commands::search(&args.file, &args.text, options)?;
    println!("{rendered}");
    Ok(if hits == 0 { 1 } else { 0 })
}

fn run_new(args: &NewArgs) -> Result<i32> {
    let document = commands::create(&args.file, &args.categories)?;
    println!(
        "Created {} with {} categories.",
        args.file.display(),
        document.category_count()
    );
    Ok(0)
}

fn run_shell(args: ShellArgs, settings_path: PathBuf) -> Result<i32> {
    let settings = Settings::load_from(&settings_path);
    let mut shell = Shell::new(Console::stdio(), settings).with_settings_path(settings_path);
    if let Some(file) = args.file
        && let Err(error) = shell.execute(ShellCommand::Open(Some(file)))
    {
        eprintln!("error: {error:#}");
    }
    shell.run()?;
    Ok(0)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    if let Some(level) = cli.log_level {
        config.level = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
