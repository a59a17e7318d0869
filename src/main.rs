// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tilawa::app_config::{Config, LogLevel};
use tilawa::providers::alquran::AlQuranCloud;
use tilawa::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play the recitation interactively (default command)
    Play(PlayArgs),

    /// List all sections and exit
    Sections,

    /// Generate shell completions for tilawa
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct PlayArgs {
    /// Section to start with
    #[arg(short, long, default_value_t = 1)]
    section: u32,

    /// Item (1-based) to start with inside the section
    #[arg(short, long)]
    item: Option<usize>,

    /// Scroll instantly instead of smoothly
    #[arg(long)]
    reduced_motion: bool,
}

/// tilawa - a terminal player for recited scripture
///
/// Fetches the text with transliteration and translation from a public
/// content API and plays the recitation item by item.
#[derive(Parser, Debug)]
#[command(name = "tilawa")]
#[command(version)]
#[command(about = "Terminal player for recited scripture")]
#[command(long_about = "tilawa fetches three editions of the text (recitation, transliteration, translation),
merges them and plays the recitation item by item, advancing through sections automatically.

EXAMPLES:
    tilawa                            # Play from the first section
    tilawa play -s 36                 # Play from section 36
    tilawa play -s 2 -i 255           # Start at item 255 of section 2
    tilawa sections                   # List all sections
    tilawa --log-level debug          # Verbose logging
    tilawa completions bash > tilawa.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Content API base URL
    #[arg(long, env = "TILAWA_ENDPOINT", global = true)]
    endpoint: Option<String>,
}

/// Logger writing coloured, timestamped lines to stderr
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is set once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    let play_args = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "tilawa", &mut std::io::stdout());
            return Ok(());
        }
        Some(Commands::Play(args)) => Some(args),
        Some(Commands::Sections) => None,
        None => Some(PlayArgs { section: 1, ..Default::default() }),
    };

    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
    if let Some(endpoint) = &cli.endpoint {
        config.api.endpoint = endpoint.clone();
    }
    log::set_max_level(config.log_level.to_level_filter());

    if let Some(args) = &play_args {
        if args.reduced_motion {
            config.display.reduced_motion = true;
        }
    }

    config.validate().context("Configuration validation failed")?;

    let controller = load_content(config).await?;

    match play_args {
        None => {
            for line in controller.section_listing() {
                println!("{}", line);
            }
            Ok(())
        }
        Some(args) => {
            let item = match args.item {
                Some(0) => return Err(anyhow!("Items are numbered from 1")),
                Some(n) => Some(n - 1),
                None => None,
            };
            controller.play(args.section, item).await?;
            Ok(())
        }
    }
}

async fn load_content(config: Config) -> Result<Controller> {
    let provider = Arc::new(AlQuranCloud::new(
        config.api.endpoint.clone(),
        Duration::from_secs(config.api.timeout_secs),
    ));

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Loading content from {}", config.api.endpoint));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = Controller::load(config, provider).await;
    spinner.finish_and_clear();

    let controller = result?;
    info!("Content ready");
    Ok(controller)
}
