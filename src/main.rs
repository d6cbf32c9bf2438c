use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{CommandFactory, Parser, error::ErrorKind};
use tracing::info;

use piprot::check::{OutputFormat, check_requirements, write_report};
use piprot::config::{DEFAULT_REQUIREMENTS_FILE, PiprotConfig};
use piprot::parser::RequirementsParser;
use piprot::version::registries::PypiRegistry;

#[derive(Parser)]
#[command(name = "piprot")]
#[command(
    version,
    about = "How rotten are your requirements?",
    after_help = "Here's hoping your requirements are nice and fresh!"
)]
struct Cli {
    /// Requirements file(s), defaults to ./requirements.txt if present
    files: Vec<PathBuf>,

    /// Delay before an outdated package triggers an error (in days)
    #[arg(short, long)]
    delay: Option<i64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Base URL of the package index
    #[arg(long)]
    index_url: Option<String>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write JSON logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match piprot::logging::init(cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::from(2);
        }
    };

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let config = PiprotConfig::load(cli.config.as_deref())?;
    let delay_days = cli.delay.unwrap_or(config.delay_days);
    let delay = chrono::Duration::try_days(delay_days)
        .with_context(|| format!("Delay of {delay_days} days is out of range"))?;
    let index_url = cli.index_url.unwrap_or(config.index_url);

    let files = if cli.files.is_empty() {
        default_files()
    } else {
        cli.files
    };

    let mut requirements = Vec::new();
    for file in &files {
        requirements.extend(RequirementsParser::new(file).parse()?);
    }
    info!(
        "Checking {} requirements from {} file(s)",
        requirements.len(),
        files.len()
    );

    let registry = PypiRegistry::with_timeout(
        index_url,
        Duration::from_millis(config.fetch_timeout_ms),
    );
    let today = chrono::Local::now().date_naive();

    let summary = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?
        .block_on(check_requirements(
            &registry,
            requirements,
            delay,
            today,
        ));

    write_report(&mut io::stdout().lock(), &summary, cli.format)?;

    Ok(summary.exit_code())
}

/// `requirements.txt` in the current directory, or a usage error
fn default_files() -> Vec<PathBuf> {
    let default = Path::new(DEFAULT_REQUIREMENTS_FILE);
    if default.is_file() {
        return vec![default.to_path_buf()];
    }

    Cli::command()
        .error(
            ErrorKind::MissingRequiredArgument,
            format!("no requirements file given and no ./{DEFAULT_REQUIREMENTS_FILE} found"),
        )
        .exit()
}
