//! pathmode: inspect path-mode detection and convert host paths.
//!
//! ## Subcommands
//!
//! - `mode`: print the resolved mode (`docker` or `local`)
//! - `convert`: convert one or more paths for the resolved or given mode
//! - `platform`: print the detected platform snapshot as JSON
//! - `check`: show every detection strategy's verdict

mod logging;
mod report;

use clap::{Parser, Subcommand, ValueEnum};
use pathmode_core::config::DEBUG_ENV;
use pathmode_core::{HostContext, Mode, PathModeConfig, PathModeDetector};
use std::io::Write;
use std::path::PathBuf;

use report::{CheckReport, ModeReport, ReportError};

#[derive(Parser)]
#[command(name = "pathmode")]
#[command(about = "Path-mode detection and host-to-container path conversion")]
#[command(version)]
struct Cli {
    /// JSON config file (overrides $MCP_PATH_MODE_CONFIG)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved path mode
    Mode {
        #[arg(long)]
        json: bool,
    },

    /// Convert paths for the resolved mode, or for --target
    Convert {
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<String>,

        #[arg(long, value_enum)]
        target: Option<TargetMode>,
    },

    /// Print platform information as JSON
    Platform,

    /// Show each detection strategy's verdict
    Check {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TargetMode {
    Docker,
    Local,
}

impl From<TargetMode> for Mode {
    fn from(target: TargetMode) -> Self {
        match target {
            TargetMode::Docker => Mode::Docker,
            TargetMode::Local => Mode::Local,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let debug = HostContext::current().flag_enabled(DEBUG_ENV);
    let _logging_guard = logging::init(debug);

    // An explicit --config must be usable; the env-provided one degrades to defaults.
    let config = match &cli.config {
        Some(path) => match PathModeConfig::try_load_from(Some(path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load config");
                eprintln!("pathmode: {}", e);
                std::process::exit(1);
            }
        },
        None => PathModeConfig::load(),
    };
    let detector = PathModeDetector::with_config(config, HostContext::current());

    if let Err(e) = run(cli.command, &detector) {
        // exit() skips the guard's flush, so the log record alone may never appear.
        tracing::error!(error = %e, "pathmode failed");
        eprintln!("pathmode: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands, detector: &PathModeDetector) -> Result<(), ReportError> {
    let output = render(command, detector)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output)?;
    Ok(())
}

fn render(command: Commands, detector: &PathModeDetector) -> Result<String, ReportError> {
    match command {
        Commands::Mode { json } => report::render_mode(
            &ModeReport {
                mode: detector.get_mode(),
                debug: detector.debug_enabled(),
            },
            json,
        ),
        Commands::Convert { paths, target } => Ok(detector
            .convert_many(&paths, target.map(Mode::from))
            .join("\n")),
        Commands::Platform => report::render_platform(&detector.platform_info()),
        Commands::Check { json } => report::render_check(
            &CheckReport {
                strategies: detector.diagnose(),
                mode: detector.get_mode(),
            },
            json,
        ),
    }
}
