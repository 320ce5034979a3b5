use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use godecls_lib::{HeaderMode, Mode, Reporter, RunConfig};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "GODECLS_LOG";

/// Exit code for usage output, matching clap's code for flag errors.
const USAGE_EXIT: i32 = 2;

#[derive(Parser)]
#[command(name = "godecls")]
#[command(about = "godecls lists declarations in files")]
#[command(disable_help_flag = true)]
struct Cli {
    /// Output list of filenames that will be targeted by godecls
    #[arg(short = 'l')]
    list: bool,
    /// Never print filenames with output lines
    #[arg(short = 'h')]
    no_header: bool,
    /// Force print filenames with output lines
    #[arg(short = 'H')]
    header: bool,
    /// Print help
    #[arg(long)]
    help: bool,
    /// Files or directories to read (standard input when empty)
    paths: Vec<PathBuf>,
}

impl Cli {
    fn config(&self) -> RunConfig {
        let mode = if self.list {
            Mode::ListOnly
        } else {
            Mode::Declarations
        };
        let headers = if self.header {
            HeaderMode::Always
        } else if self.no_header {
            HeaderMode::Never
        } else {
            HeaderMode::Auto
        };
        RunConfig { mode, headers }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.help {
        let _ = Cli::command().print_help();
        std::process::exit(USAGE_EXIT);
    }
    let config = cli.config();
    tracing::debug!(?config, paths = cli.paths.len(), "starting run");

    let mut reporter = Reporter::new(io::stdout().lock(), io::stderr(), io::stderr());
    let status = godecls_lib::run(&config, &cli.paths, &mut io::stdin().lock(), &mut reporter);
    drop(reporter);
    std::process::exit(status.exit_code());
}
