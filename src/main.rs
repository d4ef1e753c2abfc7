//! roffdown - markdown manual pages to nroff and HTML

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use roffdown::{Config, ManPage, Outputs};

#[derive(Parser)]
#[command(name = "roffdown")]
#[command(version, about = "Convert markdown manual pages to nroff and HTML", long_about = None)]
#[command(after_help = "EXAMPLES:
    roffdown rsync.1.md                 Write rsync.1 and rsync.1.html
    roffdown --dest out *.md            Write all pages into out/
    roffdown --config man.json -q x.8.md    Fill in @VERSION@ and the date")]
struct Cli {
    /// Markdown sources named NAME.SECTION.md
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// JSON file with version, date, manual and substitutions
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for the output files (default: next to each input)
    #[arg(long, value_name = "DIR")]
    dest: Option<PathBuf>,

    /// Convert but write nothing
    #[arg(long)]
    check: bool,

    /// Only write the HTML page
    #[arg(long, conflicts_with = "man_only")]
    html_only: bool,

    /// Only write the nroff page
    #[arg(long)]
    man_only: bool,

    /// Log each written file
    #[arg(short, long)]
    verbose: bool,

    /// Log every token consumed
    #[arg(long)]
    debug: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with_all = ["verbose", "debug"])]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.debug {
            "trace"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        }
    }

    fn outputs(&self) -> Outputs {
        if self.html_only {
            Outputs::HtmlOnly
        } else if self.man_only {
            Outputs::ManOnly
        } else {
            Outputs::Both
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => match Config::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let mut failed = false;
    for input in &cli.inputs {
        if let Err(e) = process(input, &config, &cli) {
            eprintln!("error: {}: {e}", input.display());
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn process(input: &Path, config: &Config, cli: &Cli) -> roffdown::Result<()> {
    let page = ManPage::load(input, config, cli.dest.as_deref())?;
    if cli.check {
        tracing::info!(input = %input.display(), "ok");
        return Ok(());
    }
    page.write(cli.outputs())
}
