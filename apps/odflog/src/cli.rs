//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "odflog",
    version,
    about = "Turn ODF validator logs into CI annotations",
    long_about = "odflog — read the log of an ODS/ODF validation run, group diagnostics by archive, and print them as GitHub Actions annotations.\n\nConfiguration precedence: CLI > odflog.toml > defaults.",
    after_help = "Examples:\n  odflog\n  odflog annotate --log build/odf-errors.log --strip-root\n  odflog annotate --output human --stats"
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    // Without a subcommand, `annotate` runs with its defaults
    #[command(subcommand)]
    pub cmd: Option<Commands>,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current odflog version."
    )]
    Version,
    /// Emit annotations for a validator log
    #[command(
        about = "Emit annotations",
        long_about = "Parse the validator log and print one annotation per diagnostic. Diagnostics with severity Error become errors, Info becomes warnings.",
        after_help = "Examples:\n  odflog annotate --log /odf-errors.log\n  odflog annotate --output json"
    )]
    Annotate(AnnotateArgs),
}

#[derive(Args, Debug, Default)]
/// Options of `odflog annotate`.
pub struct AnnotateArgs {
    #[arg(long, help = "Repository root used for config discovery (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(long, help = "Validator log to read (default: /odf-errors.log)")]
    pub log: Option<String>,
    #[arg(long, help = "Workspace root prefix (default: /github/workspace/)")]
    pub root: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Make annotation paths relative to the root prefix")]
    pub strip_root: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Escape messages and file values for workflow commands")]
    pub escape: bool,
    #[arg(long, help = "Output mode: github|human|json (default: github)")]
    pub output: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero when any Error diagnostic is found")]
    pub fail_on_error: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Print scan counters to stderr")]
    pub stats: bool,
}
