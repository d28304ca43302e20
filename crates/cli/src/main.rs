use anyhow::Result;
use clap::{Parser, Subcommand};
use sigcompat::commands::{
    check_command, info_command, init_command, list_reports_command, show_command,
};
use tracing_subscriber::EnvFilter;

/// Function-signature compatibility auditing CLI.
///
/// This CLI is a thin wrapper around `sigcompat-core`. All substantive logic
/// lives in the library so it can be tested thoroughly and reused from other
/// frontends.
#[derive(Parser, Debug)]
#[command(
    name = "sigcompat",
    version,
    about = "Classify function-signature changes between two API snapshots",
    long_about = None
)]
struct Cli {
    /// Enable debug logging on stderr (overridden by SIGCOMPAT_LOG).
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize an audit workspace at the given root.
    ///
    /// This will:
    /// - Create a `.sigcompat` metadata directory.
    /// - Create a `reports` directory.
    /// - Write a `.sigcompat/config.json` config file.
    Init {
        /// Workspace root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Optional workspace name. If omitted, the name is derived from the root directory.
        #[arg(long)]
        name: Option<String>,
    },

    /// Show the effective configuration of an audit workspace.
    Info {
        /// Workspace root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Classify every function change between two snapshots.
    ///
    /// Exits non-zero when the workspace gate policy is violated.
    Check {
        /// Workspace root directory (for config and saved reports).
        #[arg(long, default_value = ".")]
        root: String,

        /// Snapshot of the previous API (.json, .yaml or .yml).
        #[arg(long)]
        before: String,

        /// Snapshot of the new API (.json, .yaml or .yml).
        #[arg(long)]
        after: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Save the report under `reports/`.
        #[arg(long, default_value_t = false)]
        save: bool,
    },

    /// Show the classification and declarations of one function.
    Show {
        #[arg(long)]
        before: String,

        #[arg(long)]
        after: String,

        /// Function name.
        #[arg(long)]
        name: String,
    },

    /// List reports saved by `check --save`.
    ListReports {
        /// Workspace root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SIGCOMPAT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Init { root, name } => init_command(&root, name)?,
        Command::Info { root, json } => info_command(&root, json)?,
        Command::Check { root, before, after, json, save } => {
            check_command(&root, &before, &after, json, save)?
        }
        Command::Show { before, after, name } => show_command(&before, &after, &name)?,
        Command::ListReports { root, json } => list_reports_command(&root, json)?,
    }

    Ok(())
}
