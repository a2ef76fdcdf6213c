//! CLI argument definitions for the `nexus-sync` and `nexus-deliver` tools.
//!
//! This module defines both command-line interfaces using clap. It is
//! separated from the entrypoints to keep the binaries small and focused on
//! orchestration. Connection options are `Option`s so that an unset flag can
//! fall back to the configuration file; see [`crate::config`].

use camino::Utf8PathBuf;
use clap::Parser;

/// Synchronise a local Maven repository with a Nexus repository.
#[derive(Parser, Debug, Clone)]
#[command(name = "nexus-sync")]
#[command(version, about)]
#[command(long_about = concat!(
    "Synchronise a local Maven repository with a Nexus repository.\n\n",
    "Every .jar and .pom below the given folders is decoded into its Maven ",
    "coordinate and probed on the server. Artifacts the server does not have ",
    "are reported, and uploaded when --upload is given. Any unexpected server ",
    "response aborts the run.",
))]
#[command(after_help = concat!(
    "Each ROOT must be a hierarchy in Maven default layout, e.g. ${HOME}/.m2/repository\n\n",
    "EXAMPLES:\n",
    "  Report which artifacts are missing on the server:\n",
    "    $ nexus-sync ~/.m2/repository\n\n",
    "  Upload the missing ones to a custom repository:\n",
    "    $ nexus-sync --servername nexus.example.com --repository thirdparty \\\n",
    "        --username admin --password secret --upload ~/.m2/repository",
))]
pub struct SyncCli {
    /// Local folders in Maven default layout.
    #[arg(value_name = "ROOT", required = true)]
    pub roots: Vec<Utf8PathBuf>,

    /// Nexus server host [default: localhost].
    #[arg(long, value_name = "HOST")]
    pub servername: Option<String>,

    /// Nexus server port [default: 8081].
    #[arg(long)]
    pub port: Option<u16>,

    /// URL scheme [default: http].
    #[arg(long)]
    pub scheme: Option<String>,

    /// Path under which repositories are served [default: /nexus/content/repositories].
    #[arg(long, value_name = "PATH")]
    pub context_path: Option<String>,

    /// Repository to sync against [default: releases].
    #[arg(long)]
    pub repository: Option<String>,

    /// Nexus user for basic authentication.
    #[arg(long)]
    pub username: Option<String>,

    /// Nexus password for basic authentication.
    #[arg(long)]
    pub password: Option<String>,

    /// Upload artifacts that do not exist on the server.
    #[arg(long)]
    pub upload: bool,

    /// TOML file with connection defaults.
    #[arg(long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only log warnings and errors.
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

/// Upload an artifact to a delivery store and check its QA report.
///
/// `--version` is the artifact version, so this tool has no version flag of
/// its own.
#[derive(Parser, Debug, Clone)]
#[command(name = "nexus-deliver")]
#[command(about)]
#[command(long_about = concat!(
    "Upload an artifact to a delivery store and check its QA report.\n\n",
    "The artifact is read from --in (or stdin) and PUT to the default-layout ",
    "location of the given coordinate. The store's QA report (classifier ",
    "qareport) is then fetched, every notification is printed, and the tool ",
    "exits with status 3 if any notification has severity ERROR or FATAL.",
))]
#[command(after_help = concat!(
    "EXIT STATUS:\n",
    "  0  delivery accepted and QA report clean\n",
    "  1  usage error or fatal transport/report error\n",
    "  2  upload rejected by the server\n",
    "  3  QA report contains ERROR or FATAL notifications",
))]
pub struct DeliverCli {
    /// GAV: group ID.
    #[arg(long, alias = "groupId", value_name = "GROUP")]
    pub group_id: String,

    /// GAV: artifact ID.
    #[arg(long, alias = "artifactId", value_name = "ARTIFACT")]
    pub artifact_id: String,

    /// GAV: version.
    #[arg(long, default_value = "0.0.0")]
    pub version: String,

    /// GAV: packaging.
    #[arg(long, default_value = "zip")]
    pub packaging: String,

    /// Delivery store base URL [default: the APDS repository on localhost:8081].
    #[arg(long)]
    pub url: Option<String>,

    /// Basic auth username.
    #[arg(long)]
    pub username: Option<String>,

    /// Basic auth password.
    #[arg(long)]
    pub password: Option<String>,

    /// Dry run: do not upload anything.
    #[arg(long = "norun", alias = "dry-run")]
    pub dry_run: bool,

    /// Skip TLS certificate verification.
    #[arg(long, alias = "insecureSkipVerify")]
    pub insecure_skip_verify: bool,

    /// Show verbose debug information.
    #[arg(long)]
    pub debug: bool,

    /// Input file [default: stdin].
    #[arg(long = "in", value_name = "FILE")]
    pub input: Option<Utf8PathBuf>,

    /// Output file [default: stdout].
    #[arg(long = "out", value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,

    /// Per-request timeout in seconds [default: none].
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// TOML file with connection defaults.
    #[arg(long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
