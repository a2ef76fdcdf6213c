//! Nexus sync CLI entrypoint.
//!
//! This binary scans local Maven repositories, probes a Nexus repository for
//! every artifact found and, with `--upload`, uploads the missing ones. One
//! line per artifact is printed to stdout; logs go to stderr.

use clap::Parser;
use log::info;
use nexus_sync::cli::SyncCli;
use nexus_sync::config::{FileConfig, resolve_sync};
use nexus_sync::error::Result;
use nexus_sync::exit::{SUCCESS, exit_code_for_parse_error};
use nexus_sync::logging;
use nexus_sync::output::exit_code_for_error;
use nexus_sync::scanner::scan_roots;
use nexus_sync::sync::{SyncSummary, synchronise};
use nexus_sync::transport::HttpTransport;
use std::io::{self, Write};

fn main() {
    let mut stderr = io::stderr();
    let cli = match SyncCli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let exit_code = exit_code_for_parse_error(&err);
            if err.print().is_err() {
                // Best-effort usage output; the exit code still reports it.
            }
            std::process::exit(exit_code);
        }
    };
    logging::init(logging::sync_level(cli.verbosity, cli.quiet));

    let run_result = {
        let mut stdout = io::stdout().lock();
        let result = run(&cli, &mut stdout);
        if stdout.flush().is_err() {
            // Nothing useful can be done about a closed stdout.
        }
        result
    };
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != SUCCESS {
        std::process::exit(exit_code);
    }
}

fn run(cli: &SyncCli, out: &mut dyn Write) -> Result<SyncSummary> {
    let file = FileConfig::load_optional(cli.config.as_deref())?;
    let config = resolve_sync(cli, &file);
    info!(
        "synchronising with {}{}",
        config.sync.endpoint.base_url(),
        if config.sync.upload { " (upload enabled)" } else { "" }
    );

    let artifacts = scan_roots(&cli.roots);
    info!("found {} artifacts", artifacts.len());

    let transport = HttpTransport::new(&config.transport);
    let report = synchronise(artifacts, &transport, &config.sync, out)?;
    Ok(report.summary)
}

fn exit_code_for_run_result(result: Result<SyncSummary>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(_) => SUCCESS,
        Err(err) => exit_code_for_error(&err, stderr),
    }
}
