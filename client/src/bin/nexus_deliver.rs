//! Nexus delivery CLI entrypoint.
//!
//! This binary uploads one artifact to a delivery store, prints the
//! notifications of the QA report the store publishes for it, and exits with
//! status 3 if any of them is an `ERROR` or `FATAL`.

use clap::Parser;
use log::debug;
use nexus_sync::cli::DeliverCli;
use nexus_sync::config::{FileConfig, resolve_delivery};
use nexus_sync::delivery::{DeliveryOutcome, deliver};
use nexus_sync::error::Result;
use nexus_sync::exit::{SUCCESS, exit_code_for_parse_error};
use nexus_sync::logging;
use nexus_sync::output::{exit_code_for_error, exit_code_for_gate_failure};
use nexus_sync::report::GateVerdict;
use nexus_sync::streams::{open_input, open_output};
use nexus_sync::transport::HttpTransport;
use std::io::{self, Write};

fn main() {
    let mut stderr = io::stderr();
    let cli = match DeliverCli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let exit_code = exit_code_for_parse_error(&err);
            if err.print().is_err() {
                // Best-effort usage output; the exit code still reports it.
            }
            std::process::exit(exit_code);
        }
    };
    logging::init(logging::delivery_level(cli.debug));

    let exit_code = exit_code_for_run_result(run(&cli), &mut stderr);
    if exit_code != SUCCESS {
        std::process::exit(exit_code);
    }
}

/// Runs the delivery; streams are closed before this returns.
fn run(cli: &DeliverCli) -> Result<DeliveryOutcome> {
    let file = FileConfig::load_optional(cli.config.as_deref())?;
    let config = resolve_delivery(cli, &file)?;
    debug!("delivery settings: {config:?}");

    let mut input = open_input(config.input.as_deref())?;
    let mut output = open_output(config.output.as_deref())?;
    let transport = HttpTransport::new(&config.transport);
    let outcome = deliver(&config.delivery, &transport, &mut *input, &mut *output)?;
    output.flush()?;
    Ok(outcome)
}

fn exit_code_for_run_result(result: Result<DeliveryOutcome>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(DeliveryOutcome {
            verdict: GateVerdict::Passed,
            ..
        }) => SUCCESS,
        Ok(DeliveryOutcome {
            verdict: GateVerdict::Failed(notification),
            ..
        }) => exit_code_for_gate_failure(&notification, stderr),
        Err(err) => exit_code_for_error(&err, stderr),
    }
}
