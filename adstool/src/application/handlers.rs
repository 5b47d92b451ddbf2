use std::io::{self, Write};
use std::path::PathBuf;

use ads_core::repo::StreamRepo;
use ads_core::{Dispatch, HostReport, Operation, OperationReport, StreamRecord, dispatch_batch};

fn print_listing<W: Write>(out: &mut W, streams: &[StreamRecord], json: bool) -> io::Result<()> {
    for r in streams {
        if json {
            let line = serde_json::to_string(r).map_err(io::Error::other)?;
            writeln!(out, "{line}")?;
        } else {
            writeln!(out, "{}  {:<24}  {:>10} bytes", r.host_file, r.name, r.length)?;
        }
    }
    Ok(())
}

fn print_report<W: Write>(err: &mut W, report: &HostReport) -> io::Result<()> {
    match &report.report {
        OperationReport::Listed => {}
        OperationReport::Extracted(outcomes) => {
            for o in outcomes {
                writeln!(err, "{o}")?;
            }
        }
        OperationReport::Added(o) => writeln!(err, "{o}")?,
        OperationReport::Removed(outcomes) => {
            for o in outcomes {
                writeln!(err, "{o}")?;
            }
        }
    }
    Ok(())
}

/// Process every host, writing its listing to `out` and status lines to
/// `err`. Returns how many hosts failed outright.
pub fn handle_batch<O: Write, E: Write>(
    repo: &dyn StreamRepo,
    hosts: &[PathBuf],
    op: &Operation,
    json: bool,
    out: &mut O,
    err: &mut E,
) -> io::Result<usize> {
    let mut failed = 0;
    for (host, result) in dispatch_batch(repo, hosts, op) {
        match result {
            Ok(Dispatch::SkippedDirectory(p)) => {
                writeln!(err, "{} is a directory, skipping.", p.display())?;
            }
            Ok(Dispatch::Processed(report)) => {
                print_listing(out, &report.streams, json)?;
                out.flush()?;
                print_report(err, &report)?;
            }
            Err(e) => {
                writeln!(err, "error: {}: {e}", host.display())?;
                failed += 1;
            }
        }
    }
    Ok(failed)
}
