//! Report rendering
//!
//! Stdout carries nothing but report blocks; diagnostics go through tracing
//! to stderr.

use std::fmt::Write as _;
use std::io::{self, Write};
use vercheck_types::Report;

/// Render one report block, trailing blank line included
#[must_use]
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "{}:", report.package_id);
    let _ = writeln!(out, "  name: {}", report.name);
    let _ = writeln!(out, "  current version: {}", report.current_version_name);
    let _ = writeln!(out, "  current version code: {}", report.current_version_code);
    if let Some(label) = report.provenance_label() {
        let _ = writeln!(out, "  reproducible: {label}");
    }
    let _ = writeln!(out, "  status: {}", report.status);
    let _ = writeln!(out, "  total verified: {}", report.total_verified);
    if let Some(last) = &report.last_verified {
        let _ = writeln!(out, "  last verified version: {}", last.version_name);
        let _ = writeln!(out, "  last verified version code: {}", last.version_code);
    }
    out.push('\n');
    out
}

/// Write every report block to `out` in order
///
/// A reader that goes away early (`vercheck --search a | head`) is not a
/// failure.
///
/// # Errors
///
/// Returns an error if the writer fails for any reason other than a
/// closed pipe.
pub fn write_reports<W: Write>(out: &mut W, reports: &[Report]) -> io::Result<()> {
    let written = reports
        .iter()
        .try_for_each(|report| out.write_all(render_report(report).as_bytes()))
        .and_then(|()| out.flush());

    match written {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
