//! Report rendering: JSON or CSV, to a file or standard output.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{CoreError, CoreResult};
use crate::types::{Destination, ReportFormat, ReportOptions, ReportRow};
use crate::utils::path::expand_home;

/// Serialize `rows` in `format` into `writer`.
///
/// JSON is an array indented by four spaces. CSV always starts with the
/// header line, even when there are no rows.
pub fn write_report<W: Write>(rows: &[ReportRow], format: ReportFormat, writer: W) -> CoreResult<()> {
    match format {
        ReportFormat::Json => write_json(rows, writer),
        ReportFormat::Csv => write_csv(rows, writer),
    }
}

/// Write `rows` to the destination in `options`.
pub fn render(rows: &[ReportRow], options: &ReportOptions) -> CoreResult<()> {
    match &options.destination {
        Destination::Stdout => {
            let stdout = io::stdout();
            write_report(rows, options.format, stdout.lock())
        }
        Destination::File(path) => {
            let path = expand_home(path);
            let file = File::create(&path).map_err(|source| CoreError::OutputFile {
                path: path.display().to_string(),
                source,
            })?;
            write_report(rows, options.format, BufWriter::new(file))?;
            log::info!(
                "Wrote {} row(s) as {} to {}",
                rows.len(),
                options.format,
                path.display()
            );
            Ok(())
        }
    }
}

fn write_json<W: Write>(rows: &[ReportRow], mut writer: W) -> CoreResult<()> {
    {
        let mut ser =
            serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        rows.serialize(&mut ser)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn write_csv<W: Write>(rows: &[ReportRow], writer: W) -> CoreResult<()> {
    let mut out = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    out.write_record(ReportRow::HEADERS)?;
    for row in rows {
        out.serialize(row)?;
    }
    out.flush()?;
    Ok(())
}
