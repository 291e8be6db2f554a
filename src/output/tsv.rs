//! Tab-separated rendering of field summaries

use crate::error::Result;
use crate::schema::FieldSummary;
use std::io::Write;

/// Header row of the tabular output
pub const TSV_HEADER: &str =
    "field\tpresence_ratio\tpresent_records\ttotal_records\ttypes\tnullability";

/// Write the header and one line per row
///
/// Ratios print in their shortest form (`1`, `0.5`, `0.6667`) and types are
/// joined with `|`.
pub fn write_tsv<W: Write>(mut out: W, rows: &[FieldSummary]) -> Result<()> {
    writeln!(out, "{TSV_HEADER}")?;
    for row in rows {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            row.field,
            row.presence_ratio,
            row.present_records,
            row.total_records,
            row.types_label(),
            row.nullability
        )?;
    }
    Ok(())
}

/// Render rows as a tab-separated string
pub fn render_tsv(rows: &[FieldSummary]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_tsv(&mut buf, rows);
    String::from_utf8_lossy(&buf).into_owned()
}
