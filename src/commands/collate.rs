use crate::collate::LengthTable;
use crate::error::Result;
use std::path::Path;

/// Collates the length summary files in order and writes the table to
/// `out_file`. Nothing is written unless all files parse.
pub fn collate_lengths<P: AsRef<Path>>(len_files: &[P], out_file: &Path) -> Result<LengthTable> {
    let table = LengthTable::collate_files(len_files)?;
    table.write_file(out_file)?;

    log::info!(
        "Wrote lengths of {} samples at {} loci to {}",
        table.num_samples(),
        table.loci().count(),
        out_file.display()
    );
    Ok(table)
}
