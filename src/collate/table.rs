//! Combined samples × loci length table.

use crate::collate::error::{CollateError, CollateResult};
use crate::collate::summary::SampleRecord;
use log::warn;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Name of the first header column
const SAMPLE_COLUMN: &str = "Sample";

// =#========================================================================#=
// LENGTH TABLE
// =#========================================================================#=
/// Locus lengths of several samples, in input order.
///
/// The header consists of the sorted loci of the first sample. Each row
/// lists the lengths of one sample in the order of its own sorted loci.
#[derive(Debug, Clone)]
pub struct LengthTable {
    records: Vec<SampleRecord>,
}

impl LengthTable {
    /// Collates the given records into a table.
    ///
    /// Records whose loci differ from those of the first record are kept as
    /// they are, with a warning.
    ///
    /// # Errors
    /// Returns [CollateError::NoSamples] if `records` is empty.
    pub fn collate(records: Vec<SampleRecord>) -> CollateResult<Self> {
        let Some(first) = records.first() else {
            return Err(CollateError::NoSamples);
        };

        for record in &records[1..] {
            if !record.loci().eq(first.loci()) {
                warn!(
                    "Loci of sample {} differ from those of sample {}; its values may not line up with the header",
                    record.sample(),
                    first.sample()
                );
            }
        }

        Ok(LengthTable { records })
    }

    /// Reads all length summary files in order and collates them.
    ///
    /// # Errors
    /// Returns the first error reading or parsing a file, or
    /// [CollateError::NoSamples] if `paths` is empty.
    pub fn collate_files<P: AsRef<Path>>(paths: &[P]) -> CollateResult<Self> {
        let records = paths
            .iter()
            .map(SampleRecord::from_file)
            .collect::<CollateResult<Vec<_>>>()?;
        Self::collate(records)
    }

    /// Returns the header loci (sorted loci of the first sample).
    pub fn loci(&self) -> impl Iterator<Item = &str> {
        self.records.iter().take(1).flat_map(SampleRecord::loci)
    }

    /// Returns the records in input order.
    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    /// Returns the number of samples (rows without header).
    pub fn num_samples(&self) -> usize {
        self.records.len()
    }

    /// Returns the table as tab-separated values with `\n` line endings.
    ///
    /// # Example
    /// ```
    /// use cftools::collate::{LengthTable, SampleRecord};
    ///
    /// let records = vec![
    ///     SampleRecord::from_summary("X locusA locusB\n\nsample1 10 20\n", "1.txt").unwrap(),
    ///     SampleRecord::from_summary("X locusA locusB\n\nsample2 30 40\n", "2.txt").unwrap(),
    /// ];
    /// let table = LengthTable::collate(records).unwrap();
    ///
    /// assert_eq!(
    ///     table.to_tsv_string(),
    ///     "Sample\tlocusA\tlocusB\nsample1\t10\t20\nsample2\t30\t40\n"
    /// );
    /// ```
    pub fn to_tsv_string(&self) -> String {
        let mut tsv = String::new();
        push_row(&mut tsv, SAMPLE_COLUMN, self.loci());
        for record in &self.records {
            push_row(&mut tsv, record.sample(), record.values());
        }
        tsv
    }

    /// Writes the table as tab-separated values to `writer`.
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.to_tsv_string().as_bytes())
    }

    /// Creates (or truncates) the file at `path` and writes the table to it.
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> CollateResult<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|err| CollateError::io(path, err))?;
        let mut writer = BufWriter::new(file);

        self.write_tsv(&mut writer)
            .and_then(|_| writer.flush())
            .map_err(|err| CollateError::io(path, err))
    }
}

/// Appends `first` followed by a tab, the tab-joined `rest` and a newline.
///
/// The tab after the first column is always written, so a row without
/// values reads `first\t`.
fn push_row<'a>(tsv: &mut String, first: &str, rest: impl Iterator<Item = &'a str>) {
    tsv.push_str(first);
    tsv.push('\t');
    for (i, value) in rest.enumerate() {
        if i > 0 {
            tsv.push('\t');
        }
        tsv.push_str(value);
    }
    tsv.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str) -> SampleRecord {
        SampleRecord::from_summary(text, "test.txt").unwrap()
    }

    #[test]
    fn test_rows_are_sorted_by_locus() {
        let table = LengthTable::collate(vec![record("X locusB locusA\n\nsample1 20 10\n")]).unwrap();
        assert_eq!(table.to_tsv_string(), "Sample\tlocusA\tlocusB\nsample1\t10\t20\n");
    }

    #[test]
    fn test_header_from_first_sample() {
        let table = LengthTable::collate(vec![
            record("X a b\n\ns1 1 2\n"),
            record("X a c d\n\ns2 3 4 5\n"),
        ])
        .unwrap();
        assert_eq!(table.loci().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(table.to_tsv_string(), "Sample\ta\tb\ns1\t1\t2\ns2\t3\t4\t5\n");
    }

    #[test]
    fn test_zero_loci() {
        let table = LengthTable::collate(vec![record("Species\n\ns1\n")]).unwrap();
        assert_eq!(table.to_tsv_string(), "Sample\t\ns1\t\n");
    }

    #[test]
    fn test_no_samples() {
        assert!(matches!(
            LengthTable::collate(Vec::new()),
            Err(CollateError::NoSamples)
        ));
    }

    #[test]
    fn test_row_and_column_count() {
        let table = LengthTable::collate(vec![
            record("X a b c\n\ns1 1 2 3\n"),
            record("X a b c\n\ns2 4 5 6\n"),
            record("X a b c\n\ns3 7 8 9\n"),
        ])
        .unwrap();
        let tsv = table.to_tsv_string();
        let rows: Vec<&str> = tsv.lines().collect();
        assert_eq!(rows.len(), table.num_samples() + 1);
        assert!(rows.iter().all(|row| row.split('\t').count() == 4));
    }

    #[test]
    fn test_write_tsv_matches_string() {
        let table = LengthTable::collate(vec![record("X b a\n\ns1 2 1\n")]).unwrap();
        let mut out = Vec::new();
        table.write_tsv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), table.to_tsv_string());
    }
}
