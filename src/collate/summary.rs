//! Parsing of a single HybPiper length summary file.

use crate::collate::error::{CollateError, CollateResult};
use log::debug;
use std::fs;
use std::path::Path;

/// Line holding the locus names (after a first, discarded token)
const LOCI_LINE: usize = 0;
/// Line holding the sample identifier followed by the lengths
const SAMPLE_LINE: usize = 2;

// =#========================================================================#=
// SAMPLE RECORD
// =#========================================================================#=
/// Recovered locus lengths of one sample.
///
/// Lengths are kept as the strings found in the file and the pairs are
/// sorted by locus name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRecord {
    sample: String,
    lengths: Vec<(String, String)>,
}

impl SampleRecord {
    /// Creates a record, stable-sorting the `(locus, length)` pairs by locus name.
    pub fn new(sample: String, mut lengths: Vec<(String, String)>) -> Self {
        lengths.sort_by(|a, b| a.0.cmp(&b.0));
        SampleRecord { sample, lengths }
    }

    /// Parses the content of a length summary file.
    ///
    /// The first line holds whitespace-separated tokens of which all but the
    /// first are locus names; the third line holds the sample identifier
    /// followed by one length per locus. All other lines are ignored.
    /// `path` only serves to name the file in errors.
    ///
    /// # Example
    /// ```
    /// use cftools::collate::SampleRecord;
    ///
    /// let text = "Species locusB locusA\nignored\nsample1 20 10\n";
    /// let record = SampleRecord::from_summary(text, "sample1.tsv").unwrap();
    ///
    /// assert_eq!(record.sample(), "sample1");
    /// assert_eq!(record.loci().collect::<Vec<_>>(), vec!["locusA", "locusB"]);
    /// assert_eq!(record.values().collect::<Vec<_>>(), vec!["10", "20"]);
    /// ```
    pub fn from_summary<P: AsRef<Path>>(text: &str, path: P) -> CollateResult<Self> {
        let path = path.as_ref();
        let lines: Vec<&str> = text.lines().collect();

        if lines.len() <= SAMPLE_LINE {
            return Err(CollateError::MalformedSummary {
                path: path.to_path_buf(),
                line_count: lines.len(),
            });
        }

        let loci: Vec<&str> = lines[LOCI_LINE].split_whitespace().skip(1).collect();

        let mut tokens = lines[SAMPLE_LINE].split_whitespace();
        let sample = tokens.next().ok_or_else(|| CollateError::MissingSampleId {
            path: path.to_path_buf(),
        })?;
        let values: Vec<&str> = tokens.collect();

        if loci.len() != values.len() {
            return Err(CollateError::LocusCountMismatch {
                path: path.to_path_buf(),
                loci: loci.len(),
                values: values.len(),
            });
        }

        let lengths = loci
            .into_iter()
            .zip(values)
            .map(|(locus, value)| (locus.to_string(), value.to_string()))
            .collect();

        Ok(Self::new(sample.to_string(), lengths))
    }

    /// Reads and parses a length summary file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> CollateResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| CollateError::io(path, err))?;
        let record = Self::from_summary(&text, path)?;

        debug!(
            "Read {} loci for sample {} from {}",
            record.num_loci(),
            record.sample,
            path.display()
        );
        Ok(record)
    }

    /// Returns the sample identifier.
    pub fn sample(&self) -> &str {
        &self.sample
    }

    /// Returns the number of loci.
    pub fn num_loci(&self) -> usize {
        self.lengths.len()
    }

    /// Returns the sorted locus names.
    pub fn loci(&self) -> impl Iterator<Item = &str> {
        self.lengths.iter().map(|(locus, _)| locus.as_str())
    }

    /// Returns the lengths in the order of [loci](Self::loci).
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.lengths.iter().map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_few_lines() {
        let err = SampleRecord::from_summary("Species locusA\n\n", "short.txt").unwrap_err();
        assert!(matches!(
            err,
            CollateError::MalformedSummary { line_count: 2, .. }
        ));
        assert!(err.to_string().starts_with("short.txt:"));
    }

    #[test]
    fn test_missing_sample_id() {
        let err = SampleRecord::from_summary("Species locusA\n\n   \n", "x").unwrap_err();
        assert!(matches!(err, CollateError::MissingSampleId { .. }));
    }

    #[test]
    fn test_count_mismatch() {
        let err = SampleRecord::from_summary("Species a b c\n\ns 1 2\n", "x").unwrap_err();
        assert!(matches!(
            err,
            CollateError::LocusCountMismatch {
                loci: 3,
                values: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_lines_after_sample_are_ignored() {
        let record =
            SampleRecord::from_summary("X a\nwhatever\ns1 5\nother 99\n", "x").unwrap();
        assert_eq!(record.values().collect::<Vec<_>>(), vec!["5"]);
    }

    #[test]
    fn test_zero_loci() {
        let record = SampleRecord::from_summary("Species\n\ns1\n", "x").unwrap();
        assert_eq!(record.sample(), "s1");
        assert_eq!(record.num_loci(), 0);
    }

    #[test]
    fn test_sort_is_stable_for_duplicate_loci() {
        let record = SampleRecord::from_summary("X b a b\n\ns 1 2 3\n", "x").unwrap();
        assert_eq!(record.loci().collect::<Vec<_>>(), vec!["a", "b", "b"]);
        assert_eq!(record.values().collect::<Vec<_>>(), vec!["2", "1", "3"]);
    }
}
