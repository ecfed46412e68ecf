//! Collating locus lengths of HybPiper length summary files.
//!
//! Each summary file describes one sample: its first line lists the loci
//! (after a leading column name), its third line holds the sample identifier
//! followed by the recovered length per locus. [LengthTable] merges several
//! [SampleRecord]s into one tab-separated samples × loci table.

mod error;
mod summary;
mod table;

pub use self::error::{CollateError, CollateResult};
pub use self::summary::SampleRecord;
pub use self::table::LengthTable;
