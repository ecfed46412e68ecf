//! The linear pipelines behind the two binaries.

pub mod collate;
pub mod relabel;
