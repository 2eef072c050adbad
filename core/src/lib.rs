//! Converts sets of single-frame, modality-tagged DICOM image instances
//! into one multiframe dataset suitable for volumetric processing and
//! re-encoding. Wire-format parsing/encoding and UID generation are the
//! host's job; this crate only builds the normalized aggregate.

#![warn(clippy::complexity)]
#![warn(clippy::correctness)]
#![warn(clippy::perf)]
#![warn(clippy::style)]
#![warn(clippy::suspicious)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]

pub mod dataset;
pub mod geom;
pub mod normalize;

#[cfg(test)]
pub(crate) mod test_util;

pub use dataset::instance::SourceInstance;
pub use dataset::multiframe::MultiframeDataset;
pub use normalize::{normalize_to_dataset, Error, NormalizerRegistry, UidGenerator};
