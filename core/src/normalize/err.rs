use thiserror::Error;

/// Normalization either returns a fully populated dataset or exactly one of
/// these; partially built aggregates never escape.
#[derive(Error, Debug)]
pub enum Error {
    #[error("inconsistent SOP classes across instances: expected {expected:?}, found {found:?}")]
    InconsistentModality { expected: String, found: String },

    #[error("no normalizer registered for SOP class {0:?}")]
    UnsupportedModality(String),

    #[error("instance {index}: only 16-bit samples are supported, BitsAllocated is {bits_allocated}")]
    UnsupportedPixelDepth { index: usize, bits_allocated: u16 },

    #[error("need at least 2 frames to derive slice spacing, got {0}")]
    InsufficientFrames(usize),

    #[error("multiframe instance is missing shared or per-frame functional groups")]
    MissingFunctionalGroups,

    #[error("instance {index}: {kind}")]
    MalformedGeometry {
        index: usize,
        kind: GeometryErrorKind,
    },

    #[error("instance {index}: pixel buffer is {got} bytes, expected {expected}")]
    MismatchedFrameLength {
        index: usize,
        expected: usize,
        got: usize,
    },

    #[error("cannot merge {count} instances of pass-through SOP class {sop_class:?}")]
    UnmergeableInstances { sop_class: String, count: usize },

    #[error("registry entry {sop_class:?} renames to unrecognized multiframe class {target:?}")]
    InvalidRegistryEntry { sop_class: String, target: String },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryErrorKind {
    #[error("missing ImagePositionPatient")]
    MissingPosition,

    #[error("missing ImageOrientationPatient")]
    MissingOrientation,

    #[error("missing PixelSpacing")]
    MissingPixelSpacing,

    #[error("non-finite position or orientation component")]
    NonFinite,

    #[error("row and column direction cosines do not span a plane")]
    DegenerateOrientation,
}
