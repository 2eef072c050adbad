use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::geom::{Orientation, Vec3F};

use super::groups::{PerFrameFunctionalGroups, SharedFunctionalGroups};

/// PixelRepresentation (0028,0103): interpretation of stored sample values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelRepresentation {
    Unsigned,
    Signed,
}

/// A single modality-tagged image instance as produced by the parsing
/// collaborator. Read-only input; normalization never mutates these.
///
/// Instances that are themselves multiframe objects additionally carry
/// `number_of_frames` and their functional groups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceInstance {
    pub sop_class: String,
    pub sop_instance_uid: String,
    pub series_instance_uid: String,
    pub study_id: String,

    pub rows: u16,
    pub columns: u16,
    pub bits_allocated: u16,
    pub pixel_representation: Option<PixelRepresentation>,

    /// ImagePositionPatient: upper-left sample of the slice in patient space.
    pub position: Option<Vec3F>,
    /// ImageOrientationPatient: row and column direction cosines.
    pub orientation: Option<Orientation>,
    /// PixelSpacing: row and column spacing in millimeters.
    pub pixel_spacing: Option<[f32; 2]>,

    pub rescale_slope: Option<f32>,
    pub rescale_intercept: Option<f32>,

    /// Empty when absent; scalar values arrive as one-element lists.
    pub window_center: Vec<f32>,
    pub window_width: Vec<f32>,

    pub laterality: Option<String>,
    pub body_part_examined: Option<String>,
    pub acquisition_date_time: Option<NaiveDateTime>,
    pub image_type: Vec<String>,

    /// Raw little-endian samples of this instance's frame(s).
    pub pixel_data: Vec<u8>,

    pub number_of_frames: Option<usize>,
    pub shared_groups: Option<SharedFunctionalGroups>,
    pub per_frame_groups: Option<Vec<PerFrameFunctionalGroups>>,
}
