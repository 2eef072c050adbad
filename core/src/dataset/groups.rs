use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::geom::{Orientation, Vec3F};

/// Tag of ImagePositionPatient (0020,0032).
pub const IMAGE_POSITION_PATIENT_TAG: u32 = 0x0020_0032;
/// Tag of PlanePositionSequence (0020,9113).
pub const PLANE_POSITION_SEQUENCE_TAG: u32 = 0x0020_9113;

/// Attributes common to every frame of the volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedFunctionalGroups {
    pub plane_orientation: PlaneOrientation,
    pub pixel_measures: PixelMeasures,
    pub pixel_value_transformation: Option<PixelValueTransformation>,
    pub frame_anatomy: Option<FrameAnatomy>,
    pub frame_type: Option<ImageFrameType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneOrientation {
    pub image_orientation_patient: Orientation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelMeasures {
    pub pixel_spacing: [f32; 2],
    /// Distance between the first two sorted frames. Uniformity across the
    /// remaining frames is not checked.
    pub spacing_between_slices: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelValueTransformation {
    pub rescale_slope: f32,
    pub rescale_intercept: f32,
    pub rescale_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodedConcept {
    pub code_value: String,
    pub coding_scheme_designator: String,
    pub code_meaning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameAnatomy {
    pub anatomic_region: CodedConcept,
    pub frame_laterality: String,
}

/// Modality frame-type shared group (e.g. MRImageFrameType).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFrameType {
    pub frame_type: Vec<String>,
    pub pixel_presentation: String,
    pub volumetric_properties: String,
    pub volume_based_calculation_technique: String,
    pub complex_image_component: String,
    pub acquisition_contrast: String,
}

/// Attributes specific to one frame, index-aligned with the frame slots of
/// the pixel buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerFrameFunctionalGroups {
    pub plane_position: PlanePosition,
    pub frame_voi_lut: Option<FrameVoiLut>,
    pub frame_content: Option<FrameContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanePosition {
    pub image_position_patient: Vec3F,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameVoiLut {
    pub window_center: Vec<f32>,
    pub window_width: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameContent {
    pub frame_acquisition_date_time: Option<NaiveDateTime>,
    pub frame_reference_date_time: Option<NaiveDateTime>,
    pub frame_acquisition_duration: f32,
    pub stack_id: u32,
    pub in_stack_position_number: u32,
    pub dimension_index_values: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionOrganization {
    pub dimension_organization_uid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionIndex {
    pub dimension_organization_uid: String,
    pub dimension_index_pointer: u32,
    pub functional_group_pointer: u32,
    pub dimension_description_label: String,
}

/// Back-links to the instances the volume was assembled from, kept in
/// original input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencedSeries {
    pub series_instance_uid: String,
    pub referenced_instances: Vec<ReferencedInstance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencedInstance {
    pub referenced_sop_class: String,
    pub referenced_sop_instance_uid: String,
}
