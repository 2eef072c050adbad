use tracing::debug;

use crate::dataset::groups::{
    DimensionIndex, DimensionOrganization, FrameVoiLut, PerFrameFunctionalGroups, PixelMeasures,
    PlaneOrientation, PlanePosition, ReferencedInstance, ReferencedSeries, SharedFunctionalGroups,
    IMAGE_POSITION_PATIENT_TAG, PLANE_POSITION_SEQUENCE_TAG,
};
use crate::dataset::instance::{PixelRepresentation, SourceInstance};
use crate::dataset::multiframe::MultiframeDataset;

use super::err::{Error, GeometryErrorKind};
use super::modality::NormalizerRegistry;
use super::sort::sort_by_scan_axis;
use super::UidGenerator;

const SUPPORTED_BITS_ALLOCATED: u16 = 16;

pub(crate) struct Assembled<'a> {
    pub dataset: MultiframeDataset,
    /// Instances in frame order; `None` when an existing multiframe input
    /// was adopted unmodified.
    pub sorted: Option<Vec<&'a SourceInstance>>,
}

/// Builds one multiframe dataset out of single-frame instances: sorts them
/// along the scan axis, concatenates their samples into one frame-indexed
/// buffer and derives the shared and per-frame plane groups.
///
/// A single input that is already a recognized multiframe object is adopted
/// as-is, without resorting or buffer reassembly.
pub(crate) fn convert_to_multiframe<'a>(
    instances: &'a [SourceInstance],
    registry: &NormalizerRegistry,
    uids: &dyn UidGenerator,
) -> Result<Assembled<'a>, Error> {
    if instances.len() == 1 && registry.is_multiframe(&instances[0].sop_class) {
        return Ok(Assembled {
            dataset: adopt_multiframe(&instances[0]),
            sorted: None,
        });
    }
    if instances.len() < 2 {
        return Err(Error::InsufficientFrames(instances.len()));
    }

    let reference = &instances[0];
    let frame_len = reference.rows as usize * reference.columns as usize * 2;
    for (index, instance) in instances.iter().enumerate() {
        if instance.bits_allocated != SUPPORTED_BITS_ALLOCATED {
            return Err(Error::UnsupportedPixelDepth {
                index,
                bits_allocated: instance.bits_allocated,
            });
        }
        if instance.pixel_data.len() != frame_len {
            return Err(Error::MismatchedFrameLength {
                index,
                expected: frame_len,
                got: instance.pixel_data.len(),
            });
        }
    }

    let sorted = sort_by_scan_axis(instances)?;

    // One owned contiguous arena, sized up front; frame slots are filled in
    // sorted order.
    let mut pixel_data = Vec::with_capacity(instances.len() * frame_len);
    for entry in &sorted {
        pixel_data.extend_from_slice(&entry.instance.pixel_data);
    }

    let first = &sorted[0];
    let second = &sorted[1];
    let spacing_between_slices = (second.distance - first.distance).abs();
    debug!(spacing_between_slices, "derived slice spacing");

    let pixel_spacing = first
        .instance
        .pixel_spacing
        .ok_or(Error::MalformedGeometry {
            index: first.index,
            kind: GeometryErrorKind::MissingPixelSpacing,
        })?;
    let plane_orientation = first
        .instance
        .orientation
        .ok_or(Error::MalformedGeometry {
            index: first.index,
            kind: GeometryErrorKind::MissingOrientation,
        })?;

    let shared = SharedFunctionalGroups {
        plane_orientation: PlaneOrientation {
            image_orientation_patient: plane_orientation,
        },
        pixel_measures: PixelMeasures {
            pixel_spacing,
            spacing_between_slices,
        },
        pixel_value_transformation: None,
        frame_anatomy: None,
        frame_type: None,
    };

    // Per-frame metadata in sorted frame order, aligned with the buffer
    // slots.
    let per_frame = sorted
        .iter()
        .map(|entry| {
            let instance = entry.instance;
            let frame_voi_lut = if !instance.window_center.is_empty()
                && !instance.window_width.is_empty()
            {
                Some(FrameVoiLut {
                    window_center: instance.window_center.clone(),
                    window_width: instance.window_width.clone(),
                })
            } else {
                None
            };
            PerFrameFunctionalGroups {
                plane_position: PlanePosition {
                    image_position_patient: entry.position,
                },
                frame_voi_lut,
                frame_content: None,
            }
        })
        .collect();

    // Provenance stays in original input order, independent of the spatial
    // sort.
    let referenced_series = ReferencedSeries {
        series_instance_uid: first.instance.series_instance_uid.clone(),
        referenced_instances: instances
            .iter()
            .map(|instance| ReferencedInstance {
                referenced_sop_class: instance.sop_class.clone(),
                referenced_sop_instance_uid: instance.sop_instance_uid.clone(),
            })
            .collect(),
    };

    let dimension_uid = uids.generate_uid();
    let dimension_organization = DimensionOrganization {
        dimension_organization_uid: dimension_uid.clone(),
    };
    let dimension_index = vec![DimensionIndex {
        dimension_organization_uid: dimension_uid,
        dimension_index_pointer: IMAGE_POSITION_PATIENT_TAG,
        functional_group_pointer: PLANE_POSITION_SEQUENCE_TAG,
        dimension_description_label: "ImagePositionPatient".to_string(),
    }];

    let dataset = MultiframeDataset {
        sop_class: reference.sop_class.clone(),
        number_of_frames: instances.len(),
        rows: reference.rows,
        columns: reference.columns,
        bits_allocated: reference.bits_allocated,
        pixel_representation: reference
            .pixel_representation
            .unwrap_or(PixelRepresentation::Signed),
        rescale_slope: reference.rescale_slope.unwrap_or(1.0),
        rescale_intercept: reference.rescale_intercept.unwrap_or(0.0),
        study_id: reference.study_id.clone(),
        laterality: reference.laterality.clone(),
        presentation_lut_shape: String::new(),
        body_part_examined: reference.body_part_examined.clone(),
        image_type: reference.image_type.clone(),
        window_center: Vec::new(),
        window_width: Vec::new(),
        pixel_data,
        shared: Some(shared),
        per_frame,
        dimension_organization: Some(dimension_organization),
        dimension_index,
        referenced_series: Some(referenced_series),
    };

    Ok(Assembled {
        sorted: Some(sorted.into_iter().map(|entry| entry.instance).collect()),
        dataset,
    })
}

/// Adopts an instance that is already a multiframe object, keeping its
/// buffer and functional groups untouched.
pub(crate) fn adopt_multiframe(instance: &SourceInstance) -> MultiframeDataset {
    MultiframeDataset {
        sop_class: instance.sop_class.clone(),
        number_of_frames: instance.number_of_frames.unwrap_or(0),
        rows: instance.rows,
        columns: instance.columns,
        bits_allocated: instance.bits_allocated,
        pixel_representation: instance
            .pixel_representation
            .unwrap_or(PixelRepresentation::Signed),
        rescale_slope: instance.rescale_slope.unwrap_or(1.0),
        rescale_intercept: instance.rescale_intercept.unwrap_or(0.0),
        study_id: instance.study_id.clone(),
        laterality: instance.laterality.clone(),
        presentation_lut_shape: String::new(),
        body_part_examined: instance.body_part_examined.clone(),
        image_type: instance.image_type.clone(),
        window_center: instance.window_center.clone(),
        window_width: instance.window_width.clone(),
        pixel_data: instance.pixel_data.clone(),
        shared: instance.shared_groups.clone(),
        per_frame: instance.per_frame_groups.clone().unwrap_or_default(),
        dimension_organization: None,
        dimension_index: Vec::new(),
        referenced_series: None,
    }
}
