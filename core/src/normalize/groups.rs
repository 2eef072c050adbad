use crate::dataset::groups::{CodedConcept, FrameAnatomy, FrameContent, PixelValueTransformation};
use crate::dataset::instance::SourceInstance;
use crate::dataset::multiframe::MultiframeDataset;

use super::err::Error;
use super::voi::resolve_window_level;

const VALID_LATERALITIES: [&str; 2] = ["R", "L"];
const DEFAULT_STUDY_ID: &str = "No Study ID";

/// Fills required-but-absent attributes and completes the shared and
/// per-frame groups a valid multiframe needs for volumetric processing.
///
/// `frame_order` carries the source instances in frame order for volumes
/// assembled from single-frame inputs; adopted multiframe inputs pass
/// `None` and keep their own frame content.
pub(crate) fn normalize_multiframe(
    ds: &mut MultiframeDataset,
    frame_order: Option<&[&SourceInstance]>,
) -> Result<(), Error> {
    if ds.number_of_frames < 2 {
        return Err(Error::InsufficientFrames(ds.number_of_frames));
    }
    if ds.per_frame.len() != ds.number_of_frames {
        return Err(Error::MissingFunctionalGroups);
    }

    if ds.study_id.is_empty() {
        ds.study_id = DEFAULT_STUDY_ID.to_string();
    }
    match ds.laterality.as_deref() {
        Some(laterality) if VALID_LATERALITIES.contains(&laterality) => {}
        _ => ds.laterality = None,
    }
    if ds.presentation_lut_shape.is_empty() {
        ds.presentation_lut_shape = "IDENTITY".to_string();
    }

    {
        let shared = ds.shared.as_mut().ok_or(Error::MissingFunctionalGroups)?;
        if ds.body_part_examined.as_deref() == Some("PROSTATE") {
            shared.frame_anatomy = Some(prostate_anatomy());
        }
        shared.pixel_value_transformation = Some(PixelValueTransformation {
            rescale_slope: ds.rescale_slope,
            rescale_intercept: ds.rescale_intercept,
            rescale_type: "US".to_string(),
        });
    }

    if let Some(order) = frame_order {
        debug_assert_eq!(order.len(), ds.number_of_frames);
        for (slot, instance) in order.iter().enumerate() {
            let number = slot as u32 + 1;
            ds.per_frame[slot].frame_content = Some(FrameContent {
                frame_acquisition_date_time: instance.acquisition_date_time,
                frame_reference_date_time: instance.acquisition_date_time,
                frame_acquisition_duration: 0.0,
                stack_id: 1,
                in_stack_position_number: number,
                dimension_index_values: vec![number],
            });
        }
    }

    resolve_window_level(ds);
    Ok(())
}

fn prostate_anatomy() -> FrameAnatomy {
    FrameAnatomy {
        anatomic_region: CodedConcept {
            code_value: "T-9200B".to_string(),
            coding_scheme_designator: "SRT".to_string(),
            code_meaning: "Prostate".to_string(),
        },
        frame_laterality: "U".to_string(),
    }
}
