pub mod err;
pub mod modality;

pub(crate) mod assemble;
pub(crate) mod groups;
pub(crate) mod sort;
pub(crate) mod voi;

use tracing::{debug, instrument};

use crate::dataset::instance::SourceInstance;
use crate::dataset::multiframe::MultiframeDataset;

use assemble::{adopt_multiframe, convert_to_multiframe};
use groups::normalize_multiframe;

pub use err::{Error, GeometryErrorKind};
pub use modality::{
    FrameTypeSpec, ImageSpec, NormalizerRegistry, Variant, MULTIFRAME_SOP_CLASSES,
};

/// Source of globally unique identifiers (e.g. DimensionOrganizationUID).
/// Generation is the host's job; implementations must return globally
/// unique strings.
pub trait UidGenerator {
    fn generate_uid(&self) -> String;
}

/// Returns the SOP class shared by every instance. Each instance must carry
/// a non-empty SOP class and all of them must match.
pub fn consistent_sop_class(instances: &[SourceInstance]) -> Result<&str, Error> {
    let first = instances.first().ok_or(Error::InsufficientFrames(0))?;
    for instance in instances {
        if instance.sop_class.is_empty() || instance.sop_class != first.sop_class {
            return Err(Error::InconsistentModality {
                expected: first.sop_class.clone(),
                found: instance.sop_class.clone(),
            });
        }
    }
    Ok(&first.sop_class)
}

/// Entry point: resolves the common modality, selects the matching variant
/// from the registry and runs it. Returns a fully populated dataset or
/// exactly one typed error.
#[instrument(skip_all, fields(instances = instances.len()))]
pub fn normalize_to_dataset(
    instances: &[SourceInstance],
    registry: &NormalizerRegistry,
    uids: &dyn UidGenerator,
) -> Result<MultiframeDataset, Error> {
    let sop_class = consistent_sop_class(instances)?;
    let variant = registry
        .get(sop_class)
        .ok_or_else(|| Error::UnsupportedModality(sop_class.to_string()))?
        .clone();
    debug!(sop_class, ?variant, "selected normalizer variant");

    match variant {
        Variant::PassThrough => pass_through(instances),
        Variant::Image(spec) => normalize_image(instances, &spec, registry, uids),
    }
}

/// The generic image pipeline: geometric sort + buffer assembly, then group
/// synthesis, then the modality-specific rename and frame-type injection.
fn normalize_image(
    instances: &[SourceInstance],
    spec: &ImageSpec,
    registry: &NormalizerRegistry,
    uids: &dyn UidGenerator,
) -> Result<MultiframeDataset, Error> {
    let assembled = convert_to_multiframe(instances, registry, uids)?;
    let mut dataset = assembled.dataset;
    normalize_multiframe(&mut dataset, assembled.sorted.as_deref())?;

    if let Some(target) = spec.enhanced_sop_class {
        dataset.sop_class = target.to_string();
    }
    if let Some(frame_type) = spec.frame_type {
        frame_type.inject(&mut dataset);
    }
    Ok(dataset)
}

fn pass_through(instances: &[SourceInstance]) -> Result<MultiframeDataset, Error> {
    match instances {
        [single] => Ok(adopt_multiframe(single)),
        _ => Err(Error::UnmergeableInstances {
            sop_class: instances
                .first()
                .map(|instance| instance.sop_class.clone())
                .unwrap_or_default(),
            count: instances.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{multiframe_instance, slice, FixedUids};

    const UIDS: FixedUids = FixedUids("1.2.840.999.7");

    #[test]
    fn mr_slices_become_an_enhanced_volume() {
        let instances = vec![
            slice("MRImage", 0.0, [10, 11, 12, 13]),
            slice("MRImage", 1.0, [20, 21, 22, 23]),
            slice("MRImage", 2.0, [30, 31, 32, 33]),
        ];
        let ds = normalize_to_dataset(&instances, NormalizerRegistry::builtin(), &UIDS).unwrap();

        assert_eq!(ds.sop_class, "EnhancedMRImage");
        assert_eq!(ds.number_of_frames, 3);
        assert_eq!(ds.per_frame.len(), 3);
        assert_eq!(ds.pixel_data.len(), 3 * 2 * 2 * 2);

        // frames ordered by descending scan-axis distance: z = 2, 1, 0
        assert_eq!(ds.frame_samples(0).unwrap(), vec![30, 31, 32, 33]);
        assert_eq!(ds.frame_samples(2).unwrap(), vec![10, 11, 12, 13]);

        let shared = ds.shared.as_ref().unwrap();
        assert_eq!(shared.pixel_measures.spacing_between_slices, 1.0);
        assert!(shared.frame_type.is_some());
        assert!(shared.pixel_value_transformation.is_some());

        // no VOI information anywhere: the fixed fallback pair applies
        assert_eq!(ds.window_center, vec![300.0]);
        assert_eq!(ds.window_width, vec![500.0]);

        assert_eq!(ds.study_id, "No Study ID");
        assert_eq!(ds.presentation_lut_shape, "IDENTITY");
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let instances = vec![
            slice("MRImage", 0.5, [1, 2, 3, 4]),
            slice("MRImage", -0.5, [5, 6, 7, 8]),
            slice("MRImage", 1.5, [9, 10, 11, 12]),
        ];
        let a = normalize_to_dataset(&instances, NormalizerRegistry::builtin(), &UIDS).unwrap();
        let b = normalize_to_dataset(&instances, NormalizerRegistry::builtin(), &UIDS).unwrap();
        assert_eq!(a.pixel_data, b.pixel_data);
        assert_eq!(a.per_frame, b.per_frame);
    }

    #[test]
    fn ct_rename_has_no_frame_type_group() {
        let instances = vec![
            slice("CTImage", 0.0, [0; 4]),
            slice("CTImage", 1.0, [0; 4]),
        ];
        let ds = normalize_to_dataset(&instances, NormalizerRegistry::builtin(), &UIDS).unwrap();
        assert_eq!(ds.sop_class, "EnhancedCTImage");
        assert!(ds.shared.unwrap().frame_type.is_none());
    }

    #[test]
    fn per_frame_windows_are_averaged_into_the_dataset() {
        let mut instances = vec![
            slice("MRImage", 0.0, [0; 4]),
            slice("MRImage", 1.0, [0; 4]),
            slice("MRImage", 2.0, [0; 4]),
        ];
        instances[0].window_center = vec![100.0];
        instances[0].window_width = vec![200.0];
        instances[2].window_center = vec![300.0];
        instances[2].window_width = vec![400.0];
        let ds = normalize_to_dataset(&instances, NormalizerRegistry::builtin(), &UIDS).unwrap();
        assert_eq!(ds.window_center, vec![200.0]);
        assert_eq!(ds.window_width, vec![300.0]);
        assert_eq!(ds.window_center.len(), ds.window_width.len());
    }

    #[test]
    fn inconsistent_sop_classes_are_rejected() {
        let instances = vec![
            slice("MRImage", 0.0, [0; 4]),
            slice("CTImage", 1.0, [0; 4]),
        ];
        assert!(matches!(
            normalize_to_dataset(&instances, NormalizerRegistry::builtin(), &UIDS),
            Err(Error::InconsistentModality { .. })
        ));
    }

    #[test]
    fn empty_sop_class_is_rejected() {
        let instances = vec![slice("", 0.0, [0; 4]), slice("", 1.0, [0; 4])];
        assert!(matches!(
            normalize_to_dataset(&instances, NormalizerRegistry::builtin(), &UIDS),
            Err(Error::InconsistentModality { .. })
        ));
    }

    #[test]
    fn unknown_modality_is_rejected() {
        let instances = vec![
            slice("USImage", 0.0, [0; 4]),
            slice("USImage", 1.0, [0; 4]),
        ];
        assert!(matches!(
            normalize_to_dataset(&instances, NormalizerRegistry::builtin(), &UIDS),
            Err(Error::UnsupportedModality(sop_class)) if sop_class == "USImage"
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            normalize_to_dataset(&[], NormalizerRegistry::builtin(), &UIDS),
            Err(Error::InsufficientFrames(0))
        ));
    }

    #[test]
    fn enhanced_input_passes_through_the_image_pipeline() {
        let instance = multiframe_instance("EnhancedMRImage", 4);
        let ds =
            normalize_to_dataset(&[instance.clone()], NormalizerRegistry::builtin(), &UIDS)
                .unwrap();
        assert_eq!(ds.sop_class, "EnhancedMRImage");
        assert_eq!(ds.pixel_data, instance.pixel_data);
        assert_eq!(ds.number_of_frames, 4);
        // adopted datasets keep their own per-frame metadata
        assert_eq!(
            ds.per_frame,
            instance.per_frame_groups.unwrap()
        );
    }

    #[test]
    fn registration_objects_are_adopted_verbatim() {
        let mut instance = multiframe_instance("DeformableSpatialRegistration", 2);
        instance.study_id = "STUDY-7".to_string();
        let ds = normalize_to_dataset(
            std::slice::from_ref(&instance),
            NormalizerRegistry::builtin(),
            &UIDS,
        )
        .unwrap();
        assert_eq!(ds.sop_class, "DeformableSpatialRegistration");
        assert_eq!(ds.study_id, "STUDY-7");
    }

    #[test]
    fn multiple_registration_objects_cannot_be_merged() {
        let instances = vec![
            multiframe_instance("DeformableSpatialRegistration", 2),
            multiframe_instance("DeformableSpatialRegistration", 2),
        ];
        assert!(matches!(
            normalize_to_dataset(&instances, NormalizerRegistry::builtin(), &UIDS),
            Err(Error::UnmergeableInstances { count: 2, .. })
        ));
    }
}
