use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::dataset::groups::ImageFrameType;
use crate::dataset::multiframe::MultiframeDataset;

use super::err::Error;

/// SOP classes whose instances already carry frames and functional groups.
pub const MULTIFRAME_SOP_CLASSES: [&str; 5] = [
    "EnhancedMRImage",
    "EnhancedCTImage",
    "EnhancedUSImage",
    "EnhancedPETImage",
    "Segmentation",
];

/// Four-element image-type classification used when the input carries none
/// or a malformed one.
pub const DEFAULT_IMAGE_TYPE: [&str; 4] = ["ORIGINAL", "PRIMARY", "OTHER", "NONE"];

/// Frame-type shared group a modality injects after the generic pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTypeSpec {
    Mr,
}

impl FrameTypeSpec {
    pub(crate) fn inject(self, ds: &mut MultiframeDataset) {
        if ds.image_type.len() != DEFAULT_IMAGE_TYPE.len() {
            ds.image_type = DEFAULT_IMAGE_TYPE.iter().map(|s| s.to_string()).collect();
        }
        let frame_type = match self {
            FrameTypeSpec::Mr => ImageFrameType {
                frame_type: ds.image_type.clone(),
                pixel_presentation: "MONOCHROME".to_string(),
                volumetric_properties: "VOLUME".to_string(),
                volume_based_calculation_technique: "NONE".to_string(),
                complex_image_component: "MAGNITUDE".to_string(),
                acquisition_contrast: "UNKNOWN".to_string(),
            },
        };
        if let Some(shared) = ds.shared.as_mut() {
            shared.frame_type = Some(frame_type);
        }
    }
}

/// How a recognized SOP class is normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variant {
    /// Generic image pipeline with an optional enhanced-form rename and
    /// frame-type injection.
    Image(ImageSpec),
    /// Object types that arrive already normalized. Single instance only;
    /// merging several of them is not supported.
    PassThrough,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSpec {
    pub enhanced_sop_class: Option<&'static str>,
    pub frame_type: Option<FrameTypeSpec>,
}

/// Explicit modality table mapping recognized SOP classes to normalizer
/// variants. Injectable so hosts can restrict or extend the supported set;
/// `new` validates the table up front.
#[derive(Debug, Clone)]
pub struct NormalizerRegistry {
    entries: HashMap<&'static str, Variant>,
    multiframe_classes: HashSet<&'static str>,
}

impl NormalizerRegistry {
    pub fn new(
        entries: impl IntoIterator<Item = (&'static str, Variant)>,
        multiframe_classes: impl IntoIterator<Item = &'static str>,
    ) -> Result<Self, Error> {
        let registry = Self {
            entries: entries.into_iter().collect(),
            multiframe_classes: multiframe_classes.into_iter().collect(),
        };
        registry.validate()?;
        Ok(registry)
    }

    /// The built-in modality table. Its validity is pinned by a test below.
    pub fn builtin() -> &'static NormalizerRegistry {
        &BUILTIN
    }

    /// Every enhanced-form rename must point at a recognized multiframe
    /// class, otherwise renamed outputs could never be re-normalized.
    pub fn validate(&self) -> Result<(), Error> {
        for (sop_class, variant) in &self.entries {
            if let Variant::Image(spec) = variant {
                if let Some(target) = spec.enhanced_sop_class {
                    if !self.multiframe_classes.contains(target) {
                        return Err(Error::InvalidRegistryEntry {
                            sop_class: sop_class.to_string(),
                            target: target.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, sop_class: &str) -> Option<&Variant> {
        self.entries.get(sop_class)
    }

    pub fn is_multiframe(&self, sop_class: &str) -> bool {
        self.multiframe_classes.contains(sop_class)
    }
}

static BUILTIN: Lazy<NormalizerRegistry> = Lazy::new(|| {
    let enhanced = |target: &'static str| {
        Variant::Image(ImageSpec {
            enhanced_sop_class: Some(target),
            frame_type: None,
        })
    };
    let generic = Variant::Image(ImageSpec::default());
    let entries = [
        ("CTImage", enhanced("EnhancedCTImage")),
        (
            "MRImage",
            Variant::Image(ImageSpec {
                enhanced_sop_class: Some("EnhancedMRImage"),
                frame_type: Some(FrameTypeSpec::Mr),
            }),
        ),
        ("EnhancedMRImage", generic.clone()),
        ("EnhancedUSVolume", generic.clone()),
        ("PETImage", enhanced("EnhancedPETImage")),
        ("PositronEmissionTomographyImage", enhanced("EnhancedPETImage")),
        ("Segmentation", generic),
        ("DeformableSpatialRegistration", Variant::PassThrough),
    ];
    NormalizerRegistry {
        entries: entries.into_iter().collect(),
        multiframe_classes: MULTIFRAME_SOP_CLASSES.into_iter().collect(),
    }
});
