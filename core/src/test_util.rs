//! Synthetic instances for tests.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::dataset::groups::{
    PerFrameFunctionalGroups, PixelMeasures, PlaneOrientation, PlanePosition,
    SharedFunctionalGroups,
};
use crate::dataset::instance::SourceInstance;
use crate::geom::{Orientation, Vec3F};
use crate::normalize::UidGenerator;

pub(crate) struct FixedUids(pub &'static str);

impl UidGenerator for FixedUids {
    fn generate_uid(&self) -> String {
        self.0.to_string()
    }
}

fn axial_orientation() -> Orientation {
    Orientation::new(Vec3F::new(1.0, 0.0, 0.0), Vec3F::new(0.0, 1.0, 0.0))
}

fn encode_samples(samples: &[u16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        bytes.write_u16::<LittleEndian>(*sample).unwrap();
    }
    bytes
}

/// A 2x2 axial slice at the given z position.
pub(crate) fn slice(sop_class: &str, z: f32, samples: [u16; 4]) -> SourceInstance {
    SourceInstance {
        sop_class: sop_class.to_string(),
        sop_instance_uid: format!("1.2.3.4.{}", (z * 10.0) as i64),
        series_instance_uid: "1.2.3.4".to_string(),
        rows: 2,
        columns: 2,
        bits_allocated: 16,
        position: Some(Vec3F::new(0.0, 0.0, z)),
        orientation: Some(axial_orientation()),
        pixel_spacing: Some([0.5, 0.5]),
        pixel_data: encode_samples(&samples),
        ..Default::default()
    }
}

/// An instance that is already a multiframe object, carrying its own
/// functional groups and an N-frame 2x2 buffer.
pub(crate) fn multiframe_instance(sop_class: &str, frames: usize) -> SourceInstance {
    let samples: Vec<u16> = (0..frames * 4).map(|i| i as u16).collect();
    SourceInstance {
        sop_class: sop_class.to_string(),
        sop_instance_uid: "1.2.3.4.99".to_string(),
        series_instance_uid: "1.2.3.4".to_string(),
        rows: 2,
        columns: 2,
        bits_allocated: 16,
        pixel_data: encode_samples(&samples),
        number_of_frames: Some(frames),
        shared_groups: Some(SharedFunctionalGroups {
            plane_orientation: PlaneOrientation {
                image_orientation_patient: axial_orientation(),
            },
            pixel_measures: PixelMeasures {
                pixel_spacing: [0.5, 0.5],
                spacing_between_slices: 1.0,
            },
            pixel_value_transformation: None,
            frame_anatomy: None,
            frame_type: None,
        }),
        per_frame_groups: Some(
            (0..frames)
                .map(|i| PerFrameFunctionalGroups {
                    plane_position: PlanePosition {
                        image_position_patient: Vec3F::new(0.0, 0.0, i as f32),
                    },
                    frame_voi_lut: None,
                    frame_content: None,
                })
                .collect(),
        ),
        ..Default::default()
    }
}
