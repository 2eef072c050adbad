use tracing::debug;

use crate::dataset::instance::SourceInstance;
use crate::geom::Vec3F;

use super::err::{Error, GeometryErrorKind};

/// Cross products below this norm do not define a usable scan axis.
const MIN_AXIS_NORM: f32 = 1e-6;

/// One instance paired with its signed projection onto the scan axis.
#[derive(Debug)]
pub(crate) struct SortedInstance<'a> {
    pub distance: f32,
    /// Position in the original input sequence.
    pub index: usize,
    pub position: Vec3F,
    pub instance: &'a SourceInstance,
}

fn validated_position(index: usize, instance: &SourceInstance) -> Result<Vec3F, Error> {
    let position = instance.position.ok_or(Error::MalformedGeometry {
        index,
        kind: GeometryErrorKind::MissingPosition,
    })?;
    if !position.is_finite() {
        return Err(Error::MalformedGeometry {
            index,
            kind: GeometryErrorKind::NonFinite,
        });
    }
    Ok(position)
}

/// Orders instances by strictly decreasing signed distance along the scan
/// axis of the first instance. Tie order falls back to input order (stable
/// sort), but callers must not rely on it.
pub(crate) fn sort_by_scan_axis(
    instances: &[SourceInstance],
) -> Result<Vec<SortedInstance<'_>>, Error> {
    let reference = instances.first().ok_or(Error::InsufficientFrames(0))?;

    let mut sorted = Vec::with_capacity(instances.len());
    for (index, instance) in instances.iter().enumerate() {
        let orientation = instance.orientation.ok_or(Error::MalformedGeometry {
            index,
            kind: GeometryErrorKind::MissingOrientation,
        })?;
        if !orientation.is_finite() {
            return Err(Error::MalformedGeometry {
                index,
                kind: GeometryErrorKind::NonFinite,
            });
        }
        let position = validated_position(index, instance)?;
        sorted.push(SortedInstance {
            distance: 0.0,
            index,
            position,
            instance,
        });
    }

    // The scan axis comes from the first input instance; per-instance
    // orientation only has to exist and be finite.
    let scan_axis = reference
        .orientation
        .ok_or(Error::MalformedGeometry {
            index: 0,
            kind: GeometryErrorKind::MissingOrientation,
        })?
        .scan_axis();
    if scan_axis.norm() < MIN_AXIS_NORM {
        return Err(Error::MalformedGeometry {
            index: 0,
            kind: GeometryErrorKind::DegenerateOrientation,
        });
    }
    debug!(?scan_axis, "derived scan axis");

    let reference_position = sorted[0].position;
    for entry in &mut sorted {
        entry.distance = (entry.position - reference_position).dot(scan_axis);
    }
    sorted.sort_by(|a, b| b.distance.total_cmp(&a.distance));
    Ok(sorted)
}
