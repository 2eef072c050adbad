use derive_more::{Add, Constructor, Mul, Sub};
use serde::{Deserialize, Serialize};

/// Patient-space vector in millimeters.
#[derive(
    Add, Sub, Mul, Constructor, Default, PartialEq, Debug, Copy, Clone, Serialize, Deserialize,
)]
pub struct Vec3F {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3F {
    pub const ZERO: Vec3F = Vec3F {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn dot(self, other: Vec3F) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3F) -> Vec3F {
        Vec3F {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn norm(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Vec3F {
    fn from(v: [f32; 3]) -> Self {
        Vec3F::new(v[0], v[1], v[2])
    }
}

impl From<Vec3F> for [f32; 3] {
    fn from(v: Vec3F) -> Self {
        [v.x, v.y, v.z]
    }
}

/// Row and column direction cosines of the imaging plane
/// (ImageOrientationPatient split into its two 3-vectors).
#[derive(Constructor, PartialEq, Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Orientation {
    pub row: Vec3F,
    pub column: Vec3F,
}

impl Orientation {
    /// Direction perpendicular to the imaging plane, used to order frames
    /// into a volume. Not normalized.
    pub fn scan_axis(&self) -> Vec3F {
        self.row.cross(self.column)
    }

    pub fn is_finite(&self) -> bool {
        self.row.is_finite() && self.column.is_finite()
    }
}
