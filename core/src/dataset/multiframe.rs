use byteorder::{LittleEndian, ReadBytesExt};
use ndarray::{Array3, ShapeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::groups::{
    DimensionIndex, DimensionOrganization, PerFrameFunctionalGroups, ReferencedSeries,
    SharedFunctionalGroups,
};
use super::instance::PixelRepresentation;

#[derive(Error, Debug)]
pub enum FrameAccessError {
    #[error("frame index {index} out of range ({frames} frames)")]
    OutOfRange { index: usize, frames: usize },

    #[error("pixel buffer of {len} bytes does not hold {frames} frames of {frame_len} bytes")]
    RaggedBuffer {
        len: usize,
        frames: usize,
        frame_len: usize,
    },

    #[error("sample decode failed: {0}")]
    Decode(#[from] std::io::Error),

    #[error("reordering samples resulted in shape error: {0}")]
    Shape(#[from] ShapeError),
}

/// The normalized multiframe aggregate. Created, fully populated and
/// returned within a single normalization call; never exposed partially
/// built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiframeDataset {
    pub sop_class: String,
    pub number_of_frames: usize,

    pub rows: u16,
    pub columns: u16,
    pub bits_allocated: u16,
    pub pixel_representation: PixelRepresentation,

    pub rescale_slope: f32,
    pub rescale_intercept: f32,

    pub study_id: String,
    pub laterality: Option<String>,
    pub presentation_lut_shape: String,
    pub body_part_examined: Option<String>,
    pub image_type: Vec<String>,

    /// Equal-length and non-empty once normalization completes.
    pub window_center: Vec<f32>,
    pub window_width: Vec<f32>,

    /// One owned contiguous little-endian sample arena. Frame `i` occupies
    /// `[i * frame_len, (i + 1) * frame_len)` and corresponds to
    /// `per_frame[i]`.
    pub pixel_data: Vec<u8>,

    /// Always `Some` for image-normalized results.
    pub shared: Option<SharedFunctionalGroups>,
    pub per_frame: Vec<PerFrameFunctionalGroups>,

    pub dimension_organization: Option<DimensionOrganization>,
    pub dimension_index: Vec<DimensionIndex>,
    pub referenced_series: Option<ReferencedSeries>,
}

impl MultiframeDataset {
    /// Byte length of a single frame slot.
    pub fn frame_len(&self) -> usize {
        self.rows as usize * self.columns as usize * (self.bits_allocated as usize / 8)
    }

    pub fn frame_bytes(&self, index: usize) -> Result<&[u8], FrameAccessError> {
        let frame_len = self.frame_len();
        if self.pixel_data.len() != self.number_of_frames * frame_len {
            return Err(FrameAccessError::RaggedBuffer {
                len: self.pixel_data.len(),
                frames: self.number_of_frames,
                frame_len,
            });
        }
        if index >= self.number_of_frames {
            return Err(FrameAccessError::OutOfRange {
                index,
                frames: self.number_of_frames,
            });
        }
        Ok(&self.pixel_data[index * frame_len..(index + 1) * frame_len])
    }

    /// Decodes frame `index` into its raw 16-bit stored values.
    pub fn frame_samples(&self, index: usize) -> Result<Vec<u16>, FrameAccessError> {
        let mut bytes = self.frame_bytes(index)?;
        let mut samples = vec![0u16; bytes.len() / 2];
        bytes.read_u16_into::<LittleEndian>(&mut samples)?;
        Ok(samples)
    }

    /// Decodes the whole buffer into a frames x rows x columns array for the
    /// volumetric consumer.
    pub fn sample_array(&self) -> Result<Array3<u16>, FrameAccessError> {
        let frame_len = self.frame_len();
        if self.pixel_data.len() != self.number_of_frames * frame_len {
            return Err(FrameAccessError::RaggedBuffer {
                len: self.pixel_data.len(),
                frames: self.number_of_frames,
                frame_len,
            });
        }
        let mut bytes = &self.pixel_data[..];
        let mut samples = vec![0u16; bytes.len() / 2];
        bytes.read_u16_into::<LittleEndian>(&mut samples)?;
        Ok(Array3::from_shape_vec(
            (
                self.number_of_frames,
                self.rows as usize,
                self.columns as usize,
            ),
            samples,
        )?)
    }
}
