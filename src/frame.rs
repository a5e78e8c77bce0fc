use crate::plane_decs::{PlaneDesc, YUV422P16_PLANES};
use crate::{AllocError, Geometry, NEUTRAL};

/// Number of significant bits in every sample of a decoded [`Frame`]
pub const BITS_PER_RAW_SAMPLE: usize = 10;

/// Prediction type of a decoded picture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureType {
    /// Not yet decoded
    Unknown,
    /// Self-contained picture without references to other frames
    Intra,
}

/// Everything that can go wrong when constructing a [`Frame`] from existing planes
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("width or height must not be zero")]
    InvalidDimensions,

    #[error(transparent)]
    BoundsCheck(#[from] BoundsCheckError),
}

#[derive(Debug, thiserror::Error)]
pub enum BoundsCheckError {
    #[error("got invalid number of planes, expected {expected} but got {got}")]
    InvalidNumberOfPlanes { expected: usize, got: usize },

    #[error("invalid stride at plane {plane}, expected it to be at least {minimum}, but got {got}")]
    InvalidStride {
        plane: usize,
        minimum: usize,
        got: usize,
    },

    #[error(
        "invalid plane size at plane {plane}, expected it to be at least {minimum}, but got {got}"
    )]
    InvalidPlaneSize {
        plane: usize,
        minimum: usize,
        got: usize,
    },
}

#[derive(Debug, Clone)]
struct Plane {
    data: Vec<u16>,
    /// Distance between rows in samples
    stride: usize,
}

/// Decoded picture with separate Y, U and V planes, 4:2:2 sub sampling, 16 bits per sample.
///
/// Only the upper [`BITS_PER_RAW_SAMPLE`] bits of a sample carry information.
#[derive(Debug, Clone)]
pub struct Frame {
    planes: [Plane; 3],
    width: usize,
    height: usize,

    key_frame: bool,
    picture_type: PictureType,
}

impl Frame {
    /// Allocate a frame with packed strides, every sample set to [`NEUTRAL`].
    ///
    /// Fails if the width or height is zero, or if the planes cannot be allocated.
    pub fn blank(geometry: Geometry) -> Result<Self, AllocError> {
        let Geometry { width, height } = geometry;

        if width == 0 || height == 0 {
            return Err(AllocError { geometry });
        }

        let alloc = |desc: &PlaneDesc| -> Result<Plane, AllocError> {
            let stride = desc.packed_stride(width);
            let len = stride
                .checked_mul(desc.height(height))
                .ok_or(AllocError { geometry })?;

            let mut data = Vec::new();
            data.try_reserve_exact(len)
                .map_err(|_| AllocError { geometry })?;
            data.resize(len, NEUTRAL);

            Ok(Plane { data, stride })
        };

        let [y, u, v] = &YUV422P16_PLANES;

        Ok(Self {
            planes: [alloc(y)?, alloc(u)?, alloc(v)?],
            width,
            height,
            key_frame: false,
            picture_type: PictureType::Unknown,
        })
    }

    /// Wrap existing Y, U and V planes.
    ///
    /// Strides are given in samples, packed strides are assumed when `None`.
    pub fn from_planes(
        geometry: Geometry,
        planes: Vec<Vec<u16>>,
        strides: Option<Vec<usize>>,
    ) -> Result<Self, FrameError> {
        let Geometry { width, height } = geometry;

        if width == 0 || height == 0 {
            return Err(FrameError::InvalidDimensions);
        }

        let strides = strides.unwrap_or_else(|| {
            YUV422P16_PLANES
                .iter()
                .map(|desc| desc.packed_stride(width))
                .collect()
        });

        let planes: Vec<Plane> = planes
            .into_iter()
            .zip(strides)
            .map(|(data, stride)| Plane { data, stride })
            .collect();
        let got = planes.len();

        let Ok(planes) = <[Plane; 3]>::try_from(planes) else {
            return Err(BoundsCheckError::InvalidNumberOfPlanes { expected: 3, got }.into());
        };

        let this = Self {
            planes,
            width,
            height,
            key_frame: false,
            picture_type: PictureType::Unknown,
        };

        this.bounds_check()?;

        Ok(this)
    }

    /// Check if the planes and strides are valid for the frame's dimensions
    #[deny(clippy::arithmetic_side_effects)]
    pub fn bounds_check(&self) -> Result<(), BoundsCheckError> {
        for (i, (desc, plane)) in YUV422P16_PLANES.iter().zip(&self.planes).enumerate() {
            // Ensure stride is not smaller than the width would allow
            let min_stride = desc.packed_stride(self.width);

            if min_stride > plane.stride {
                return Err(BoundsCheckError::InvalidStride {
                    plane: i,
                    minimum: min_stride,
                    got: plane.stride,
                });
            }

            // Ensure the plane is large enough
            let min_len = plane
                .stride
                .checked_mul(desc.height(self.height))
                .unwrap_or(usize::MAX);

            if min_len > plane.data.len() {
                return Err(BoundsCheckError::InvalidPlaneSize {
                    plane: i,
                    minimum: min_len,
                    got: plane.data.len(),
                });
            }
        }

        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.width, self.height)
    }

    /// Returns an iterator yielding the Y, U and V plane with their associated stride in samples
    pub fn planes(&self) -> impl Iterator<Item = (&[u16], usize)> {
        self.planes
            .iter()
            .map(|plane| (plane.data.as_slice(), plane.stride))
    }

    /// Distance between two rows of the given plane in bytes
    ///
    /// # Panics
    ///
    /// If `plane` is not 0 (Y), 1 (U) or 2 (V)
    pub fn stride_bytes(&self, plane: usize) -> usize {
        self.planes[plane].stride * size_of::<u16>()
    }

    /// Returns an iterator over the rows of a plane, each row trimmed to the plane's width
    ///
    /// # Panics
    ///
    /// If `plane` is not 0 (Y), 1 (U) or 2 (V)
    pub fn rows(&self, plane: usize) -> impl Iterator<Item = &[u16]> {
        let desc = YUV422P16_PLANES[plane];
        let Plane { data, stride } = &self.planes[plane];
        let width = desc.width(self.width);

        data.chunks(*stride)
            .take(desc.height(self.height))
            .map(move |row| &row[..width])
    }

    /// Returns an iterator over the rows of all three planes, each row trimmed to its plane's width
    pub(crate) fn rows_mut(
        &mut self,
    ) -> impl Iterator<Item = (&mut [u16], &mut [u16], &mut [u16])> {
        let width = self.width;
        let height = self.height;
        let chroma_width = crate::chroma_width(width);
        let [y, u, v] = &mut self.planes;

        let y = y.data.chunks_mut(y.stride).map(move |row| &mut row[..width]);
        let u = u.data.chunks_mut(u.stride).map(move |row| &mut row[..chroma_width]);
        let v = v.data.chunks_mut(v.stride).map(move |row| &mut row[..chroma_width]);

        y.zip(u)
            .zip(v)
            .take(height)
            .map(|((y, u), v)| (y, u, v))
    }

    /// Set every sample of every plane to `value`
    pub(crate) fn fill(&mut self, value: u16) {
        for plane in &mut self.planes {
            plane.data.fill(value);
        }
    }

    /// Whether this frame can be decoded without any other frame
    pub fn key_frame(&self) -> bool {
        self.key_frame
    }

    pub fn picture_type(&self) -> PictureType {
        self.picture_type
    }

    pub(crate) fn set_intra(&mut self) {
        self.key_frame = true;
        self.picture_type = PictureType::Intra;
    }

    pub(crate) fn reset_picture(&mut self) {
        self.key_frame = false;
        self.picture_type = PictureType::Unknown;
    }

    /// Returns the Y, U and V planes
    pub fn into_planes(self) -> [Vec<u16>; 3] {
        self.planes.map(|plane| plane.data)
    }
}
