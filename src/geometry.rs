use crate::DecodeError;

/// Number of output columns encoded by one group of four words
pub(crate) const HEXTET_PIXELS: usize = 6;

/// Number of input bytes encoding one group of six columns
pub(crate) const HEXTET_BYTES: usize = 16;

/// Dimensions of a decoded frame in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    pub width: usize,
    pub height: usize,
}

impl Geometry {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of samples in a row of the U and V planes
    pub fn chroma_width(&self) -> usize {
        chroma_width(self.width)
    }

    /// Number of input bytes encoding one row, see [`row_stride`]
    pub fn row_stride(&self) -> Option<usize> {
        row_stride(self.width)
    }
}

/// Number of input bytes encoding a row of `width` pixels.
///
/// 16 bytes encode 6 pixels, the division truncates. Returns `None` if the computation overflows.
#[deny(clippy::arithmetic_side_effects)]
pub fn row_stride(width: usize) -> Option<usize> {
    width.checked_mul(8).map(|bits| bits / 3)
}

/// Number of chroma samples in a row of `width` pixels
pub fn chroma_width(width: usize) -> usize {
    width.div_ceil(2)
}

/// Check that a packet of `packet_len` bytes can hold a `width` x `height` frame.
///
/// Returns the input row stride on success. Only looks at the sizes, no buffer is touched.
#[deny(clippy::arithmetic_side_effects)]
pub fn validate(width: usize, height: usize, packet_len: usize) -> Result<usize, DecodeError> {
    let invalid_dimensions = || {
        tracing::error!(width, height, "dimensions not supported");

        DecodeError::InvalidDimensions { width, height }
    };

    if width <= 1 || height == 0 {
        return Err(invalid_dimensions());
    }

    let stride = row_stride(width).ok_or_else(invalid_dimensions)?;
    let expected = height.checked_mul(stride).ok_or_else(invalid_dimensions)?;

    if packet_len < expected {
        tracing::error!(got = packet_len, expected, "packet too small");

        return Err(DecodeError::PacketTooSmall {
            expected,
            got: packet_len,
        });
    }

    Ok(stride)
}
