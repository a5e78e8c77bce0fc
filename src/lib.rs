//! Decoder for 012v, uncompressed 4:2:2 video with 10 bits per sample.
//!
//! Every little endian 32 bit word of a 012v packet holds three 10 bit samples, four words encode six pixels.
//! Decoding produces separate Y, U and V planes with 16 bits per sample, the 10 significant bits stored in the
//! upper bits.
//!
//! ```
//! use ezk_zero12v::{Decoder, DecoderConfig, row_stride};
//!
//! let (width, height) = (6, 2);
//! let packet = vec![0u8; row_stride(width).unwrap() * height];
//!
//! let mut decoder = Decoder::new(DecoderConfig::new(width, height));
//! let decoded = decoder.decode(&packet).unwrap();
//!
//! assert_eq!(decoded.bytes_consumed, packet.len());
//! assert!(decoded.frame.key_frame());
//! ```

pub use codec::{CODEC, CodecDescriptor, CodecTag};
pub use decoder::{Decoded, Decoder, DecoderConfig, decode_packet};
pub use frame::{BITS_PER_RAW_SAMPLE, BoundsCheckError, Frame, FrameError, PictureType};
pub use geometry::{Geometry, chroma_width, row_stride, validate};
pub use pool::{AllocError, FramePool, ReusePool};
pub use unpack::{NEUTRAL, decode_row, unpack_word};

mod codec;
mod decoder;
mod frame;
mod geometry;
mod plane_decs;
mod pool;
mod unpack;

/// Everything that can go wrong when decoding a packet
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("dimensions {width}x{height} not supported")]
    InvalidDimensions { width: usize, height: usize },

    #[error("packet too small: {got} bytes instead of {expected}")]
    PacketTooSmall { expected: usize, got: usize },

    #[error(transparent)]
    Alloc(#[from] AllocError),

    #[error("frame pool returned a {}x{} frame, expected {}x{}", .got.width, .got.height, .expected.width, .expected.height)]
    FrameMismatch { expected: Geometry, got: Geometry },
}

impl DecodeError {
    /// Whether the packet or the stream parameters are at fault, as opposed to the frame supply
    pub fn is_invalid_data(&self) -> bool {
        matches!(
            self,
            DecodeError::InvalidDimensions { .. } | DecodeError::PacketTooSmall { .. }
        )
    }
}
