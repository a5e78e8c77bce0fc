use crate::{
    CodecTag, DecodeError, Frame, FramePool, Geometry, NEUTRAL, ReusePool, decode_row, validate,
};

/// Stream parameters a [`Decoder`] is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    pub width: usize,
    pub height: usize,

    /// Codec tag of the stream, if known
    pub codec_tag: Option<CodecTag>,
}

impl DecoderConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            codec_tag: None,
        }
    }

    pub fn with_codec_tag(mut self, tag: CodecTag) -> Self {
        self.codec_tag = Some(tag);
        self
    }

    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.width, self.height)
    }
}

/// Result of a successful [`Decoder::decode`] call
#[derive(Debug)]
pub struct Decoded<'a> {
    pub frame: &'a Frame,

    /// Number of packet bytes used, always the whole packet
    pub bytes_consumed: usize,
}

/// Decode a packet into an existing frame.
///
/// The frame must have the dimensions of the encoded picture. Every row is decoded from exactly
/// [`row_stride`](crate::row_stride) bytes of the packet, trailing packet bytes are ignored. On success the frame
/// is marked as an intra key frame and the packet length is returned.
pub fn decode_packet(packet: &[u8], frame: &mut Frame) -> Result<usize, DecodeError> {
    let Geometry { width, height } = frame.geometry();

    let stride = validate(width, height, packet.len())?;

    frame.reset_picture();

    for ((y, u, v), line) in frame.rows_mut().zip(packet.chunks_exact(stride)) {
        decode_row(line, width, y, u, v);
    }

    frame.set_intra();

    Ok(packet.len())
}

/// Stateful 012v decoder holding on to the most recently decoded frame
///
/// Frames are taken from a [`FramePool`]. The decoder owns at most one frame at a time, it is returned to the pool
/// before the next one is acquired and when the decoder is dropped.
pub struct Decoder<P: FramePool = ReusePool> {
    config: DecoderConfig,
    pool: P,
    frame: Option<Frame>,
}

impl Decoder<ReusePool> {
    pub fn new(config: DecoderConfig) -> Self {
        Self::with_pool(config, ReusePool::new())
    }
}

impl<P: FramePool> Decoder<P> {
    pub fn with_pool(config: DecoderConfig, pool: P) -> Self {
        if let Some(tag) = config.codec_tag.filter(|tag| tag.has_alpha()) {
            tracing::warn!(
                %tag,
                "transparency is not decoded, samples with actual transparency are needed"
            );
        }

        Self {
            config,
            pool,
            frame: None,
        }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a packet holding exactly one picture.
    ///
    /// The previously decoded frame is released back to the pool once the packet is known to be valid.
    pub fn decode(&mut self, packet: &[u8]) -> Result<Decoded<'_>, DecodeError> {
        let geometry = self.config.geometry();

        validate(geometry.width, geometry.height, packet.len())?;

        self.release_current();

        let mut frame = self.pool.acquire(geometry)?;

        if frame.geometry() != geometry {
            let got = frame.geometry();
            self.pool.release(frame);

            return Err(DecodeError::FrameMismatch {
                expected: geometry,
                got,
            });
        }

        frame.fill(NEUTRAL);

        let bytes_consumed = match decode_packet(packet, &mut frame) {
            Ok(n) => n,
            Err(e) => {
                self.pool.release(frame);
                return Err(e);
            }
        };

        let frame = self.frame.insert(frame);

        Ok(Decoded {
            frame,
            bytes_consumed,
        })
    }

    /// The most recently decoded frame, if the decoder still holds it
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Take ownership of the most recently decoded frame.
    ///
    /// The frame can be handed back with [`release_frame`](Self::release_frame) once it is no longer needed.
    pub fn take_frame(&mut self) -> Option<Frame> {
        self.frame.take()
    }

    /// Return a frame obtained from [`take_frame`](Self::take_frame) to the pool
    pub fn release_frame(&mut self, frame: Frame) {
        self.pool.release(frame);
    }

    pub fn pool(&self) -> &P {
        &self.pool
    }

    fn release_current(&mut self) {
        if let Some(frame) = self.frame.take() {
            tracing::debug!("releasing previous frame");

            self.pool.release(frame);
        }
    }
}

impl<P: FramePool> Drop for Decoder<P> {
    fn drop(&mut self) {
        self.release_current();
    }
}
