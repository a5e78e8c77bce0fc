use std::fmt;

/// Four character code identifying the codec of a stream inside a container
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodecTag(pub [u8; 4]);

impl CodecTag {
    /// Opaque 012v
    pub const ZERO12V: CodecTag = CodecTag(*b"012v");

    /// 012v with an additional alpha channel, decoded without transparency
    pub const A12V: CodecTag = CodecTag(*b"a12v");

    /// Build a tag from its little endian integer representation as stored in RIFF style containers
    pub fn from_u32_le(tag: u32) -> Self {
        Self(tag.to_le_bytes())
    }

    pub fn to_u32_le(self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    /// Whether the stream carries transparency which this decoder ignores
    pub fn has_alpha(self) -> bool {
        self == Self::A12V
    }
}

impl fmt::Debug for CodecTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CodecTag({self})")
    }
}

impl fmt::Display for CodecTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "[{b}]")?;
            }
        }

        Ok(())
    }
}

/// Static description of a decoder, everything a host needs to register it
#[derive(Debug, Clone, Copy)]
pub struct CodecDescriptor {
    pub name: &'static str,
    pub long_name: &'static str,
    pub tags: &'static [CodecTag],

    /// Significant bits per output sample
    pub bits_per_raw_sample: usize,

    /// Decodes into frames supplied by a [`FramePool`](crate::FramePool)
    pub direct_rendering: bool,

    /// Every frame is a key frame
    pub intra_only: bool,
}

impl CodecDescriptor {
    /// Whether a stream with the given tag can be decoded
    pub fn supports(&self, tag: CodecTag) -> bool {
        self.tags.contains(&tag)
    }
}

pub const CODEC: CodecDescriptor = CodecDescriptor {
    name: "012v",
    long_name: "Uncompressed 4:2:2 10-bit",
    tags: &[CodecTag::ZERO12V, CodecTag::A12V],
    bits_per_raw_sample: crate::BITS_PER_RAW_SAMPLE,
    direct_rendering: true,
    intra_only: true,
};
