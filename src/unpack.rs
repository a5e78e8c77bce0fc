//! Per row unpacking of 012v words into Y, U and V samples

use crate::geometry::{HEXTET_BYTES, HEXTET_PIXELS, chroma_width};

/// Placeholder for samples no input data reaches
pub const NEUTRAL: u16 = 0x8000;

/// Mask selecting the 10 significant bits of an unpacked sample
pub(crate) const SAMPLE_MASK: u16 = 0xFFC0;

const HEXTET_CHROMA: usize = HEXTET_PIXELS / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Y,
    U,
    V,
}

/// Channel each of the three fields of the four words in a hextet belongs to
const ROTATION: [[Channel; 3]; 4] = {
    use Channel::*;

    [[U, Y, V], [Y, U, Y], [V, Y, U], [Y, V, Y]]
};

/// Split a little endian word into its three 10 bit fields, each shifted into the high bits of a `u16`.
///
/// Fields are returned in order of increasing bit position.
#[inline(always)]
pub fn unpack_word(word: u32) -> [u16; 3] {
    let mask = u32::from(SAMPLE_MASK);

    [
        ((word << 6) & mask) as u16,
        ((word >> 4) & mask) as u16,
        ((word >> 14) & mask) as u16,
    ]
}

/// Samples of a hextet that does not fit into the row (or the remaining input)
struct ScratchRow {
    y: [u16; HEXTET_PIXELS],
    u: [u16; HEXTET_CHROMA],
    v: [u16; HEXTET_CHROMA],
}

impl ScratchRow {
    fn new() -> Self {
        Self {
            y: [NEUTRAL; HEXTET_PIXELS],
            u: [NEUTRAL; HEXTET_CHROMA],
            v: [NEUTRAL; HEXTET_CHROMA],
        }
    }

    fn cursor(&mut self) -> HextetCursor<'_> {
        HextetCursor::new(&mut self.y, &mut self.u, &mut self.v)
    }
}

/// Where the samples of the current hextet go
enum Target {
    /// Directly into the planes at the given luma column
    Planes(usize),
    Scratch,
}

/// Sequential writer over the samples of a single hextet
struct HextetCursor<'a> {
    y: &'a mut [u16],
    u: &'a mut [u16],
    v: &'a mut [u16],

    y_pos: usize,
    u_pos: usize,
    v_pos: usize,
}

impl<'a> HextetCursor<'a> {
    fn new(y: &'a mut [u16], u: &'a mut [u16], v: &'a mut [u16]) -> Self {
        Self {
            y,
            u,
            v,
            y_pos: 0,
            u_pos: 0,
            v_pos: 0,
        }
    }

    #[inline(always)]
    fn push(&mut self, channel: Channel, sample: u16) {
        let (plane, pos) = match channel {
            Channel::Y => (&mut *self.y, &mut self.y_pos),
            Channel::U => (&mut *self.u, &mut self.u_pos),
            Channel::V => (&mut *self.v, &mut self.v_pos),
        };

        plane[*pos] = sample;
        *pos += 1;
    }
}

/// Decode a single row of `width` pixels from `line` into the given plane rows.
///
/// `line` is the input of a single row, usually exactly [`row_stride`](crate::row_stride) bytes long. A row which
/// runs out of input is not an error, samples no data reaches are set to [`NEUTRAL`].
///
/// Returns the number of bytes read from `line`.
///
/// # Panics
///
/// If `y` is shorter than `width` or `u`/`v` are shorter than `ceil(width / 2)`
pub fn decode_row(line: &[u8], width: usize, y: &mut [u16], u: &mut [u16], v: &mut [u16]) -> usize {
    let chroma_width = chroma_width(width);

    let y = &mut y[..width];
    let u = &mut u[..chroma_width];
    let v = &mut v[..chroma_width];

    let mut scratch = ScratchRow::new();
    let mut pos = 0;
    let mut x = 0;

    'row: while x < width {
        let columns_left = width - x;

        let target = if columns_left < HEXTET_PIXELS || line.len() - pos < HEXTET_BYTES {
            Target::Scratch
        } else {
            Target::Planes(x)
        };

        let mut cursor = match target {
            Target::Planes(x) => {
                let c = x / 2;

                HextetCursor::new(
                    &mut y[x..x + HEXTET_PIXELS],
                    &mut u[c..c + HEXTET_CHROMA],
                    &mut v[c..c + HEXTET_CHROMA],
                )
            }
            Target::Scratch => scratch.cursor(),
        };

        for channels in ROTATION {
            let Some(word) = line[pos..].first_chunk::<4>() else {
                break 'row;
            };
            pos += 4;

            let fields = unpack_word(u32::from_le_bytes(*word));

            for (channel, sample) in channels.into_iter().zip(fields) {
                cursor.push(channel, sample);
            }
        }

        if columns_left < HEXTET_PIXELS {
            break;
        }

        x += HEXTET_PIXELS;
    }

    if x < width {
        let n = (width - x).min(HEXTET_PIXELS);
        let c = x / 2;
        let cn = n.div_ceil(2);

        tracing::trace!(x, n, consumed = pos, "row tail taken from scratch");

        y[x..x + n].copy_from_slice(&scratch.y[..n]);
        u[c..c + cn].copy_from_slice(&scratch.u[..cn]);
        v[c..c + cn].copy_from_slice(&scratch.v[..cn]);
    }

    pos
}
