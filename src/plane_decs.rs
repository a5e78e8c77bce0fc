/// Description for a Plane which can be used to implement bounds checks, stride calculation and buffer sizes.
///
/// Not used by the unpacker itself, only by the frame and pool utility functions.
#[derive(Clone, Copy)]
pub(crate) struct PlaneDesc {
    pub(crate) width_op: Op,
    pub(crate) height_op: Op,
}

impl PlaneDesc {
    /// Number of samples in a row of this plane
    pub(crate) fn width(&self, width: usize) -> usize {
        self.width_op.op(width)
    }

    pub(crate) fn height(&self, height: usize) -> usize {
        self.height_op.op(height)
    }

    /// Stride (in samples) of a packed plane
    pub(crate) fn packed_stride(&self, width: usize) -> usize {
        self.width(width)
    }
}

/// Plane's number of samples in relation to width / height
#[derive(Clone, Copy)]
pub(crate) enum Op {
    DivCeil(usize),
    Identity,
}

impl Op {
    pub(crate) fn op(self, lhs: usize) -> usize {
        match self {
            Op::DivCeil(rhs) => lhs.div_ceil(rhs),
            Op::Identity => lhs,
        }
    }
}

/// Y, U and V planes, 4:2:2 sub sampling, 16 bits per sample
///
/// Chroma planes round up, an odd width still gets a chroma sample for its last column.
pub(crate) const YUV422P16_PLANES: [PlaneDesc; 3] = [
    PlaneDesc {
        width_op: Op::Identity,
        height_op: Op::Identity,
    },
    PlaneDesc {
        width_op: Op::DivCeil(2),
        height_op: Op::Identity,
    },
    PlaneDesc {
        width_op: Op::DivCeil(2),
        height_op: Op::Identity,
    },
];
