use crate::{Frame, Geometry};

/// The pool failed to supply storage for a frame
#[derive(Debug, thiserror::Error)]
#[error("failed to allocate a {}x{} frame", .geometry.width, .geometry.height)]
pub struct AllocError {
    pub geometry: Geometry,
}

/// Supplier of output frames for a [`Decoder`](crate::Decoder)
///
/// Frames returned by [`acquire`](FramePool::acquire) must match the requested geometry, their content is
/// irrelevant since the decoder clears them before use.
pub trait FramePool {
    fn acquire(&mut self, geometry: Geometry) -> Result<Frame, AllocError>;

    /// Hand back a frame which is no longer in use
    fn release(&mut self, frame: Frame);
}

impl<P: FramePool + ?Sized> FramePool for &mut P {
    fn acquire(&mut self, geometry: Geometry) -> Result<Frame, AllocError> {
        <P as FramePool>::acquire(self, geometry)
    }

    fn release(&mut self, frame: Frame) {
        <P as FramePool>::release(self, frame)
    }
}

impl<P: FramePool + ?Sized> FramePool for Box<P> {
    fn acquire(&mut self, geometry: Geometry) -> Result<Frame, AllocError> {
        (**self).acquire(geometry)
    }

    fn release(&mut self, frame: Frame) {
        (**self).release(frame)
    }
}

/// [`FramePool`] keeping a bounded number of released frames around for reuse
#[derive(Debug)]
pub struct ReusePool {
    free: Vec<Frame>,
    capacity: usize,
}

impl ReusePool {
    pub const DEFAULT_CAPACITY: usize = 2;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a pool which keeps at most `capacity` released frames.
    ///
    /// A capacity of zero disables reuse.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            free: Vec::new(),
            capacity,
        }
    }

    /// Number of released frames currently kept for reuse
    pub fn idle(&self) -> usize {
        self.free.len()
    }
}

impl Default for ReusePool {
    fn default() -> Self {
        Self::new()
    }
}

impl FramePool for ReusePool {
    fn acquire(&mut self, geometry: Geometry) -> Result<Frame, AllocError> {
        if let Some(i) = self.free.iter().position(|f| f.geometry() == geometry) {
            tracing::debug!(
                width = geometry.width,
                height = geometry.height,
                "reusing released frame"
            );

            return Ok(self.free.swap_remove(i));
        }

        tracing::debug!(
            width = geometry.width,
            height = geometry.height,
            "allocating frame"
        );

        Frame::blank(geometry)
    }

    fn release(&mut self, frame: Frame) {
        if self.capacity == 0 {
            return;
        }

        // Evict the oldest frame
        if self.free.len() >= self.capacity {
            self.free.remove(0);
        }

        self.free.push(frame);
    }
}
