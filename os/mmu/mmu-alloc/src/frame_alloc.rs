//! # Physical Frame Allocator
//!
//! FIFO free list of physical frames. Frames are enqueued in ascending order
//! on construction and handed out from the head, so a fresh allocator returns
//! `PFN 0, 1, 2, …`. Released frames go to the tail.

use crate::ring::IndexRing;
use mmu_addresses::{FrameNumber, MAX_FRAMES};
use mmu_vmem::FrameAlloc;

pub struct FifoFrameAlloc {
    free: IndexRing<FrameNumber>,
}

impl FifoFrameAlloc {
    /// Allocator over frames `0..count`. `count` is clamped to the PFN range.
    #[must_use]
    pub fn new(count: usize) -> Self {
        let count = count.min(MAX_FRAMES);
        let mut free = IndexRing::with_capacity(count);
        for frame in (0..count).map_while(FrameNumber::from_index) {
            // Capacity equals `count`, so this cannot be full.
            let _ = free.push_back(frame);
        }
        Self { free }
    }

    /// Take the oldest free frame.
    pub fn acquire(&mut self) -> Option<FrameNumber> {
        let frame = self.free.pop_front();
        log::trace!("acquire frame -> {frame:?}");
        frame
    }

    /// Return a frame to the tail of the free list.
    pub fn release(&mut self, frame: FrameNumber) {
        debug_assert!(
            self.free.iter().all(|f| f != frame),
            "{frame:?} released twice"
        );
        if self.free.push_back(frame).is_err() {
            log::error!("frame free list overflow releasing {frame:?}");
        }
    }

    /// Number of free frames.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.free.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Number of frames under management.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.free.capacity()
    }
}

impl FrameAlloc for FifoFrameAlloc {
    fn alloc_frame(&mut self) -> Option<FrameNumber> {
        self.acquire()
    }
}
