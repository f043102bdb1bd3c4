//! # Swap Slot Allocator
//!
//! FIFO free list of swap slots `1..=count`. Slot 0 is never enqueued.

use crate::ring::IndexRing;
use mmu_addresses::{MAX_SWAP_SLOTS, SwapSlot};
use mmu_vmem::SwapAlloc;

pub struct FifoSwapAlloc {
    free: IndexRing<SwapSlot>,
}

impl FifoSwapAlloc {
    /// Allocator over `count` usable slots, starting at slot 1.
    #[must_use]
    pub fn new(count: usize) -> Self {
        let count = count.min(MAX_SWAP_SLOTS - 1);
        let mut free = IndexRing::with_capacity(count);
        for slot in (1..=count).map_while(SwapSlot::from_index) {
            let _ = free.push_back(slot);
        }
        Self { free }
    }

    pub fn acquire(&mut self) -> Option<SwapSlot> {
        let slot = self.free.pop_front();
        log::trace!("acquire swap slot -> {slot:?}");
        slot
    }

    pub fn release(&mut self, slot: SwapSlot) {
        debug_assert!(
            self.free.iter().all(|s| s != slot),
            "{slot:?} released twice"
        );
        if self.free.push_back(slot).is_err() {
            log::error!("swap free list overflow releasing {slot:?}");
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.free.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.free.capacity()
    }
}

impl SwapAlloc for FifoSwapAlloc {
    fn alloc_slot(&mut self) -> Option<SwapSlot> {
        self.acquire()
    }
}
