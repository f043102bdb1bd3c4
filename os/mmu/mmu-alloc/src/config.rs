//! # MMU Configuration

use mmu_addresses::{MAX_FRAMES, MAX_SWAP_SLOTS, PAGE_SIZE, SwapSlot};

/// Sizes of the emulated physical memory and swap space, in bytes.
///
/// Both regions are partitioned into [`PAGE_SIZE`] chunks; a trailing partial
/// chunk is unused. The one-byte PTE format bounds how many chunks can be
/// addressed ([`MAX_FRAMES`] frames, [`MAX_SWAP_SLOTS`] slots including the
/// reserved slot 0); larger regions are still reserved in full, but only the
/// addressable part is handed out.
///
/// ### Example
/// ```rust
/// # use mmu_alloc::MmuConfig;
/// let config = MmuConfig::new(8, 8);
/// assert_eq!(config.frame_count(), 2);
/// assert_eq!(config.swap_slot_count(), 1);
///
/// let config = config.with_pmem_size(1024);
/// assert_eq!(config.frame_count(), 64);
/// assert!(config.is_clamped());
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MmuConfig {
    pmem_size: usize,
    swap_size: usize,
}

impl MmuConfig {
    #[must_use]
    pub const fn new(pmem_size: usize, swap_size: usize) -> Self {
        Self {
            pmem_size,
            swap_size,
        }
    }

    #[must_use]
    pub const fn with_pmem_size(mut self, pmem_size: usize) -> Self {
        self.pmem_size = pmem_size;
        self
    }

    #[must_use]
    pub const fn with_swap_size(mut self, swap_size: usize) -> Self {
        self.swap_size = swap_size;
        self
    }

    /// Size of the physical memory region in bytes.
    #[must_use]
    pub const fn pmem_size(&self) -> usize {
        self.pmem_size
    }

    /// Size of the swap region in bytes.
    #[must_use]
    pub const fn swap_size(&self) -> usize {
        self.swap_size
    }

    /// Number of physical frames handed out by the frame allocator.
    #[must_use]
    pub const fn frame_count(&self) -> usize {
        min(self.pmem_size / PAGE_SIZE, MAX_FRAMES)
    }

    /// Number of usable swap slots, i.e. without the reserved slot 0.
    #[must_use]
    pub const fn swap_slot_count(&self) -> usize {
        min(self.swap_size / PAGE_SIZE, MAX_SWAP_SLOTS).saturating_sub(SwapSlot::RESERVED + 1)
    }

    /// Whether either region is larger than a PTE can address.
    #[must_use]
    pub const fn is_clamped(&self) -> bool {
        self.pmem_size / PAGE_SIZE > MAX_FRAMES || self.swap_size / PAGE_SIZE > MAX_SWAP_SLOTS
    }
}

const fn min(a: usize, b: usize) -> usize {
    if a < b { a } else { b }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_pages_are_ignored() {
        let config = MmuConfig::new(11, 15);
        assert_eq!(config.frame_count(), 2);
        assert_eq!(config.swap_slot_count(), 2);
        assert!(!config.is_clamped());
    }

    #[test]
    fn swap_smaller_than_two_pages_has_no_usable_slot() {
        assert_eq!(MmuConfig::new(8, 0).swap_slot_count(), 0);
        assert_eq!(MmuConfig::new(8, 4).swap_slot_count(), 0);
        assert_eq!(MmuConfig::new(8, 7).swap_slot_count(), 0);
    }

    #[test]
    fn oversized_regions_are_clamped_to_the_pte_range() {
        let config = MmuConfig::new(4096, 4096);
        assert_eq!(config.frame_count(), MAX_FRAMES);
        assert_eq!(config.swap_slot_count(), MAX_SWAP_SLOTS - 1);
        assert!(config.is_clamped());
    }

    #[test]
    fn builders_replace_one_region_each() {
        let config = MmuConfig::new(8, 8).with_swap_size(1024);
        assert_eq!(config.pmem_size(), 8);
        assert_eq!(config.swap_size(), 1024);
        assert_eq!(config.swap_slot_count(), MAX_SWAP_SLOTS - 1);
        assert!(config.is_clamped());

        let config = config.with_swap_size(12).with_pmem_size(16);
        assert_eq!(config, MmuConfig::new(16, 12));
        assert_eq!(config.swap_slot_count(), 2);
        assert!(!config.is_clamped());
    }
}
