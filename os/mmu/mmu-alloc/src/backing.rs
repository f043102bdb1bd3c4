//! # Backing Stores
//!
//! Byte buffers standing in for physical memory and the swap device. Both
//! are reserved once, fallibly, and zeroed; afterwards they are only ever
//! accessed in page-sized chunks or single bytes through typed indices.

use crate::error::{AllocError, RegionKind};
use alloc::vec::Vec;
use mmu_addresses::{FrameNumber, PAGE_SIZE, PhysicalAddress, SwapSlot};

/// A zeroed, fixed-size byte region.
struct BackingRegion {
    bytes: Vec<u8>,
}

impl BackingRegion {
    fn reserve(region: RegionKind, size: usize) -> Result<Self, AllocError> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(size)
            .map_err(|source| AllocError {
                region,
                size,
                source,
            })?;
        bytes.resize(size, 0);
        log::trace!("reserved {size} bytes of {region}");
        Ok(Self { bytes })
    }

    fn chunk(&self, offset: usize) -> &[u8] {
        &self.bytes[offset..offset + PAGE_SIZE]
    }

    fn chunk_mut(&mut self, offset: usize) -> &mut [u8] {
        &mut self.bytes[offset..offset + PAGE_SIZE]
    }
}

/// Emulated physical memory, addressed by [`FrameNumber`] or
/// [`PhysicalAddress`].
pub(crate) struct PhysicalMemory {
    region: BackingRegion,
}

impl PhysicalMemory {
    /// Reserve and zero `size` bytes.
    ///
    /// # Errors
    /// [`AllocError`] if the allocation cannot be satisfied.
    pub fn reserve(size: usize) -> Result<Self, AllocError> {
        Ok(Self {
            region: BackingRegion::reserve(RegionKind::PhysicalMemory, size)?,
        })
    }

    #[must_use]
    pub fn frame(&self, frame: FrameNumber) -> &[u8] {
        self.region.chunk(frame.byte_offset())
    }

    pub fn frame_mut(&mut self, frame: FrameNumber) -> &mut [u8] {
        self.region.chunk_mut(frame.byte_offset())
    }

    pub fn zero_frame(&mut self, frame: FrameNumber) {
        self.frame_mut(frame).fill(0);
    }

    #[must_use]
    pub fn read(&self, pa: PhysicalAddress) -> u8 {
        self.region.bytes[pa.as_usize()]
    }

    pub fn write(&mut self, pa: PhysicalAddress, value: u8) {
        self.region.bytes[pa.as_usize()] = value;
    }
}

/// Emulated swap device, addressed by [`SwapSlot`].
pub(crate) struct SwapSpace {
    region: BackingRegion,
}

impl SwapSpace {
    /// Reserve and zero `size` bytes.
    ///
    /// # Errors
    /// [`AllocError`] if the allocation cannot be satisfied.
    pub fn reserve(size: usize) -> Result<Self, AllocError> {
        Ok(Self {
            region: BackingRegion::reserve(RegionKind::SwapSpace, size)?,
        })
    }

    pub fn slot_mut(&mut self, slot: SwapSlot) -> &mut [u8] {
        self.region.chunk_mut(slot.byte_offset())
    }
}

/// Copy a frame out to `slot` and zero the frame.
pub(crate) fn swap_out(
    pmem: &mut PhysicalMemory,
    swap: &mut SwapSpace,
    frame: FrameNumber,
    slot: SwapSlot,
) {
    swap.slot_mut(slot).copy_from_slice(pmem.frame(frame));
    pmem.zero_frame(frame);
}

/// Exchange the contents of a frame and a slot.
pub(crate) fn exchange(
    pmem: &mut PhysicalMemory,
    swap: &mut SwapSpace,
    frame: FrameNumber,
    slot: SwapSlot,
) {
    pmem.frame_mut(frame).swap_with_slice(swap.slot_mut(slot));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_start_zeroed() {
        let pmem = PhysicalMemory::reserve(16).unwrap();
        assert_eq!(pmem.region.bytes.len(), 16);
        assert!((0..4).all(|i| pmem.frame(FrameNumber::new(i)) == [0; 4]));
    }

    #[test]
    fn impossible_reservation_names_the_region() {
        let Err(err) = SwapSpace::reserve(usize::MAX) else {
            panic!("reservation of usize::MAX bytes succeeded");
        };
        assert_eq!(err.region, RegionKind::SwapSpace);
        assert_eq!(err.size, usize::MAX);
    }

    #[test]
    fn swap_out_moves_and_clears() {
        let mut pmem = PhysicalMemory::reserve(8).unwrap();
        let mut swap = SwapSpace::reserve(8).unwrap();
        let frame = FrameNumber::new(1);
        let slot = SwapSlot::new(1);
        pmem.frame_mut(frame).copy_from_slice(&[1, 2, 3, 4]);

        swap_out(&mut pmem, &mut swap, frame, slot);
        assert_eq!(swap.slot_mut(slot), [1, 2, 3, 4]);
        assert_eq!(pmem.frame(frame), [0; 4]);
    }

    #[test]
    fn exchange_swaps_both_sides() {
        let mut pmem = PhysicalMemory::reserve(4).unwrap();
        let mut swap = SwapSpace::reserve(8).unwrap();
        let frame = FrameNumber::new(0);
        let slot = SwapSlot::new(1);
        pmem.frame_mut(frame).copy_from_slice(&[9, 9, 9, 9]);
        swap.slot_mut(slot).copy_from_slice(&[5, 6, 7, 8]);

        exchange(&mut pmem, &mut swap, frame, slot);
        assert_eq!(pmem.frame(frame), [5, 6, 7, 8]);
        assert_eq!(swap.slot_mut(slot), [9, 9, 9, 9]);
        assert_eq!(pmem.read(PhysicalAddress::new(2)), 7);
    }
}
