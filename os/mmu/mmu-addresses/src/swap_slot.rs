use crate::{MAX_SWAP_SLOTS, PAGE_SIZE};
use core::fmt;

/// Index of a page-sized slot in swap space.
///
/// Slot 0 is reserved: a swapped PTE with slot index 0 would be
/// indistinguishable from the "never mapped" entry, so it is never issued.
///
/// ### Invariants
/// - `1 <= index < MAX_SWAP_SLOTS` (checked in debug builds).
///
/// ### Examples
/// ```rust
/// # use mmu_addresses::*;
/// let slot = SwapSlot::new(3);
/// assert_eq!(slot.byte_offset(), 12);
/// assert_eq!(SwapSlot::from_index(0), None);
/// assert_eq!(SwapSlot::from_index(128), None);
/// ```
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SwapSlot(u8);

impl SwapSlot {
    /// The reserved slot index.
    pub const RESERVED: usize = 0;

    /// ### Debug assertions
    /// - Asserts `v != 0` and `v < MAX_SWAP_SLOTS` in debug builds.
    #[inline]
    #[must_use]
    pub const fn new(v: u8) -> Self {
        debug_assert!(v as usize != Self::RESERVED);
        debug_assert!((v as usize) < MAX_SWAP_SLOTS);
        Self(v)
    }

    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_index(i: usize) -> Option<Self> {
        if i != Self::RESERVED && i < MAX_SWAP_SLOTS {
            Some(Self(i as u8))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Byte offset of the slot from the start of swap space.
    #[inline]
    #[must_use]
    pub const fn byte_offset(self) -> usize {
        self.as_usize() * PAGE_SIZE
    }
}

impl fmt::Display for SwapSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for SwapSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}
