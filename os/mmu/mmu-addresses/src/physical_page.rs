use crate::{MAX_FRAMES, PAGE_SHIFT, PAGE_SIZE, PageOffset, PhysicalAddress};
use core::fmt;

/// Physical frame number (PFN).
///
/// A `FrameNumber` names one page-sized frame of emulated physical memory.
/// It is an *index*; the frame's position inside the backing buffer is
/// [`FrameNumber::byte_offset`].
///
/// ### Semantics
/// - `base()` returns the first [`PhysicalAddress`] of the frame.
/// - `join(off)` combines the frame with a [`PageOffset`] to form a full
///   physical address.
///
/// ### Invariants
/// - The index fits into the 6-bit PFN field of a PTE (`< MAX_FRAMES`).
///
/// ### Examples
/// ```rust
/// # use mmu_addresses::*;
/// let pfn = FrameNumber::new(5);
/// assert_eq!(pfn.byte_offset(), 20);
/// assert_eq!(pfn.join(PageOffset::new(1)).as_u8(), 21);
/// assert_eq!(FrameNumber::from_index(64), None);
/// ```
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FrameNumber(u8);

impl FrameNumber {
    /// ### Debug assertions
    /// - Asserts `v < MAX_FRAMES` in debug builds.
    #[inline]
    #[must_use]
    pub const fn new(v: u8) -> Self {
        debug_assert!((v as usize) < MAX_FRAMES);
        Self(v)
    }

    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_index(i: usize) -> Option<Self> {
        if i < MAX_FRAMES {
            Some(Self(i as u8))
        } else {
            None
        }
    }

    /// Frame that holds the physical address `pa`.
    #[inline]
    #[must_use]
    pub const fn containing_address(pa: PhysicalAddress) -> Self {
        Self(pa.as_u8() >> PAGE_SHIFT)
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

    /// Byte offset of the frame from the start of physical memory.
    #[inline]
    #[must_use]
    pub const fn byte_offset(self) -> usize {
        self.as_usize() * PAGE_SIZE
    }

    #[inline]
    #[must_use]
    pub const fn base(self) -> PhysicalAddress {
        PhysicalAddress::new(self.0 << PAGE_SHIFT)
    }

    #[inline]
    #[must_use]
    pub const fn join(self, off: PageOffset) -> PhysicalAddress {
        PhysicalAddress::new((self.0 << PAGE_SHIFT) | off.as_u8())
    }
}

impl fmt::Display for FrameNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for FrameNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PFN({})", self.0)
    }
}

impl From<PhysicalAddress> for FrameNumber {
    #[inline]
    fn from(pa: PhysicalAddress) -> Self {
        Self::containing_address(pa)
    }
}
