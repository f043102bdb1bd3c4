use crate::{OFFSET_MASK, PAGE_SIZE};
use core::fmt;

/// The offset within a page (`0..PAGE_SIZE`).
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PageOffset(u8);

impl PageOffset {
    /// Create from a raw value, asserting it is < [`PAGE_SIZE`] in debug.
    #[inline]
    #[must_use]
    pub const fn new(value: u8) -> Self {
        debug_assert!((value as usize) < PAGE_SIZE, "offset must be < page size");
        Self(value & OFFSET_MASK)
    }

    /// Construct from the offset bits of a full address byte.
    #[inline]
    #[must_use]
    pub const fn from_byte(addr: u8) -> Self {
        Self(addr & OFFSET_MASK)
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
}

impl fmt::Debug for PageOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Offset({})", self.0)
    }
}
