use crate::{FrameNumber, PageOffset};
use core::fmt;

/// Physical memory address.
///
/// Like [`VirtualAddress`](super::VirtualAddress), this type carries intent
/// and prevents accidental VA↔PA mix-ups. Since a PFN has 6 bits and a page
/// has 4 bytes, every addressable physical byte fits into a `u8`.
///
/// ### Semantics
/// - Use [`PhysicalAddress::frame`] / [`PhysicalAddress::offset`] /
///   [`PhysicalAddress::split`] to derive the frame and in-page offset.
/// - Combine them again with [`FrameNumber::join`].
///
/// ### Examples
/// ```rust
/// # use mmu_addresses::*;
/// let pa = PhysicalAddress::new(0x2B);
/// let (pfn, off) = pa.split();
/// assert_eq!(pfn.as_u8(), 10);
/// assert_eq!(pfn.join(off), pa);
/// ```
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PhysicalAddress(u8);

impl PhysicalAddress {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0)
    }

    #[inline]
    #[must_use]
    pub const fn new(v: u8) -> Self {
        Self(v)
    }

    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// The address as a signed byte, the way the trace output prints it.
    #[inline]
    #[must_use]
    pub const fn as_signed(self) -> i8 {
        self.0.cast_signed()
    }

    /// Byte offset from the start of physical memory.
    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    #[inline]
    #[must_use]
    pub const fn frame(self) -> FrameNumber {
        FrameNumber::containing_address(self)
    }

    #[inline]
    #[must_use]
    pub const fn offset(self) -> PageOffset {
        PageOffset::from_byte(self.0)
    }

    #[inline]
    #[must_use]
    pub const fn split(self) -> (FrameNumber, PageOffset) {
        (self.frame(), self.offset())
    }
}

impl fmt::Debug for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PA(0x{:02X})", self.0)
    }
}

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

impl From<FrameNumber> for PhysicalAddress {
    #[inline]
    fn from(value: FrameNumber) -> Self {
        value.base()
    }
}
