use crate::{PAGE_SHIFT, PageOffset, VirtualPageNumber};
use core::fmt;

/// Virtual memory address of the emulated 8-bit machine.
///
/// ### Semantics
/// - Bits `[7:2]` select the [`VirtualPageNumber`], bits `[1:0]` the
///   [`PageOffset`].
/// - Use [`VirtualAddress::split`] to obtain both; combine them again with
///   [`VirtualPageNumber::join`].
///
/// ### Invariants
/// - Every `u8` is a valid virtual address; there is no canonical form.
///
/// ### Examples
/// ```rust
/// # use mmu_addresses::*;
/// let va = VirtualAddress::from_signed(-4);
/// assert_eq!(va.as_u8(), 0xFC);
/// assert_eq!(va.vpn().as_usize(), 63);
/// assert_eq!(va.vpn().join(va.offset()), va);
/// ```
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VirtualAddress(u8);

impl VirtualAddress {
    #[inline]
    #[must_use]
    pub const fn new(v: u8) -> Self {
        Self(v)
    }

    /// Reinterpret a signed byte (as found in traces) as an address.
    #[inline]
    #[must_use]
    pub const fn from_signed(v: i8) -> Self {
        Self(v.cast_unsigned())
    }

    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0)
    }

    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// The address as a signed byte, the way the trace format prints it.
    #[inline]
    #[must_use]
    pub const fn as_signed(self) -> i8 {
        self.0.cast_signed()
    }

    #[inline]
    #[must_use]
    pub const fn vpn(self) -> VirtualPageNumber {
        VirtualPageNumber::new(self.0 >> PAGE_SHIFT)
    }

    #[inline]
    #[must_use]
    pub const fn offset(self) -> PageOffset {
        PageOffset::from_byte(self.0)
    }

    #[inline]
    #[must_use]
    pub const fn split(self) -> (VirtualPageNumber, PageOffset) {
        (self.vpn(), self.offset())
    }
}

impl fmt::Debug for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VA(0x{:02X})", self.0)
    }
}

impl fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

impl From<u8> for VirtualAddress {
    #[inline]
    fn from(v: u8) -> Self {
        Self::new(v)
    }
}

impl From<i8> for VirtualAddress {
    #[inline]
    fn from(v: i8) -> Self {
        Self::from_signed(v)
    }
}

impl From<VirtualPageNumber> for VirtualAddress {
    #[inline]
    fn from(vpn: VirtualPageNumber) -> Self {
        vpn.base()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_high_and_low_bits() {
        let va = VirtualAddress::new(0b1010_1011);
        let (vpn, off) = va.split();
        assert_eq!(vpn.as_usize(), 0b10_1010);
        assert_eq!(off.as_u8(), 0b11);
    }

    #[test]
    fn negative_trace_values_select_high_pages() {
        assert_eq!(VirtualAddress::from_signed(-1).vpn().as_usize(), 63);
        assert_eq!(VirtualAddress::from_signed(-128).vpn().as_usize(), 32);
        assert_eq!(VirtualAddress::from_signed(-1).as_signed(), -1);
    }
}
