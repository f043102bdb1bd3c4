use crate::{PAGE_SHIFT, PAGE_TABLE_ENTRIES, PageOffset, VirtualAddress};
use core::fmt;

/// Virtual page number (VPN): bits `[7:2]` of a [`VirtualAddress`].
///
/// Strongly typed to avoid mixing with frame numbers or swap slots. Range is
/// `0..64` (checked in debug builds). Doubles as the index into a process's
/// linear page table.
///
/// ### Examples
/// ```rust
/// # use mmu_addresses::*;
/// let vpn = VirtualPageNumber::new(7);
/// assert_eq!(vpn.base().as_u8(), 28);
/// assert_eq!(vpn.join(PageOffset::new(3)).as_u8(), 31);
/// ```
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VirtualPageNumber(u8);

impl VirtualPageNumber {
    /// Construct from a raw page number.
    ///
    /// ### Debug assertions
    /// - Asserts `v < 64` in debug builds.
    #[inline]
    #[must_use]
    pub const fn new(v: u8) -> Self {
        debug_assert!((v as usize) < PAGE_TABLE_ENTRIES);
        Self(v)
    }

    /// Page that contains `va`.
    #[inline]
    #[must_use]
    pub const fn containing_address(va: VirtualAddress) -> Self {
        va.vpn()
    }

    /// Construct from a page-table index, if it is in range.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_index(i: usize) -> Option<Self> {
        if i < PAGE_TABLE_ENTRIES {
            Some(Self(i as u8))
        } else {
            None
        }
    }

    /// Return the page number as `usize` for table access.
    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// First virtual address of the page.
    #[inline]
    #[must_use]
    pub const fn base(self) -> VirtualAddress {
        VirtualAddress::new(self.0 << PAGE_SHIFT)
    }

    #[inline]
    #[must_use]
    pub const fn join(self, off: PageOffset) -> VirtualAddress {
        VirtualAddress::new((self.0 << PAGE_SHIFT) | off.as_u8())
    }

    /// All page numbers of the address space, ascending.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..PAGE_TABLE_ENTRIES).filter_map(Self::from_index)
    }
}

impl fmt::Display for VirtualPageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for VirtualPageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VPN({})", self.0)
    }
}

impl From<VirtualAddress> for VirtualPageNumber {
    #[inline]
    fn from(va: VirtualAddress) -> Self {
        va.vpn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_bounds() {
        assert!(VirtualPageNumber::from_index(63).is_some());
        assert!(VirtualPageNumber::from_index(64).is_none());
        assert_eq!(VirtualPageNumber::all().count(), PAGE_TABLE_ENTRIES);
    }

    #[test]
    fn every_address_round_trips_through_its_page() {
        for raw in 0..=u8::MAX {
            let va = VirtualAddress::new(raw);
            let (vpn, off) = va.split();
            assert_eq!(vpn.join(off), va);
        }
    }
}
