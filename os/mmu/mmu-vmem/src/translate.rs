//! # Translator

use crate::{PageTable, PageTableEntry};
use mmu_addresses::{PhysicalAddress, VirtualAddress};

/// Outcome of walking a page table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Translation {
    /// The page is resident; the physical address of the byte.
    Mapped(PhysicalAddress),
    /// The page is not resident (never mapped or swapped out).
    Fault,
}

impl Translation {
    #[inline]
    #[must_use]
    pub const fn physical_address(self) -> Option<PhysicalAddress> {
        match self {
            Self::Mapped(pa) => Some(pa),
            Self::Fault => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_fault(self) -> bool {
        matches!(self, Self::Fault)
    }
}

/// Translate `va` through `table`.
///
/// Returns `PFN * PAGE_SIZE + offset` if the entry is present, otherwise
/// [`Translation::Fault`]. Never modifies the table.
///
/// ### Example
/// ```rust
/// # use mmu_vmem::*;
/// # use mmu_vmem::addresses::*;
/// let mut pt = PageTable::zeroed();
/// let va = VirtualAddress::new(0x0E);
/// assert_eq!(translate(&pt, va), Translation::Fault);
///
/// pt.set(va.vpn(), PageTableEntry::present(FrameNumber::new(2)));
/// assert_eq!(translate(&pt, va), Translation::Mapped(PhysicalAddress::new(0x0A)));
/// ```
#[must_use]
pub fn translate(table: &PageTable, va: VirtualAddress) -> Translation {
    let (vpn, offset) = va.split();
    match table.get(vpn) {
        PageTableEntry::Present { frame, .. } => Translation::Mapped(frame.join(offset)),
        entry => {
            log::trace!("translation fault at {va:?}: {entry:?}");
            Translation::Fault
        }
    }
}
