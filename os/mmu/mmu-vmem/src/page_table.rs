//! # Linear Page Table
//!
//! One table of [`PAGE_TABLE_ENTRIES`] entries per process, indexed directly
//! by [`VirtualPageNumber`]. The table is the only level; there is no page
//! directory above it.

mod entry;

pub use crate::page_table::entry::PageTableEntry;
use mmu_addresses::{PAGE_TABLE_ENTRIES, VirtualAddress, VirtualPageNumber};

/// A linear page table: 64 entries, all [`Unmapped`](PageTableEntry::Unmapped)
/// when created.
#[doc(alias = "PT")]
#[derive(Clone, Eq, PartialEq)]
pub struct PageTable {
    entries: [PageTableEntry; PAGE_TABLE_ENTRIES],
}

impl PageTable {
    /// Create a fully zeroed page table (all entries never mapped).
    #[inline]
    #[must_use]
    pub const fn zeroed() -> Self {
        Self {
            entries: [PageTableEntry::Unmapped; PAGE_TABLE_ENTRIES],
        }
    }

    /// Read the entry for `vpn`.
    #[inline]
    #[must_use]
    pub const fn get(&self, vpn: VirtualPageNumber) -> PageTableEntry {
        self.entries[vpn.as_usize()]
    }

    /// Write the entry for `vpn`.
    #[inline]
    pub const fn set(&mut self, vpn: VirtualPageNumber, e: PageTableEntry) {
        self.entries[vpn.as_usize()] = e;
    }

    /// Derive the table index from a virtual address.
    #[inline]
    #[must_use]
    pub const fn index_of(va: VirtualAddress) -> VirtualPageNumber {
        va.vpn()
    }

    /// Iterate over all entries with their page numbers.
    pub fn iter(&self) -> impl Iterator<Item = (VirtualPageNumber, PageTableEntry)> + '_ {
        VirtualPageNumber::all().map(|vpn| (vpn, self.get(vpn)))
    }

    /// Number of entries currently resident.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_present()).count()
    }

    /// Serialize to the one-byte-per-entry layout.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; PAGE_TABLE_ENTRIES] {
        self.entries.map(PageTableEntry::raw)
    }

    /// Decode a table from the one-byte-per-entry layout.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; PAGE_TABLE_ENTRIES]) -> Self {
        Self {
            entries: bytes.map(PageTableEntry::from_raw),
        }
    }
}

impl Default for PageTable {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl core::fmt::Debug for PageTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.iter().filter(|(_, e)| !e.is_unmapped()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmu_addresses::{FrameNumber, SwapSlot};

    #[test]
    fn fresh_table_is_unmapped() {
        let pt = PageTable::zeroed();
        assert!(pt.iter().all(|(_, e)| e.is_unmapped()));
        assert_eq!(pt.to_bytes(), [0; PAGE_TABLE_ENTRIES]);
    }

    #[test]
    fn entries_are_indexed_by_vpn() {
        let mut pt = PageTable::zeroed();
        let vpn = PageTable::index_of(VirtualAddress::new(0x1D));
        pt.set(vpn, PageTableEntry::present(FrameNumber::new(4)));

        assert_eq!(vpn.as_usize(), 7);
        assert_eq!(pt.get(vpn).frame(), Some(FrameNumber::new(4)));
        assert_eq!(pt.present_count(), 1);
        assert_eq!(pt.to_bytes()[7], 0b0001_0001);
    }

    #[test]
    fn byte_layout_round_trips() {
        let mut pt = PageTable::zeroed();
        pt.set(
            VirtualPageNumber::new(0),
            PageTableEntry::Swapped(SwapSlot::new(2)),
        );
        pt.set(
            VirtualPageNumber::new(63),
            PageTableEntry::present(FrameNumber::new(1)),
        );
        assert_eq!(PageTable::from_bytes(&pt.to_bytes()), pt);
    }
}
