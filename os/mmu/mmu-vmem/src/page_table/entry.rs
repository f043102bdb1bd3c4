//! # Page Table Entry (PTE)
//!
//! - [`PageTableEntry`]: the decoded, tagged form of a one-byte PTE.
//!
//! ## Semantics
//!
//! - A present entry maps its VPN to exactly one frame.
//! - A swapped entry remembers the swap slot holding the page's contents.
//! - An unmapped entry has never been touched; its first access allocates.
//!
//! ## Invariants & Notes
//!
//! - The single-byte layout is only produced by [`PageTableEntry::raw`] and
//!   read by [`PageTableEntry::from_raw`]; every raw byte decodes to exactly
//!   one state.
//! - The user flag is carried through, never interpreted.

use crate::{PresentEntryBits, SwappedEntryBits};
use mmu_addresses::{FrameNumber, SwapSlot};

/// A single page-table entry.
#[doc(alias = "PTE")]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PageTableEntry {
    /// Never mapped (raw value 0).
    #[default]
    Unmapped,
    /// Resident in `frame`.
    Present { frame: FrameNumber, user: bool },
    /// Evicted; contents live in the swap slot.
    Swapped(SwapSlot),
}

impl PageTableEntry {
    /// Create a present entry with the user flag cleared.
    #[inline]
    #[must_use]
    pub const fn present(frame: FrameNumber) -> Self {
        Self::Present { frame, user: false }
    }

    #[inline]
    #[must_use]
    pub const fn is_present(self) -> bool {
        matches!(self, Self::Present { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_unmapped(self) -> bool {
        matches!(self, Self::Unmapped)
    }

    /// If present, return the mapped frame.
    #[inline]
    #[must_use]
    pub const fn frame(self) -> Option<FrameNumber> {
        match self {
            Self::Present { frame, .. } => Some(frame),
            _ => None,
        }
    }

    /// If swapped out, return the slot holding the page.
    #[inline]
    #[must_use]
    pub const fn swap_slot(self) -> Option<SwapSlot> {
        match self {
            Self::Swapped(slot) => Some(slot),
            _ => None,
        }
    }

    /// Return the raw one-byte encoding.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        match self {
            Self::Unmapped => 0,
            Self::Present { frame, user } => PresentEntryBits::new()
                .with_present(true)
                .with_user(user)
                .with_frame(frame)
                .into_bits(),
            Self::Swapped(slot) => SwappedEntryBits::new().with_swap_slot(slot).into_bits(),
        }
    }

    /// Decode a raw one-byte entry.
    #[inline]
    #[must_use]
    pub const fn from_raw(v: u8) -> Self {
        if v == 0 {
            return Self::Unmapped;
        }

        let bits = PresentEntryBits::from_bits(v);
        if bits.present() {
            Self::Present {
                frame: bits.frame(),
                user: bits.user(),
            }
        } else {
            Self::Swapped(SwappedEntryBits::from_bits(v).swap_slot())
        }
    }
}

impl From<u8> for PageTableEntry {
    #[inline]
    fn from(v: u8) -> Self {
        Self::from_raw(v)
    }
}

impl From<PageTableEntry> for u8 {
    #[inline]
    fn from(e: PageTableEntry) -> Self {
        e.raw()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_is_unmapped() {
        assert_eq!(PageTableEntry::from_raw(0), PageTableEntry::Unmapped);
        assert_eq!(PageTableEntry::Unmapped.raw(), 0);
    }

    #[test]
    fn present_entry_with_frame_zero_is_not_the_sentinel() {
        let e = PageTableEntry::present(FrameNumber::new(0));
        assert_eq!(e.raw(), 0b0000_0001);
        assert!(PageTableEntry::from_raw(e.raw()).is_present());
    }

    #[test]
    fn user_flag_survives_decoding() {
        let e = PageTableEntry::from_raw(0b0000_1011);
        assert_eq!(
            e,
            PageTableEntry::Present {
                frame: FrameNumber::new(2),
                user: true
            }
        );
        assert_eq!(e.raw(), 0b0000_1011);
    }

    #[test]
    fn every_byte_decodes_to_itself() {
        for raw in 0..=u8::MAX {
            assert_eq!(PageTableEntry::from_raw(raw).raw(), raw);
        }
    }

    #[test]
    fn swapped_entry_exposes_slot() {
        let e = PageTableEntry::from_raw(0b0001_0100);
        assert_eq!(e.swap_slot(), Some(SwapSlot::new(10)));
        assert_eq!(e.frame(), None);
        assert!(!e.is_present());
    }
}
