//! # Virtual Memory Support
//!
//! Page-table entries, linear page tables and address translation for the
//! emulated 8-bit MMU.
//!
//! ## What you get
//! - One-byte PTE bit layouts ([`PresentEntryBits`], [`SwappedEntryBits`]).
//! - A tagged [`PageTableEntry`] that is what the rest of the system works with.
//! - A 64-entry linear [`PageTable`], one per process.
//! - The translator ([`translate`]) producing a [`Translation`].
//! - The allocator seams ([`FrameAlloc`], [`SwapAlloc`]) the fault handler
//!   draws frames and swap slots from.
//!
//! ## Virtual Address → Physical Address Walk
//!
//! ```text
//!   VA (8 bit)                 page table (64 × 1 byte)
//! | 7‒2 | 1‒0 |               ┌──────────────────────┐
//! | VPN | Off | ── VPN ─────► │ PTE[VPN]             │
//!                             └──────────┬───────────┘
//!                                        │ present?
//!                          yes ◄─────────┴─────────► no
//!                           │                        │
//!          PA = PFN · 4 + Off                  Translation::Fault
//! ```
//!
//! There is exactly one level. The table's location (the page-table *base*)
//! is the PDBR analogue of a process and never changes once the process
//! exists.
//!
//! ### Entry states
//!
//! | Raw byte | State | Meaning |
//! |:---------|:------|:--------|
//! | `0000_0000` | [`Unmapped`](PageTableEntry::Unmapped) | Never touched. |
//! | `PPPP_PPU1` | [`Present`](PageTableEntry::Present) | Resident in frame `P`, user flag `U`. |
//! | `SSSS_SSS0` | [`Swapped`](PageTableEntry::Swapped) | Contents live in swap slot `S` (never 0). |

#![cfg_attr(not(any(test, doctest)), no_std)]

mod page_entry_bits;
mod page_table;
mod translate;

pub use crate::page_entry_bits::{PresentEntryBits, SwappedEntryBits};
pub use crate::page_table::{PageTable, PageTableEntry};
pub use crate::translate::{Translation, translate};
pub use mmu_addresses as addresses;

use mmu_addresses::{FrameNumber, SwapSlot};

/// Source of free **physical** frames.
///
/// The implementation decides the order in which frames are handed out.
/// Returns `None` when no free frame is left; this is a capacity signal the
/// fault handler answers by evicting a victim, not an error.
pub trait FrameAlloc {
    /// Take one free frame.
    fn alloc_frame(&mut self) -> Option<FrameNumber>;
}

/// Source of free swap slots.
///
/// Like [`FrameAlloc`], `None` signals exhaustion.
pub trait SwapAlloc {
    /// Take one free swap slot. Never returns the reserved slot 0.
    fn alloc_slot(&mut self) -> Option<SwapSlot>;
}
