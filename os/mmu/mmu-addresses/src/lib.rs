//! # Toy Virtual and Physical Address Types
//!
//! Strongly typed wrappers for the addresses and indices of the emulated
//! 8-bit MMU.
//!
//! ## Overview
//!
//! The emulated machine has a tiny, fixed virtual address space:
//!
//! ```text
//! |  7 ‒ 2  | 1 ‒ 0  |
//! |   VPN   | Offset |
//! ```
//!
//! - 256 bytes of virtual memory per process,
//! - pages of [`PAGE_SIZE`] = 4 bytes,
//! - one linear page table of [`PAGE_TABLE_ENTRIES`] = 64 one-byte entries.
//!
//! Physical memory and swap space are partitioned into page-sized frames and
//! slots. Both are identified by *index*, never by raw byte offset, so the two
//! units cannot be mixed up:
//!
//! | Type | Meaning |
//! |------|---------|
//! | [`VirtualAddress`] | An 8-bit virtual address. |
//! | [`VirtualPageNumber`] | The high 6 bits of a VA; selects a page-table entry. |
//! | [`PageOffset`] | The low 2 bits of a VA or PA. |
//! | [`FrameNumber`] | A physical frame (PFN). Convert with [`FrameNumber::byte_offset`]. |
//! | [`PhysicalAddress`] | `PFN * PAGE_SIZE + offset`. |
//! | [`SwapSlot`] | A page-sized slot of swap space. Slot 0 is reserved. |
//!
//! ## Typical Usage
//!
//! ```rust
//! # use mmu_addresses::*;
//! let va = VirtualAddress::new(0b0001_0110);
//! let (vpn, off) = va.split();
//! assert_eq!(vpn.as_usize(), 5);
//! assert_eq!(off.as_u8(), 2);
//!
//! let pa = FrameNumber::new(3).join(off);
//! assert_eq!(pa.as_u8(), 14);
//! assert_eq!(pa.frame(), FrameNumber::new(3));
//! ```
//!
//! ## Encoding Limits
//!
//! A page-table entry is a single byte, which bounds what it can refer to:
//! a PFN has 6 bits ([`MAX_FRAMES`]) and a swap slot index has 7 bits
//! ([`MAX_SWAP_SLOTS`], slot 0 included).

#![cfg_attr(not(any(test, doctest)), no_std)]

mod page_offset;
mod physical_address;
mod physical_page;
mod swap_slot;
mod virtual_address;
mod virtual_page;

pub use crate::page_offset::PageOffset;
pub use crate::physical_address::PhysicalAddress;
pub use crate::physical_page::FrameNumber;
pub use crate::swap_slot::SwapSlot;
pub use crate::virtual_address::VirtualAddress;
pub use crate::virtual_page::VirtualPageNumber;

/// log2 of [`PAGE_SIZE`]; the number of offset bits in an address.
pub const PAGE_SHIFT: u32 = 2;

/// Page, frame and swap slot size in bytes.
pub const PAGE_SIZE: usize = 1 << PAGE_SHIFT;

/// Mask selecting the in-page offset of an address.
pub const OFFSET_MASK: u8 = (1 << PAGE_SHIFT) - 1;

/// Number of bits of a virtual page number.
pub const VPN_BITS: u32 = u8::BITS - PAGE_SHIFT;

/// Number of entries in a linear page table (one per VPN).
pub const PAGE_TABLE_ENTRIES: usize = 1 << VPN_BITS;

/// Number of bits of a physical frame number inside a present PTE.
pub const PFN_BITS: u32 = 6;

/// Highest number of physical frames a PTE can address.
pub const MAX_FRAMES: usize = 1 << PFN_BITS;

/// Number of bits of a swap slot index inside a swapped PTE.
pub const SWAP_SLOT_BITS: u32 = 7;

/// Highest number of swap slots a PTE can address, reserved slot 0 included.
pub const MAX_SWAP_SLOTS: usize = 1 << SWAP_SLOT_BITS;

const _: () = {
    assert!(PAGE_SIZE == 4);
    assert!(PAGE_TABLE_ENTRIES == 64);
    assert!(MAX_FRAMES * PAGE_SIZE <= u8::MAX as usize + 1);
    assert!(PFN_BITS + 2 == u8::BITS);
    assert!(SWAP_SLOT_BITS + 1 == u8::BITS);
};
