//! # Frame, Swap and Fault Management
//!
//! The state half of the emulated MMU: who owns which frame, where evicted
//! pages went, and how a page fault gets a frame. Page-table layout and the
//! address walk itself live in `mmu-vmem`; this crate drives them.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                        Mmu                          │
//! │    • admit / switch processes                       │
//! │    • translate, load, store                         │
//! │    • statistics                                     │
//! └─────────────────┬───────────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────────┐
//! │                 Page-Fault Engine                   │
//! │    • bind free frames                               │
//! │    • FIFO eviction to swap                          │
//! │    • swap-in by exchange with the oldest page       │
//! └──────┬──────────────────┬─────────────────┬─────────┘
//!        │                  │                 │
//! ┌──────▼───────┐ ┌────────▼────────┐ ┌──────▼────────┐
//! │ FrameAlloc / │ │  Victim Queue   │ │ Process Table │
//! │ SwapAlloc    │ │  (FIFO ring)    │ │ (page tables) │
//! └──────┬───────┘ └─────────────────┘ └───────────────┘
//!        │
//! ┌──────▼──────────────────────────────────────────────┐
//! │   Backing stores: physical memory, swap space       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Resource Accounting
//!
//! At every point between calls:
//!
//! ```text
//! free frames + resident pages + page-table frames = total frames
//! ```
//!
//! Frames and swap slots are never released back during a run; eviction
//! only moves them from one owner to another. A failed fault resolution
//! changes nothing.
//!
//! ## Usage
//!
//! ```rust
//! use mmu_alloc::{MmuConfig, Mmu, NoCapacity, MmuError, ProcessId};
//! use mmu_vmem::addresses::VirtualAddress;
//!
//! // Two frames, one usable swap slot.
//! let mut mmu = Mmu::new(MmuConfig::new(8, 8)).unwrap();
//! let pid = ProcessId::new(1);
//! mmu.admit_or_switch(pid).unwrap();
//!
//! mmu.resolve_fault(pid, VirtualAddress::new(0)).unwrap();
//! mmu.resolve_fault(pid, VirtualAddress::new(4)).unwrap();
//! assert_eq!(
//!     mmu.resolve_fault(pid, VirtualAddress::new(8)),
//!     Err(MmuError::NoCapacity(NoCapacity::SwapExhausted))
//! );
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]

extern crate alloc;

mod backing;
mod config;
mod error;
mod fault;
mod frame_alloc;
mod mmu;
mod process;
mod ring;
mod swap_alloc;
mod victim;

pub use crate::config::MmuConfig;
pub use crate::error::{AllocError, MmuError, NoCapacity, PageFault, RegionKind};
pub use crate::fault::{Eviction, FaultResolution};
pub use crate::frame_alloc::FifoFrameAlloc;
pub use crate::mmu::{Admission, Mmu, MmuStats};
pub use crate::process::{PageTableBase, Process, ProcessId, ProcessTable};
pub use crate::swap_alloc::FifoSwapAlloc;
