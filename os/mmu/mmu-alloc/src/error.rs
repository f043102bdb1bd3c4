//! # MMU Errors

use crate::process::ProcessId;
use alloc::collections::TryReserveError;
use core::fmt;
use mmu_addresses::VirtualAddress;

/// Which backing region a reservation was for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RegionKind {
    PhysicalMemory,
    SwapSpace,
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PhysicalMemory => f.write_str("physical memory"),
            Self::SwapSpace => f.write_str("swap space"),
        }
    }
}

/// A backing region could not be reserved.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("failed to reserve {size} bytes of {region}")]
pub struct AllocError {
    pub region: RegionKind,
    pub size: usize,
    #[source]
    pub source: TryReserveError,
}

/// The fault handler ran out of room.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum NoCapacity {
    #[error("no free frame and no page left to evict")]
    NoVictim,
    #[error("no free swap slot")]
    SwapExhausted,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum MmuError {
    #[error(transparent)]
    NoCapacity(#[from] NoCapacity),
    #[error("process {0} was never admitted")]
    UnknownProcess(ProcessId),
}

/// A memory access hit a non-resident page.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
#[error("page fault at {0}")]
pub struct PageFault(pub VirtualAddress);
