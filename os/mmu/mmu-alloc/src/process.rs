//! # Process Table
//!
//! Maps process ids to their page-table base and owns the decoded page
//! tables. Processes are created on first reference and live until the
//! [`Mmu`](crate::Mmu) is dropped.

use alloc::vec::Vec;
use core::fmt;
use mmu_addresses::{FrameNumber, VirtualPageNumber};
use mmu_vmem::{PageTable, PageTableEntry};

/// Process identifier as it appears in an access trace.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ProcessId(i8);

impl ProcessId {
    #[inline]
    #[must_use]
    pub const fn new(pid: i8) -> Self {
        Self(pid)
    }

    #[inline]
    #[must_use]
    pub const fn as_i8(self) -> i8 {
        self.0
    }
}

impl From<i8> for ProcessId {
    #[inline]
    fn from(pid: i8) -> Self {
        Self(pid)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PID({})", self.0)
    }
}

/// The frame reserved for a process's page table (the PDBR analogue).
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PageTableBase(FrameNumber);

impl PageTableBase {
    #[inline]
    #[must_use]
    pub const fn new(frame: FrameNumber) -> Self {
        Self(frame)
    }

    #[inline]
    #[must_use]
    pub const fn frame(self) -> FrameNumber {
        self.0
    }
}

impl fmt::Display for PageTableBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0.base().as_u8())
    }
}

/// Position of a process in the table. Stable for the table's lifetime.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct ProcessSlot(usize);

/// Location of a single PTE: which process, which VPN.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct PteLocation {
    pub process: ProcessSlot,
    pub vpn: VirtualPageNumber,
}

/// One admitted process.
#[derive(Debug)]
pub struct Process {
    pid: ProcessId,
    base: PageTableBase,
    table: PageTable,
}

impl Process {
    #[must_use]
    pub const fn pid(&self) -> ProcessId {
        self.pid
    }

    #[must_use]
    pub const fn base(&self) -> PageTableBase {
        self.base
    }

    #[must_use]
    pub const fn table(&self) -> &PageTable {
        &self.table
    }
}

/// Admitted processes in admission order.
#[derive(Debug, Default)]
pub struct ProcessTable {
    processes: Vec<Process>,
}

impl ProcessTable {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            processes: Vec::new(),
        }
    }

    /// Page-table base of `pid`, if admitted.
    #[must_use]
    pub fn lookup(&self, pid: ProcessId) -> Option<PageTableBase> {
        self.processes.iter().find(|p| p.pid == pid).map(|p| p.base)
    }

    pub(crate) fn slot_of(&self, pid: ProcessId) -> Option<ProcessSlot> {
        self.processes
            .iter()
            .position(|p| p.pid == pid)
            .map(ProcessSlot)
    }

    pub(crate) fn slot_by_base(&self, base: PageTableBase) -> Option<ProcessSlot> {
        self.processes
            .iter()
            .position(|p| p.base == base)
            .map(ProcessSlot)
    }

    /// Record a new process with a fresh, all-unmapped table.
    pub(crate) fn insert(&mut self, pid: ProcessId, base: PageTableBase) -> ProcessSlot {
        debug_assert!(self.lookup(pid).is_none(), "{pid:?} admitted twice");
        self.processes.push(Process {
            pid,
            base,
            table: PageTable::zeroed(),
        });
        ProcessSlot(self.processes.len() - 1)
    }

    pub(crate) fn get(&self, slot: ProcessSlot) -> &Process {
        &self.processes[slot.0]
    }

    /// Page table of `pid`, if admitted.
    #[must_use]
    pub fn table(&self, pid: ProcessId) -> Option<&PageTable> {
        self.processes
            .iter()
            .find(|p| p.pid == pid)
            .map(|p| &p.table)
    }

    /// Page table whose base is `base`.
    #[must_use]
    pub fn table_by_base(&self, base: PageTableBase) -> Option<&PageTable> {
        self.slot_by_base(base).map(|slot| &self.get(slot).table)
    }

    pub(crate) fn entry(&self, loc: PteLocation) -> PageTableEntry {
        self.get(loc.process).table.get(loc.vpn)
    }

    pub(crate) fn set_entry(&mut self, loc: PteLocation, entry: PageTableEntry) {
        self.processes[loc.process.0].table.set(loc.vpn, entry);
    }

    /// Processes in admission order.
    pub fn iter(&self) -> impl Iterator<Item = &Process> + '_ {
        self.processes.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.processes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}
