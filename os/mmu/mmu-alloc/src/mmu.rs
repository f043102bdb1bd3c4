//! # Memory-Management Unit
//!
//! [`Mmu`] owns every piece of emulator state: both backing regions, both
//! free lists, the victim queue and the process table. All mutating
//! operations take `&mut self`; there is no global instance.
//!
//! # Example
//! ```rust
//! use mmu_alloc::{FaultResolution, Mmu, ProcessId};
//! use mmu_vmem::Translation;
//! use mmu_vmem::addresses::VirtualAddress;
//!
//! let mut mmu = Mmu::init(16, 16).unwrap();
//! let pid = ProcessId::new(1);
//! let base = mmu.admit_or_switch(pid).unwrap();
//!
//! let va = VirtualAddress::new(0x21);
//! assert_eq!(mmu.translate(base, va), Translation::Fault);
//!
//! let resolution = mmu.resolve_fault(pid, va).unwrap();
//! assert!(matches!(resolution, FaultResolution::Allocated(_)));
//!
//! mmu.store(base, va, 0x5A).unwrap();
//! assert_eq!(mmu.load(base, va), Ok(0x5A));
//! ```

use crate::backing::{PhysicalMemory, SwapSpace};
use crate::config::MmuConfig;
use crate::error::{AllocError, MmuError, NoCapacity, PageFault};
use crate::fault::{Eviction, FaultEngine, FaultResolution};
use crate::frame_alloc::FifoFrameAlloc;
use crate::process::{PageTableBase, Process, ProcessId, ProcessTable, PteLocation};
use crate::swap_alloc::FifoSwapAlloc;
use crate::victim::VictimQueue;
use mmu_addresses::{
    FrameNumber, PAGE_TABLE_ENTRIES, PhysicalAddress, VirtualAddress, VirtualPageNumber,
};
use mmu_vmem::{PageTableEntry, Translation, translate};

/// Result of [`Mmu::admit`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Admission {
    /// Page-table base of the process.
    pub base: PageTableBase,
    /// Whether the process was created by this call.
    pub created: bool,
    /// Page evicted to obtain the page-table frame, if any.
    pub eviction: Option<Eviction>,
}

/// Snapshot of the emulator's counters.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct MmuStats {
    pub total_frames: usize,
    pub free_frames: usize,
    /// Data pages currently present.
    pub resident_pages: usize,
    /// Frames reserved for page tables (one per process).
    pub page_table_frames: usize,
    pub total_swap_slots: usize,
    pub free_swap_slots: usize,
    /// Faults that changed a mapping.
    pub faults: usize,
    /// Pages moved to swap, including those displaced by a swap-in.
    pub evictions: usize,
    pub swap_ins: usize,
}

#[derive(Copy, Clone, Debug, Default)]
struct Counters {
    faults: usize,
    evictions: usize,
    swap_ins: usize,
}

pub struct Mmu {
    config: MmuConfig,
    pmem: PhysicalMemory,
    swap: SwapSpace,
    frames: FifoFrameAlloc,
    slots: FifoSwapAlloc,
    victims: VictimQueue,
    processes: ProcessTable,
    counters: Counters,
}

impl Mmu {
    /// Reserve `pmem_size` bytes of physical memory and `swap_size` bytes of
    /// swap space.
    ///
    /// # Errors
    /// [`AllocError`] if either region cannot be reserved.
    pub fn init(pmem_size: usize, swap_size: usize) -> Result<Self, AllocError> {
        Self::new(MmuConfig::new(pmem_size, swap_size))
    }

    /// Build an MMU from a configuration.
    ///
    /// # Errors
    /// [`AllocError`] if either region cannot be reserved.
    pub fn new(config: MmuConfig) -> Result<Self, AllocError> {
        let pmem = PhysicalMemory::reserve(config.pmem_size())?;
        let swap = SwapSpace::reserve(config.swap_size())?;

        if config.is_clamped() {
            log::warn!(
                "{} bytes of physical memory and {} bytes of swap exceed the PTE range; using {} frames and {} swap slots",
                config.pmem_size(),
                config.swap_size(),
                config.frame_count(),
                config.swap_slot_count()
            );
        }

        let frames = FifoFrameAlloc::new(config.frame_count());
        let slots = FifoSwapAlloc::new(config.swap_slot_count());
        log::info!(
            "MMU ready: {} frames, {} swap slots",
            frames.len(),
            slots.len()
        );

        Ok(Self {
            config,
            pmem,
            swap,
            victims: VictimQueue::new(frames.capacity()),
            frames,
            slots,
            processes: ProcessTable::new(),
            counters: Counters::default(),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &MmuConfig {
        &self.config
    }

    fn engine(&mut self) -> FaultEngine<'_, FifoFrameAlloc, FifoSwapAlloc> {
        FaultEngine {
            frames: &mut self.frames,
            slots: &mut self.slots,
            victims: &mut self.victims,
            processes: &mut self.processes,
            pmem: &mut self.pmem,
            swap: &mut self.swap,
        }
    }

    /// Page-table base of `pid`, if admitted.
    #[must_use]
    pub fn lookup(&self, pid: ProcessId) -> Option<PageTableBase> {
        self.processes.lookup(pid)
    }

    /// Switch to `pid`, creating it on first sight.
    ///
    /// A new process takes a frame for its page table the way a data page
    /// would, evicting the oldest resident page if no frame is free. That
    /// frame never becomes an eviction candidate.
    ///
    /// # Errors
    /// [`NoCapacity`] if the page-table frame cannot be obtained.
    pub fn admit(&mut self, pid: ProcessId) -> Result<Admission, NoCapacity> {
        if let Some(base) = self.processes.lookup(pid) {
            log::trace!("switch to process {pid} (base {base})");
            return Ok(Admission {
                base,
                created: false,
                eviction: None,
            });
        }

        let (frame, eviction) = self.engine().obtain_frame()?;
        if eviction.is_some() {
            self.counters.evictions += 1;
        }

        let base = PageTableBase::new(frame);
        self.processes.insert(pid, base);
        log::info!("created process {pid} with page table at {base}");
        Ok(Admission {
            base,
            created: true,
            eviction,
        })
    }

    /// Like [`admit`](Self::admit), returning only the base.
    ///
    /// # Errors
    /// [`NoCapacity`] if the page-table frame cannot be obtained.
    pub fn admit_or_switch(&mut self, pid: ProcessId) -> Result<PageTableBase, NoCapacity> {
        self.admit(pid).map(|admission| admission.base)
    }

    /// Translate `va` through the page table at `base`.
    ///
    /// A base that belongs to no process translates to [`Translation::Fault`].
    #[must_use]
    pub fn translate(&self, base: PageTableBase, va: VirtualAddress) -> Translation {
        self.processes
            .table_by_base(base)
            .map_or(Translation::Fault, |table| translate(table, va))
    }

    /// Make the page holding `va` resident in `pid`'s address space.
    ///
    /// # Errors
    /// - [`MmuError::UnknownProcess`] if `pid` was never admitted.
    /// - [`MmuError::NoCapacity`] if no frame can be made available. No
    ///   state changes in that case.
    pub fn resolve_fault(
        &mut self,
        pid: ProcessId,
        va: VirtualAddress,
    ) -> Result<FaultResolution, MmuError> {
        let process = self
            .processes
            .slot_of(pid)
            .ok_or(MmuError::UnknownProcess(pid))?;
        let location = PteLocation {
            process,
            vpn: va.vpn(),
        };

        let resolution = self.engine().resolve(location)?;
        match resolution {
            FaultResolution::AlreadyResident(_) => {}
            FaultResolution::Allocated(_) => self.counters.faults += 1,
            FaultResolution::Evicted(_) => {
                self.counters.faults += 1;
                self.counters.evictions += 1;
            }
            FaultResolution::SwappedIn(_) => {
                self.counters.faults += 1;
                self.counters.evictions += 1;
                self.counters.swap_ins += 1;
            }
        }
        log::debug!("process {pid}: fault at {va:?} resolved: {resolution:?}");
        Ok(resolution)
    }

    fn physical(
        &self,
        base: PageTableBase,
        va: VirtualAddress,
    ) -> Result<PhysicalAddress, PageFault> {
        self.translate(base, va)
            .physical_address()
            .ok_or(PageFault(va))
    }

    /// Read the byte at `va`. Never resolves faults.
    ///
    /// # Errors
    /// [`PageFault`] if the page is not resident.
    pub fn load(&self, base: PageTableBase, va: VirtualAddress) -> Result<u8, PageFault> {
        let pa = self.physical(base, va)?;
        Ok(self.pmem.read(pa))
    }

    /// Write the byte at `va`. Never resolves faults.
    ///
    /// # Errors
    /// [`PageFault`] if the page is not resident.
    pub fn store(
        &mut self,
        base: PageTableBase,
        va: VirtualAddress,
        value: u8,
    ) -> Result<(), PageFault> {
        let pa = self.physical(base, va)?;
        self.pmem.write(pa, value);
        Ok(())
    }

    /// Decoded PTE for `vpn` in `pid`'s page table.
    #[must_use]
    pub fn entry(&self, pid: ProcessId, vpn: VirtualPageNumber) -> Option<PageTableEntry> {
        self.processes.table(pid).map(|table| table.get(vpn))
    }

    /// `pid`'s page table in its one-byte-per-entry form.
    #[must_use]
    pub fn page_table_bytes(&self, pid: ProcessId) -> Option<[u8; PAGE_TABLE_ENTRIES]> {
        self.processes.table(pid).map(mmu_vmem::PageTable::to_bytes)
    }

    /// Admitted processes in admission order.
    pub fn processes(&self) -> impl Iterator<Item = &Process> + '_ {
        self.processes.iter()
    }

    /// Resident data pages, next eviction candidate first.
    pub fn resident_pages(
        &self,
    ) -> impl Iterator<Item = (ProcessId, VirtualPageNumber, FrameNumber)> + '_ {
        self.victims.iter().map(|resident| {
            let pid = self.processes.get(resident.location.process).pid();
            (pid, resident.location.vpn, resident.frame)
        })
    }

    #[must_use]
    pub fn stats(&self) -> MmuStats {
        MmuStats {
            total_frames: self.frames.capacity(),
            free_frames: self.frames.len(),
            resident_pages: self.victims.len(),
            page_table_frames: self.processes.len(),
            total_swap_slots: self.slots.capacity(),
            free_swap_slots: self.slots.len(),
            faults: self.counters.faults,
            evictions: self.counters.evictions,
            swap_ins: self.counters.swap_ins,
        }
    }
}

impl core::fmt::Debug for Mmu {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mmu")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .field("processes", &self.processes)
            .finish_non_exhaustive()
    }
}
