//! # Page-Fault Engine
//!
//! Resolves a fault on a single PTE by binding it to a frame. Frames come
//! from the free list while it lasts; after that the oldest resident page is
//! evicted to swap and its frame reused.
//!
//! ```text
//!   PTE state      action
//!   ─────────      ──────────────────────────────────────────────────
//!   Present        nothing to do
//!   Unmapped       free frame ─► bind
//!                  else victim ─► copy to new slot, zero ─► bind
//!   Swapped(s)     victim ─► exchange bytes with s, victim = Swapped(s) ─► bind
//! ```
//!
//! Every capacity check of a path runs before the first mutation, so a
//! failed resolution leaves all state untouched.

use crate::backing::{self, PhysicalMemory, SwapSpace};
use crate::error::NoCapacity;
use crate::process::{ProcessId, ProcessTable, PteLocation};
use crate::victim::{Resident, VictimQueue};
use mmu_addresses::{FrameNumber, SwapSlot, VirtualPageNumber};
use mmu_vmem::{FrameAlloc, PageTableEntry, SwapAlloc};

/// A page that was moved out of its frame to make room.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Eviction {
    /// Owner of the evicted page.
    pub pid: ProcessId,
    /// Page number of the evicted page in its owner's address space.
    pub vpn: VirtualPageNumber,
    /// The frame that was freed up and reassigned.
    pub frame: FrameNumber,
    /// Where the evicted contents now live.
    pub slot: SwapSlot,
}

/// What [`Mmu::resolve_fault`](crate::Mmu::resolve_fault) did.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FaultResolution {
    /// The page was already present in the given frame.
    AlreadyResident(FrameNumber),
    /// A never-mapped page was bound to a free frame.
    Allocated(FrameNumber),
    /// A never-mapped page was bound to the frame of an evicted page.
    Evicted(Eviction),
    /// A swapped page was brought back in, trading places with the evicted
    /// page: the victim now occupies the slot the page came from.
    SwappedIn(Eviction),
}

impl FaultResolution {
    /// Frame now backing the faulting page.
    #[must_use]
    pub const fn frame(&self) -> FrameNumber {
        match self {
            Self::AlreadyResident(frame) | Self::Allocated(frame) => *frame,
            Self::Evicted(eviction) | Self::SwappedIn(eviction) => eviction.frame,
        }
    }

    /// The page displaced to make room, if any.
    #[must_use]
    pub const fn eviction(&self) -> Option<&Eviction> {
        match self {
            Self::Evicted(eviction) | Self::SwappedIn(eviction) => Some(eviction),
            Self::AlreadyResident(_) | Self::Allocated(_) => None,
        }
    }
}

/// Mutable view over the state a fault touches.
pub(crate) struct FaultEngine<'a, F: FrameAlloc, S: SwapAlloc> {
    pub frames: &'a mut F,
    pub slots: &'a mut S,
    pub victims: &'a mut VictimQueue,
    pub processes: &'a mut ProcessTable,
    pub pmem: &'a mut PhysicalMemory,
    pub swap: &'a mut SwapSpace,
}

impl<F: FrameAlloc, S: SwapAlloc> FaultEngine<'_, F, S> {
    /// Obtain a zeroed frame, evicting the oldest resident page if none is
    /// free.
    ///
    /// # Errors
    /// - [`NoCapacity::NoVictim`] if nothing is resident to evict.
    /// - [`NoCapacity::SwapExhausted`] if the victim has nowhere to go.
    pub fn obtain_frame(&mut self) -> Result<(FrameNumber, Option<Eviction>), NoCapacity> {
        if let Some(frame) = self.frames.alloc_frame() {
            self.pmem.zero_frame(frame);
            return Ok((frame, None));
        }
        let eviction = self.evict_to_swap()?;
        Ok((eviction.frame, Some(eviction)))
    }

    /// Resolve a fault on the PTE at `loc`.
    pub fn resolve(&mut self, loc: PteLocation) -> Result<FaultResolution, NoCapacity> {
        match self.processes.entry(loc) {
            PageTableEntry::Present { frame, .. } => Ok(FaultResolution::AlreadyResident(frame)),
            PageTableEntry::Unmapped => {
                let (frame, eviction) = self.obtain_frame()?;
                self.bind(loc, frame);
                Ok(eviction.map_or(FaultResolution::Allocated(frame), FaultResolution::Evicted))
            }
            PageTableEntry::Swapped(slot) => {
                let victim = self.victims.evict().ok_or(NoCapacity::NoVictim)?;
                backing::exchange(self.pmem, self.swap, victim.frame, slot);
                let eviction = self.retire(victim, slot);
                self.bind(loc, victim.frame);
                Ok(FaultResolution::SwappedIn(eviction))
            }
        }
    }

    fn evict_to_swap(&mut self) -> Result<Eviction, NoCapacity> {
        let victim = self.victims.peek().ok_or(NoCapacity::NoVictim)?;
        let slot = self.slots.alloc_slot().ok_or(NoCapacity::SwapExhausted)?;
        let evicted = self.victims.evict();
        debug_assert_eq!(evicted, Some(victim));

        backing::swap_out(self.pmem, self.swap, victim.frame, slot);
        Ok(self.retire(victim, slot))
    }

    /// Point the victim's PTE at `slot`.
    fn retire(&mut self, victim: Resident, slot: SwapSlot) -> Eviction {
        self.processes
            .set_entry(victim.location, PageTableEntry::Swapped(slot));
        let eviction = Eviction {
            pid: self.processes.get(victim.location.process).pid(),
            vpn: victim.location.vpn,
            frame: victim.frame,
            slot,
        };
        log::trace!("evicted {eviction:?}");
        eviction
    }

    fn bind(&mut self, location: PteLocation, frame: FrameNumber) {
        self.processes
            .set_entry(location, PageTableEntry::present(frame));
        self.victims.admit(Resident { location, frame });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_alloc::FifoFrameAlloc;
    use crate::process::{PageTableBase, ProcessSlot};
    use crate::swap_alloc::FifoSwapAlloc;

    struct Fixture {
        frames: FifoFrameAlloc,
        slots: FifoSwapAlloc,
        victims: VictimQueue,
        processes: ProcessTable,
        pmem: PhysicalMemory,
        swap: SwapSpace,
        process: ProcessSlot,
    }

    /// One process with its table in frame 0 and `frames - 1` data frames.
    fn fixture(frames: usize, slots: usize) -> Fixture {
        let mut frame_alloc = FifoFrameAlloc::new(frames);
        let mut processes = ProcessTable::new();
        let base = PageTableBase::new(frame_alloc.acquire().unwrap());
        let process = processes.insert(ProcessId::new(1), base);
        Fixture {
            frames: frame_alloc,
            slots: FifoSwapAlloc::new(slots),
            victims: VictimQueue::new(frames),
            processes,
            pmem: PhysicalMemory::reserve(frames * 4).unwrap(),
            swap: SwapSpace::reserve((slots + 1) * 4).unwrap(),
            process,
        }
    }

    impl Fixture {
        fn locator(&self) -> impl Fn(u8) -> PteLocation + use<> {
            let process = self.process;
            move |vpn| PteLocation {
                process,
                vpn: VirtualPageNumber::new(vpn),
            }
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
    }

    #[test]
    fn oldest_resident_page_is_moved_to_swap() {
        let mut fx = fixture(3, 2);
        let loc = fx.locator();
        assert_eq!(
            fx.engine().resolve(loc(0)),
            Ok(FaultResolution::Allocated(FrameNumber::new(1)))
        );
        assert_eq!(
            fx.engine().resolve(loc(1)),
            Ok(FaultResolution::Allocated(FrameNumber::new(2)))
        );
        fx.pmem.frame_mut(FrameNumber::new(1)).copy_from_slice(&[1, 2, 3, 4]);

        let eviction = Eviction {
            pid: ProcessId::new(1),
            vpn: VirtualPageNumber::new(0),
            frame: FrameNumber::new(1),
            slot: SwapSlot::new(1),
        };
        let resolution = fx.engine().resolve(loc(2));
        assert_eq!(resolution, Ok(FaultResolution::Evicted(eviction)));
        assert_eq!(resolution.unwrap().eviction(), Some(&eviction));

        assert_eq!(fx.swap.slot_mut(SwapSlot::new(1)), [1, 2, 3, 4]);
        assert_eq!(fx.pmem.frame(FrameNumber::new(1)), [0; 4]);
        assert_eq!(
            fx.processes.entry(loc(0)),
            PageTableEntry::Swapped(SwapSlot::new(1))
        );
        assert_eq!(
            fx.victims.iter().map(|r| r.location).collect::<Vec<_>>(),
            [loc(1), loc(2)]
        );
    }

    #[test]
    fn exhausted_swap_keeps_the_victim_resident() {
        let mut fx = fixture(2, 0);
        let loc = fx.locator();
        fx.engine().resolve(loc(0)).unwrap();
        fx.pmem.frame_mut(FrameNumber::new(1)).fill(7);

        assert_eq!(fx.engine().resolve(loc(1)), Err(NoCapacity::SwapExhausted));
        assert_eq!(fx.victims.peek().map(|r| r.location), Some(loc(0)));
        assert_eq!(fx.victims.len(), 1);
        assert_eq!(
            fx.processes.entry(loc(0)),
            PageTableEntry::present(FrameNumber::new(1))
        );
        assert_eq!(fx.processes.entry(loc(1)), PageTableEntry::Unmapped);
        assert_eq!(fx.pmem.frame(FrameNumber::new(1)), [7; 4]);
    }

    #[test]
    fn nothing_resident_means_no_victim() {
        let mut fx = fixture(1, 2);
        let loc = fx.locator();
        assert_eq!(fx.engine().resolve(loc(0)), Err(NoCapacity::NoVictim));
        assert_eq!(fx.slots.len(), 2);
    }
}
