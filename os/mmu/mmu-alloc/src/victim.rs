//! # Victim Queue
//!
//! Present data pages in the order they were bound to a frame. The head is
//! the next page to evict. Page-table frames are never admitted.

use crate::process::PteLocation;
use crate::ring::IndexRing;
use mmu_addresses::{FrameNumber, MAX_FRAMES};

/// A resident page: where its PTE lives and which frame backs it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Resident {
    pub location: PteLocation,
    pub frame: FrameNumber,
}

pub(crate) struct VictimQueue {
    ring: IndexRing<Resident>,
}

impl VictimQueue {
    /// Queue with room for one entry per frame.
    pub fn new(frames: usize) -> Self {
        Self {
            ring: IndexRing::with_capacity(frames.min(MAX_FRAMES)),
        }
    }

    /// Append a newly bound page.
    pub fn admit(&mut self, resident: Resident) {
        if self.ring.push_back(resident).is_err() {
            // At most one entry per frame exists at any time.
            log::error!("victim queue overflow admitting {resident:?}");
        }
    }

    pub fn peek(&self) -> Option<Resident> {
        self.ring.front()
    }

    /// Remove the oldest page.
    pub fn evict(&mut self) -> Option<Resident> {
        self.ring.pop_front()
    }

    pub const fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Resident> + '_ {
        self.ring.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{PageTableBase, ProcessId, ProcessTable};
    use mmu_addresses::VirtualPageNumber;

    #[test]
    fn first_admitted_is_first_evicted() {
        let mut processes = ProcessTable::new();
        let process = processes.insert(ProcessId::new(0), PageTableBase::new(FrameNumber::new(0)));
        let resident = |vpn, frame| Resident {
            location: PteLocation {
                process,
                vpn: VirtualPageNumber::new(vpn),
            },
            frame: FrameNumber::new(frame),
        };

        let mut queue = VictimQueue::new(4);
        queue.admit(resident(3, 1));
        queue.admit(resident(1, 2));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.peek(), Some(resident(3, 1)));
        assert_eq!(queue.evict(), Some(resident(3, 1)));

        queue.admit(resident(7, 1));
        assert_eq!(
            queue.iter().collect::<Vec<_>>(),
            [resident(1, 2), resident(7, 1)]
        );
    }

    #[test]
    fn empty_queue_has_no_victim() {
        let mut queue = VictimQueue::new(0);
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.evict(), None);
    }
}
