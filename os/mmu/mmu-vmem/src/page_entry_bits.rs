use bitfield_struct::bitfield;
use mmu_addresses::{FrameNumber, SwapSlot};

/// A one-byte page-table entry in its **present** form.
///
/// The type allows read/write access to individual bits without manual masking
/// or shifting, using the [`bitfield_struct`](https://docs.rs/bitfield-struct/)
/// derive.
///
/// ### Bit layout
///
/// | Bits | Name      | Meaning |
/// |------|-----------|---------|
/// | 0    | `present` | Always set in this form |
/// | 1    | `user`    | User flag; preserved, not interpreted |
/// | 2–7  | `pfn`     | Physical frame number |
///
/// ### Example
/// ```rust
/// # use mmu_vmem::PresentEntryBits;
/// # use mmu_vmem::addresses::FrameNumber;
/// let e = PresentEntryBits::new()
///     .with_present(true)
///     .with_frame(FrameNumber::new(9));
/// assert_eq!(e.into_bits(), 0b0010_0101);
/// assert_eq!(e.frame(), FrameNumber::new(9));
/// ```
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct PresentEntryBits {
    /// Present (bit 0).
    pub present: bool,

    /// User flag (bit 1).
    pub user: bool,

    /// Physical frame number (bits 2..=7).
    #[bits(6)]
    pfn: u8,
}

/// A one-byte page-table entry in its **swapped-out** form.
///
/// ### Bit layout
///
/// | Bits | Name      | Meaning |
/// |------|-----------|---------|
/// | 0    | `present` | Always clear in this form |
/// | 1–7  | `slot`    | Swap slot index, never 0 |
///
/// An all-zero byte is *not* a swapped entry; it is the "never mapped"
/// sentinel, which is why slot 0 is never issued.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct SwappedEntryBits {
    /// Present (bit 0).
    pub present: bool,

    /// Swap slot index (bits 1..=7).
    #[bits(7)]
    slot: u8,
}

impl PresentEntryBits {
    #[inline]
    #[must_use]
    pub const fn frame(&self) -> FrameNumber {
        FrameNumber::new(self.pfn())
    }

    #[inline]
    #[must_use]
    pub const fn with_frame(self, frame: FrameNumber) -> Self {
        self.with_pfn(frame.as_u8())
    }
}

impl SwappedEntryBits {
    #[inline]
    #[must_use]
    pub const fn swap_slot(&self) -> SwapSlot {
        SwapSlot::new(self.slot())
    }

    #[inline]
    #[must_use]
    pub const fn with_swap_slot(self, slot: SwapSlot) -> Self {
        self.with_slot(slot.as_u8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_layout_matches_byte_encoding() {
        let e = PresentEntryBits::new()
            .with_present(true)
            .with_user(true)
            .with_frame(FrameNumber::new(63));
        assert_eq!(e.into_bits(), 0xFF);

        let decoded = PresentEntryBits::from_bits(0b0000_0101);
        assert!(decoded.present());
        assert!(!decoded.user());
        assert_eq!(decoded.frame(), FrameNumber::new(1));
    }

    #[test]
    fn swapped_layout_matches_byte_encoding() {
        let e = SwappedEntryBits::new().with_swap_slot(SwapSlot::new(127));
        assert_eq!(e.into_bits(), 0xFE);
        assert!(!e.present());

        let decoded = SwappedEntryBits::from_bits(0b0000_0110);
        assert_eq!(decoded.swap_slot(), SwapSlot::new(3));
    }
}
