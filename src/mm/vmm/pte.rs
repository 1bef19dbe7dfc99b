//! # Page Table Entry
//!
//! Os bits A (accessed) e D (dirty) pertencem ao hardware: a MMU os seta em
//! acessos/escritas, o kernel apenas lê e limpa.

use crate::mm::addr::{PhysAddr, PhysFrame};
use crate::mm::config::PTE_ADDR_MASK;
use bitflags::bitflags;
use core::fmt;

bitflags! {
    /// Flags de uma entrada de page table x86_64
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PteFlags: u64 {
        const PRESENT = 1 << 0;
        const WRITABLE = 1 << 1;
        const USER = 1 << 2;
        const WRITE_THROUGH = 1 << 3;
        const NO_CACHE = 1 << 4;
        const ACCESSED = 1 << 5;
        const DIRTY = 1 << 6;
        /// Huge page (2MB em PD, 1GB em PDPT)
        const HUGE_PAGE = 1 << 7;
        const GLOBAL = 1 << 8;
        const NO_EXECUTE = 1 << 63;
    }
}

/// Valor bruto de uma PTE (endereço do frame + flags)
#[derive(Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct PageTableEntry(u64);

impl PageTableEntry {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// PTE mapeando `frame` com `flags`
    #[inline]
    pub fn new(frame: PhysFrame, flags: PteFlags) -> Self {
        Self((frame.start_address().as_u64() & PTE_ADDR_MASK) | flags.bits())
    }

    #[inline]
    pub const fn raw(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn flags(&self) -> PteFlags {
        PteFlags::from_bits_truncate(self.0 & !PTE_ADDR_MASK)
    }

    #[inline]
    pub fn frame(&self) -> PhysFrame {
        PhysFrame::containing_address(PhysAddr::from_entry(self.0))
    }

    #[inline]
    pub const fn is_present(&self) -> bool {
        self.flags().contains(PteFlags::PRESENT)
    }

    #[inline]
    pub const fn is_accessed(&self) -> bool {
        self.flags().contains(PteFlags::ACCESSED)
    }

    #[inline]
    pub const fn is_dirty(&self) -> bool {
        self.flags().contains(PteFlags::DIRTY)
    }

    #[inline]
    pub fn insert(&mut self, flags: PteFlags) {
        self.0 |= flags.bits();
    }

    #[inline]
    pub fn remove(&mut self, flags: PteFlags) {
        self.0 &= !flags.bits();
    }

    #[inline]
    pub fn clear_accessed(&mut self) {
        self.remove(PteFlags::ACCESSED);
    }

    #[inline]
    pub fn clear_dirty(&mut self) {
        self.remove(PteFlags::DIRTY);
    }
}

impl fmt::Debug for PageTableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageTableEntry")
            .field("frame", &self.frame())
            .field("flags", &self.flags())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_and_frame_round_trip_through_raw() {
        let frame = PhysFrame::containing_address(PhysAddr::new(0x0012_3000));
        let pte = PageTableEntry::new(frame, PteFlags::PRESENT | PteFlags::WRITABLE);

        assert_eq!(pte.frame(), frame);
        assert!(pte.is_present());
        assert!(!pte.is_accessed());
        assert!(!pte.is_dirty());
    }

    #[test]
    fn clearing_a_and_d_leaves_other_bits() {
        let frame = PhysFrame::containing_address(PhysAddr::new(0x0040_0000));
        let mut pte = PageTableEntry::new(
            frame,
            PteFlags::PRESENT | PteFlags::ACCESSED | PteFlags::DIRTY | PteFlags::NO_EXECUTE,
        );

        pte.clear_accessed();
        assert!(!pte.is_accessed());
        assert!(pte.is_dirty());

        pte.clear_dirty();
        assert!(!pte.is_dirty());
        assert_eq!(pte.flags(), PteFlags::PRESENT | PteFlags::NO_EXECUTE);
        assert_eq!(pte.frame(), frame);
    }
}
