//! # Page Table Simulada
//!
//! Implementação de `PteAccess` sem hardware, usada pelo validador de trace
//! e pelos testes. Emula o que a MMU faz com A/D:
//!
//! - TLB miss: o walk seta A na PTE e guarda a tradução em cache.
//! - Escrita por uma tradução em cache com D limpo: seta D na PTE e no cache.
//! - Acesso por tradução em cache com D já setado: nenhuma escrita na PTE.
//!
//! Por isso limpar A sem invalidar deixa a página "fria" para sempre, como
//! no hardware real.

use super::hw::PteAccess;
use crate::mm::addr::{PhysFrame, VirtAddr};
use crate::mm::error::{SwapError, SwapResult};
use crate::mm::vmm::{PageTableEntry, PteFlags};
use alloc::collections::BTreeMap;

/// Tipo de acesso à memória
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessType {
    Read,
    Write,
}

#[derive(Default)]
pub struct MockPageTable {
    entries: BTreeMap<VirtAddr, PageTableEntry>,
    tlb: BTreeMap<VirtAddr, PageTableEntry>,
    lookups: u64,
    invalidations: u64,
}

impl MockPageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapeia a página de `va` em `frame`. PRESENT é sempre incluído.
    pub fn map(&mut self, va: VirtAddr, frame: PhysFrame, flags: PteFlags) -> SwapResult<()> {
        let va = va.page_base();
        if self.entries.contains_key(&va) {
            return Err(SwapError::AlreadyMapped);
        }
        self.entries
            .insert(va, PageTableEntry::new(frame, flags | PteFlags::PRESENT));
        Ok(())
    }

    /// Remove o mapeamento e devolve a PTE antiga
    pub fn unmap(&mut self, va: VirtAddr) -> SwapResult<PageTableEntry> {
        let va = va.page_base();
        self.tlb.remove(&va);
        self.entries.remove(&va).ok_or(SwapError::NotMapped)
    }

    pub fn is_mapped(&self, va: VirtAddr) -> bool {
        self.entries.contains_key(&va.page_base())
    }

    /// PTE atual, sem contar como lookup da política
    pub fn entry(&self, va: VirtAddr) -> Option<PageTableEntry> {
        self.entries.get(&va.page_base()).copied()
    }

    /// Seta bits diretamente na PTE (como a MMU faria)
    pub fn set_flags(&mut self, va: VirtAddr, flags: PteFlags) -> SwapResult<()> {
        let pte = self
            .entries
            .get_mut(&va.page_base())
            .ok_or(SwapError::NotMapped)?;
        pte.insert(flags);
        Ok(())
    }

    /// A tradução de `va` está no TLB simulado?
    pub fn is_cached(&self, va: VirtAddr) -> bool {
        self.tlb.contains_key(&va.page_base())
    }

    pub fn lookups(&self) -> u64 {
        self.lookups
    }

    pub fn invalidations(&self) -> u64 {
        self.invalidations
    }

    /// Acessa `va` como a CPU faria. `Err(NotMapped)` é o page fault.
    pub fn access(&mut self, va: VirtAddr, access: AccessType) -> SwapResult<PhysFrame> {
        let va = va.page_base();

        let cached = match self.tlb.get(&va) {
            Some(cached) => *cached,
            None => {
                let pte = self.entries.get_mut(&va).ok_or(SwapError::NotMapped)?;
                pte.insert(PteFlags::ACCESSED);
                let walked = *pte;
                self.tlb.insert(va, walked);
                walked
            }
        };

        if access == AccessType::Write && !cached.is_dirty() {
            let pte = self.entries.get_mut(&va).ok_or(SwapError::NotMapped)?;
            pte.insert(PteFlags::DIRTY);
            if let Some(cached) = self.tlb.get_mut(&va) {
                cached.insert(PteFlags::DIRTY);
            }
        }

        Ok(cached.frame())
    }
}

impl PteAccess for MockPageTable {
    fn lookup(&mut self, va: VirtAddr) -> Option<PageTableEntry> {
        self.lookups += 1;
        self.entry(va)
    }

    fn clear_flags(&mut self, va: VirtAddr, flags: PteFlags) {
        if let Some(pte) = self.entries.get_mut(&va.page_base()) {
            pte.remove(flags);
        }
    }

    fn invalidate(&mut self, va: VirtAddr) {
        self.invalidations += 1;
        self.tlb.remove(&va.page_base());
    }
}
