//! # Interface de Flags de Hardware
//!
//! Leitura e limpeza dos bits Accessed/Dirty da PTE que mapeia um candidato,
//! e invalidação da tradução em cache.
//!
//! A MMU seta A/D; a política apenas lê e limpa. Depois de limpar, a
//! tradução precisa sair do TLB, senão a MMU não volta a setar os bits.

use crate::mm::addr::VirtAddr;
use crate::mm::vmm::tlb;
use crate::mm::vmm::{PageTableEntry, PageWalker, PteFlags};
use core::sync::atomic::{AtomicU64, Ordering};

/// Acesso às PTEs de um address space
pub trait PteAccess {
    /// Cópia da PTE presente que mapeia `va`, sem alocar nada
    fn lookup(&mut self, va: VirtAddr) -> Option<PageTableEntry>;

    /// Limpa `flags` na PTE de `va`, se ela existir
    fn clear_flags(&mut self, va: VirtAddr, flags: PteFlags);

    /// Descarta a tradução de `va` do TLB local
    fn invalidate(&mut self, va: VirtAddr);
}

/// Page tables reais de x86_64, acessadas pelo HHDM
pub struct X86PageTable {
    walker: PageWalker,
}

impl X86PageTable {
    pub const fn new(walker: PageWalker) -> Self {
        Self { walker }
    }

    pub const fn walker(&self) -> &PageWalker {
        &self.walker
    }
}

impl PteAccess for X86PageTable {
    fn lookup(&mut self, va: VirtAddr) -> Option<PageTableEntry> {
        self.walker.read_pte(va)
    }

    fn clear_flags(&mut self, va: VirtAddr, flags: PteFlags) {
        let Some(slot) = self.walker.find_pte(va) else {
            return;
        };
        // SAFETY: `find_pte` só devolve slots alinhados de tabelas vivas
        // (contrato de `PageWalker::new`). O `fetch_and` atômico não perde
        // um A/D que a MMU sete em paralelo nos outros bits.
        let entry = unsafe { AtomicU64::from_ptr(slot.as_ptr()) };
        entry.fetch_and(!flags.bits(), Ordering::AcqRel);
    }

    fn invalidate(&mut self, va: VirtAddr) {
        tlb::invalidate(self.walker.root(), va);
    }
}
