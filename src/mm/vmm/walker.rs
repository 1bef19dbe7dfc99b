//! # Page Table Walker
//!
//! Localiza a PTE (nível 1) que mapeia um endereço virtual, descendo
//! PML4 -> PDPT -> PD -> PT pela janela de mapeamento direto (HHDM).
//!
//! Nunca aloca: uma tabela intermediária ausente encerra a busca com `None`.
//! Mapeamentos huge (1GiB/2MiB) também retornam `None`; o swap trabalha apenas
//! com páginas de 4KiB.

use crate::mm::addr::{PhysAddr, VirtAddr};
use crate::mm::vmm::pte::{PageTableEntry, PteFlags};
use core::ptr::NonNull;
use volatile::VolatilePtr;

/// Walker sobre uma hierarquia de page tables
#[derive(Debug, Clone, Copy)]
pub struct PageWalker {
    root: PhysAddr,
    hhdm_offset: u64,
}

impl PageWalker {
    /// # Safety
    ///
    /// `root` deve ser o endereço físico de uma PML4 válida e toda tabela
    /// alcançável a partir dela deve estar acessível em `phys + hhdm_offset`
    /// enquanto o walker existir.
    pub const unsafe fn new(root: PhysAddr, hhdm_offset: u64) -> Self {
        Self { root, hhdm_offset }
    }

    #[inline]
    pub const fn root(&self) -> PhysAddr {
        self.root
    }

    /// Ponteiro para a PTE presente que mapeia `va`
    pub fn find_pte(&self, va: VirtAddr) -> Option<NonNull<u64>> {
        let mut table = self.root;

        for level in (2..=4).rev() {
            let slot = self.slot(table, va.table_index(level))?;
            // SAFETY: contrato de `new`
            let entry = PageTableEntry::from_raw(unsafe { VolatilePtr::new(slot) }.read());
            if !entry.is_present() || entry.flags().contains(PteFlags::HUGE_PAGE) {
                return None;
            }
            table = PhysAddr::from_entry(entry.raw());
        }

        let slot = self.slot(table, va.table_index(1))?;
        // SAFETY: contrato de `new`
        let entry = PageTableEntry::from_raw(unsafe { VolatilePtr::new(slot) }.read());
        entry.is_present().then_some(slot)
    }

    /// Leitura volátil da PTE que mapeia `va`
    pub fn read_pte(&self, va: VirtAddr) -> Option<PageTableEntry> {
        let slot = self.find_pte(va)?;
        // SAFETY: contrato de `new`
        Some(PageTableEntry::from_raw(
            unsafe { VolatilePtr::new(slot) }.read(),
        ))
    }

    #[inline]
    fn slot(&self, table: PhysAddr, index: usize) -> Option<NonNull<u64>> {
        let addr = table.as_u64() + self.hhdm_offset + (index * core::mem::size_of::<u64>()) as u64;
        NonNull::new(addr as *mut u64)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::mm::addr::PhysFrame;
    use crate::mm::config::PT_ENTRIES;
    use alloc::boxed::Box;
    use alloc::vec::Vec;

    /// Tabela alinhada a página, como a MMU exige
    #[repr(C, align(4096))]
    pub(crate) struct Table(pub [u64; PT_ENTRIES]);

    /// Hierarquia de 4 níveis em memória do host. Com `hhdm_offset = 0` o
    /// "endereço físico" de cada tabela é o próprio endereço da alocação.
    pub(crate) struct HostTables {
        tables: Vec<Box<Table>>,
    }

    impl HostTables {
        pub(crate) fn new() -> Self {
            Self {
                tables: alloc::vec![Box::new(Table([0; PT_ENTRIES]))],
            }
        }

        pub(crate) fn root(&self) -> PhysAddr {
            PhysAddr::new(&*self.tables[0] as *const Table as u64)
        }

        /// Mapeia `va` para `frame` criando as tabelas intermediárias
        pub(crate) fn map(&mut self, va: VirtAddr, frame: PhysFrame, flags: PteFlags) {
            let mut table = 0usize;
            for level in (2..=4).rev() {
                let index = va.table_index(level);
                let raw = self.tables[table].0[index];
                table = if raw & PteFlags::PRESENT.bits() != 0 {
                    self.position_of(PhysAddr::from_entry(raw))
                } else {
                    self.tables.push(Box::new(Table([0; PT_ENTRIES])));
                    let child = self.tables.len() - 1;
                    let child_addr = &*self.tables[child] as *const Table as u64;
                    self.tables[table].0[index] =
                        child_addr | (PteFlags::PRESENT | PteFlags::WRITABLE).bits();
                    child
                };
            }
            self.tables[table].0[va.table_index(1)] = PageTableEntry::new(frame, flags).raw();
        }

        /// Marca a entrada de nível `level` no caminho de `va` como huge
        pub(crate) fn set_huge(&mut self, va: VirtAddr, level: usize) {
            let mut table = 0usize;
            for current in (level + 1..=4).rev() {
                let raw = self.tables[table].0[va.table_index(current)];
                table = self.position_of(PhysAddr::from_entry(raw));
            }
            self.tables[table].0[va.table_index(level)] |= PteFlags::HUGE_PAGE.bits();
        }

        fn position_of(&self, addr: PhysAddr) -> usize {
            self.tables
                .iter()
                .position(|t| &**t as *const Table as u64 == addr.as_u64())
                .expect("tabela intermediária desconhecida")
        }
    }

    fn frame(addr: u64) -> PhysFrame {
        PhysFrame::containing_address(PhysAddr::new(addr))
    }

    #[test]
    fn finds_present_leaf_entry() {
        let mut tables = HostTables::new();
        let va = VirtAddr::new(0x0000_7F12_3456_7000);
        tables.map(va, frame(0x00AB_C000), PteFlags::PRESENT | PteFlags::USER);

        let walker = unsafe { PageWalker::new(tables.root(), 0) };
        let pte = walker.read_pte(va).expect("PTE presente");
        assert_eq!(pte.frame(), frame(0x00AB_C000));
        assert!(pte.flags().contains(PteFlags::USER));
    }

    #[test]
    fn missing_intermediate_table_yields_none() {
        let mut tables = HostTables::new();
        tables.map(VirtAddr::new(0x1000), frame(0x20_0000), PteFlags::PRESENT);

        let walker = unsafe { PageWalker::new(tables.root(), 0) };
        assert!(walker.find_pte(VirtAddr::new(0x0000_4000_0000_0000)).is_none());
        // mesma PT, entrada vazia
        assert!(walker.find_pte(VirtAddr::new(0x2000)).is_none());
    }

    #[test]
    fn non_present_leaf_yields_none() {
        let mut tables = HostTables::new();
        tables.map(VirtAddr::new(0x3000), frame(0x30_0000), PteFlags::WRITABLE);

        let walker = unsafe { PageWalker::new(tables.root(), 0) };
        assert!(walker.find_pte(VirtAddr::new(0x3000)).is_none());
    }

    #[test]
    fn huge_mapping_is_not_a_swap_candidate() {
        let mut tables = HostTables::new();
        let va = VirtAddr::new(0x4000_0000);
        tables.map(va, frame(0x50_0000), PteFlags::PRESENT);
        tables.set_huge(va, 2);

        let walker = unsafe { PageWalker::new(tables.root(), 0) };
        assert!(walker.find_pte(va).is_none());
    }
}
