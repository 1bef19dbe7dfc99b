//! # Address Space
//!
//! Contexto de memória virtual de um processo: a page table e o estado
//! privado da política de swap. O address space não é dono dos `Page`s; eles
//! pertencem ao anel da política enquanto candidatos e ao caller depois.

use crate::mm::addr::VirtAddr;
use crate::mm::swap::hw::PteAccess;
use crate::mm::swap::page::Page;
use crate::mm::swap::policy::{precondition_failed, PolicyKind, PolicyState};

pub struct AddressSpace<T: PteAccess> {
    table: T,
    swap: Option<PolicyState>,
}

impl<T: PteAccess> AddressSpace<T> {
    /// Address space sem estado de swap; veja `install_policy`
    pub const fn new(table: T) -> Self {
        Self { table, swap: None }
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut T {
        &mut self.table
    }

    /// Estado da política, se já instalado
    pub fn policy(&self) -> Option<&PolicyState> {
        self.swap.as_ref()
    }

    /// Instala estado vazio de `kind`. Um estado anterior é descartado junto
    /// com as suas candidatas.
    pub fn install_policy(&mut self, kind: PolicyKind) {
        if self.swap.is_some() {
            crate::kwarn!("(Swap) Estado de politica substituido");
        }
        self.swap = Some(kind.new_state());
        crate::kdebug!("(Swap) Address space pronto para swap");
    }

    pub fn register(&mut self, va: VirtAddr, page: Page) {
        self.state_mut().register(va, page);
    }

    pub fn pin(&mut self, va: VirtAddr) {
        self.state_mut().pin(va);
    }

    /// # Panics
    /// Sem candidatas, em contexto de interrupção ou sem estado instalado.
    pub fn select_victim(&mut self, at_interrupt: bool) -> Page {
        let Self { table, swap } = self;
        match swap {
            Some(state) => state.select_victim(table, at_interrupt),
            None => precondition_failed("swap", "address space sem estado de swap"),
        }
    }

    pub fn tick(&mut self) {
        self.state_mut().tick();
    }

    /// Quantidade de candidatas (0 sem estado instalado)
    pub fn swappable(&self) -> usize {
        self.swap.as_ref().map_or(0, PolicyState::len)
    }

    fn state_mut(&mut self) -> &mut PolicyState {
        match self.swap.as_mut() {
            Some(state) => state,
            None => precondition_failed("swap", "address space sem estado de swap"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mm::addr::{PhysAddr, PhysFrame};
    use crate::mm::swap::mock::MockPageTable;
    use crate::mm::vmm::PteFlags;

    #[test]
    fn victim_selection_uses_own_table() {
        let mut aspace = AddressSpace::new(MockPageTable::new());
        aspace.install_policy(PolicyKind::Clock);

        let frame = PhysFrame::containing_address(PhysAddr::new(0x0010_0000));
        let va = VirtAddr::new(0x1000);
        aspace.table_mut().map(va, frame, PteFlags::WRITABLE).unwrap();
        aspace.register(va, Page::new(frame));
        assert_eq!(aspace.swappable(), 1);

        let victim = aspace.select_victim(false);
        assert_eq!(victim.into_frame(), frame);
        assert_eq!(aspace.swappable(), 0);
        assert_eq!(aspace.policy().map(PolicyState::kind), Some(PolicyKind::Clock));
    }

    #[test]
    #[should_panic]
    fn register_without_policy_is_fatal() {
        let mut aspace = AddressSpace::new(MockPageTable::new());
        let frame = PhysFrame::containing_address(PhysAddr::new(0x0010_0000));
        aspace.register(VirtAddr::new(0x1000), Page::new(frame));
    }
}
