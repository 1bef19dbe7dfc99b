//! # Política FIFO
//!
//! Referência para comparação com o clock: a vítima é sempre a candidata
//! registrada há mais tempo. Ignora A/D.

use super::hw::PteAccess;
use super::page::Page;
use super::policy::{precondition_failed, EvictionPolicy};
use crate::klib::list::Ring;
use crate::klib::test_framework::TestResult;
use crate::mm::addr::VirtAddr;
use crate::mm::stats::{self, bump};
use core::sync::atomic::{AtomicBool, Ordering};

static FIFO_READY: AtomicBool = AtomicBool::new(false);

pub struct FifoPolicy {
    ring: Ring<Page>,
}

impl FifoPolicy {
    pub const fn new() -> Self {
        Self { ring: Ring::new() }
    }

    /// Candidatas da mais antiga para a mais nova
    pub fn candidates(&self) -> impl Iterator<Item = VirtAddr> + '_ {
        self.ring.iter().map(|(_, page)| page.vaddr())
    }
}

impl Default for FifoPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl EvictionPolicy for FifoPolicy {
    const NAME: &'static str = "fifo";

    fn init() {
        if !FIFO_READY.swap(true, Ordering::AcqRel) {
            crate::kinfo!("(FIFO) Politica pronta");
        }
    }

    fn new_state() -> Self {
        Self::new()
    }

    fn register(&mut self, va: VirtAddr, mut page: Page) {
        page.set_vaddr(va);
        crate::ktrace!("(FIFO) Candidata va=", page.vaddr().as_u64());
        self.ring.push(page);
        bump(&stats::PAGES_REGISTERED, 1);
    }

    fn pin(&mut self, _va: VirtAddr) {}

    fn select_victim<H: PteAccess + ?Sized>(&mut self, _hw: &mut H, at_interrupt: bool) -> Page {
        if at_interrupt {
            precondition_failed(Self::NAME, "select_victim em contexto de interrupcao");
        }
        let Some(oldest) = self.ring.hand() else {
            precondition_failed(Self::NAME, "select_victim sem candidatas");
        };

        let victim = self.ring.remove(oldest);
        bump(&stats::VICTIMS_SELECTED, 1);
        crate::ktrace!("(FIFO) Vitima va=", victim.vaddr().as_u64());
        victim
    }

    fn tick(&mut self) {}

    fn len(&self) -> usize {
        self.ring.len()
    }

    fn self_test() -> TestResult {
        super::check::self_test(super::PolicyKind::Fifo)
    }
}
