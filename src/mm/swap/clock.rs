//! # Política Clock (second chance)
//!
//! As candidatas formam um anel com um ponteiro (hand). Na escolha da
//! vítima o ponteiro gira examinando A/D de cada candidata:
//!
//! | A | D | ação                                        |
//! |---|---|---------------------------------------------|
//! | 0 | 0 | vítima                                      |
//! | 1 | x | limpa A (D fica), invalida, avança          |
//! | 0 | 1 | limpa D, invalida, avança                   |
//!
//! Uma página suja e não acessada ganha mais uma volta antes de sair. No
//! pior caso (todas com A=1 e D=1) são duas voltas mais um passo:
//! `2n + 1` inspeções. Sem nenhum D setado, `n + 1`.
//!
//! Depois da escolha o ponteiro fica no sucessor da vítima. Novas candidatas
//! entram imediatamente antes do ponteiro, ou seja, são as últimas a serem
//! examinadas na próxima volta.

use super::hw::PteAccess;
use super::page::Page;
use super::policy::{precondition_failed, EvictionPolicy};
use crate::klib::list::Ring;
use crate::klib::test_framework::TestResult;
use crate::mm::addr::VirtAddr;
use crate::mm::stats::{self, bump};
use crate::mm::vmm::PteFlags;
use core::sync::atomic::{AtomicBool, Ordering};

static CLOCK_READY: AtomicBool = AtomicBool::new(false);

pub struct ClockPolicy {
    ring: Ring<Page>,
    last_scan: usize,
}

impl ClockPolicy {
    pub const fn new() -> Self {
        Self {
            ring: Ring::new(),
            last_scan: 0,
        }
    }

    /// Inspeções feitas pelo último `select_victim`
    pub fn last_scan(&self) -> usize {
        self.last_scan
    }

    /// Endereço da candidata sob o ponteiro
    pub fn hand(&self) -> Option<VirtAddr> {
        self.ring.hand().map(|id| self.ring[id].vaddr())
    }

    /// Candidatas na ordem em que o ponteiro vai examiná-las
    pub fn candidates(&self) -> impl Iterator<Item = VirtAddr> + '_ {
        self.ring.iter().map(|(_, page)| page.vaddr())
    }

    pub fn contains(&self, va: VirtAddr) -> bool {
        let va = va.page_base();
        self.candidates().any(|c| c == va)
    }
}

impl Default for ClockPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl EvictionPolicy for ClockPolicy {
    const NAME: &'static str = "clock";

    fn init() {
        if !CLOCK_READY.swap(true, Ordering::AcqRel) {
            crate::kinfo!("(Clock) Politica second-chance pronta");
        }
    }

    fn new_state() -> Self {
        Self::new()
    }

    fn register(&mut self, va: VirtAddr, mut page: Page) {
        page.set_vaddr(va);
        crate::ktrace!("(Clock) Candidata va=", page.vaddr().as_u64());
        self.ring.push(page);
        bump(&stats::PAGES_REGISTERED, 1);
    }

    /// Sem efeito: páginas que não podem sair simplesmente não são
    /// registradas.
    fn pin(&mut self, _va: VirtAddr) {}

    fn select_victim<H: PteAccess + ?Sized>(&mut self, hw: &mut H, at_interrupt: bool) -> Page {
        if at_interrupt {
            precondition_failed(Self::NAME, "select_victim em contexto de interrupcao");
        }
        let Some(mut cursor) = self.ring.hand() else {
            precondition_failed(Self::NAME, "select_victim sem candidatas");
        };

        let mut inspections: u64 = 1;
        let mut second_chances: u64 = 0;
        let mut deferrals: u64 = 0;

        if self.ring.len() > 1 {
            loop {
                let va = self.ring[cursor].vaddr();
                let Some(pte) = hw.lookup(va) else {
                    crate::kwarn!("(Clock) Candidata sem mapeamento va=", va.as_u64());
                    break;
                };

                let accessed = pte.is_accessed();
                if !accessed && !pte.is_dirty() {
                    break;
                }

                // A=1: limpa só A. A=0,D=1: limpa D.
                let mut clear = PteFlags::ACCESSED;
                if accessed {
                    second_chances += 1;
                } else {
                    clear |= PteFlags::DIRTY;
                    deferrals += 1;
                }
                hw.clear_flags(va, clear);
                hw.invalidate(va);

                cursor = self.ring.next(cursor);
                inspections += 1;
            }
        }

        self.ring.set_hand(cursor);
        let victim = self.ring.remove(cursor);
        self.last_scan = inspections as usize;

        bump(&stats::VICTIMS_SELECTED, 1);
        bump(&stats::CLOCK_INSPECTIONS, inspections);
        bump(&stats::CLOCK_SECOND_CHANCES, second_chances);
        bump(&stats::DIRTY_DEFERRALS, deferrals);
        crate::ktrace!("(Clock) Vitima va=", victim.vaddr().as_u64());
        crate::ktrace!("(Clock) Inspecoes=", inspections);

        victim
    }

    /// Sem efeito: A/D são amostrados na hora da escolha.
    fn tick(&mut self) {}

    fn len(&self) -> usize {
        self.ring.len()
    }

    fn self_test() -> TestResult {
        super::check::self_test(super::PolicyKind::Clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mm::addr::{PhysAddr, PhysFrame};
    use crate::mm::swap::mock::MockPageTable;
    use alloc::vec::Vec;

    fn va(n: u64) -> VirtAddr {
        VirtAddr::new(n * 0x1000)
    }

    fn frame(n: u64) -> PhysFrame {
        PhysFrame::containing_address(PhysAddr::new(0x0010_0000 + n * 0x1000))
    }

    /// Registra as páginas 1..=flags.len() com os bits dados
    fn setup(flags: &[PteFlags]) -> (ClockPolicy, MockPageTable) {
        let mut clock = ClockPolicy::new();
        let mut pt = MockPageTable::new();
        for (i, f) in flags.iter().enumerate() {
            let n = i as u64 + 1;
            pt.map(va(n), frame(n), PteFlags::WRITABLE).unwrap();
            pt.set_flags(va(n), *f).unwrap();
            clock.register(va(n), Page::new(frame(n)));
        }
        (clock, pt)
    }

    const HOT: PteFlags = PteFlags::ACCESSED.union(PteFlags::DIRTY);

    #[test]
    fn first_clean_candidate_is_victim() {
        let (mut clock, mut pt) = setup(&[PteFlags::ACCESSED, PteFlags::empty(), HOT]);

        let victim = clock.select_victim(&mut pt, false);
        assert_eq!(victim.vaddr(), va(2));
        assert_eq!(victim.frame(), frame(2));
        assert_eq!(clock.last_scan(), 2);
        assert_eq!(clock.hand(), Some(va(3)));
        assert!(!clock.contains(va(2)));
    }

    #[test]
    fn accessed_candidate_keeps_dirty_bit() {
        let (mut clock, mut pt) = setup(&[HOT, PteFlags::empty()]);

        clock.select_victim(&mut pt, false);
        let pte = pt.entry(va(1)).unwrap();
        assert!(!pte.is_accessed());
        assert!(pte.is_dirty());
        assert_eq!(pt.invalidations(), 1);
    }

    #[test]
    fn dirty_only_candidate_gets_another_lap() {
        let (mut clock, mut pt) = setup(&[PteFlags::DIRTY, HOT]);

        // 1: limpa D; 2: limpa A; 1: vítima
        let victim = clock.select_victim(&mut pt, false);
        assert_eq!(victim.vaddr(), va(1));
        assert_eq!(clock.last_scan(), 3);
        assert!(pt.entry(va(2)).unwrap().is_dirty());
        assert!(!pt.entry(va(2)).unwrap().is_accessed());
    }

    #[test]
    fn all_hot_ring_takes_two_laps_plus_one() {
        let (mut clock, mut pt) = setup(&[HOT, HOT, HOT, HOT]);

        let victim = clock.select_victim(&mut pt, false);
        assert_eq!(victim.vaddr(), va(1));
        assert_eq!(clock.last_scan(), 2 * 4 + 1);
        assert_eq!(pt.invalidations(), 8);
        assert_eq!(clock.candidates().collect::<Vec<_>>(), [va(2), va(3), va(4)]);
    }

    #[test]
    fn accessed_only_ring_takes_one_lap_plus_one() {
        let (mut clock, mut pt) = setup(&[PteFlags::ACCESSED; 3]);

        let victim = clock.select_victim(&mut pt, false);
        assert_eq!(victim.vaddr(), va(1));
        assert_eq!(clock.last_scan(), 3 + 1);
    }

    #[test]
    fn scanned_candidates_have_accessed_cleared() {
        let (mut clock, mut pt) = setup(&[PteFlags::ACCESSED, HOT, PteFlags::ACCESSED, PteFlags::empty()]);

        let victim = clock.select_victim(&mut pt, false);
        assert_eq!(victim.vaddr(), va(4));
        for n in 1..=3 {
            assert!(!pt.entry(va(n)).unwrap().is_accessed());
        }
    }

    #[test]
    fn single_candidate_is_returned_without_scan() {
        let (mut clock, mut pt) = setup(&[HOT]);

        let victim = clock.select_victim(&mut pt, false);
        assert_eq!(victim.vaddr(), va(1));
        assert_eq!(clock.last_scan(), 1);
        assert!(clock.is_empty());
        assert_eq!(clock.hand(), None);
        assert_eq!(pt.lookups(), 0);
    }

    #[test]
    fn unmapped_candidate_is_selected() {
        let (mut clock, mut pt) = setup(&[HOT, HOT]);
        pt.unmap(va(1)).unwrap();

        let victim = clock.select_victim(&mut pt, false);
        assert_eq!(victim.vaddr(), va(1));
    }

    #[test]
    fn new_candidate_is_examined_last() {
        let (mut clock, mut pt) = setup(&[PteFlags::ACCESSED, PteFlags::empty(), PteFlags::ACCESSED]);

        clock.select_victim(&mut pt, false);
        pt.map(va(9), frame(9), PteFlags::WRITABLE).unwrap();
        clock.register(va(9), Page::new(frame(9)));

        assert_eq!(clock.candidates().collect::<Vec<_>>(), [va(3), va(1), va(9)]);
    }

    #[test]
    fn pin_and_tick_change_nothing() {
        let (mut clock, _pt) = setup(&[HOT, PteFlags::empty()]);

        clock.pin(va(2));
        clock.tick();
        assert_eq!(clock.len(), 2);
        assert_eq!(clock.hand(), Some(va(1)));
    }

    #[test]
    fn hardware_page_tables_follow_the_same_rule() {
        use crate::mm::swap::hw::X86PageTable;
        use crate::mm::vmm::tlb::TLB_STATS;
        use crate::mm::vmm::walker::tests::HostTables;
        use crate::mm::vmm::PageWalker;

        let mut tables = HostTables::new();
        let flags = [HOT, PteFlags::ACCESSED, PteFlags::DIRTY, HOT];
        for (i, f) in flags.iter().enumerate() {
            let n = i as u64 + 1;
            tables.map(va(n), frame(n), PteFlags::PRESENT | PteFlags::WRITABLE | *f);
        }

        let mut pt = X86PageTable::new(unsafe { PageWalker::new(tables.root(), 0) });
        let mut clock = ClockPolicy::new();
        for n in 1..=4 {
            clock.register(va(n), Page::new(frame(n)));
        }

        let skips = TLB_STATS.inactive_skips.load(Ordering::Relaxed);

        // 1: limpa A; 2: limpa A; 3: limpa D; 4: limpa A; 1: limpa D; 2: vítima
        let victim = clock.select_victim(&mut pt, false);
        assert_eq!(victim.vaddr(), va(2));
        assert_eq!(clock.last_scan(), 6);
        assert!(TLB_STATS.inactive_skips.load(Ordering::Relaxed) >= skips + 5);

        let first = pt.lookup(va(1)).unwrap();
        assert!(!first.is_accessed() && !first.is_dirty());
        let third = pt.lookup(va(3)).unwrap();
        assert!(!third.is_accessed() && !third.is_dirty());
        let fourth = pt.lookup(va(4)).unwrap();
        assert!(!fourth.is_accessed() && fourth.is_dirty());
        assert_eq!(fourth.frame(), frame(4));
        assert!(fourth.flags().contains(PteFlags::WRITABLE));
        assert_eq!(clock.candidates().collect::<Vec<_>>(), [va(3), va(4), va(1)]);
    }

    #[test]
    #[should_panic]
    fn empty_ring_is_fatal() {
        let mut clock = ClockPolicy::new();
        let mut pt = MockPageTable::new();
        clock.select_victim(&mut pt, false);
    }

    #[test]
    #[should_panic]
    fn interrupt_context_is_fatal() {
        let (mut clock, mut pt) = setup(&[PteFlags::empty()]);
        clock.select_victim(&mut pt, true);
    }

    #[test]
    fn random_workload_keeps_invariants() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0xc10c);
        let mut clock = ClockPolicy::new();
        let mut pt = MockPageTable::new();
        let mut live: Vec<VirtAddr> = Vec::new();
        let mut next_page = 1u64;

        for _ in 0..1_500 {
            if live.is_empty() || rng.gen_bool(0.55) {
                let n = next_page;
                next_page += 1;
                let mut flags = PteFlags::empty();
                if rng.gen_bool(0.5) {
                    flags |= PteFlags::ACCESSED;
                }
                if rng.gen_bool(0.5) {
                    flags |= PteFlags::DIRTY;
                }
                pt.map(va(n), frame(n), PteFlags::WRITABLE | flags).unwrap();
                clock.register(va(n), Page::new(frame(n)));
                live.push(va(n));
            } else {
                let n = clock.len();
                let victim = clock.select_victim(&mut pt, false);
                let va = victim.vaddr();

                assert!(clock.last_scan() <= 2 * n + 1);
                assert!(!clock.contains(va));
                let pos = live.iter().position(|v| *v == va).expect("vitima desconhecida");
                live.swap_remove(pos);
                pt.unmap(va).unwrap();
            }

            assert!(clock.ring.is_circular());
            assert_eq!(clock.len(), live.len());
        }
    }
}
