//! # Swap Statistics

use core::sync::atomic::{AtomicU64, Ordering};

/// Páginas registradas como swappable
pub static PAGES_REGISTERED: AtomicU64 = AtomicU64::new(0);
/// Vítimas entregues ao fault handler
pub static VICTIMS_SELECTED: AtomicU64 = AtomicU64::new(0);
/// Candidatos examinados pelo clock (inclui a vítima)
pub static CLOCK_INSPECTIONS: AtomicU64 = AtomicU64::new(0);
/// Candidatos poupados porque o bit A estava setado
pub static CLOCK_SECOND_CHANCES: AtomicU64 = AtomicU64::new(0);
/// Candidatos sujos não acessados que ganharam mais uma volta (D limpo)
pub static DIRTY_DEFERRALS: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapStats {
    pub pages_registered: u64,
    pub victims_selected: u64,
    pub clock_inspections: u64,
    pub clock_second_chances: u64,
    pub dirty_deferrals: u64,
}

impl SwapStats {
    /// Média de candidatos examinados por vítima (inteira)
    pub fn inspections_per_victim(&self) -> u64 {
        if self.victims_selected == 0 {
            return 0;
        }
        self.clock_inspections / self.victims_selected
    }
}

pub fn snapshot() -> SwapStats {
    SwapStats {
        pages_registered: PAGES_REGISTERED.load(Ordering::Relaxed),
        victims_selected: VICTIMS_SELECTED.load(Ordering::Relaxed),
        clock_inspections: CLOCK_INSPECTIONS.load(Ordering::Relaxed),
        clock_second_chances: CLOCK_SECOND_CHANCES.load(Ordering::Relaxed),
        dirty_deferrals: DIRTY_DEFERRALS.load(Ordering::Relaxed),
    }
}

#[inline]
pub(crate) fn bump(counter: &AtomicU64, by: u64) {
    counter.fetch_add(by, Ordering::Relaxed);
}
