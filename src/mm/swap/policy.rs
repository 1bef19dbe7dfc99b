//! # Interface de Política de Substituição
//!
//! Toda política implementa `EvictionPolicy`. O estado privado de cada
//! address space é um `PolicyState` tipado, criado junto com o address space
//! e destruído com ele.

use super::clock::ClockPolicy;
use super::fifo::FifoPolicy;
use super::hw::PteAccess;
use super::page::Page;
use crate::klib::test_framework::TestResult;
use crate::mm::addr::VirtAddr;

/// Contrato de uma política de substituição
pub trait EvictionPolicy {
    const NAME: &'static str;

    /// Setup global, idempotente
    fn init();

    /// Estado vazio para um novo address space
    fn new_state() -> Self
    where
        Self: Sized;

    /// Torna `page` candidata, mapeada em `va`
    fn register(&mut self, va: VirtAddr, page: Page);

    /// Pede que `va` nunca seja vítima
    fn pin(&mut self, va: VirtAddr);

    /// Escolhe e remove exatamente uma candidata.
    ///
    /// # Panics
    /// Sem candidatos ou com `at_interrupt == true`.
    fn select_victim<H: PteAccess + ?Sized>(&mut self, hw: &mut H, at_interrupt: bool) -> Page;

    /// Hook periódico
    fn tick(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Roda o validador de trace de referência desta política
    fn self_test() -> TestResult;
}

/// Políticas disponíveis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Clock,
    Fifo,
}

impl PolicyKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clock => ClockPolicy::NAME,
            Self::Fifo => FifoPolicy::NAME,
        }
    }

    pub fn init(self) {
        match self {
            Self::Clock => ClockPolicy::init(),
            Self::Fifo => FifoPolicy::init(),
        }
    }

    pub fn new_state(self) -> PolicyState {
        match self {
            Self::Clock => PolicyState::Clock(ClockPolicy::new_state()),
            Self::Fifo => PolicyState::Fifo(FifoPolicy::new_state()),
        }
    }

    pub fn self_test(self) -> TestResult {
        match self {
            Self::Clock => ClockPolicy::self_test(),
            Self::Fifo => FifoPolicy::self_test(),
        }
    }
}

/// Estado privado da política de um address space
pub enum PolicyState {
    Clock(ClockPolicy),
    Fifo(FifoPolicy),
}

impl PolicyState {
    pub fn kind(&self) -> PolicyKind {
        match self {
            Self::Clock(_) => PolicyKind::Clock,
            Self::Fifo(_) => PolicyKind::Fifo,
        }
    }

    pub fn register(&mut self, va: VirtAddr, page: Page) {
        match self {
            Self::Clock(p) => p.register(va, page),
            Self::Fifo(p) => p.register(va, page),
        }
    }

    pub fn pin(&mut self, va: VirtAddr) {
        match self {
            Self::Clock(p) => p.pin(va),
            Self::Fifo(p) => p.pin(va),
        }
    }

    pub fn select_victim<H: PteAccess + ?Sized>(&mut self, hw: &mut H, at_interrupt: bool) -> Page {
        match self {
            Self::Clock(p) => p.select_victim(hw, at_interrupt),
            Self::Fifo(p) => p.select_victim(hw, at_interrupt),
        }
    }

    pub fn tick(&mut self) {
        match self {
            Self::Clock(p) => p.tick(),
            Self::Fifo(p) => p.tick(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Clock(p) => p.len(),
            Self::Fifo(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Violação de pré-condição: loga e aborta. Não há caminho de recuperação.
#[cold]
#[track_caller]
pub(crate) fn precondition_failed(policy: &'static str, msg: &'static str) -> ! {
    crate::kerror!(msg);
    panic!("({}) {}", policy, msg);
}
