//! # Swap Subsystem
//!
//! Escolha de vítimas quando a memória física acaba.
//!
//! - `ring` de candidatas por address space (`klib::list::Ring`)
//! - `hw`: leitura/limpeza de A/D e invalidação de TLB
//! - `policy`: contrato comum; `clock` (padrão) e `fifo`
//! - `check`: validador de trace de referência, roda no boot com `self_test`
//!
//! O swap manager global só guarda qual política está ativa. O estado de
//! cada address space vive no próprio address space.

pub mod check;
pub mod clock;
pub mod fifo;
pub mod hw;
pub mod mock;
pub mod page;
pub mod policy;

pub use clock::ClockPolicy;
pub use fifo::FifoPolicy;
pub use hw::{PteAccess, X86PageTable};
pub use page::Page;
pub use policy::{EvictionPolicy, PolicyKind, PolicyState};

use crate::klib::test_framework::TestResult;
use crate::mm::aspace::AddressSpace;
use crate::mm::config::DEFAULT_POLICY;
use crate::mm::error::{SwapError, SwapResult};
use spin::Once;

static SWAP_MANAGER: Once<SwapManager> = Once::new();

/// Política ativa do sistema
#[derive(Debug)]
pub struct SwapManager {
    kind: PolicyKind,
}

impl SwapManager {
    pub const fn new(kind: PolicyKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> PolicyKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Instala estado vazio da política ativa em `aspace`. Precisa vir antes
    /// de qualquer outra operação de swap nesse address space.
    pub fn init_address_space<T: PteAccess>(&self, aspace: &mut AddressSpace<T>) {
        aspace.install_policy(self.kind);
    }

    pub fn self_test(&self) -> TestResult {
        self.kind.self_test()
    }
}

/// Inicializa o swap com a política padrão
pub fn init() -> &'static SwapManager {
    init_with(DEFAULT_POLICY)
}

/// Inicializa o swap com `kind`. Idempotente: chamadas seguintes devolvem o
/// manager já criado, mesmo com outra política.
pub fn init_with(kind: PolicyKind) -> &'static SwapManager {
    SWAP_MANAGER.call_once(|| {
        crate::kinfo!("(Swap) Inicializando swap manager...");
        kind.init();
        let manager = SwapManager::new(kind);

        #[cfg(feature = "self_test")]
        {
            if manager.self_test() != TestResult::Pass {
                crate::kerror!("(Swap) Self-test da politica falhou");
                panic!("swap: self-test da politica {} falhou", manager.name());
            }
        }

        crate::kinfo!("(Swap) Politica ativa:");
        crate::kinfo!(manager.name());
        manager
    })
}

/// Manager global, se `init` já rodou
pub fn manager() -> SwapResult<&'static SwapManager> {
    SWAP_MANAGER.get().ok_or(SwapError::NotInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mm::swap::mock::MockPageTable;

    #[test]
    fn init_is_idempotent() {
        let first = init();
        let second = init_with(PolicyKind::Fifo);
        assert!(core::ptr::eq(first, second));
        assert_eq!(second.kind(), DEFAULT_POLICY);
        assert_eq!(manager().map(SwapManager::kind), Ok(DEFAULT_POLICY));
    }

    #[test]
    fn manager_prepares_address_space() {
        let manager = SwapManager::new(PolicyKind::Fifo);
        let mut aspace = AddressSpace::new(MockPageTable::new());
        manager.init_address_space(&mut aspace);

        assert_eq!(aspace.policy().map(PolicyState::kind), Some(PolicyKind::Fifo));
        assert_eq!(aspace.swappable(), 0);
        assert_eq!(manager.self_test(), TestResult::Pass);
    }
}
