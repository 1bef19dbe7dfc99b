//! # Memory Management Subsystem (MM) - Swap
//!
//! Substituição de páginas do kernel: quando um page fault precisa de um
//! frame e não há nenhum livre, a política ativa escolhe qual página sai.
//!
//! ## Arquitetura dos Módulos
//!
//! | Módulo   | Responsabilidade |
//! |----------|------------------|
//! | `addr`   | Wrappers type-safe (`VirtAddr`, `PhysAddr`, `PhysFrame`). |
//! | `vmm`    | PTE e flags, walker de page tables sem alocação, `invlpg`. |
//! | `swap`   | Políticas (clock, FIFO), interface de flags, validador de trace. |
//! | `aspace` | Address space: page table + estado privado da política. |
//! | `stats`  | Contadores atômicos de registro, vítimas e varreduras. |
//!
//! Fora daqui (colaboradores externos): alocador de frames, entrada do page
//! fault, leitura/escrita do arquivo de swap. O fault handler só precisa de
//! `AddressSpace::register` e `AddressSpace::select_victim`.
//!
//! ## Contexto
//!
//! `select_victim` mexe em page tables e no TLB: nunca em contexto de
//! interrupção, e nunca com o anel vazio. Ambos são violações fatais.

pub mod addr;
pub mod aspace;
pub mod config;
pub mod error;
pub mod stats;
pub mod swap;
pub mod vmm;

#[cfg(feature = "self_test")]
pub mod test;

// Re-exports para conveniência
pub use addr::{PhysAddr, PhysFrame, VirtAddr};
pub use aspace::AddressSpace;
pub use error::{SwapError, SwapResult, TraceError};
pub use swap::{Page, PolicyKind, SwapManager};

/// Inicializa o swap com a política padrão.
///
/// Com `self_test`, o trace de referência roda dentro de `swap::init` e as
/// suítes in-kernel rodam em seguida; qualquer falha aborta o boot.
pub fn init() -> &'static SwapManager {
    crate::kinfo!("(MM) Inicializando subsistema de swap...");
    let manager = swap::init();

    #[cfg(feature = "self_test")]
    {
        if !test::run_swap_tests().all_passed() {
            crate::kerror!("(MM) Testes de swap falharam");
            panic!("mm: testes de swap falharam");
        }
    }

    crate::kok!("(MM) Swap pronto");
    manager
}
