//! # TLB Management
//!
//! Invalidação local de traduções em cache (Translation Lookaside Buffer).
//!
//! Depois de limpar A/D numa PTE, a tradução em cache precisa sair do TLB:
//! enquanto ela existir a MMU não volta a setar os bits na PTE, e a página
//! pareceria fria para o swap.
//!
//! `invlpg` só atua no espaço de endereçamento ativo. Para uma page table que
//! não está em CR3 não há nada em cache a invalidar (sem PCID).

use crate::mm::addr::{PhysAddr, VirtAddr};
use core::sync::atomic::{AtomicU64, Ordering};

// =============================================================================
// ESTATÍSTICAS
// =============================================================================

/// Estatísticas de TLB para telemetria
pub struct TlbStats {
    pub local_invalidations: AtomicU64,
    pub inactive_skips: AtomicU64,
}

impl TlbStats {
    pub const fn new() -> Self {
        Self {
            local_invalidations: AtomicU64::new(0),
            inactive_skips: AtomicU64::new(0),
        }
    }
}

/// Estatísticas globais de TLB
pub static TLB_STATS: TlbStats = TlbStats::new();

// =============================================================================
// INVALIDAÇÃO LOCAL
// =============================================================================

/// Invalida uma única página no TLB local
///
/// Usa a instrução `invlpg` do x86_64.
///
/// # Safety
///
/// O caller deve garantir que as page tables foram atualizadas antes.
#[cfg(all(target_arch = "x86_64", target_os = "none"))]
#[inline(always)]
pub unsafe fn invlpg(vaddr: VirtAddr) {
    core::arch::asm!(
        "invlpg [{}]",
        in(reg) vaddr.as_u64(),
        options(nostack, preserves_flags)
    );

    TLB_STATS.local_invalidations.fetch_add(1, Ordering::Relaxed);
}

/// Fora do kernel não há TLB a invalidar; apenas contabiliza.
///
/// # Safety
///
/// Sempre seguro; mantém a assinatura da versão bare-metal.
#[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
#[inline(always)]
pub unsafe fn invlpg(_vaddr: VirtAddr) {
    TLB_STATS.local_invalidations.fetch_add(1, Ordering::Relaxed);
}

/// Endereço físico da PML4 ativa neste core
#[inline]
pub fn active_root() -> PhysAddr {
    #[cfg(target_arch = "x86_64")]
    {
        PhysAddr::new(crate::arch::x86_64::Cpu::read_cr3())
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        PhysAddr::new(0)
    }
}

/// Invalida a tradução de `vaddr` no core atual, se `root` é a page table
/// ativa.
pub fn invalidate(root: PhysAddr, vaddr: VirtAddr) {
    if active_root() == root {
        // SAFETY: a PTE de `vaddr` já foi alterada pelo caller
        unsafe { invlpg(vaddr) };
    } else {
        TLB_STATS.inactive_skips.fetch_add(1, Ordering::Relaxed);
    }
}
