//! # Configuração do Módulo de Memória
//!
//! Define constantes e configurações globais do subsistema de swap.

use crate::mm::swap::PolicyKind;

// =============================================================================
// CONSTANTES DE TAMANHO
// =============================================================================

/// Tamanho de uma página (4 KiB)
pub const PAGE_SIZE: usize = 4096;

/// Bits de offset dentro de uma página
pub const PAGE_OFFSET_BITS: usize = 12;

// =============================================================================
// PAGE TABLES (x86_64, 4 níveis)
// =============================================================================

/// Entradas por tabela (PML4, PDPT, PD, PT)
pub const PT_ENTRIES: usize = 512;

/// Bits de índice por nível
pub const PT_INDEX_BITS: usize = 9;

/// Máscara para extrair endereço físico de PTE
pub const PTE_ADDR_MASK: u64 = 0x000F_FFFF_FFFF_F000;

// =============================================================================
// SWAP
// =============================================================================

/// Política de substituição usada por `swap::init`
pub const DEFAULT_POLICY: PolicyKind = PolicyKind::Clock;

/// Frames físicos disponíveis no harness do validador de trace
pub const SWAP_CHECK_FRAMES: usize = 4;

/// Endereço físico do primeiro frame simulado pelo harness
pub const SWAP_CHECK_FRAME_BASE: u64 = 0x0010_0000;

/// Páginas virtuais tocadas pelo validador (a..e)
pub const SWAP_CHECK_PAGE_A: u64 = 0x1000;
pub const SWAP_CHECK_PAGE_B: u64 = 0x2000;
pub const SWAP_CHECK_PAGE_C: u64 = 0x3000;
pub const SWAP_CHECK_PAGE_D: u64 = 0x4000;
pub const SWAP_CHECK_PAGE_E: u64 = 0x5000;

// =============================================================================
// FUNÇÕES UTILITÁRIAS
// =============================================================================

/// Alinha valor para baixo ao múltiplo de align
#[inline(always)]
pub const fn align_down(val: usize, align: usize) -> usize {
    val & !(align - 1)
}

/// Verifica se valor está alinhado
#[inline(always)]
pub const fn is_aligned(val: usize, align: usize) -> bool {
    val & (align - 1) == 0
}
