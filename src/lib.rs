// (FASE2) src/lib.rs
//! Forge Swap Library.
//!
//! Subsistema de substituição de páginas do Kernel Forge.
//! Decide qual página física sai da memória quando um processo pede mais
//! frames do que existem, e valida a política ativa contra um trace de
//! referência no boot.

#![cfg_attr(not(test), no_std)]

// Habilitar alocação dinâmica (necessário para Vec/BTreeMap)
extern crate alloc;

// --- Módulos de Baixo Nível (Hardware) ---
pub mod arch; // HAL (portas IO, CR3)
pub mod drivers; // Serial (sink de log)

// --- Módulos Centrais ---
pub mod core; // Logging
pub mod klib; // Utilitários (anel de candidatos, framework de testes)
pub mod mm; // Gerenciamento de Memória (PTE, TLB, swap)
