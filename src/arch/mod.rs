//! # Hardware Abstraction Layer (HAL)
//!
//! Ponte entre o subsistema de swap (lógica agnóstica) e o hardware real.
//! Só o código da arquitetura alvo é compilado; em builds de host (testes)
//! nada daqui é executado.

// Seleção de Arquitetura: x86_64
#[cfg(target_arch = "x86_64")]
pub mod x86_64;
