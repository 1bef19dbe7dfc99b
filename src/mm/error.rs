//! Tipos de Erro do Subsistema de Memória
//!
//! Define erros estruturados para diagnóstico preciso de falhas no swap.
//! Violações de pré-condição (`select_victim` sem candidatos ou em contexto de
//! interrupção) não aparecem aqui: são fatais e terminam em panic.

use crate::mm::addr::VirtAddr;
use core::fmt;

/// Erros do subsistema de swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapError {
    /// Swap manager ainda não inicializado
    NotInitialized,
    /// Nenhum frame livre e nenhuma vítima possível
    NoFreeFrame,
    /// Endereço virtual sem mapeamento
    NotMapped,
    /// Endereço virtual já mapeado
    AlreadyMapped,
    /// Contagem de page faults divergiu do trace de referência
    TraceMismatch,
    /// Conteúdo lido do swap não corresponde ao que foi escrito
    ContentMismatch,
}

impl SwapError {
    /// Retorna descrição legível do erro
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInitialized => "Swap manager não inicializado",
            Self::NoFreeFrame => "Sem frame livre para o page fault",
            Self::NotMapped => "Região não mapeada",
            Self::AlreadyMapped => "Região já mapeada",
            Self::TraceMismatch => "Page faults divergem do trace de referência",
            Self::ContentMismatch => "Conteúdo restaurado do swap diverge",
        }
    }
}

impl fmt::Display for SwapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tipo Result específico para operações de swap
pub type SwapResult<T> = Result<T, SwapError>;

/// Falha do validador de trace de referência, com o passo que divergiu.
///
/// `step` conta a partir de 0 no aquecimento (a, b, c, d) e continua
/// pelos passos do trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceError {
    pub kind: SwapError,
    pub step: usize,
    pub addr: VirtAddr,
    pub expected: u64,
    pub observed: u64,
}

impl TraceError {
    /// Emite o relatório na serial (uma linha por campo)
    pub fn log(&self) {
        crate::kerror!(self.kind.as_str());
        crate::kerror!("(Check) Passo=", self.step);
        crate::kerror!("(Check) va=", self.addr.as_u64());
        crate::kerror!("(Check) Esperado=", self.expected);
        crate::kerror!("(Check) Observado=", self.observed);
    }
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (passo {}, va={:#x}, esperado={}, observado={})",
            self.kind,
            self.step,
            self.addr.as_u64(),
            self.expected,
            self.observed
        )
    }
}
