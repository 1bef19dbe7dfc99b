use crate::mm::config::{align_down, PTE_ADDR_MASK};
use core::fmt;

/// Endereço físico (wrapper type-safe)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct PhysAddr(u64);

impl PhysAddr {
    /// Cria novo endereço físico
    #[inline]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Extrai o endereço físico de uma entrada de page table
    #[inline]
    pub const fn from_entry(raw: u64) -> Self {
        Self(raw & PTE_ADDR_MASK)
    }

    /// Retorna o valor interno como u64
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Alinha para baixo (múltiplo de align)
    #[inline]
    pub fn align_down(self, align: u64) -> Self {
        Self(align_down(self.0 as usize, align as usize) as u64)
    }

    /// Adiciona offset
    #[inline]
    pub fn add(self, offset: u64) -> Self {
        Self(self.0 + offset)
    }
}

impl fmt::Debug for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhysAddr({:#x})", self.0)
    }
}
