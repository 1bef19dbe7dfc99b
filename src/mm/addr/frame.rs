use crate::mm::addr::PhysAddr;
use crate::mm::config::PAGE_SIZE;
use core::fmt;

/// Um frame de memória física (tamanho fixo PAGE_SIZE = 4KiB)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PhysFrame {
    start_address: PhysAddr,
}

impl PhysFrame {
    /// Retorna o frame que contém o endereço físico dado
    #[inline]
    pub fn containing_address(addr: PhysAddr) -> Self {
        Self {
            start_address: addr.align_down(PAGE_SIZE as u64),
        }
    }

    /// Retorna o endereço inicial do frame
    #[inline]
    pub const fn start_address(&self) -> PhysAddr {
        self.start_address
    }

    /// Número do frame (PFN)
    #[inline]
    pub const fn number(&self) -> u64 {
        self.start_address.as_u64() / PAGE_SIZE as u64
    }

    /// Adiciona offset de N frames
    #[inline]
    pub fn add(&self, count: u64) -> Self {
        Self {
            start_address: self.start_address.add(count * PAGE_SIZE as u64),
        }
    }
}

impl fmt::Debug for PhysFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhysFrame({:?})", self.start_address)
    }
}
