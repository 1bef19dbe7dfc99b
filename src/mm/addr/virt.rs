use crate::mm::config::{align_down, is_aligned, PAGE_OFFSET_BITS, PAGE_SIZE, PT_INDEX_BITS};
use core::fmt;

/// Endereço virtual (wrapper type-safe)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct VirtAddr(u64);

impl VirtAddr {
    /// Cria novo endereço virtual
    #[inline]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Retorna o valor interno como u64
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Alinha para baixo
    #[inline]
    pub fn align_down(self, align: u64) -> Self {
        Self(align_down(self.0 as usize, align as usize) as u64)
    }

    /// Endereço da página que contém este endereço
    #[inline]
    pub fn page_base(self) -> Self {
        self.align_down(PAGE_SIZE as u64)
    }

    /// Verifica alinhamento
    #[inline]
    pub fn is_aligned(self, align: u64) -> bool {
        is_aligned(self.0 as usize, align as usize)
    }

    /// Número da página virtual (VPN)
    #[inline]
    pub const fn page_number(self) -> u64 {
        self.0 >> PAGE_OFFSET_BITS
    }

    /// Índice na tabela do nível `level` (4 = PML4 ... 1 = PT)
    #[inline]
    pub const fn table_index(self, level: usize) -> usize {
        let shift = PAGE_OFFSET_BITS + PT_INDEX_BITS * (level - 1);
        ((self.0 >> shift) & 0x1FF) as usize
    }
}

impl fmt::Debug for VirtAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VirtAddr({:#x})", self.0)
    }
}
