//! Página candidata a swap.

use crate::mm::addr::{PhysFrame, VirtAddr};
use core::fmt;

/// Um frame físico que hoje sustenta um endereço virtual.
///
/// Não é `Clone`: quem segura o `Page` é o único dono. `register` consome o
/// handle e `select_victim` o devolve, então uma página nunca está em dois
/// anéis nem é escolhida duas vezes sem um novo `register`.
///
/// `vaddr` é apenas uma referência de volta ao mapeamento; o `Page` não é
/// dono da PTE.
pub struct Page {
    frame: PhysFrame,
    vaddr: VirtAddr,
}

impl Page {
    pub const fn new(frame: PhysFrame) -> Self {
        Self {
            frame,
            vaddr: VirtAddr::new(0),
        }
    }

    #[inline]
    pub const fn frame(&self) -> PhysFrame {
        self.frame
    }

    /// Endereço virtual gravado no último `register`
    #[inline]
    pub const fn vaddr(&self) -> VirtAddr {
        self.vaddr
    }

    #[inline]
    pub(crate) fn set_vaddr(&mut self, vaddr: VirtAddr) {
        self.vaddr = vaddr.page_base();
    }

    /// Devolve o frame ao caller (fim da vida do handle)
    pub fn into_frame(self) -> PhysFrame {
        self.frame
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("frame", &self.frame)
            .field("vaddr", &self.vaddr)
            .finish()
    }
}
