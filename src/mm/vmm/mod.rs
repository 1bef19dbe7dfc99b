//! # Virtual Memory Manager (recorte usado pelo swap)
//!
//! - `pte`    - Entrada de page table e suas flags (A, D, P, W...)
//! - `walker` - Busca da PTE de um endereço virtual, sem alocar
//! - `tlb`    - Invalidação de traduções em cache

pub mod pte;
pub mod tlb;
pub mod walker;

pub use pte::{PageTableEntry, PteFlags};
pub use walker::PageWalker;
