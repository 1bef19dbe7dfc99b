//! # Addr - Wrappers Type-Safe para Endereços
//!
//! Tipos distintos para PhysAddr, VirtAddr e PhysFrame evitando confusão.

mod frame;
mod phys;
mod virt;

pub use frame::PhysFrame;
pub use phys::PhysAddr;
pub use virt::VirtAddr;
