//! Implementação x86_64

pub mod cpu;
pub mod ports;

pub use cpu::Cpu;
