//! # Kernel Driver Layer
//!
//! Apenas o driver serial: é o sink dos macros de log (`kinfo!`, `ktrace!`...).
//!
//! | Driver   | Arquivo         | Uso |
//! |----------|-----------------|-----|
//! | Serial   | `serial/mod.rs` | Logging do kernel (COM1) |

pub mod serial;
