//! Kernel Library (KLib).
//!
//! Utilitários agnósticos de hardware para uso interno do Kernel.
//! Funciona como uma extensão da `core` library.

pub mod list;
pub mod test_framework;
