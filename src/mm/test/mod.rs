//! # Testes do Subsistema de Memória
//!
//! Suítes in-kernel, executadas no boot quando `self_test` está ativo:
//! - `swap_test.rs` - Anel de candidatas, políticas e trace de referência


pub use swap_test::run_swap_tests;
