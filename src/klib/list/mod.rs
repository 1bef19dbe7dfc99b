//! Listas intrusivas do kernel.
//!
//! - `ring` - Anel circular duplamente encadeado sobre uma arena de índices.

pub mod ring;

pub use ring::{NodeId, Ring};
