//! Core Module
//!
//! Infraestrutura central compartilhada pelo subsistema: logging.

pub mod logging;
