//! # Logging do Swap
//!
//! Macros `k*!` com filtro em tempo de compilação. Cada chamada recebe uma
//! string e, opcionalmente, um valor emitido em hex (`0x` + 16 dígitos).
//! Nada passa por `core::fmt`: o caminho de `select_victim` não formata.
//!
//! Saída: `drivers::serial` (COM1 no kernel, stderr em `cargo test`).
//!
//! | Feature     | Níveis ativos                         |
//! |-------------|---------------------------------------|
//! | `no_logs`   | nenhum (todo macro vira `{}`)         |
//! | `log_error` | ERRO, WARN, OK/FAIL                   |
//! | `log_info`  | + INFO                                |
//! | `log_debug` | + DEBG                                |
//! | `log_trace` | + TRAC (padrão)                       |
//!
//! Tags de subsistema no início da mensagem:
//!
//! | Tag       | Quem loga                                              |
//! |-----------|--------------------------------------------------------|
//! | `(MM)`    | `mm::init`, resultado das suítes in-kernel             |
//! | `(Swap)`  | swap manager, instalação de estado no address space    |
//! | `(Clock)` | registro, vítima e tamanho da varredura do clock       |
//! | `(FIFO)`  | registro e vítima do FIFO                              |
//! | `(Check)` | validador de trace: OK/FAIL e o passo que divergiu     |
//! | `(Ring)`  | suíte in-kernel do anel de candidatas                  |
//!
//! ```text
//! ktrace!("(Clock) Vitima va=", victim.vaddr().as_u64());
//! kerror!("select_victim sem candidatas");   // logo antes do panic
//! ```

// Prefixos com cor ANSI (console serial do QEMU)
pub const P_ERROR: &str = "\x1b[1;31m[ERRO]\x1b[0m ";
pub const P_WARN: &str = "\x1b[1;33m[WARN]\x1b[0m ";
pub const P_INFO: &str = "\x1b[32m[INFO]\x1b[0m ";
pub const P_DEBUG: &str = "\x1b[36m[DEBG]\x1b[0m ";
pub const P_TRACE: &str = "\x1b[35m[TRAC]\x1b[0m ";
pub const P_OK: &str = "\x1b[32m[OK]\x1b[0m ";
pub const P_FAIL: &str = "\x1b[1;31m[FAIL]\x1b[0m ";

/// Emite uma linha: prefixo, mensagem e, se houver, o valor em hex.
#[doc(hidden)]
#[macro_export]
macro_rules! __klog_emit {
    ($prefix:expr, $msg:expr) => {{
        $crate::drivers::serial::emit_str($prefix);
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_nl();
    }};
    ($prefix:expr, $msg:expr, $val:expr) => {{
        $crate::drivers::serial::emit_str($prefix);
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_hex($val as u64);
        $crate::drivers::serial::emit_nl();
    }};
}

// -----------------------------------------------------------------------------
// ERRO / WARN / OK / FAIL: ativos exceto com no_logs
// -----------------------------------------------------------------------------

/// Violação de pré-condição ou divergência do trace
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kerror {
    ($($arg:expr),+ $(,)?) => {
        $crate::__klog_emit!($crate::core::logging::P_ERROR, $($arg),+)
    };
}

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kwarn {
    ($($arg:expr),+ $(,)?) => {
        $crate::__klog_emit!($crate::core::logging::P_WARN, $($arg),+)
    };
}

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kok {
    ($($arg:expr),+ $(,)?) => {
        $crate::__klog_emit!($crate::core::logging::P_OK, $($arg),+)
    };
}

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kfail {
    ($($arg:expr),+ $(,)?) => {
        $crate::__klog_emit!($crate::core::logging::P_FAIL, $($arg),+)
    };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kerror {
    ($($t:tt)*) => {{}};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kwarn {
    ($($t:tt)*) => {{}};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kok {
    ($($t:tt)*) => {{}};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kfail {
    ($($t:tt)*) => {{}};
}

// -----------------------------------------------------------------------------
// INFO: init do manager, política ativa
// -----------------------------------------------------------------------------

#[cfg(any(feature = "log_info", feature = "log_debug", feature = "log_trace"))]
#[macro_export]
macro_rules! kinfo {
    ($($arg:expr),+ $(,)?) => {
        $crate::__klog_emit!($crate::core::logging::P_INFO, $($arg),+)
    };
}

#[cfg(not(any(feature = "log_info", feature = "log_debug", feature = "log_trace")))]
#[macro_export]
macro_rules! kinfo {
    ($($t:tt)*) => {{}};
}

// -----------------------------------------------------------------------------
// DEBUG: estado de address space, resumo do trace
// -----------------------------------------------------------------------------

#[cfg(any(feature = "log_debug", feature = "log_trace"))]
#[macro_export]
macro_rules! kdebug {
    ($($arg:expr),+ $(,)?) => {
        $crate::__klog_emit!($crate::core::logging::P_DEBUG, $($arg),+)
    };
}

#[cfg(not(any(feature = "log_debug", feature = "log_trace")))]
#[macro_export]
macro_rules! kdebug {
    ($($t:tt)*) => {{}};
}

// -----------------------------------------------------------------------------
// TRACE: cada registro e cada vítima
// -----------------------------------------------------------------------------

#[cfg(feature = "log_trace")]
#[macro_export]
macro_rules! ktrace {
    ($($arg:expr),+ $(,)?) => {
        $crate::__klog_emit!($crate::core::logging::P_TRACE, $($arg),+)
    };
}

#[cfg(not(feature = "log_trace"))]
#[macro_export]
macro_rules! ktrace {
    ($($t:tt)*) => {{}};
}

#[cfg(test)]
mod tests {
    #[test]
    fn every_level_accepts_message_and_value() {
        crate::kerror!("(Check) Passo=", 11usize);
        crate::kwarn!("(Clock) Candidata sem mapeamento va=", 0x3000u64);
        crate::kinfo!("(Swap) Politica ativa");
        crate::kdebug!("(Check) Faults no trace=", 8u64);
        crate::ktrace!("(Clock) Inspecoes=", 9u64);
        crate::kok!("(MM) Swap pronto");
        crate::kfail!("(Check) Trace de referencia divergiu");
    }

    #[test]
    fn status_prefixes_carry_their_labels() {
        assert!(super::P_OK.contains("[OK]"));
        assert!(super::P_FAIL.contains("[FAIL]"));
        assert!(super::P_ERROR.contains("[ERRO]"));
    }
}
