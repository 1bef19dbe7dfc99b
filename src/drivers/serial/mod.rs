//! Driver de porta serial (UART 16550)
//!
//! Sink dos macros de log. Três backends, escolhidos em tempo de compilação:
//! - bare-metal x86_64: COM1 via port I/O
//! - `cargo test`: stderr do processo de teste
//! - qualquer outro build de host: descarta a saída

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
mod uart {
    use crate::arch::x86_64::ports::{inb, outb};
    use spin::Mutex;

    /// Porta COM1
    const COM1_PORT: u16 = 0x3F8;

    /// Estado da serial
    static SERIAL: Mutex<SerialPort> = Mutex::new(SerialPort::new(COM1_PORT));

    struct SerialPort {
        port: u16,
        initialized: bool,
    }

    impl SerialPort {
        const fn new(port: u16) -> Self {
            Self {
                port,
                initialized: false,
            }
        }

        fn init(&mut self) {
            if self.initialized {
                return;
            }

            // Desabilitar interrupções
            outb(self.port + 1, 0x00);
            // Habilitar DLAB (set baud rate)
            outb(self.port + 3, 0x80);
            // Divisor low byte (115200 baud)
            outb(self.port, 0x03);
            // Divisor high byte
            outb(self.port + 1, 0x00);
            // 8 bits, no parity, 1 stop bit
            outb(self.port + 3, 0x03);
            // Enable FIFO
            outb(self.port + 2, 0xC7);
            // IRQs enabled, RTS/DSR set
            outb(self.port + 4, 0x0B);

            self.initialized = true;
        }

        fn is_transmit_empty(&self) -> bool {
            (inb(self.port + 5) & 0x20) != 0
        }

        fn write_byte(&mut self, byte: u8) {
            self.init();
            // Esperar FIFO estar pronto
            while !self.is_transmit_empty() {
                core::hint::spin_loop();
            }
            outb(self.port, byte);
        }
    }

    pub fn write_bytes(bytes: &[u8]) {
        let mut serial = SERIAL.lock();
        for &byte in bytes {
            serial.write_byte(byte);
        }
    }
}

#[cfg(all(test, not(all(target_arch = "x86_64", target_os = "none"))))]
mod uart {
    use std::io::Write;

    pub fn write_bytes(bytes: &[u8]) {
        let _ = std::io::stderr().write_all(bytes);
    }
}

#[cfg(all(not(test), not(all(target_arch = "x86_64", target_os = "none"))))]
mod uart {
    pub fn write_bytes(_bytes: &[u8]) {}
}

/// Escreve string
#[inline]
pub fn emit_str(s: &str) {
    uart::write_bytes(s.as_bytes());
}

/// Escreve valor como hexadecimal (`0x` + 16 dígitos), sem `core::fmt`
pub fn emit_hex(value: u64) {
    let mut buf = [0u8; 18];
    buf[0] = b'0';
    buf[1] = b'x';

    let mut i = 0usize;
    while i < 16 {
        let digit = ((value >> ((15 - i) * 4)) & 0xF) as u8;
        buf[2 + i] = if digit < 10 {
            b'0' + digit
        } else {
            b'A' + digit - 10
        };
        i += 1;
    }

    uart::write_bytes(&buf);
}

/// Emite quebra de linha
#[inline]
pub fn emit_nl() {
    uart::write_bytes(b"\n");
}
