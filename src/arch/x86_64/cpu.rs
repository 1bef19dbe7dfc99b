//! Operações de CPU x86_64 usadas pelo MM.
//!
//! Apenas leitura de registradores de controle. Toda instrução privilegiada
//! só é emitida em bare-metal (`target_os = "none"`).

/// Máscara do endereço físico da PML4 dentro do CR3
#[cfg(target_os = "none")]
const CR3_ADDR_MASK: u64 = 0x000F_FFFF_FFFF_F000;

pub struct Cpu;

impl Cpu {
    /// Lê o registrador CR3 (endereço físico da PML4 ativa)
    #[cfg(target_os = "none")]
    #[inline]
    pub fn read_cr3() -> u64 {
        let cr3: u64;
        // SAFETY: leitura de CR3 não tem efeitos colaterais em ring 0
        unsafe {
            core::arch::asm!("mov {}, cr3", out(reg) cr3, options(nomem, nostack, preserves_flags));
        }
        cr3 & CR3_ADDR_MASK
    }

    /// Fora do kernel não existe CR3 legível: nenhuma tabela está ativa.
    #[cfg(not(target_os = "none"))]
    #[inline]
    pub fn read_cr3() -> u64 {
        0
    }
}
