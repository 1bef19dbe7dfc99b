//! # Validador de Trace de Referência
//!
//! Reproduz uma sequência fixa de escritas sobre um address space simulado
//! com `SWAP_CHECK_FRAMES` frames e compara, passo a passo, a contagem
//! acumulada de page faults com a esperada.
//!
//! O harness faz o papel do fault handler: pega um frame livre ou pede uma
//! vítima, salva o byte da vítima no "swap", desmapeia, restaura o byte da
//! página que faltou, mapeia e registra. Cada página guarda um byte de tag
//! (`0x0a` para `a` ... `0x0e` para `e`), conferido na volta do swap.

use super::mock::{AccessType, MockPageTable};
use super::page::Page;
use super::policy::PolicyKind;
use crate::klib::test_framework::TestResult;
use crate::mm::addr::{PhysAddr, PhysFrame, VirtAddr};
use crate::mm::aspace::AddressSpace;
use crate::mm::config::{
    SWAP_CHECK_FRAMES, SWAP_CHECK_FRAME_BASE, SWAP_CHECK_PAGE_A, SWAP_CHECK_PAGE_B,
    SWAP_CHECK_PAGE_C, SWAP_CHECK_PAGE_D, SWAP_CHECK_PAGE_E,
};
use crate::mm::error::{SwapError, SwapResult, TraceError};
use crate::mm::swap::hw::PteAccess;
use crate::mm::vmm::PteFlags;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// Um toque no trace e o total de faults esperado depois dele
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceStep {
    pub addr: VirtAddr,
    pub expected_faults: u64,
}

const fn step(addr: u64, expected_faults: u64) -> TraceStep {
    TraceStep {
        addr: VirtAddr::new(addr),
        expected_faults,
    }
}

const A: u64 = SWAP_CHECK_PAGE_A;
const B: u64 = SWAP_CHECK_PAGE_B;
const C: u64 = SWAP_CHECK_PAGE_C;
const D: u64 = SWAP_CHECK_PAGE_D;
const E: u64 = SWAP_CHECK_PAGE_E;

/// Primeiro toque em a, b, c, d: um fault cada
pub const WARMUP: &[TraceStep] = &[step(A, 1), step(B, 2), step(C, 3), step(D, 4)];

pub const CLOCK_TRACE: &[TraceStep] = &[
    step(C, 4),
    step(A, 4),
    step(D, 4),
    step(B, 4),
    step(E, 5),
    step(B, 5),
    step(A, 6),
    step(B, 6),
    step(C, 7),
    step(D, 8),
];

pub const FIFO_TRACE: &[TraceStep] = &[
    step(C, 4),
    step(A, 4),
    step(D, 4),
    step(B, 4),
    step(E, 5),
    step(B, 5),
    step(A, 6),
    step(B, 7),
    step(C, 8),
    step(D, 9),
    step(E, 10),
    step(A, 11),
];

/// Trace esperado para `kind`, depois do aquecimento
pub const fn trace_for(kind: PolicyKind) -> &'static [TraceStep] {
    match kind {
        PolicyKind::Clock => CLOCK_TRACE,
        PolicyKind::Fifo => FIFO_TRACE,
    }
}

/// Resultado de uma execução bem-sucedida
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceReport {
    pub faults: u64,
    /// Vítimas na ordem em que saíram
    pub evictions: Vec<VirtAddr>,
}

/// Byte gravado em cada página
fn page_tag(va: VirtAddr) -> u8 {
    (0x09 + va.page_number()) as u8
}

struct Harness {
    aspace: AddressSpace<MockPageTable>,
    memory: [u8; SWAP_CHECK_FRAMES],
    free: Vec<PhysFrame>,
    swap: BTreeMap<VirtAddr, u8>,
    faults: u64,
    evictions: Vec<VirtAddr>,
}

impl Harness {
    fn new(kind: PolicyKind) -> Self {
        let mut aspace = AddressSpace::new(MockPageTable::new());
        aspace.install_policy(kind);

        let base = PhysFrame::containing_address(PhysAddr::new(SWAP_CHECK_FRAME_BASE));
        // pop() entrega o frame mais baixo primeiro
        let free = (0..SWAP_CHECK_FRAMES as u64).rev().map(|i| base.add(i)).collect();

        Self {
            aspace,
            memory: [0; SWAP_CHECK_FRAMES],
            free,
            swap: BTreeMap::new(),
            faults: 0,
            evictions: Vec::new(),
        }
    }

    fn slot(frame: PhysFrame) -> usize {
        let base = PhysFrame::containing_address(PhysAddr::new(SWAP_CHECK_FRAME_BASE));
        (frame.number() - base.number()) as usize
    }

    /// Escreve a tag de `va`, tratando o page fault se houver
    fn touch(&mut self, va: VirtAddr) -> SwapResult<()> {
        let frame = match self.aspace.table_mut().access(va, AccessType::Write) {
            Ok(frame) => frame,
            Err(SwapError::NotMapped) => {
                self.fault(va)?;
                self.aspace.table_mut().access(va, AccessType::Write)?
            }
            Err(err) => return Err(err),
        };
        self.memory[Self::slot(frame)] = page_tag(va);
        Ok(())
    }

    fn fault(&mut self, va: VirtAddr) -> SwapResult<()> {
        self.faults += 1;

        let frame = match self.free.pop() {
            Some(frame) => frame,
            None => self.evict()?,
        };

        if let Some(saved) = self.swap.remove(&va) {
            if saved != page_tag(va) {
                return Err(SwapError::ContentMismatch);
            }
            self.memory[Self::slot(frame)] = saved;
        }

        self.aspace
            .table_mut()
            .map(va, frame, PteFlags::WRITABLE | PteFlags::USER)?;
        self.aspace.register(va, Page::new(frame));
        Ok(())
    }

    fn evict(&mut self) -> SwapResult<PhysFrame> {
        if self.aspace.swappable() == 0 {
            return Err(SwapError::NoFreeFrame);
        }

        let victim = self.aspace.select_victim(false);
        let va = victim.vaddr();
        let frame = victim.into_frame();

        self.swap.insert(va, self.memory[Self::slot(frame)]);
        self.aspace.table_mut().unmap(va)?;
        self.aspace.table_mut().invalidate(va);
        self.evictions.push(va);
        Ok(frame)
    }
}

/// Roda aquecimento + `trace` com a política `kind`
pub fn run(kind: PolicyKind, trace: &[TraceStep]) -> Result<TraceReport, TraceError> {
    let mut harness = Harness::new(kind);

    for (step, expected) in WARMUP.iter().chain(trace).enumerate() {
        let outcome = harness.touch(expected.addr);
        let failure = match outcome {
            Err(err) => Some(err),
            Ok(()) if harness.faults != expected.expected_faults => Some(SwapError::TraceMismatch),
            Ok(()) => None,
        };

        if let Some(kind) = failure {
            return Err(TraceError {
                kind,
                step,
                addr: expected.addr,
                expected: expected.expected_faults,
                observed: harness.faults,
            });
        }
    }

    crate::kdebug!("(Check) Faults no trace=", harness.faults);
    crate::kdebug!("(Check) Vitimas=", harness.evictions.len());
    Ok(TraceReport {
        faults: harness.faults,
        evictions: harness.evictions,
    })
}

/// Validador como caso de teste in-kernel
pub fn self_test(kind: PolicyKind) -> TestResult {
    match run(kind, trace_for(kind)) {
        Ok(_) => {
            crate::kok!("(Check) Trace de referencia OK");
            TestResult::Pass
        }
        Err(err) => {
            crate::kfail!("(Check) Trace de referencia divergiu");
            err.log();
            TestResult::Fail
        }
    }
}
