//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA, TSX copy between registers and update Z and N.
//! TXS copies X into the stack pointer without touching any flag.
//!
//! All six are implied-mode, 2-cycle instructions: one opcode fetch plus
//! one internal cycle.

use crate::{MemoryBus, CPU};

/// Executes the TAX (Transfer A to X) instruction.
pub(crate) fn execute_tax<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick(1);
    cpu.x = cpu.a;
    let value = cpu.x;
    cpu.update_nz(value);
}

/// Executes the TAY (Transfer A to Y) instruction.
pub(crate) fn execute_tay<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick(1);
    cpu.y = cpu.a;
    let value = cpu.y;
    cpu.update_nz(value);
}

/// Executes the TXA (Transfer X to A) instruction.
pub(crate) fn execute_txa<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick(1);
    cpu.a = cpu.x;
    let value = cpu.a;
    cpu.update_nz(value);
}

/// Executes the TYA (Transfer Y to A) instruction.
pub(crate) fn execute_tya<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick(1);
    cpu.a = cpu.y;
    let value = cpu.a;
    cpu.update_nz(value);
}

/// Executes the TSX (Transfer Stack Pointer to X) instruction.
pub(crate) fn execute_tsx<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick(1);
    cpu.x = cpu.sp;
    let value = cpu.x;
    cpu.update_nz(value);
}

/// Executes the TXS (Transfer X to Stack Pointer) instruction.
///
/// TXS does NOT affect flags.
pub(crate) fn execute_txs<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick(1);
    cpu.sp = cpu.x;
}
