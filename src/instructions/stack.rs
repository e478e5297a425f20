//! # Stack Operations
//!
//! PHA, PHP, PLA, PLP.
//!
//! The 6502 stack occupies page 1 (0x0100-0x01FF) and grows downward; the
//! stack pointer is an 8-bit offset into that page and wraps silently.
//!
//! The status byte pushed by PHP always has the B and U bits set. PLP
//! restores every flag except B (the stack byte's B bit is ignored; B is
//! not a real register bit) and forces U to 1.

use crate::{MemoryBus, CPU};

/// Executes the PHA (Push Accumulator) instruction.
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick(1);
    let value = cpu.a;
    cpu.push_byte(value);
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed byte has B and U set.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick(1);
    let status = cpu.status_for_push(true);
    cpu.push_byte(status);
}

/// Executes the PLA (Pull Accumulator) instruction.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick(2);
    let value = cpu.pop_byte();
    cpu.a = value;
    cpu.update_nz(value);
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// The popped byte's B bit is discarded; U is forced to 1.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick(2);
    let status = cpu.pop_byte();
    cpu.set_status_from_stack(status);
}
