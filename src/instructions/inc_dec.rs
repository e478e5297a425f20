//! # Increment and Decrement Instructions
//!
//! - INC, DEC: read-modify-write on memory
//! - INX, INY, DEX, DEY: register forms
//!
//! The memory forms charge one internal cycle between the read and the
//! write-back; the indexed form charges its index cycle unconditionally,
//! so INC/DEC $nnnn,X is always 7 cycles.

use crate::addressing::{operand_address, AddressingMode, IndexCycle};
use crate::{MemoryBus, CPU};

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let addr = operand_address(cpu, mode, IndexCycle::Always);
    let value = cpu.read_byte(addr).wrapping_add(1);
    cpu.tick(1); // modify
    cpu.write_byte(addr, value);
    cpu.update_nz(value);
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let addr = operand_address(cpu, mode, IndexCycle::Always);
    let value = cpu.read_byte(addr).wrapping_sub(1);
    cpu.tick(1); // modify
    cpu.write_byte(addr, value);
    cpu.update_nz(value);
}

/// Executes the INX (Increment X) instruction.
pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick(1);
    cpu.x = cpu.x.wrapping_add(1);
    let value = cpu.x;
    cpu.update_nz(value);
}

/// Executes the INY (Increment Y) instruction.
pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick(1);
    cpu.y = cpu.y.wrapping_add(1);
    let value = cpu.y;
    cpu.update_nz(value);
}

/// Executes the DEX (Decrement X) instruction.
pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick(1);
    cpu.x = cpu.x.wrapping_sub(1);
    let value = cpu.x;
    cpu.update_nz(value);
}

/// Executes the DEY (Decrement Y) instruction.
pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick(1);
    cpu.y = cpu.y.wrapping_sub(1);
    let value = cpu.y;
    cpu.update_nz(value);
}
