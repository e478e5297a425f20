//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL, ROR, each available in accumulator form (2 cycles) and
//! read-modify-write memory form.
//!
//! Bit plumbing:
//! - ASL: C <- bit7, bit0 <- 0
//! - LSR: C <- bit0, bit7 <- 0
//! - ROL: bit0 <- old C, C <- old bit7
//! - ROR: bit7 <- old C, C <- old bit0

use crate::addressing::{operand_address, AddressingMode, IndexCycle};
use crate::{MemoryBus, CPU};

/// Applies `op` to the accumulator or to the addressed memory cell.
///
/// The memory form is a read-modify-write: read, one internal modify
/// cycle, write-back. The indexed form charges its index cycle
/// unconditionally, so the absolute,X variants are always 7 cycles.
fn modify<M, F>(cpu: &mut CPU<M>, mode: AddressingMode, op: F)
where
    M: MemoryBus,
    F: Fn(&mut CPU<M>, u8) -> u8,
{
    if mode == AddressingMode::Accumulator {
        cpu.tick(1);
        let value = cpu.a;
        cpu.a = op(cpu, value);
    } else {
        let addr = operand_address(cpu, mode, IndexCycle::Always);
        let value = cpu.read_byte(addr);
        cpu.tick(1); // modify
        let result = op(cpu, value);
        cpu.write_byte(addr, result);
    }
}

fn asl_value<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) -> u8 {
    cpu.flag_c = (value & 0x80) != 0;
    let result = value << 1;
    cpu.update_nz(result);
    result
}

fn lsr_value<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) -> u8 {
    cpu.flag_c = (value & 0x01) != 0;
    let result = value >> 1;
    cpu.update_nz(result);
    result
}

fn rol_value<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) -> u8 {
    let carry_in = cpu.flag_c as u8;
    cpu.flag_c = (value & 0x80) != 0;
    let result = (value << 1) | carry_in;
    cpu.update_nz(result);
    result
}

fn ror_value<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) -> u8 {
    let carry_in = if cpu.flag_c { 0x80 } else { 0x00 };
    cpu.flag_c = (value & 0x01) != 0;
    let result = (value >> 1) | carry_in;
    cpu.update_nz(result);
    result
}

/// Executes the ASL (Arithmetic Shift Left) instruction.
pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    modify(cpu, mode, asl_value);
}

/// Executes the LSR (Logical Shift Right) instruction.
pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    modify(cpu, mode, lsr_value);
}

/// Executes the ROL (Rotate Left through Carry) instruction.
pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    modify(cpu, mode, rol_value);
}

/// Executes the ROR (Rotate Right through Carry) instruction.
pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    modify(cpu, mode, ror_value);
}
