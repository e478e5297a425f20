//! # Addressing Modes
//!
//! This module defines the 13 addressing modes supported by the 6502
//! processor and the effective-address resolvers for the memory-operand
//! modes.
//!
//! A resolver consumes the operand bytes at PC (advancing PC past them) and
//! computes the effective address. Every operand byte is fetched through the
//! CPU's cycle-charging bus helpers, so resolvers account their own bus
//! traffic; the indexed modes additionally charge the index-arithmetic cycle
//! according to an index-cycle policy supplied by the instruction.

use crate::{MemoryBus, CPU};

/// 6502 addressing mode enumeration.
///
/// The addressing mode determines how the CPU interprets the operand bytes
/// that follow an opcode and how it calculates the effective memory address
/// for the operation.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative,
///   IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10 (load immediate value 0x10 into accumulator)
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80 (load from address 0x0080)
    ZeroPage,

    /// Zero page address indexed by X register.
    ///
    /// Example: LDA $80,X (load from 0x0080 + X, wraps within zero page)
    ZeroPageX,

    /// Zero page address indexed by Y register.
    ///
    /// Example: LDX $80,Y (load from 0x0080 + Y, wraps within zero page)
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions.
    ///
    /// Example: BEQ label (branch if zero flag set, offset relative to PC)
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234 (jump to address 0x1234)
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X (load from address 0x1234 + X)
    /// May incur +1 cycle penalty if a page boundary is crossed.
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y (load from address 0x1234 + Y)
    /// May incur +1 cycle penalty if a page boundary is crossed.
    AbsoluteY,

    /// Indirect jump through 16-bit pointer.
    ///
    /// Example: JMP ($FFFC) (jump to address stored at 0xFFFC/0xFFFD)
    /// Only used by JMP; reproduces the $xxFF page-wrap hardware bug.
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X) (add X to 0x40 within zero page, read 16-bit
    /// address from that location, load from the result)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y (read 16-bit address from ZP 0x40, add Y, load
    /// from the result)
    /// May incur +1 cycle penalty if a page boundary is crossed.
    IndirectY,
}

/// Policy for the extra cycle charged by the indexed modes
/// (AbsoluteX/AbsoluteY/IndirectY).
///
/// Read instructions only pay when the index addition carries into the high
/// address byte; stores and read-modify-write instructions pay the cycle
/// unconditionally because the hardware performs the dummy access either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IndexCycle {
    /// +1 cycle only when the indexed address crosses a page boundary.
    OnPageCross,
    /// +1 cycle regardless of page crossing (stores, read-modify-write).
    Always,
}

/// Resolves the effective address for a memory-operand addressing mode,
/// consuming operand bytes at PC and charging the cycles the address
/// calculation costs.
///
/// Implicit, Accumulator, Relative and Indirect never reach this function;
/// their instructions handle the operand themselves.
pub(crate) fn operand_address<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
    index_cycle: IndexCycle,
) -> u16 {
    match mode {
        AddressingMode::Immediate => {
            // Operand is the byte at PC; the instruction's read of this
            // address is the operand fetch.
            let addr = cpu.pc;
            cpu.pc = cpu.pc.wrapping_add(1);
            addr
        }
        AddressingMode::ZeroPage => cpu.fetch_byte() as u16,
        AddressingMode::ZeroPageX => {
            let zp = cpu.fetch_byte();
            cpu.tick(1); // index addition
            zp.wrapping_add(cpu.x) as u16
        }
        AddressingMode::ZeroPageY => {
            let zp = cpu.fetch_byte();
            cpu.tick(1); // index addition
            zp.wrapping_add(cpu.y) as u16
        }
        AddressingMode::Absolute => cpu.fetch_word(),
        AddressingMode::AbsoluteX => {
            let index = cpu.x;
            indexed_absolute(cpu, index, index_cycle)
        }
        AddressingMode::AbsoluteY => {
            let index = cpu.y;
            indexed_absolute(cpu, index, index_cycle)
        }
        AddressingMode::IndirectX => {
            // Pointer lives entirely in zero page: both the X addition and
            // the high-byte fetch wrap at 0xFF.
            let zp = cpu.fetch_byte().wrapping_add(cpu.x);
            cpu.tick(1); // index addition
            zero_page_pointer(cpu, zp)
        }
        AddressingMode::IndirectY => {
            let zp = cpu.fetch_byte();
            let base = zero_page_pointer(cpu, zp);
            let addr = base.wrapping_add(cpu.y as u16);
            charge_index_cycle(cpu, base, addr, index_cycle);
            addr
        }
        AddressingMode::Implicit
        | AddressingMode::Accumulator
        | AddressingMode::Relative
        | AddressingMode::Indirect => {
            panic!("{:?} does not resolve to a memory operand", mode)
        }
    }
}

/// Absolute,X / Absolute,Y: fetch the 16-bit base, add the index, charge
/// the index cycle per policy.
fn indexed_absolute<M: MemoryBus>(cpu: &mut CPU<M>, index: u8, index_cycle: IndexCycle) -> u16 {
    let base = cpu.fetch_word();
    let addr = base.wrapping_add(index as u16);
    charge_index_cycle(cpu, base, addr, index_cycle);
    addr
}

fn charge_index_cycle<M: MemoryBus>(cpu: &mut CPU<M>, base: u16, addr: u16, policy: IndexCycle) {
    match policy {
        IndexCycle::Always => cpu.tick(1),
        IndexCycle::OnPageCross => {
            if (base & 0xFF00) != (addr & 0xFF00) {
                cpu.tick(1);
            }
        }
    }
}

/// Reads a little-endian pointer from zero page, wrapping the high-byte
/// fetch at the 0xFF -> 0x00 boundary.
fn zero_page_pointer<M: MemoryBus>(cpu: &mut CPU<M>, zp: u8) -> u16 {
    let lo = cpu.read_byte(zp as u16) as u16;
    let hi = cpu.read_byte(zp.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}
