//! # Control Flow Instructions
//!
//! - JMP: absolute and indirect jumps (the indirect form reproduces the
//!   $xxFF page-wrap hardware bug)
//! - JSR/RTS: subroutine call and return with the off-by-one return
//!   address the hardware uses
//! - RTI: return from interrupt
//! - BRK: software interrupt through the IRQ/BRK vector
//! - NOP

use crate::addressing::AddressingMode;
use crate::cpu::VECTOR_IRQ;
use crate::{MemoryBus, CPU};

/// Executes the JMP (Jump) instruction, absolute or indirect.
///
/// Indirect JMP reproduces the 6502 page-boundary bug: when the pointer's
/// low byte is 0xFF, the target's high byte is read from the start of the
/// same page instead of the next page. JMP ($10FF) reads $10FF and $1000.
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    match mode {
        AddressingMode::Absolute => {
            cpu.pc = cpu.fetch_word();
        }
        AddressingMode::Indirect => {
            let ptr = cpu.fetch_word();
            let lo = cpu.read_byte(ptr) as u16;
            let hi_addr = if (ptr & 0x00FF) == 0x00FF {
                ptr & 0xFF00 // wraps within the page
            } else {
                ptr.wrapping_add(1)
            };
            let hi = cpu.read_byte(hi_addr) as u16;
            cpu.pc = (hi << 8) | lo;
        }
        _ => panic!("{:?} is not a JMP addressing mode", mode),
    }
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes PC - 1 (the address of the last operand byte); RTS undoes the
/// off-by-one.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut CPU<M>) {
    let target = cpu.fetch_word();
    cpu.tick(1); // internal operation
    let return_address = cpu.pc.wrapping_sub(1);
    cpu.push_word(return_address);
    cpu.pc = target;
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick(2); // internal operations
    let return_address = cpu.pop_word();
    cpu.pc = return_address.wrapping_add(1);
    cpu.tick(1); // increment
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pops the status byte (B discarded, U forced), then the program counter.
/// Unlike RTS there is no off-by-one: the pushed PC is used as-is.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick(2); // internal operations
    let status = cpu.pop_byte();
    cpu.set_status_from_stack(status);
    cpu.pc = cpu.pop_word();
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// BRK skips a padding byte, so the pushed return address is the opcode
/// address + 2. The pushed status has B and U set; the I flag is then set
/// and PC is loaded from the IRQ/BRK vector at $FFFE/F.
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.pc = cpu.pc.wrapping_add(1); // padding byte
    cpu.tick(1);

    let return_address = cpu.pc;
    cpu.push_word(return_address);
    let status = cpu.status_for_push(true);
    cpu.push_byte(status);

    cpu.flag_i = true;
    cpu.pc = cpu.read_word(VECTOR_IRQ);
}

/// Executes the NOP (No Operation) instruction.
pub(crate) fn execute_nop<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.tick(1);
}
