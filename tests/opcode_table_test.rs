//! Opcode table validation and cycle-count verification.
//!
//! The table audit checks structural properties (entry count, sizes,
//! mode/size consistency). The cycle grids then execute every documented
//! opcode and verify that `step` returns exactly the published count:
//! - base counts with no page cross, no taken branch, no decimal mode
//! - +1 for indexed loads that cross a page
//! - constant counts for indexed stores and read-modify-write forms
//!   regardless of page crossing

use r6502::{AddressingMode, CPU, FlatMemory, MemoryBus, Mnemonic, OPCODE_TABLE};

/// Helper function to create a reset CPU with the reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    let mut cpu = CPU::new(memory);
    cpu.reset();
    cpu
}

// ========== Table Audit ==========

#[test]
fn test_opcode_table_has_256_entries() {
    assert_eq!(OPCODE_TABLE.len(), 256);
}

#[test]
fn test_documented_and_illegal_counts() {
    let documented = OPCODE_TABLE
        .iter()
        .filter(|m| m.mnemonic != Mnemonic::Ill)
        .count();

    assert_eq!(documented, 151);
    assert_eq!(256 - documented, 105);
}

#[test]
fn test_illegal_opcodes_are_two_cycle_one_byte_nops() {
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if metadata.mnemonic == Mnemonic::Ill {
            assert_eq!(
                metadata.base_cycles, 2,
                "illegal opcode 0x{:02X} should cost 2 cycles",
                opcode
            );
            assert_eq!(
                metadata.size_bytes, 1,
                "illegal opcode 0x{:02X} should be 1 byte",
                opcode
            );
        }
    }
}

#[test]
fn test_size_matches_addressing_mode() {
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if metadata.mnemonic == Mnemonic::Ill {
            continue;
        }
        let expected = match metadata.addressing_mode {
            AddressingMode::Implicit | AddressingMode::Accumulator => 1,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 2,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 3,
        };
        assert_eq!(
            metadata.size_bytes,
            expected,
            "opcode 0x{:02X} ({}) size disagrees with its addressing mode",
            opcode,
            metadata.mnemonic.as_str()
        );
    }
}

#[test]
fn test_documented_cycle_range() {
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if metadata.mnemonic != Mnemonic::Ill {
            assert!(
                (2..=7).contains(&metadata.base_cycles),
                "opcode 0x{:02X} ({}) has base cycles {} outside 2-7",
                opcode,
                metadata.mnemonic.as_str(),
                metadata.base_cycles
            );
        }
    }
}

// ========== Base Cycle Grid ==========

/// Executes every documented opcode in a no-penalty scenario and verifies
/// `step` returns exactly the table's base cycle count.
///
/// Setup: X = Y = 0 (no page crossing anywhere), operands $20/$00, a
/// pointer at zero page $20 for the indirect modes, and branch flags
/// arranged so no branch is taken.
#[test]
fn test_every_documented_opcode_returns_base_cycles() {
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if metadata.mnemonic == Mnemonic::Ill {
            continue;
        }

        let mut cpu = setup_cpu();

        // Pointer for the indirect modes, aimed well clear of the program
        cpu.poke_byte(0x0020, 0x40);
        cpu.poke_byte(0x0021, 0x00);

        // Force branches not-taken so they stay at the 2-cycle base
        match metadata.mnemonic {
            Mnemonic::Bcc => cpu.set_flag_c(true),
            Mnemonic::Bne => cpu.set_flag_z(true),
            Mnemonic::Bpl => cpu.set_flag_n(true),
            Mnemonic::Bvc => cpu.set_flag_v(true),
            _ => {}
        }

        cpu.poke_byte(0x8000, opcode as u8);
        cpu.poke_byte(0x8001, 0x20);
        cpu.poke_byte(0x8002, 0x00);

        let cycles = cpu.step().unwrap();
        assert_eq!(
            cycles,
            metadata.base_cycles as u64,
            "opcode 0x{:02X} ({} {:?})",
            opcode,
            metadata.mnemonic.as_str(),
            metadata.addressing_mode
        );
    }
}

// ========== Page-Cross Penalty Grid ==========

fn is_read_mnemonic(mnemonic: Mnemonic) -> bool {
    matches!(
        mnemonic,
        Mnemonic::Lda
            | Mnemonic::Ldx
            | Mnemonic::Ldy
            | Mnemonic::Adc
            | Mnemonic::Sbc
            | Mnemonic::And
            | Mnemonic::Ora
            | Mnemonic::Eor
            | Mnemonic::Cmp
    )
}

fn is_indexed_mode(mode: AddressingMode) -> bool {
    matches!(
        mode,
        AddressingMode::AbsoluteX | AddressingMode::AbsoluteY | AddressingMode::IndirectY
    )
}

/// Runs an indexed-mode opcode with both indexes at 0xFF against a base
/// address of $80FF, guaranteeing a page crossing, and returns the cycles.
fn run_with_page_cross(opcode: u8, mode: AddressingMode) -> u64 {
    let mut cpu = setup_cpu();
    cpu.set_x(0xFF);
    cpu.set_y(0xFF);

    // ($20) -> $80FF for the indirect-indexed form
    cpu.poke_byte(0x0020, 0xFF);
    cpu.poke_byte(0x0021, 0x80);

    cpu.poke_byte(0x8000, opcode);
    if mode == AddressingMode::IndirectY {
        cpu.poke_byte(0x8001, 0x20);
    } else {
        cpu.poke_byte(0x8001, 0xFF);
        cpu.poke_byte(0x8002, 0x80);
    }

    cpu.step().unwrap()
}

#[test]
fn test_indexed_loads_pay_one_extra_cycle_on_page_cross() {
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if !is_read_mnemonic(metadata.mnemonic) || !is_indexed_mode(metadata.addressing_mode) {
            continue;
        }

        let cycles = run_with_page_cross(opcode as u8, metadata.addressing_mode);
        assert_eq!(
            cycles,
            metadata.base_cycles as u64 + 1,
            "opcode 0x{:02X} ({} {:?}) should pay the page-cross cycle",
            opcode,
            metadata.mnemonic.as_str(),
            metadata.addressing_mode
        );
    }
}

#[test]
fn test_indexed_stores_cost_the_same_with_and_without_page_cross() {
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if metadata.mnemonic != Mnemonic::Sta || !is_indexed_mode(metadata.addressing_mode) {
            continue;
        }

        // Crossing case
        let crossed = run_with_page_cross(opcode as u8, metadata.addressing_mode);

        // Non-crossing case: indexes zero, same operands
        let mut cpu = setup_cpu();
        cpu.poke_byte(0x0020, 0xFF);
        cpu.poke_byte(0x0021, 0x80);
        cpu.poke_byte(0x8000, opcode as u8);
        if metadata.addressing_mode == AddressingMode::IndirectY {
            cpu.poke_byte(0x8001, 0x20);
        } else {
            cpu.poke_byte(0x8001, 0xFF);
            cpu.poke_byte(0x8002, 0x80);
        }
        let straight = cpu.step().unwrap();

        assert_eq!(crossed, metadata.base_cycles as u64);
        assert_eq!(straight, metadata.base_cycles as u64);
    }
}

#[test]
fn test_indexed_rmw_cost_is_constant() {
    let rmw = [
        Mnemonic::Asl,
        Mnemonic::Lsr,
        Mnemonic::Rol,
        Mnemonic::Ror,
        Mnemonic::Inc,
        Mnemonic::Dec,
    ];

    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if !rmw.contains(&metadata.mnemonic)
            || metadata.addressing_mode != AddressingMode::AbsoluteX
        {
            continue;
        }

        let crossed = run_with_page_cross(opcode as u8, metadata.addressing_mode);
        assert_eq!(
            crossed,
            metadata.base_cycles as u64,
            "opcode 0x{:02X} ({}) absolute,X must be constant-cost",
            opcode,
            metadata.mnemonic.as_str()
        );
    }
}
