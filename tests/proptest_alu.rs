//! Property-based tests for the ALU's algebraic laws: add/subtract
//! round-trips, shift pairs, status push/pull round-trips, comparison
//! trichotomy, and BCD arithmetic against plain decimal arithmetic.

use proptest::prelude::*;
use r6502::{CPU, FlatMemory, MemoryBus};

/// Helper function to create a reset CPU with the reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    let mut cpu = CPU::new(memory);
    cpu.reset();
    cpu
}

fn run_steps(cpu: &mut CPU<FlatMemory>, steps: usize) {
    for _ in 0..steps {
        cpu.step().unwrap();
    }
}

/// Packs a value 0-99 as two BCD nibbles.
fn bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

proptest! {
    /// Property: in binary mode, ADC followed by SBC of the same operand
    /// (with no borrow pending) restores the accumulator.
    #[test]
    fn prop_adc_sbc_round_trip(a in 0u8..=255u8, m in 0u8..=255u8) {
        let mut cpu = setup_cpu();
        // LDA #a; CLC; ADC #m; SEC; SBC #m
        cpu.memory_mut()
            .load(0x8000, &[0xA9, a, 0x18, 0x69, m, 0x38, 0xE9, m]);

        run_steps(&mut cpu, 5);

        prop_assert_eq!(cpu.a(), a);
    }

    /// Property: ASL then LSR yields the original value with bit 7
    /// cleared.
    #[test]
    fn prop_asl_lsr_masks_high_bit(value in 0u8..=255u8) {
        let mut cpu = setup_cpu();
        // LDA #value; ASL A; LSR A
        cpu.memory_mut().load(0x8000, &[0xA9, value, 0x0A, 0x4A]);

        run_steps(&mut cpu, 3);

        prop_assert_eq!(cpu.a(), value & 0x7F);
    }

    /// Property: ROL then ROR restores both the accumulator and the carry
    /// flag.
    #[test]
    fn prop_rol_ror_round_trip(value in 0u8..=255u8, carry in any::<bool>()) {
        let mut cpu = setup_cpu();
        cpu.set_flag_c(carry);
        // LDA #value; ROL A; ROR A
        cpu.memory_mut().load(0x8000, &[0xA9, value, 0x2A, 0x6A]);

        run_steps(&mut cpu, 3);

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.flag_c(), carry);
    }

    /// Property: PHP followed by PLP leaves the packed status byte
    /// unchanged.
    #[test]
    fn prop_php_plp_round_trip(status in 0u8..=255u8) {
        let mut cpu = setup_cpu();
        cpu.set_status(status);
        let before = cpu.status();
        // PHP; PLP
        cpu.memory_mut().load(0x8000, &[0x08, 0x28]);

        run_steps(&mut cpu, 2);

        prop_assert_eq!(cpu.status(), before);
        prop_assert_eq!(cpu.sp(), 0xFD); // stack balanced
    }

    /// Property: CMP implements the trichotomy C = (A >= M), Z = (A == M),
    /// N = bit 7 of the difference, and never changes A.
    #[test]
    fn prop_cmp_trichotomy(a in 0u8..=255u8, m in 0u8..=255u8) {
        let mut cpu = setup_cpu();
        // LDA #a; CMP #m
        cpu.memory_mut().load(0x8000, &[0xA9, a, 0xC9, m]);

        run_steps(&mut cpu, 2);

        prop_assert_eq!(cpu.flag_c(), a >= m);
        prop_assert_eq!(cpu.flag_z(), a == m);
        prop_assert_eq!(cpu.flag_n(), a.wrapping_sub(m) & 0x80 != 0);
        prop_assert_eq!(cpu.a(), a);
    }

    /// Property: decimal-mode ADC of two valid BCD operands matches
    /// decimal arithmetic modulo 100, with C as the hundreds carry.
    #[test]
    fn prop_bcd_adc_matches_decimal_arithmetic(a in 0u8..100u8, b in 0u8..100u8) {
        let mut cpu = setup_cpu();
        // SED; LDA #bcd(a); CLC; ADC #bcd(b)
        cpu.memory_mut()
            .load(0x8000, &[0xF8, 0xA9, bcd(a), 0x18, 0x69, bcd(b)]);

        run_steps(&mut cpu, 4);

        let sum = a as u16 + b as u16;
        prop_assert_eq!(cpu.a(), bcd((sum % 100) as u8));
        prop_assert_eq!(cpu.flag_c(), sum > 99);
    }

    /// Property: decimal-mode SBC of two valid BCD operands matches
    /// decimal arithmetic modulo 100, with C clear exactly on borrow.
    #[test]
    fn prop_bcd_sbc_matches_decimal_arithmetic(a in 0u8..100u8, b in 0u8..100u8) {
        let mut cpu = setup_cpu();
        // SED; LDA #bcd(a); SEC; SBC #bcd(b)
        cpu.memory_mut()
            .load(0x8000, &[0xF8, 0xA9, bcd(a), 0x38, 0xE9, bcd(b)]);

        run_steps(&mut cpu, 4);

        let difference = (100 + a as i16 - b as i16) % 100;
        prop_assert_eq!(cpu.a(), bcd(difference as u8));
        prop_assert_eq!(cpu.flag_c(), a >= b);
    }

    /// Property: a chain of INX instructions is addition modulo 256.
    #[test]
    fn prop_inx_chain_wraps(start in 0u8..=255u8, count in 0usize..16) {
        let mut cpu = setup_cpu();
        cpu.set_x(start);
        for offset in 0..count {
            cpu.poke_byte(0x8000 + offset as u16, 0xE8); // INX
        }

        run_steps(&mut cpu, count);

        prop_assert_eq!(cpu.x(), start.wrapping_add(count as u8));
    }
}
