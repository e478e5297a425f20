//! Tests for the stack instructions (PHA, PHP, PLA, PLP): stack page
//! discipline, SP wrap-around, and the B/U bit rules for pushed status
//! bytes.

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

#[test]
fn test_pha_pushes_to_stack_page() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x42);
    cpu.memory_mut().load(0x8000, &[0x48]); // PHA

    let cycles = cpu.step().unwrap();

    assert_eq!(cpu.peek_byte(0x01FD), 0x42);
    assert_eq!(cpu.sp(), 0xFC);
    assert_eq!(cycles, 3);
}

#[test]
fn test_pla_pulls_and_sets_flags() {
    let mut cpu = setup_cpu();
    cpu.poke_byte(0x01FE, 0x80);
    cpu.set_sp(0xFD);
    cpu.memory_mut().load(0x8000, &[0x68]); // PLA

    let cycles = cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.sp(), 0xFE);
    assert_eq!(cycles, 4);
}

#[test]
fn test_pha_pla_round_trip() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x5A);
    // PHA; LDA #$00; PLA
    cpu.memory_mut().load(0x8000, &[0x48, 0xA9, 0x00, 0x68]);

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x00);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x5A);
    assert_eq!(cpu.sp(), 0xFD);
}

#[test]
fn test_php_pushes_b_and_u_set() {
    let mut cpu = setup_cpu();
    cpu.set_flag_c(true);
    cpu.memory_mut().load(0x8000, &[0x08]); // PHP

    let cycles = cpu.step().unwrap();

    let pushed = cpu.peek_byte(0x01FD);
    assert_eq!(pushed & 0b0011_0000, 0b0011_0000); // B and U set
    assert_eq!(pushed & 0b0000_0001, 0b0000_0001); // C carried through
    assert_eq!(cycles, 3);
}

#[test]
fn test_plp_restores_flags_but_discards_b() {
    let mut cpu = setup_cpu();
    // Stack byte with N, D, C and B set
    cpu.poke_byte(0x01FE, 0b1001_1001);
    cpu.set_sp(0xFD);
    cpu.set_flag_b(false);
    cpu.memory_mut().load(0x8000, &[0x28]); // PLP

    let cycles = cpu.step().unwrap();

    assert!(cpu.flag_n());
    assert!(cpu.flag_d());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_i());
    // The stack byte's B bit is ignored by the live register
    assert!(!cpu.flag_b());
    assert_eq!(cycles, 4);
}

#[test]
fn test_php_plp_round_trip_preserves_status() {
    let mut cpu = setup_cpu();
    cpu.set_status(0b1100_1011);
    let before = cpu.status();
    // PHP; PLP
    cpu.memory_mut().load(0x8000, &[0x08, 0x28]);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.status(), before);
}

#[test]
fn test_stack_pointer_wraps_on_push() {
    let mut cpu = setup_cpu();
    cpu.set_sp(0x00);
    cpu.set_a(0x99);
    cpu.memory_mut().load(0x8000, &[0x48]); // PHA

    cpu.step().unwrap();

    assert_eq!(cpu.peek_byte(0x0100), 0x99);
    assert_eq!(cpu.sp(), 0xFF); // wrapped
}

#[test]
fn test_stack_pointer_wraps_on_pull() {
    let mut cpu = setup_cpu();
    cpu.set_sp(0xFF);
    cpu.poke_byte(0x0100, 0x77);
    cpu.memory_mut().load(0x8000, &[0x68]); // PLA

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x77);
    assert_eq!(cpu.sp(), 0x00); // wrapped
}
