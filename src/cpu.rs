//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the R650X/R651X
//! processor state and the fetch-decode-execute engine.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of the next instruction
//! - **Stack pointer** (SP): 8-bit offset into the stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, B, D, I, Z, C (individual bool fields)
//! - **Cycle counter**: u64 monotonically increasing cycle count
//!
//! ## Cycle Accounting
//!
//! Every byte that moves across the memory bus costs exactly one cycle,
//! charged by the `read_byte`/`write_byte` helpers; internal CPU work
//! (index arithmetic, stack housekeeping, read-modify-write slots) is
//! charged with `tick`. An instruction's total therefore emerges from the
//! accesses it performs and always matches the published cycle table.
//!
//! ## Execution Model
//!
//! - `reset()`: load PC from the reset vector, costs 8 cycles
//! - `step()`: execute one instruction, returns the cycles it consumed
//! - `run_for_cycles()`: execute whole instructions until a budget is met
//! - `irq()` / `nmi()`: programmatic interrupt injection

use crate::instructions::{
    alu, branches, control, flags, inc_dec, load_store, shifts, stack, transfer,
};
use crate::opcodes::{Mnemonic, OPCODE_TABLE};
use crate::{ExecutionError, MemoryBus};

/// NMI vector location (little-endian word at 0xFFFA/0xFFFB).
pub const VECTOR_NMI: u16 = 0xFFFA;

/// Reset vector location (little-endian word at 0xFFFC/0xFFFD).
pub const VECTOR_RESET: u16 = 0xFFFC;

/// IRQ/BRK vector location (little-endian word at 0xFFFE/0xFFFF).
pub const VECTOR_IRQ: u16 = 0xFFFE;

/// Base address of the stack page; the full stack address is
/// `STACK_BASE | SP`.
pub const STACK_BASE: u16 = 0x0100;

/// Stack pointer value established by reset.
pub const STACK_POINTER_RESET: u8 = 0xFD;

/// R650X/R651X CPU state and execution context.
///
/// The CPU struct contains all processor state including registers, flags,
/// program counter, stack pointer, and cycle counter. It is generic over
/// the memory implementation via the [`MemoryBus`] trait and owns its
/// memory for the duration of execution.
///
/// # Examples
///
/// ```
/// use r6502::{CPU, FlatMemory, MemoryBus};
///
/// // Create memory, point the reset vector at 0x8000, seed a program
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.load(0x8000, &[0xA9, 0x42]); // LDA #$42
///
/// let mut cpu = CPU::new(memory);
/// cpu.reset();
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert_eq!(cpu.cycles(), 8); // reset costs 8 cycles
///
/// let cycles = cpu.step().unwrap();
/// assert_eq!(cycles, 2);
/// assert_eq!(cpu.a(), 0x42);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 | sp gives the full stack address)
    pub(crate) sp: u8,

    /// Negative flag (bit 7 of the last result)
    pub(crate) flag_n: bool,

    /// Overflow flag (signed overflow in ADC/SBC, bit 6 in BIT)
    pub(crate) flag_v: bool,

    /// Break flag. Not a real register bit on the hardware: pushes encode
    /// it per-source and pops discard it.
    pub(crate) flag_b: bool,

    /// Decimal mode flag (enables BCD arithmetic in ADC/SBC)
    pub(crate) flag_d: bool,

    /// Interrupt disable flag (masks IRQ when set)
    pub(crate) flag_i: bool,

    /// Zero flag (last result was zero)
    pub(crate) flag_z: bool,

    /// Carry flag
    pub(crate) flag_c: bool,

    /// Total CPU cycles executed
    pub(crate) cycles: u64,

    /// When set, `step` refuses undocumented opcodes instead of executing
    /// them as 2-cycle NOPs.
    strict_illegal: bool,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU owning the given memory bus.
    ///
    /// The CPU starts in the power-on state: registers and flags zeroed,
    /// cycle counter at 0. Nothing is read from memory; call [`reset`] to
    /// load PC from the reset vector and reach the running state.
    ///
    /// [`reset`]: CPU::reset
    pub fn new(memory: M) -> Self {
        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: 0x0000,
            sp: 0x00,
            flag_n: false,
            flag_v: false,
            flag_b: false,
            flag_d: false,
            flag_i: false,
            flag_z: false,
            flag_c: false,
            cycles: 0,
            strict_illegal: false,
            memory,
        }
    }

    /// Resets the CPU, as the hardware RES line would.
    ///
    /// - PC is loaded from the reset vector at 0xFFFC/0xFFFD
    /// - SP is set to 0xFD
    /// - A, X and Y are cleared
    /// - All flags are cleared except I, which is set to mask interrupts
    /// - The cycle counter advances by 8 (2 for the vector read plus 6
    ///   internal cycles)
    ///
    /// Reset may be invoked repeatedly; each invocation performs the same
    /// sequence.
    pub fn reset(&mut self) {
        self.pc = self.read_word(VECTOR_RESET);
        self.sp = STACK_POINTER_RESET;
        self.a = 0x00;
        self.x = 0x00;
        self.y = 0x00;
        self.flag_n = false;
        self.flag_v = false;
        self.flag_b = false;
        self.flag_d = false;
        self.flag_i = true; // interrupts masked after reset
        self.flag_z = false;
        self.flag_c = false;
        self.tick(6);
    }

    /// Executes one instruction and returns the number of cycles it
    /// consumed.
    ///
    /// Performs the fetch-decode-execute cycle: fetch the opcode byte at
    /// PC, look it up in [`OPCODE_TABLE`], and run the instruction. The
    /// cycle counter advances by exactly the returned amount.
    ///
    /// Undocumented opcodes execute as 2-cycle NOPs. With strict mode
    /// enabled (see [`set_strict_illegal`]) they instead return
    /// [`ExecutionError::IllegalOpcode`] with PC and the cycle counter
    /// unchanged, so a harness can inspect the faulting address.
    ///
    /// [`set_strict_illegal`]: CPU::set_strict_illegal
    ///
    /// # Examples
    ///
    /// ```
    /// use r6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut memory = FlatMemory::new();
    /// memory.write(0xFFFC, 0x00);
    /// memory.write(0xFFFD, 0x80);
    /// memory.load(0x8000, &[0xE8]); // INX
    ///
    /// let mut cpu = CPU::new(memory);
    /// cpu.reset();
    ///
    /// assert_eq!(cpu.step().unwrap(), 2);
    /// assert_eq!(cpu.x(), 1);
    /// ```
    pub fn step(&mut self) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let opcode = self.fetch_byte();
        let entry = OPCODE_TABLE[opcode as usize];
        let mode = entry.addressing_mode;

        match entry.mnemonic {
            Mnemonic::Lda => load_store::execute_lda(self, mode),
            Mnemonic::Ldx => load_store::execute_ldx(self, mode),
            Mnemonic::Ldy => load_store::execute_ldy(self, mode),
            Mnemonic::Sta => load_store::execute_sta(self, mode),
            Mnemonic::Stx => load_store::execute_stx(self, mode),
            Mnemonic::Sty => load_store::execute_sty(self, mode),

            Mnemonic::Tax => transfer::execute_tax(self),
            Mnemonic::Tay => transfer::execute_tay(self),
            Mnemonic::Txa => transfer::execute_txa(self),
            Mnemonic::Tya => transfer::execute_tya(self),
            Mnemonic::Tsx => transfer::execute_tsx(self),
            Mnemonic::Txs => transfer::execute_txs(self),

            Mnemonic::Pha => stack::execute_pha(self),
            Mnemonic::Php => stack::execute_php(self),
            Mnemonic::Pla => stack::execute_pla(self),
            Mnemonic::Plp => stack::execute_plp(self),

            Mnemonic::And => alu::execute_and(self, mode),
            Mnemonic::Ora => alu::execute_ora(self, mode),
            Mnemonic::Eor => alu::execute_eor(self, mode),
            Mnemonic::Bit => alu::execute_bit(self, mode),
            Mnemonic::Adc => alu::execute_adc(self, mode),
            Mnemonic::Sbc => alu::execute_sbc(self, mode),
            Mnemonic::Cmp => alu::execute_cmp(self, mode),
            Mnemonic::Cpx => alu::execute_cpx(self, mode),
            Mnemonic::Cpy => alu::execute_cpy(self, mode),

            Mnemonic::Inc => inc_dec::execute_inc(self, mode),
            Mnemonic::Dec => inc_dec::execute_dec(self, mode),
            Mnemonic::Inx => inc_dec::execute_inx(self),
            Mnemonic::Iny => inc_dec::execute_iny(self),
            Mnemonic::Dex => inc_dec::execute_dex(self),
            Mnemonic::Dey => inc_dec::execute_dey(self),

            Mnemonic::Asl => shifts::execute_asl(self, mode),
            Mnemonic::Lsr => shifts::execute_lsr(self, mode),
            Mnemonic::Rol => shifts::execute_rol(self, mode),
            Mnemonic::Ror => shifts::execute_ror(self, mode),

            Mnemonic::Bcc => branches::execute_bcc(self),
            Mnemonic::Bcs => branches::execute_bcs(self),
            Mnemonic::Beq => branches::execute_beq(self),
            Mnemonic::Bmi => branches::execute_bmi(self),
            Mnemonic::Bne => branches::execute_bne(self),
            Mnemonic::Bpl => branches::execute_bpl(self),
            Mnemonic::Bvc => branches::execute_bvc(self),
            Mnemonic::Bvs => branches::execute_bvs(self),

            Mnemonic::Jmp => control::execute_jmp(self, mode),
            Mnemonic::Jsr => control::execute_jsr(self),
            Mnemonic::Rts => control::execute_rts(self),
            Mnemonic::Rti => control::execute_rti(self),
            Mnemonic::Brk => control::execute_brk(self),
            Mnemonic::Nop => control::execute_nop(self),

            Mnemonic::Clc => flags::execute_clc(self),
            Mnemonic::Sec => flags::execute_sec(self),
            Mnemonic::Cli => flags::execute_cli(self),
            Mnemonic::Sei => flags::execute_sei(self),
            Mnemonic::Cld => flags::execute_cld(self),
            Mnemonic::Sed => flags::execute_sed(self),
            Mnemonic::Clv => flags::execute_clv(self),

            Mnemonic::Ill => {
                if self.strict_illegal {
                    // Undo the fetch so the faulting address is inspectable.
                    self.pc = self.pc.wrapping_sub(1);
                    self.cycles = start_cycles;
                    return Err(ExecutionError::IllegalOpcode(opcode));
                }
                // NOP substitution: opcode fetch + one internal cycle.
                self.tick(1);
            }
        }

        Ok(self.cycles - start_cycles)
    }

    /// Runs the CPU until at least `cycle_budget` cycles have elapsed.
    ///
    /// Executes whole instructions; the engine never stops mid-instruction,
    /// so the returned count may exceed the budget by up to one
    /// instruction's cycles. Useful for frame-locked execution models.
    ///
    /// # Examples
    ///
    /// ```
    /// use r6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut memory = FlatMemory::new();
    /// memory.write(0xFFFC, 0x00);
    /// memory.write(0xFFFD, 0x80);
    /// for addr in 0x8000..0x8010 {
    ///     memory.write(addr, 0xEA); // NOP sled
    /// }
    ///
    /// let mut cpu = CPU::new(memory);
    /// cpu.reset();
    ///
    /// let consumed = cpu.run_for_cycles(10).unwrap();
    /// assert_eq!(consumed, 10); // five 2-cycle NOPs
    /// assert_eq!(cpu.pc(), 0x8005);
    /// ```
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles + cycle_budget;

        while self.cycles < target_cycles {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    /// Simulates an IRQ assertion.
    ///
    /// If the I flag is set the request is ignored and 0 is returned.
    /// Otherwise: PC is pushed, then the status byte with B clear and U
    /// set, I is set, and PC is loaded from the IRQ vector at 0xFFFE.
    /// Costs 7 cycles.
    pub fn irq(&mut self) -> u64 {
        if self.flag_i {
            return 0;
        }
        self.interrupt(VECTOR_IRQ)
    }

    /// Simulates an NMI assertion. Always serviced, regardless of the I
    /// flag; vectors through 0xFFFA. Costs 7 cycles.
    pub fn nmi(&mut self) -> u64 {
        self.interrupt(VECTOR_NMI)
    }

    fn interrupt(&mut self, vector: u16) -> u64 {
        let start_cycles = self.cycles;

        self.tick(2); // internal operations
        let pc = self.pc;
        self.push_word(pc);
        let status = self.status_for_push(false); // B clear for interrupts
        self.push_byte(status);
        self.flag_i = true;
        self.pc = self.read_word(vector);

        self.cycles - start_cycles
    }

    // ========== Cycle-Charging Bus Helpers ==========

    /// Advances the cycle counter for internal (non-bus) work.
    pub(crate) fn tick(&mut self, cycles: u64) {
        self.cycles += cycles;
    }

    /// Reads a byte through the bus. Costs 1 cycle.
    pub(crate) fn read_byte(&mut self, addr: u16) -> u8 {
        self.cycles += 1;
        self.memory.read(addr)
    }

    /// Writes a byte through the bus. Costs 1 cycle.
    pub(crate) fn write_byte(&mut self, addr: u16, value: u8) {
        self.cycles += 1;
        self.memory.write(addr, value);
    }

    /// Reads a little-endian word from `addr` and `addr + 1` (wrapping at
    /// the top of memory). Costs 2 cycles.
    pub(crate) fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read_byte(addr) as u16;
        let hi = self.read_byte(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Fetches the byte at PC and advances PC. Costs 1 cycle.
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.read_byte(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Fetches a little-endian word at PC and advances PC past it.
    /// Costs 2 cycles.
    pub(crate) fn fetch_word(&mut self) -> u16 {
        let value = self.read_word(self.pc);
        self.pc = self.pc.wrapping_add(2);
        value
    }

    // ========== Stack Operations ==========

    /// Pushes a byte onto the stack page and decrements SP (wrapping).
    pub(crate) fn push_byte(&mut self, value: u8) {
        let addr = STACK_BASE | self.sp as u16;
        self.write_byte(addr, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pushes a word, high byte first, so it pops back little-endian.
    pub(crate) fn push_word(&mut self, value: u16) {
        self.push_byte((value >> 8) as u8);
        self.push_byte(value as u8);
    }

    /// Increments SP (wrapping) and reads the byte it then points at.
    pub(crate) fn pop_byte(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        let addr = STACK_BASE | self.sp as u16;
        self.read_byte(addr)
    }

    /// Pops a word: low byte first, then high.
    pub(crate) fn pop_word(&mut self) -> u16 {
        let lo = self.pop_byte() as u16;
        let hi = self.pop_byte() as u16;
        (hi << 8) | lo
    }

    // ========== Flag Helpers ==========

    /// Sets Z and N from a result byte: Z if zero, N from bit 7.
    pub(crate) fn update_nz(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = (value & 0x80) != 0;
    }

    /// The status byte as pushed to the stack: U always set, B set only
    /// for PHP/BRK pushes (`brk = true`), clear for IRQ/NMI.
    pub(crate) fn status_for_push(&self, brk: bool) -> u8 {
        let mut status = self.status() & !0b0001_0000;
        if brk {
            status |= 0b0001_0000;
        }
        status
    }

    /// Restores flags from a byte popped off the stack. The byte's B bit
    /// is discarded (B is not a real register bit) and U is implicit.
    pub(crate) fn set_status_from_stack(&mut self, value: u8) {
        self.flag_n = (value & 0b1000_0000) != 0;
        self.flag_v = (value & 0b0100_0000) != 0;
        self.flag_d = (value & 0b0000_1000) != 0;
        self.flag_i = (value & 0b0000_0100) != 0;
        self.flag_z = (value & 0b0000_0010) != 0;
        self.flag_c = (value & 0b0000_0001) != 0;
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: the full stack address is 0x0100 | SP; the stack grows
    /// downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a packed byte.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: U (unused, always reads 1)
    /// - Bit 4: B (Break)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    pub fn status(&self) -> u8 {
        let mut status: u8 = 0b0010_0000; // U always reads 1

        if self.flag_n {
            status |= 0b1000_0000;
        }
        if self.flag_v {
            status |= 0b0100_0000;
        }
        if self.flag_b {
            status |= 0b0001_0000;
        }
        if self.flag_d {
            status |= 0b0000_1000;
        }
        if self.flag_i {
            status |= 0b0000_0100;
        }
        if self.flag_z {
            status |= 0b0000_0010;
        }
        if self.flag_c {
            status |= 0b0000_0001;
        }

        status
    }

    /// Returns the total number of CPU cycles executed since creation.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.flag_b
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    // ========== Register Setters (debugging interface) ==========

    /// Sets the accumulator register value.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register value.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register value.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the program counter value.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer value.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Sets every flag from a packed status byte. The U bit is ignored
    /// (it always reads 1).
    pub fn set_status(&mut self, value: u8) {
        self.flag_n = (value & 0b1000_0000) != 0;
        self.flag_v = (value & 0b0100_0000) != 0;
        self.flag_b = (value & 0b0001_0000) != 0;
        self.flag_d = (value & 0b0000_1000) != 0;
        self.flag_i = (value & 0b0000_0100) != 0;
        self.flag_z = (value & 0b0000_0010) != 0;
        self.flag_c = (value & 0b0000_0001) != 0;
    }

    /// Sets the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }

    /// Sets the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    /// Sets the Interrupt Disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.flag_i = value;
    }

    /// Sets the Decimal mode flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    /// Sets the Break flag.
    pub fn set_flag_b(&mut self, value: bool) {
        self.flag_b = value;
    }

    /// Sets the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    /// Sets the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    // ========== Strict Mode ==========

    /// Enables or disables strict illegal-opcode mode.
    ///
    /// When enabled, `step` returns [`ExecutionError::IllegalOpcode`] for
    /// undocumented encodings instead of executing them as 2-cycle NOPs.
    pub fn set_strict_illegal(&mut self, strict: bool) {
        self.strict_illegal = strict;
    }

    /// Returns true if strict illegal-opcode mode is enabled.
    pub fn strict_illegal(&self) -> bool {
        self.strict_illegal
    }

    // ========== Harness Interface ==========

    /// Reads a byte without consuming cycles.
    ///
    /// Inspection hook for tests and debuggers; the execution engine never
    /// uses it.
    pub fn peek_byte(&self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    /// Writes a byte without consuming cycles.
    pub fn poke_byte(&mut self, addr: u16, value: u8) {
        self.memory.write(addr, value);
    }

    /// Returns a shared reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    ///
    /// This allows tests and external code to modify memory between steps.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU and returns the memory bus.
    pub fn into_memory(self) -> M {
        self.memory
    }
}
