//! The fetch, decode and execute engine.

use crate::emulator::display::Display;
use crate::emulator::input::{EmulatorInput, Keys, NUM_KEYS};
use crate::emulator::instruction::*;
use crate::emulator::memory::{Memory, FONT_ADDR, GLYPH_SIZE, PROGRAM_START};
use crate::emulator::opcode::Opcode;
use crate::emulator::output::EmulatorOutput;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;
const INSTRUCTION_SIZE: u16 = 2;
const VF: usize = 0xF;

/// Registers, timers, the call stack and the latest key snapshot.
///
/// The CPU owns no memory or screen of its own, those are lent to it
/// for the duration of each call by the emulator that owns everything.
pub struct Cpu {
    registers: [u8; NUM_REGISTERS],
    i: u16,
    program_counter: u16,
    stack: [u16; STACK_SIZE],
    stack_len: usize,
    delay_timer: u8,
    sound_timer: u8,
    keys: Keys,
    opcode: Opcode,
    cycles: u64,
    rng: StdRng,
}

impl Cpu {
    pub fn new() -> Cpu {
        Cpu::with_rng(StdRng::from_entropy())
    }

    /// A CPU whose `RND` results are reproducible.
    pub fn with_seed(seed: u64) -> Cpu {
        Cpu::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Cpu {
        Cpu {
            registers: [0; NUM_REGISTERS],
            i: 0,
            program_counter: PROGRAM_START,
            stack: [0; STACK_SIZE],
            stack_len: 0,
            delay_timer: 0,
            sound_timer: 0,
            keys: [false; NUM_KEYS],
            opcode: Opcode(0),
            cycles: 0,
            rng,
        }
    }

    /// Refresh the key snapshot, then fetch and execute one instruction.
    pub fn tick<I: EmulatorInput + ?Sized>(&mut self, memory: &mut Memory, display: &mut Display, input: &mut I) {
        input.fetch_keys(&mut self.keys, false);
        self.fetch(memory);
        self.execute(memory, display);
        self.cycles += 1;
    }

    /// Count down both timers, beeping while the sound timer runs.
    pub fn update_timers<O: EmulatorOutput + ?Sized>(&mut self, output: &mut O) {
        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }

        if self.sound_timer > 0 {
            output.play_beep();
            self.sound_timer -= 1;
        }
    }

    /// Read the big-endian opcode at the program counter and move past it.
    fn fetch(&mut self, memory: &Memory) {
        let high = memory.read(self.program_counter);
        let low = memory.read(self.program_counter.wrapping_add(1));
        self.opcode = Opcode::from_bytes(high, low);
        self.program_counter = self.program_counter.wrapping_add(INSTRUCTION_SIZE);
    }

    fn execute(&mut self, memory: &mut Memory, display: &mut Display) {
        match Instruction::decode(self.opcode) {
            Some(instruction) => {
                log::trace!("{:#06x} {:#06x}: {}", self.program_counter.wrapping_sub(INSTRUCTION_SIZE), self.opcode.as_u16(), instruction);
                self.execute_single(instruction, memory, display);
            }
            None => log::error!("Unknown or unsupported opcode: {:#06X}", self.opcode.as_u16()),
        }
    }

    fn skip_next(&mut self) {
        self.program_counter = self.program_counter.wrapping_add(INSTRUCTION_SIZE);
    }

    /// Execute a single, already decoded instruction.
    /// Operands wider than their opcode field are masked first.
    pub fn execute_single(&mut self, instruction: Instruction, memory: &mut Memory, display: &mut Display) {
        let v = &mut self.registers;
        match instruction.masked() {

            Instruction::Nop => log::debug!("Empty instruction skipped"),

            Instruction::ClearScreen => display.clear(),

            // Return to the previous call site via the stack.
            Instruction::Return => {
                if self.stack_len == 0 {
                    log::error!("Return with an empty call stack, ignored");
                    return;
                }
                self.stack_len -= 1;
                self.program_counter = self.stack[self.stack_len];
            }

            // Machine code routines only exist on the original hardware.
            Instruction::Sys(_) => log::error!("Unknown or unsupported opcode: {:#06X}", self.opcode.as_u16()),

            Instruction::Goto(Addr(addr)) => self.program_counter = addr,

            // Store the return address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                if self.stack_len == STACK_SIZE {
                    log::error!("Call to {:#05X} overflows the call stack, ignored", addr);
                    return;
                }
                self.stack[self.stack_len] = self.program_counter;
                self.stack_len += 1;
                self.program_counter = addr;
            }

            Instruction::IfRegEqConst(Reg(x), Const(n)) => {
                if v[x as usize] == n {
                    self.skip_next();
                }
            }

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => {
                if v[x as usize] != n {
                    self.skip_next();
                }
            }

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => {
                if v[x as usize] == v[y as usize] {
                    self.skip_next();
                }
            }

            Instruction::SetRegToConst(Reg(x), Const(n)) => v[x as usize] = n,

            // Wraps around and leaves VF alone.
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                v[x as usize] = v[x as usize].wrapping_add(n);
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => v[x as usize] = v[y as usize],

            Instruction::BitwiseOr(Reg(x), Reg(y)) => v[x as usize] |= v[y as usize],

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => v[x as usize] &= v[y as usize],

            Instruction::BitwiseXor(Reg(x), Reg(y)) => v[x as usize] ^= v[y as usize],

            // The flag is written last, so it wins when x is F.
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (sum, carry) = v[x as usize].overflowing_add(v[y as usize]);
                v[x as usize] = sum;
                v[VF] = carry as u8;
            }

            // VF is 1 when there is no borrow.
            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (vx, vy) = (v[x as usize], v[y as usize]);
                v[x as usize] = vx.wrapping_sub(vy);
                v[VF] = (vx >= vy) as u8;
            }

            Instruction::BitshiftRight(Reg(x)) => {
                let lsb = v[x as usize] & 0x01;
                v[x as usize] >>= 1;
                v[VF] = lsb;
            }

            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let (vx, vy) = (v[x as usize], v[y as usize]);
                v[x as usize] = vy.wrapping_sub(vx);
                v[VF] = (vy >= vx) as u8;
            }

            Instruction::BitshiftLeft(Reg(x)) => {
                let msb = (v[x as usize] & 0x80) >> 7;
                v[x as usize] <<= 1;
                v[VF] = msb;
            }

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => {
                if v[x as usize] != v[y as usize] {
                    self.skip_next();
                }
            }

            Instruction::SetI(Addr(addr)) => self.i = addr,

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                self.program_counter = v[0] as u16 + addr;
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                v[x as usize] = self.rng.gen::<u8>() & n;
            }

            Instruction::Draw(Reg(x), Reg(y), Const(height)) => {
                let mut sprite = [0u8; 15];
                let sprite = &mut sprite[..height as usize];
                for (offset, row) in sprite.iter_mut().enumerate() {
                    *row = memory.read(self.i.wrapping_add(offset as u16));
                }
                let collision = display.draw(v[x as usize], v[y as usize], sprite);
                v[VF] = collision as u8;
            }

            Instruction::IfKeyEqVx(Reg(x)) => {
                if is_pressed(&self.keys, v[x as usize]) {
                    self.skip_next();
                }
            }

            Instruction::IfKeyNeqVx(Reg(x)) => {
                if !is_pressed(&self.keys, v[x as usize]) {
                    self.skip_next();
                }
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => v[x as usize] = self.delay_timer,

            // Without a key pressed, step back so this instruction runs again on the next tick.
            Instruction::SetRegToGetKey(Reg(x)) => match self.keys.iter().position(|&pressed| pressed) {
                Some(key) => v[x as usize] = key as u8,
                None => self.program_counter = self.program_counter.wrapping_sub(INSTRUCTION_SIZE),
            },

            Instruction::SetDelayTimerToReg(Reg(x)) => self.delay_timer = v[x as usize],

            Instruction::SetSoundTimerToReg(Reg(x)) => self.sound_timer = v[x as usize],

            Instruction::AddRegToI(Reg(x)) => {
                self.i = self.i.wrapping_add(v[x as usize] as u16);
            }

            // Each font glyph is 5 bytes.
            Instruction::SetIToSpriteAddrVx(Reg(x)) => {
                self.i = FONT_ADDR + v[x as usize] as u16 * GLYPH_SIZE;
            }

            Instruction::SetIToBcdOfReg(Reg(x)) => {
                let value = v[x as usize];
                memory.write(self.i, value / 100);
                memory.write(self.i.wrapping_add(1), (value / 10) % 10);
                memory.write(self.i.wrapping_add(2), value % 10);
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                for reg_no in 0..=x as usize {
                    memory.write(self.i.wrapping_add(reg_no as u16), v[reg_no]);
                }
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                for reg_no in 0..=x as usize {
                    v[reg_no] = memory.read(self.i.wrapping_add(reg_no as u16));
                }
            }
        };
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut [u8; NUM_REGISTERS] {
        &mut self.registers
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    /// Index of the topmost return address, `None` when the call stack is empty.
    pub fn stack_pointer(&self) -> Option<usize> {
        self.stack_len.checked_sub(1)
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Instructions fetched since creation.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}

/// Key codes above 0xF are never pressed.
fn is_pressed(keys: &Keys, key: u8) -> bool {
    keys.get(key as usize).copied().unwrap_or(false)
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::emulator::input::ScriptedInput;
    use crate::emulator::output::RecordingOutput;
    use test_case::test_case;

    struct Machine {
        cpu: Cpu,
        memory: Memory,
        display: Display,
        input: ScriptedInput,
    }

    impl Machine {
        fn new() -> Machine {
            Machine {
                cpu: Cpu::with_seed(8),
                memory: Memory::new(),
                display: Display::new(),
                input: ScriptedInput::new(),
            }
        }

        fn with_program(program: &[u8]) -> Machine {
            let mut machine = Machine::new();
            machine.memory.load(program);
            machine
        }

        fn run(&mut self, instruction: Instruction) {
            self.cpu.execute_single(instruction, &mut self.memory, &mut self.display);
        }

        fn tick(&mut self) {
            self.cpu.tick(&mut self.memory, &mut self.display, &mut self.input);
        }

        fn set(&mut self, reg: usize, value: u8) {
            self.cpu.registers_mut()[reg] = value;
        }

        fn v(&self, reg: usize) -> u8 {
            self.cpu.registers()[reg]
        }
    }

    #[test]
    fn goto_goes_to() {
        let mut machine = Machine::new();
        machine.run(Instruction::Goto(Addr(0x250)));
        assert_eq!(machine.cpu.program_counter(), 0x250);
    }

    #[test]
    fn return_after_call_is_neutral() {
        // Write program with call and return
        let mut machine = Machine::with_program(&[
            0x22, 0x06, // 0x200, call 0x206
            0x00, 0x00, // 0x202
            0x00, 0x00, // 0x204
            0x00, 0xEE, // 0x206, return
        ]);
        assert_eq!(machine.cpu.program_counter(), 0x200);
        assert_eq!(machine.cpu.stack_pointer(), None);

        machine.tick(); // Call 0x206
        assert_eq!(machine.cpu.program_counter(), 0x206);
        assert_eq!(machine.cpu.stack_pointer(), Some(0));
        machine.tick(); // Return to 0x202
        assert_eq!(machine.cpu.program_counter(), 0x202);
        assert_eq!(machine.cpu.stack_pointer(), None);
    }

    #[test]
    fn stack_misuse_is_ignored() {
        let mut machine = Machine::new();
        machine.run(Instruction::Return);
        assert_eq!(machine.cpu.program_counter(), 0x200);

        for depth in 0..STACK_SIZE {
            machine.run(Instruction::Call(Addr(0x300 + 2 * depth as u16)));
        }
        assert_eq!(machine.cpu.stack_pointer(), Some(15));
        machine.run(Instruction::Call(Addr(0x400)));
        assert_eq!(machine.cpu.stack_pointer(), Some(15));
        assert_eq!(machine.cpu.program_counter(), 0x31E);
    }

    #[test]
    fn fetch_is_big_endian_and_advances() {
        let mut machine = Machine::with_program(&[0x6A, 0x42]);
        machine.tick();
        assert_eq!(machine.v(0xA), 0x42);
        assert_eq!(machine.cpu.program_counter(), 0x202);
        assert_eq!(machine.cpu.cycles(), 1);
    }

    #[test]
    fn empty_and_unknown_opcodes_are_skipped() {
        let mut machine = Machine::with_program(&[0x00, 0x00, 0xFF, 0xFF, 0x01, 0x23, 0x61, 0x01]);
        machine.tick();
        machine.tick();
        machine.tick();
        assert_eq!(machine.cpu.program_counter(), 0x206);
        machine.tick();
        assert_eq!(machine.v(1), 1);
    }

    #[test_case(Instruction::IfRegEqConst(Reg(1), Const(7)), 7, 0 => 0x204 ; "se taken")]
    #[test_case(Instruction::IfRegEqConst(Reg(1), Const(8)), 7, 0 => 0x202 ; "se not taken")]
    #[test_case(Instruction::IfRegNeqConst(Reg(1), Const(8)), 7, 0 => 0x204 ; "sne taken")]
    #[test_case(Instruction::IfRegNeqConst(Reg(1), Const(7)), 7, 0 => 0x202 ; "sne not taken")]
    #[test_case(Instruction::IfRegEqReg(Reg(1), Reg(2)), 5, 5 => 0x204 ; "se reg taken")]
    #[test_case(Instruction::IfRegEqReg(Reg(1), Reg(2)), 5, 6 => 0x202 ; "se reg not taken")]
    #[test_case(Instruction::IfRegNeqReg(Reg(1), Reg(2)), 5, 6 => 0x204 ; "sne reg taken")]
    #[test_case(Instruction::IfRegNeqReg(Reg(1), Reg(2)), 5, 5 => 0x202 ; "sne reg not taken")]
    fn conditional_skips(instruction: Instruction, v1: u8, v2: u8) -> u16 {
        let mut machine = Machine::new();
        machine.set(1, v1);
        machine.set(2, v2);
        // As if the instruction was just fetched from 0x200
        machine.run(Instruction::Goto(Addr(0x202)));
        machine.run(instruction);
        machine.cpu.program_counter()
    }

    #[test]
    fn add_const_wraps_without_touching_vf() {
        let mut machine = Machine::new();
        machine.set(3, 250);
        machine.set(0xF, 9);
        machine.run(Instruction::IncRegByConst(Reg(3), Const(10)));
        assert_eq!(machine.v(3), 4);
        assert_eq!(machine.v(0xF), 9);
    }

    #[test_case(200, 100 => (44, 1) ; "overflow sets carry")]
    #[test_case(10, 20 => (30, 0) ; "no overflow")]
    #[test_case(255, 1 => (0, 1) ; "wraps to zero")]
    fn add_with_carry(vx: u8, vy: u8) -> (u8, u8) {
        let mut machine = Machine::new();
        machine.set(1, vx);
        machine.set(2, vy);
        machine.run(Instruction::IncRegByReg(Reg(1), Reg(2)));
        (machine.v(1), machine.v(0xF))
    }

    #[test_case(10, 3 => (7, 1) ; "no borrow")]
    #[test_case(3, 10 => (249, 0) ; "borrow")]
    #[test_case(5, 5 => (0, 1) ; "equal is no borrow")]
    fn sub_sets_no_borrow(vx: u8, vy: u8) -> (u8, u8) {
        let mut machine = Machine::new();
        machine.set(1, vx);
        machine.set(2, vy);
        machine.run(Instruction::DecRegByReg(Reg(1), Reg(2)));
        (machine.v(1), machine.v(0xF))
    }

    #[test_case(3, 10 => (7, 1) ; "no borrow")]
    #[test_case(10, 3 => (249, 0) ; "borrow")]
    fn subn_sets_no_borrow(vx: u8, vy: u8) -> (u8, u8) {
        let mut machine = Machine::new();
        machine.set(1, vx);
        machine.set(2, vy);
        machine.run(Instruction::SetVxVyMinusVx(Reg(1), Reg(2)));
        (machine.v(1), machine.v(0xF))
    }

    #[test_case(0b1000_0101 => (0b0100_0010, 1) ; "odd")]
    #[test_case(0b1000_0100 => (0b0100_0010, 0) ; "even")]
    fn shift_right(vx: u8) -> (u8, u8) {
        let mut machine = Machine::new();
        machine.set(1, vx);
        machine.run(Instruction::BitshiftRight(Reg(1)));
        (machine.v(1), machine.v(0xF))
    }

    #[test_case(0b1000_0101 => (0b0000_1010, 1) ; "high bit set")]
    #[test_case(0b0100_0101 => (0b1000_1010, 0) ; "high bit clear")]
    fn shift_left(vx: u8) -> (u8, u8) {
        let mut machine = Machine::new();
        machine.set(1, vx);
        machine.run(Instruction::BitshiftLeft(Reg(1)));
        (machine.v(1), machine.v(0xF))
    }

    #[test]
    fn flag_wins_when_vf_is_the_target() {
        let mut machine = Machine::new();
        machine.set(0xF, 200);
        machine.set(1, 100);
        machine.run(Instruction::IncRegByReg(Reg(0xF), Reg(1)));
        assert_eq!(machine.v(0xF), 1);
    }

    #[test]
    fn bitwise_operations() {
        let mut machine = Machine::new();
        machine.set(1, 0b1100);
        machine.set(2, 0b1010);
        machine.run(Instruction::BitwiseOr(Reg(1), Reg(2)));
        assert_eq!(machine.v(1), 0b1110);
        machine.run(Instruction::BitwiseAnd(Reg(1), Reg(2)));
        assert_eq!(machine.v(1), 0b1010);
        machine.run(Instruction::BitwiseXor(Reg(1), Reg(2)));
        assert_eq!(machine.v(1), 0);
        machine.run(Instruction::SetRegToReg(Reg(3), Reg(2)));
        assert_eq!(machine.v(3), 0b1010);
    }

    #[test]
    fn jump_with_offset() {
        let mut machine = Machine::new();
        machine.set(0, 0x10);
        machine.run(Instruction::SetPcToV0PlusAddr(Addr(0x300)));
        assert_eq!(machine.cpu.program_counter(), 0x310);
    }

    #[test]
    fn random_is_masked() {
        let mut machine = Machine::new();
        machine.run(Instruction::SetVxRand(Reg(1), Const(0)));
        assert_eq!(machine.v(1), 0);
        for _ in 0..32 {
            machine.run(Instruction::SetVxRand(Reg(1), Const(0x0F)));
            assert_eq!(machine.v(1) & 0xF0, 0);
        }
    }

    #[test]
    fn random_is_reproducible_with_a_seed() {
        let mut a = Machine::new();
        let mut b = Machine::new();
        for _ in 0..8 {
            a.run(Instruction::SetVxRand(Reg(1), Const(0xFF)));
            b.run(Instruction::SetVxRand(Reg(1), Const(0xFF)));
            assert_eq!(a.v(1), b.v(1));
        }
    }

    #[test]
    fn draw_sets_collision_flag() {
        let mut machine = Machine::new();
        machine.set(0, 0);
        machine.set(1, 3);
        machine.run(Instruction::SetIToSpriteAddrVx(Reg(1)));
        assert_eq!(machine.cpu.index(), 0x050 + 15);

        machine.run(Instruction::Draw(Reg(0), Reg(0), Const(5)));
        assert_eq!(machine.v(0xF), 0);
        assert!(machine.display.pixel(0, 0));
        assert!(machine.display.is_dirty());

        machine.run(Instruction::Draw(Reg(0), Reg(0), Const(5)));
        assert_eq!(machine.v(0xF), 1);
        assert!(!machine.display.pixel(0, 0));
    }

    #[test]
    fn clear_screen_clears_screen() {
        let mut machine = Machine::new();
        machine.display.draw(0, 0, &[0xFF]);
        machine.run(Instruction::ClearScreen);
        assert!(!machine.display.pixel(0, 0));
    }

    #[test]
    fn hand_built_operands_are_masked() {
        let mut machine = Machine::new();
        machine.set(1, 3);
        machine.cpu.i = FONT_ADDR;
        // V16 is V0 and a height of 0x15 is 5 rows
        machine.run(Instruction::Draw(Reg(0x10), Reg(0x11), Const(0x15)));
        assert!(machine.display.pixel(0, 3));
        assert!(machine.display.pixel(0, 7));
        assert!(!machine.display.pixel(0, 8));

        machine.run(Instruction::SetRegToConst(Reg(0x2F), Const(9)));
        assert_eq!(machine.v(0xF), 9);
        machine.run(Instruction::RegDump(Reg(0xFF)));
        assert_eq!(machine.memory.read(FONT_ADDR + 0xF), 9);
    }

    #[test]
    fn key_skips() {
        let mut machine = Machine::with_program(&[
            0xE1, 0x9E, // 0x200, skip if key V1 pressed
            0x00, 0x00, // 0x202
            0xE1, 0xA1, // 0x204, skip if key V1 not pressed
        ]);
        machine.set(1, 0xB);
        machine.input.press(0xB);
        machine.tick();
        assert_eq!(machine.cpu.program_counter(), 0x204);
        machine.tick();
        assert_eq!(machine.cpu.program_counter(), 0x206);

        machine.input.release(0xB);
        machine.run(Instruction::Goto(Addr(0x204)));
        machine.tick();
        assert_eq!(machine.cpu.program_counter(), 0x208);
    }

    #[test]
    fn wait_for_key_repeats_until_pressed() {
        let mut machine = Machine::with_program(&[0xF5, 0x0A]);
        for _ in 0..10 {
            machine.tick();
            assert_eq!(machine.cpu.program_counter(), 0x200);
        }

        machine.input.press(0xE);
        machine.input.press(0x9);
        machine.tick();
        assert_eq!(machine.cpu.program_counter(), 0x202);
        assert_eq!(machine.v(5), 0x9);
    }

    #[test]
    fn timers_transfer_to_and_from_registers() {
        let mut machine = Machine::new();
        machine.set(1, 5);
        machine.run(Instruction::SetDelayTimerToReg(Reg(1)));
        machine.run(Instruction::SetSoundTimerToReg(Reg(1)));
        assert_eq!(machine.cpu.delay_timer(), 5);
        assert_eq!(machine.cpu.sound_timer(), 5);
        machine.run(Instruction::SetRegToDelayTimer(Reg(2)));
        assert_eq!(machine.v(2), 5);
    }

    #[test]
    fn delay_timer_stops_at_zero() {
        let mut machine = Machine::new();
        let mut output = RecordingOutput::new();
        machine.set(1, 5);
        machine.run(Instruction::SetDelayTimerToReg(Reg(1)));
        for _ in 0..60 {
            machine.cpu.update_timers(&mut output);
        }
        assert_eq!(machine.cpu.delay_timer(), 0);
        assert_eq!(output.beeps(), 0);
    }

    #[test]
    fn sound_timer_beeps_once_per_update() {
        let mut machine = Machine::new();
        let mut output = RecordingOutput::new();
        machine.set(1, 3);
        machine.run(Instruction::SetSoundTimerToReg(Reg(1)));
        for expected in 1..=3 {
            machine.cpu.update_timers(&mut output);
            assert_eq!(output.beeps(), expected);
        }
        machine.cpu.update_timers(&mut output);
        machine.cpu.update_timers(&mut output);
        assert_eq!(output.beeps(), 3);
        assert_eq!(machine.cpu.sound_timer(), 0);
    }

    #[test]
    fn add_to_index() {
        let mut machine = Machine::new();
        machine.set(1, 0x10);
        machine.run(Instruction::SetI(Addr(0x300)));
        machine.run(Instruction::AddRegToI(Reg(1)));
        assert_eq!(machine.cpu.index(), 0x310);
    }

    #[test_case(0 => [0, 0, 0])]
    #[test_case(7 => [0, 0, 7])]
    #[test_case(42 => [0, 4, 2])]
    #[test_case(255 => [2, 5, 5])]
    #[test_case(109 => [1, 0, 9])]
    fn bcd(value: u8) -> [u8; 3] {
        let mut machine = Machine::new();
        machine.set(4, value);
        machine.run(Instruction::SetI(Addr(0x300)));
        machine.run(Instruction::SetIToBcdOfReg(Reg(4)));
        let mut digits = [0; 3];
        digits.copy_from_slice(&machine.memory.data()[0x300..0x303]);
        digits
    }

    #[test]
    fn register_dump_and_load() {
        let mut machine = Machine::new();
        for reg in 0..NUM_REGISTERS {
            machine.set(reg, reg as u8 * 3);
        }
        machine.run(Instruction::SetI(Addr(0x400)));
        machine.run(Instruction::RegDump(Reg(3)));
        pretty_assertions::assert_eq!(&machine.memory.data()[0x400..0x405], &[0, 3, 6, 9, 0]);
        assert_eq!(machine.cpu.index(), 0x400);

        machine.memory.data_mut()[0x500..0x503].copy_from_slice(&[7, 8, 9]);
        machine.run(Instruction::SetI(Addr(0x500)));
        machine.run(Instruction::RegLoad(Reg(2)));
        pretty_assertions::assert_eq!(&machine.cpu.registers()[..4], &[7, 8, 9, 9]);
    }
}
