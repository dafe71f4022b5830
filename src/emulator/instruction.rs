use crate::emulator::opcode::Opcode;
use std::fmt;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Nop, // 0000
    ClearScreen, // 00E0
    Return, // 00EE
    Sys(Addr), // 0NNN
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN
    IfRegEqConst(Reg, Const), // 3XNN
    IfRegNeqConst(Reg, Const), // 4XNN
    IfRegEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XNN
    IncRegByConst(Reg, Const), // 7XNN
    SetRegToReg(Reg, Reg), // 8XY0
    BitwiseOr(Reg, Reg), // 8XY1
    BitwiseAnd(Reg, Reg), // 8XY2
    BitwiseXor(Reg, Reg), // 8XY3
    IncRegByReg(Reg, Reg), // 8XY4
    DecRegByReg(Reg, Reg), // 8XY5
    BitshiftRight(Reg), // 8XY6
    SetVxVyMinusVx(Reg, Reg), // 8XY7
    BitshiftLeft(Reg), // 8XYE
    IfRegNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    SetPcToV0PlusAddr(Addr), // BNNN
    SetVxRand(Reg, Const), // CXNN
    Draw(Reg, Reg, Const), // DXYN
    IfKeyEqVx(Reg), // EX9E
    IfKeyNeqVx(Reg), // EXA1
    SetRegToDelayTimer(Reg), // FX07
    SetRegToGetKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToSpriteAddrVx(Reg), // FX29
    SetIToBcdOfReg(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg), // FX65
}

impl Instruction {
    pub fn from_u16(value: u16) -> Option<Instruction> {
        Instruction::decode(Opcode(value))
    }

    pub fn from_two_u8(left: u8, right: u8) -> Option<Instruction> {
        Instruction::decode(Opcode::from_bytes(left, right))
    }

    /// Decode an opcode, or `None` if it is not part of the instruction set.
    ///
    /// The group nibble picks the instruction, except for the 0, 8, E and F groups
    /// which need a second look at the low nibble or the low byte.
    pub fn decode(opcode: Opcode) -> Option<Instruction> {
        let x = Reg(opcode.x());
        let y = Reg(opcode.y());
        let nn = Const(opcode.nn());
        let nnn = Addr(opcode.nnn());

        let instruction = match opcode.kind() {
            0x0 => match opcode.as_u16() {
                0x0000 => Instruction::Nop,
                0x00E0 => Instruction::ClearScreen,
                0x00EE => Instruction::Return,
                _ => Instruction::Sys(nnn),
            },
            0x1 => Instruction::Goto(nnn),
            0x2 => Instruction::Call(nnn),
            0x3 => Instruction::IfRegEqConst(x, nn),
            0x4 => Instruction::IfRegNeqConst(x, nn),
            0x5 => Instruction::IfRegEqReg(x, y),
            0x6 => Instruction::SetRegToConst(x, nn),
            0x7 => Instruction::IncRegByConst(x, nn),
            0x8 => match opcode.masked_low_nibble() {
                0x8000 => Instruction::SetRegToReg(x, y),
                0x8001 => Instruction::BitwiseOr(x, y),
                0x8002 => Instruction::BitwiseAnd(x, y),
                0x8003 => Instruction::BitwiseXor(x, y),
                0x8004 => Instruction::IncRegByReg(x, y),
                0x8005 => Instruction::DecRegByReg(x, y),
                0x8006 => Instruction::BitshiftRight(x),
                0x8007 => Instruction::SetVxVyMinusVx(x, y),
                0x800E => Instruction::BitshiftLeft(x),
                _ => return None,
            },
            0x9 => Instruction::IfRegNeqReg(x, y),
            0xA => Instruction::SetI(nnn),
            0xB => Instruction::SetPcToV0PlusAddr(nnn),
            0xC => Instruction::SetVxRand(x, nn),
            0xD => Instruction::Draw(x, y, Const(opcode.n())),
            0xE => match opcode.masked_low_byte() {
                0xE09E => Instruction::IfKeyEqVx(x),
                0xE0A1 => Instruction::IfKeyNeqVx(x),
                _ => return None,
            },
            0xF => match opcode.masked_low_byte() {
                0xF007 => Instruction::SetRegToDelayTimer(x),
                0xF00A => Instruction::SetRegToGetKey(x),
                0xF015 => Instruction::SetDelayTimerToReg(x),
                0xF018 => Instruction::SetSoundTimerToReg(x),
                0xF01E => Instruction::AddRegToI(x),
                0xF029 => Instruction::SetIToSpriteAddrVx(x),
                0xF033 => Instruction::SetIToBcdOfReg(x),
                0xF055 => Instruction::RegDump(x),
                0xF065 => Instruction::RegLoad(x),
                _ => return None,
            },
            _ => return None,
        };

        Some(instruction)
    }

    /// The same instruction with every operand cut down to the width of its opcode field,
    /// as decoding would have produced it. Registers become `0..16`, addresses 12 bits
    /// and sprite heights `0..16`.
    pub fn masked(self) -> Instruction {
        use Instruction::*;
        let r = |Reg(x): Reg| Reg(x & 0xF);
        let a = |Addr(nnn): Addr| Addr(nnn & 0xFFF);
        match self {
            Nop | ClearScreen | Return => self,
            Sys(nnn) => Sys(a(nnn)),
            Goto(nnn) => Goto(a(nnn)),
            Call(nnn) => Call(a(nnn)),
            IfRegEqConst(x, nn) => IfRegEqConst(r(x), nn),
            IfRegNeqConst(x, nn) => IfRegNeqConst(r(x), nn),
            IfRegEqReg(x, y) => IfRegEqReg(r(x), r(y)),
            SetRegToConst(x, nn) => SetRegToConst(r(x), nn),
            IncRegByConst(x, nn) => IncRegByConst(r(x), nn),
            SetRegToReg(x, y) => SetRegToReg(r(x), r(y)),
            BitwiseOr(x, y) => BitwiseOr(r(x), r(y)),
            BitwiseAnd(x, y) => BitwiseAnd(r(x), r(y)),
            BitwiseXor(x, y) => BitwiseXor(r(x), r(y)),
            IncRegByReg(x, y) => IncRegByReg(r(x), r(y)),
            DecRegByReg(x, y) => DecRegByReg(r(x), r(y)),
            BitshiftRight(x) => BitshiftRight(r(x)),
            SetVxVyMinusVx(x, y) => SetVxVyMinusVx(r(x), r(y)),
            BitshiftLeft(x) => BitshiftLeft(r(x)),
            IfRegNeqReg(x, y) => IfRegNeqReg(r(x), r(y)),
            SetI(nnn) => SetI(a(nnn)),
            SetPcToV0PlusAddr(nnn) => SetPcToV0PlusAddr(a(nnn)),
            SetVxRand(x, nn) => SetVxRand(r(x), nn),
            Draw(x, y, Const(n)) => Draw(r(x), r(y), Const(n & 0xF)),
            IfKeyEqVx(x) => IfKeyEqVx(r(x)),
            IfKeyNeqVx(x) => IfKeyNeqVx(r(x)),
            SetRegToDelayTimer(x) => SetRegToDelayTimer(r(x)),
            SetRegToGetKey(x) => SetRegToGetKey(r(x)),
            SetDelayTimerToReg(x) => SetDelayTimerToReg(r(x)),
            SetSoundTimerToReg(x) => SetSoundTimerToReg(r(x)),
            AddRegToI(x) => AddRegToI(r(x)),
            SetIToSpriteAddrVx(x) => SetIToSpriteAddrVx(r(x)),
            SetIToBcdOfReg(x) => SetIToBcdOfReg(r(x)),
            RegDump(x) => RegDump(r(x)),
            RegLoad(x) => RegLoad(r(x)),
        }
    }
}

/// Prints the instruction as a conventional CHIP-8 assembler mnemonic.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            Nop => write!(f, "NOP"),
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Sys(Addr(a)) => write!(f, "SYS {:#05X}", a),
            Goto(Addr(a)) => write!(f, "JP {:#05X}", a),
            Call(Addr(a)) => write!(f, "CALL {:#05X}", a),
            IfRegEqConst(Reg(x), Const(n)) => write!(f, "SE V{:X}, {:#04X}", x, n),
            IfRegNeqConst(Reg(x), Const(n)) => write!(f, "SNE V{:X}, {:#04X}", x, n),
            IfRegEqReg(Reg(x), Reg(y)) => write!(f, "SE V{:X}, V{:X}", x, y),
            SetRegToConst(Reg(x), Const(n)) => write!(f, "LD V{:X}, {:#04X}", x, n),
            IncRegByConst(Reg(x), Const(n)) => write!(f, "ADD V{:X}, {:#04X}", x, n),
            SetRegToReg(Reg(x), Reg(y)) => write!(f, "LD V{:X}, V{:X}", x, y),
            BitwiseOr(Reg(x), Reg(y)) => write!(f, "OR V{:X}, V{:X}", x, y),
            BitwiseAnd(Reg(x), Reg(y)) => write!(f, "AND V{:X}, V{:X}", x, y),
            BitwiseXor(Reg(x), Reg(y)) => write!(f, "XOR V{:X}, V{:X}", x, y),
            IncRegByReg(Reg(x), Reg(y)) => write!(f, "ADD V{:X}, V{:X}", x, y),
            DecRegByReg(Reg(x), Reg(y)) => write!(f, "SUB V{:X}, V{:X}", x, y),
            BitshiftRight(Reg(x)) => write!(f, "SHR V{:X}", x),
            SetVxVyMinusVx(Reg(x), Reg(y)) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            BitshiftLeft(Reg(x)) => write!(f, "SHL V{:X}", x),
            IfRegNeqReg(Reg(x), Reg(y)) => write!(f, "SNE V{:X}, V{:X}", x, y),
            SetI(Addr(a)) => write!(f, "LD I, {:#05X}", a),
            SetPcToV0PlusAddr(Addr(a)) => write!(f, "JP V0, {:#05X}", a),
            SetVxRand(Reg(x), Const(n)) => write!(f, "RND V{:X}, {:#04X}", x, n),
            Draw(Reg(x), Reg(y), Const(n)) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            IfKeyEqVx(Reg(x)) => write!(f, "SKP V{:X}", x),
            IfKeyNeqVx(Reg(x)) => write!(f, "SKNP V{:X}", x),
            SetRegToDelayTimer(Reg(x)) => write!(f, "LD V{:X}, DT", x),
            SetRegToGetKey(Reg(x)) => write!(f, "LD V{:X}, K", x),
            SetDelayTimerToReg(Reg(x)) => write!(f, "LD DT, V{:X}", x),
            SetSoundTimerToReg(Reg(x)) => write!(f, "LD ST, V{:X}", x),
            AddRegToI(Reg(x)) => write!(f, "ADD I, V{:X}", x),
            SetIToSpriteAddrVx(Reg(x)) => write!(f, "LD F, V{:X}", x),
            SetIToBcdOfReg(Reg(x)) => write!(f, "LD B, V{:X}", x),
            RegDump(Reg(x)) => write!(f, "LD [I], V{:X}", x),
            RegLoad(Reg(x)) => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
