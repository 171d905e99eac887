use std::fmt;

/// One decoded opcode. `x`/`y` are register numbers, `nn` a byte immediate,
/// `nnn` a 12 bit address, `n` a nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Cls,
    /// 00EE
    Ret,
    /// 1NNN
    Jp { nnn: u16 },
    /// 2NNN
    Call { nnn: u16 },
    /// 3XNN
    SeByte { x: usize, nn: u8 },
    /// 4XNN
    SneByte { x: usize, nn: u8 },
    /// 5XY0
    SeReg { x: usize, y: usize },
    /// 6XNN
    LdByte { x: usize, nn: u8 },
    /// 7XNN
    AddByte { x: usize, nn: u8 },
    /// 8XY0
    LdReg { x: usize, y: usize },
    /// 8XY1
    Or { x: usize, y: usize },
    /// 8XY2
    And { x: usize, y: usize },
    /// 8XY3
    Xor { x: usize, y: usize },
    /// 8XY4
    AddReg { x: usize, y: usize },
    /// 8XY5
    Sub { x: usize, y: usize },
    /// 8XY6
    Shr { x: usize, y: usize },
    /// 8XY7
    Subn { x: usize, y: usize },
    /// 8XYE
    Shl { x: usize, y: usize },
    /// 9XY0
    SneReg { x: usize, y: usize },
    /// ANNN
    LdI { nnn: u16 },
    /// BNNN
    JpV0 { nnn: u16 },
    /// CXNN
    Rnd { x: usize, nn: u8 },
    /// DXYN
    Drw { x: usize, y: usize, n: u8 },
    /// EX9E
    Skp { x: usize },
    /// EXA1
    Sknp { x: usize },
    /// FX07
    LdVxDt { x: usize },
    /// FX0A
    LdVxK { x: usize },
    /// FX15
    LdDtVx { x: usize },
    /// FX18
    LdStVx { x: usize },
    /// FX1E
    AddI { x: usize },
    /// FX29
    LdF { x: usize },
    /// FX33
    LdB { x: usize },
    /// FX55
    LdIVx { x: usize },
    /// FX65
    LdVxI { x: usize },
    /// Anything else, including 0NNN machine calls.
    Unknown(u16),
}

impl Instruction {
    pub fn decode(opcode: u16) -> Self {
        use Instruction::*;

        let nnn = opcode & 0x0FFF;
        let nn = (opcode & 0x00FF) as u8;
        let n = (opcode & 0x000F) as u8;
        let x = ((opcode & 0x0F00) >> 8) as usize;
        let y = ((opcode & 0x00F0) >> 4) as usize;

        match opcode >> 12 {
            0x0 => match opcode {
                0x00E0 => Cls,
                0x00EE => Ret,
                _ => Unknown(opcode),
            },
            0x1 => Jp { nnn },
            0x2 => Call { nnn },
            0x3 => SeByte { x, nn },
            0x4 => SneByte { x, nn },
            // the low nibble of 5XY_ and 9XY_ isn't checked
            0x5 => SeReg { x, y },
            0x6 => LdByte { x, nn },
            0x7 => AddByte { x, nn },
            0x8 => match n {
                0x0 => LdReg { x, y },
                0x1 => Or { x, y },
                0x2 => And { x, y },
                0x3 => Xor { x, y },
                0x4 => AddReg { x, y },
                0x5 => Sub { x, y },
                0x6 => Shr { x, y },
                0x7 => Subn { x, y },
                0xE => Shl { x, y },
                _ => Unknown(opcode),
            },
            0x9 => SneReg { x, y },
            0xA => LdI { nnn },
            0xB => JpV0 { nnn },
            0xC => Rnd { x, nn },
            0xD => Drw { x, y, n },
            0xE => match nn {
                0x9E => Skp { x },
                0xA1 => Sknp { x },
                _ => Unknown(opcode),
            },
            0xF => match nn {
                0x07 => LdVxDt { x },
                0x0A => LdVxK { x },
                0x15 => LdDtVx { x },
                0x18 => LdStVx { x },
                0x1E => AddI { x },
                0x29 => LdF { x },
                0x33 => LdB { x },
                0x55 => LdIVx { x },
                0x65 => LdVxI { x },
                _ => Unknown(opcode),
            },
            _ => unreachable!("a u16 shifted right by 12 is a nibble"),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Instruction::Unknown(_))
    }
}

/// Cowgod style mnemonics: `LD V1, 0A`, `JP 2A0`, `DRW V0, V1, F`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Cls => write!(f, "CLS"),
            Ret => write!(f, "RET"),
            Jp { nnn } => write!(f, "JP {:03X}", nnn),
            Call { nnn } => write!(f, "CALL {:03X}", nnn),
            SeByte { x, nn } => write!(f, "SE V{:X}, {:02X}", x, nn),
            SneByte { x, nn } => write!(f, "SNE V{:X}, {:02X}", x, nn),
            SeReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LdByte { x, nn } => write!(f, "LD V{:X}, {:02X}", x, nn),
            AddByte { x, nn } => write!(f, "ADD V{:X}, {:02X}", x, nn),
            LdReg { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Shr { x, y } => write!(f, "SHR V{:X} (, V{:X})", x, y),
            Subn { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Shl { x, y } => write!(f, "SHL V{:X} (, V{:X})", x, y),
            SneReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LdI { nnn } => write!(f, "LD I, {:03X}", nnn),
            JpV0 { nnn } => write!(f, "JP V0, {:03X}", nnn),
            Rnd { x, nn } => write!(f, "RND V{:X}, {:02X}", x, nn),
            Drw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {:X}", x, y, n),
            Skp { x } => write!(f, "SKP V{:X}", x),
            Sknp { x } => write!(f, "SKNP V{:X}", x),
            LdVxDt { x } => write!(f, "LD V{:X}, DT", x),
            LdVxK { x } => write!(f, "LD V{:X}, K", x),
            LdDtVx { x } => write!(f, "LD DT, V{:X}", x),
            LdStVx { x } => write!(f, "LD ST, V{:X}", x),
            AddI { x } => write!(f, "ADD I, V{:X}", x),
            LdF { x } => write!(f, "LD F, V{:X}", x),
            LdB { x } => write!(f, "LD B, V{:X}", x),
            LdIVx { x } => write!(f, "LD [I], V{:X}", x),
            LdVxI { x } => write!(f, "LD V{:X}, [I]", x),
            Unknown(opcode) => write!(f, "DW {:04X}", opcode),
        }
    }
}
