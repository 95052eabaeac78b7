use std::fmt;

use rand::RngCore;

use crate::config::Config;
use crate::error::{Chip8Error, Result};
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// # Instructions
/// Every instruction word decodes to exactly one of these. Words that match no
/// known instruction decode to `Unsupported` and fail when executed.
///
/// `x` and `y` name registers, `kk` is an immediate byte, `n` a sprite height
/// and `addr` a 12-bit address.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clr,
    /// 00EE
    Rts,
    /// 1nnn
    Jump { addr: u16 },
    /// 2nnn
    Call { addr: u16 },
    /// 3xkk
    Ske { x: u8, kk: u8 },
    /// 4xkk
    Skne { x: u8, kk: u8 },
    /// 5xy0
    Skre { x: u8, y: u8 },
    /// 5xy1
    Skgt { x: u8, y: u8 },
    /// 5xy2
    Sklt { x: u8, y: u8 },
    /// 5xy3 and 9xy0
    Skrne { x: u8, y: u8 },
    /// 6xkk
    Load { x: u8, kk: u8 },
    /// 7xkk
    Add { x: u8, kk: u8 },
    /// 8xy0
    Mv { x: u8, y: u8 },
    /// 8xy1
    Or { x: u8, y: u8 },
    /// 8xy2
    And { x: u8, y: u8 },
    /// 8xy3
    Xor { x: u8, y: u8 },
    /// 8xy4
    Addr { x: u8, y: u8 },
    /// 8xy5
    Sub { x: u8, y: u8 },
    /// 8xy6
    Shr { x: u8 },
    /// 8xy7
    Subn { x: u8, y: u8 },
    /// 8xyE
    Shl { x: u8 },
    /// 9xy1
    Mul { x: u8, y: u8 },
    /// 9xy2
    Div { x: u8, y: u8 },
    /// 9xy3
    Bcd16 { x: u8, y: u8 },
    /// Annn
    Loadi { addr: u16 },
    /// Bnnn
    Jumpi { addr: u16 },
    /// Cxkk
    Rand { x: u8, kk: u8 },
    /// Dxyn
    Draw { x: u8, y: u8, n: u8 },
    /// Ex9E
    Skpr { x: u8 },
    /// ExA1
    Skup { x: u8 },
    /// Fx07
    Moved { x: u8 },
    /// Fx0A
    Keyd { x: u8 },
    /// Fx15
    Loads { x: u8 },
    /// Fx18
    Ld { x: u8 },
    /// Fx1E
    Addi { x: u8 },
    /// Fx29
    Ldspr { x: u8 },
    /// Fx33
    Bcd { x: u8 },
    /// Fx55
    Stor { x: u8 },
    /// Fx65
    Read { x: u8 },
    /// Fx94
    Ldelf { x: u8 },
    Unsupported(u16),
}

impl Instruction {
    /// Selects the Instruction for a given Opcode
    pub fn decode(op: u16) -> Self {
        use Instruction::*;

        let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.addr());
        match op.nibbles() {
            (0x0, _, 0xE, 0x0) => Clr,
            (0x0, _, 0xE, 0xE) => Rts,
            (0x1, ..) => Jump { addr },
            (0x2, ..) => Call { addr },
            (0x3, ..) => Ske { x, kk },
            (0x4, ..) => Skne { x, kk },
            (0x5, .., 0x0) => Skre { x, y },
            (0x5, .., 0x1) => Skgt { x, y },
            (0x5, .., 0x2) => Sklt { x, y },
            (0x5, .., 0x3) => Skrne { x, y },
            (0x6, ..) => Load { x, kk },
            (0x7, ..) => Add { x, kk },
            (0x8, .., 0x0) => Mv { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => Addr { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => Shr { x },
            (0x8, .., 0x7) => Subn { x, y },
            (0x8, .., 0xE) => Shl { x },
            (0x9, .., 0x0) => Skrne { x, y },
            (0x9, .., 0x1) => Mul { x, y },
            (0x9, .., 0x2) => Div { x, y },
            (0x9, .., 0x3) => Bcd16 { x, y },
            (0xA, ..) => Loadi { addr },
            (0xB, ..) => Jumpi { addr },
            (0xC, ..) => Rand { x, kk },
            (0xD, ..) => Draw { x, y, n },
            (0xE, .., 0x9, 0xE) => Skpr { x },
            (0xE, .., 0xA, 0x1) => Skup { x },
            (0xF, .., 0x0, 0x7) => Moved { x },
            (0xF, .., 0x0, 0xA) => Keyd { x },
            (0xF, .., 0x1, 0x5) => Loads { x },
            (0xF, .., 0x1, 0x8) => Ld { x },
            (0xF, .., 0x1, 0xE) => Addi { x },
            (0xF, .., 0x2, 0x9) => Ldspr { x },
            (0xF, .., 0x3, 0x3) => Bcd { x },
            (0xF, .., 0x5, 0x5) => Stor { x },
            (0xF, .., 0x6, 0x5) => Read { x },
            (0xF, .., 0x9, 0x4) => Ldelf { x },
            _ => Unsupported(op),
        }
    }

    /// Runs the instruction against `state`, returning the state that follows it.
    /// `state` itself is never modified, so a failure leaves nothing half done.
    pub fn execute(self, state: &State, config: &Config, rng: &mut dyn RngCore) -> Result<State> {
        use Instruction::*;

        match self {
            Clr => Ok(clr(state)),
            Rts => rts(state),
            Jump { addr } => Ok(jump(addr, state)),
            Call { addr } => call(addr, state),
            Ske { x, kk } => Ok(ske(x, kk, state)),
            Skne { x, kk } => Ok(skne(x, kk, state)),
            Skre { x, y } => Ok(skre(x, y, state)),
            Skgt { x, y } => Ok(skgt(x, y, state)),
            Sklt { x, y } => Ok(sklt(x, y, state)),
            Skrne { x, y } => Ok(skrne(x, y, state)),
            Load { x, kk } => Ok(load(x, kk, state)),
            Add { x, kk } => Ok(add(x, kk, state)),
            Mv { x, y } => Ok(mv(x, y, state)),
            Or { x, y } => Ok(or(x, y, state)),
            And { x, y } => Ok(and(x, y, state)),
            Xor { x, y } => Ok(xor(x, y, state)),
            Addr { x, y } => Ok(addr(x, y, state)),
            Sub { x, y } => Ok(sub(x, y, state)),
            Shr { x } => Ok(shr(x, state)),
            Subn { x, y } => Ok(subn(x, y, state)),
            Shl { x } => Ok(shl(x, config.normalized_shift_flag, state)),
            Mul { x, y } => Ok(mul(x, y, state)),
            Div { x, y } => div(x, y, state),
            Bcd16 { x, y } => bcd16(x, y, state),
            Loadi { addr } => Ok(loadi(addr, state)),
            Jumpi { addr } => Ok(jumpi(addr, state)),
            Rand { x, kk } => Ok(rand(x, kk, state, rng)),
            Draw { x, y, n } => draw(x, y, n, state),
            Skpr { x } => Ok(skpr(x, state)),
            Skup { x } => Ok(skup(x, state)),
            Moved { x } => Ok(moved(x, state)),
            Keyd { x } => Ok(keyd(x, state)),
            Loads { x } => Ok(loads(x, state)),
            Ld { x } => Ok(ld(x, state)),
            Addi { x } => Ok(addi(x, state)),
            Ldspr { x } => Ok(ldspr(x, state)),
            Bcd { x } => bcd(x, state),
            Stor { x } => stor(x, config.load_store_increments_i, state),
            Read { x } => read(x, config.load_store_increments_i, state),
            Ldelf { x } => ldelf(x, state),
            Unsupported(opcode) => Err(Chip8Error::UnsupportedOpcode {
                opcode,
                pc: state.pc,
            }),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Instruction::*;

        match *self {
            Clr => write!(f, "CLS"),
            Rts => write!(f, "RET"),
            Jump { addr } => write!(f, "JP {:#05X}", addr),
            Call { addr } => write!(f, "CALL {:#05X}", addr),
            Ske { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            Skne { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            Skre { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Skgt { x, y } => write!(f, "SGT V{:X}, V{:X}", x, y),
            Sklt { x, y } => write!(f, "SLT V{:X}, V{:X}", x, y),
            Skrne { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            Load { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            Add { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Mv { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Addr { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Shr { x } => write!(f, "SHR V{:X}", x),
            Subn { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Shl { x } => write!(f, "SHL V{:X}", x),
            Mul { x, y } => write!(f, "MUL V{:X}, V{:X}", x, y),
            Div { x, y } => write!(f, "DIV V{:X}, V{:X}", x, y),
            Bcd16 { x, y } => write!(f, "BCD V{:X}, V{:X}", x, y),
            Loadi { addr } => write!(f, "LD I, {:#05X}", addr),
            Jumpi { addr } => write!(f, "JP V0, {:#05X}", addr),
            Rand { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Skpr { x } => write!(f, "SKP V{:X}", x),
            Skup { x } => write!(f, "SKNP V{:X}", x),
            Moved { x } => write!(f, "LD V{:X}, DT", x),
            Keyd { x } => write!(f, "LD V{:X}, K", x),
            Loads { x } => write!(f, "LD DT, V{:X}", x),
            Ld { x } => write!(f, "LD ST, V{:X}", x),
            Addi { x } => write!(f, "ADD I, V{:X}", x),
            Ldspr { x } => write!(f, "LD F, V{:X}", x),
            Bcd { x } => write!(f, "LD B, V{:X}", x),
            Stor { x } => write!(f, "LD [I], V{:X}", x),
            Read { x } => write!(f, "LD V{:X}, [I]", x),
            Ldelf { x } => write!(f, "LD E, V{:X}", x),
            Unsupported(op) => write!(f, "??? {:#06X}", op),
        }
    }
}
