/// # Opcodes
///
/// A Chip-8 instruction word is 16 bits, fetched big-endian from two consecutive bytes.
/// The most significant nibble picks the family; families 0, E and F are narrowed by
/// their low byte while 5, 8 and 9 are narrowed by their low nibble.
///
/// Operands live in the remaining nibbles:
/// - `[_nnn]` an address
/// - `[__kk]` an immediate byte
/// - `[_x__]` the register Vx, or the register range V0..=Vx
/// - `[__y_]` the register Vy
/// - `[___n]` a sprite height
pub trait Opcode {
    /// The four nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// `[f___]`
    fn family(&self) -> u8;

    /// `[_x__]`
    fn x(&self) -> u8;

    /// `[__y_]`
    fn y(&self) -> u8;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__kk]`
    fn kk(&self) -> u8;

    /// `[_nnn]`
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family(), self.x(), self.y(), self.n())
    }

    fn family(&self) -> u8 {
        ((self & 0xF000) >> 12) as u8
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}

/// Joins two bytes into an instruction word, first byte high.
pub fn from_bytes(high: u8, low: u8) -> u16 {
    u16::from(high) << 8 | u16::from(low)
}
