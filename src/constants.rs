/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// Programs are loaded here and the PC starts here
pub const PROGRAM_START: u16 = 0x200;

/// The largest program that fits between `PROGRAM_START` and the end of memory
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Where the hexadecimal glyphs of `SPRITE_SHEET` live
pub const SPRITE_SHEET_START: u16 = 0x050;

/// Each glyph is 5 rows of 8 pixels
pub const SPRITE_HEIGHT: u16 = 5;

/// Maximum call depth
pub const STACK_DEPTH: usize = 16;

/// Number of general purpose registers (V0..VF)
pub const REGISTER_COUNT: usize = 16;

/// Number of keys on the hexadecimal keypad
pub const KEY_COUNT: usize = 16;

/// VF doubles as the carry, borrow and collision flag
pub const FLAG_REGISTER: usize = 0xF;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// How many past states are kept around for rewinding by default
pub const MAX_SAVED_STATES: usize = 600;

/// FX94 reads 3-byte encoded characters from a table at this address
pub const ELF_CHARACTER_TABLE: u16 = 0x100;

/// FX94 resolves glyph nibbles through this table
pub const ELF_GLYPH_TABLE: u16 = 0x0F0;

/// FX94 assembles the resolved sprite here and points I at it
pub const ELF_SPRITE_SCRATCH: u16 = 0x1C0;

/// # Sprite Sheet
/// Hexadecimal glyphs 0..F, 5 bytes each, most significant bit on the left.
///
/// ```text
/// 0xF0 ████
/// 0x90 █  █
/// 0x90 █  █
/// 0x90 █  █
/// 0xF0 ████
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
