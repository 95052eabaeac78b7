use std::ops::Range;

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, KEY_COUNT, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT,
    SPRITE_SHEET, SPRITE_SHEET_START, STACK_DEPTH,
};
use crate::error::{Chip8Error, Result};
use crate::opcode;

/// The FrameBuffer is indexed as [y][x]; every cell is 0 or 1
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// Pressed (1) or released (0) for each of the keys 0..F
pub type Keypad = [u8; KEY_COUNT];

/// A snapshot of the Chip-8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// Stack
/// - (stack) up to 16 return addresses
/// - (sp) the number of addresses currently on the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented once per cycle while non-zero
///
/// ## Memory
/// - 4096 bytes of addressable memory
///     - 0x050..0x0A0 holds the hexadecimal sprite sheet
///     - programs are loaded from 0x200
/// - 64x32 frame buffer
///
/// ## Input
/// - the latched state of keys 0..F, replaced wholesale by the frontend every cycle
/// - FX0A leaves the PC in place (and records the register) until some key is down
///
/// ## Output
/// - `draw_flag` and `sound_flag` stay raised until the frontend clears them
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub sound_flag: bool,
    pub pressed_keys: Keypad,
    pub register_needing_key: Option<u8>,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let sheet = SPRITE_SHEET_START as usize;
        memory[sheet..sheet + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            sound_flag: false,
            pressed_keys: [0; KEY_COUNT],
            register_needing_key: None,
        }
    }

    /// A fresh state that keeps this state's memory (and so the loaded program)
    pub fn reset(&self) -> Self {
        State {
            memory: self.memory,
            ..State::new()
        }
    }

    /// Gets the instruction word the pc points at.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> Result<u16> {
        let word = self.read(usize::from(self.pc), 2)?;
        Ok(opcode::from_bytes(word[0], word[1]))
    }

    /// `len` bytes of memory starting at `address`
    pub fn read(&self, address: usize, len: usize) -> Result<&[u8]> {
        let range = span(address, len)?;
        Ok(&self.memory[range])
    }

    /// `len` writable bytes of memory starting at `address`
    pub fn write(&mut self, address: usize, len: usize) -> Result<&mut [u8]> {
        let range = span(address, len)?;
        Ok(&mut self.memory[range])
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed_keys
            .get(usize::from(key))
            .map_or(false, |&state| state != 0)
    }

    /// The lowest numbered key that is currently down
    pub fn first_pressed_key(&self) -> Option<u8> {
        (0..KEY_COUNT as u8).find(|&key| self.is_pressed(key))
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// Bounds-checks `address..address + len` against the size of memory
fn span(address: usize, len: usize) -> Result<Range<usize>> {
    let end = address + len;
    if end > MEMORY_SIZE {
        return Err(Chip8Error::MemoryOutOfBounds {
            address: address.max(MEMORY_SIZE),
        });
    }
    Ok(address..end)
}
