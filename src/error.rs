use thiserror::Error;

/// Everything that can stop a Chip-8 cycle or a program load.
///
/// None of these are retried; a failed `step` leaves the machine as it was.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("unsupported opcode {opcode:#06X} at {pc:#05X}")]
    UnsupportedOpcode { opcode: u16, pc: u16 },

    #[error("memory access out of bounds at {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("stack overflow calling from {pc:#05X}")]
    StackOverflow { pc: u16 },

    #[error("stack underflow returning from {pc:#05X}")]
    StackUnderflow { pc: u16 },

    #[error("division by zero in {opcode:#06X}")]
    DivideByZero { opcode: u16 },

    #[error("program is {size} bytes but at most {max_size} fit in memory")]
    ProgramTooLarge { size: usize, max_size: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
