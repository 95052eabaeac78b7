//! A Chip-8 interpreter core: memory, registers, timers, frame buffer and keypad,
//! advanced one fetch-decode-execute cycle at a time by some frontend.
pub use chip8::{Chip8, Cycle};
pub use config::Config;
pub use error::{Chip8Error, Result};
pub use instruction::Instruction;
pub use state::{FrameBuffer, Keypad, State};

mod chip8;
pub mod config;
pub mod constants;
pub mod error;
mod instruction;
mod opcode;
mod operations;
pub mod state;
